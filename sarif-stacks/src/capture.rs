use backtrace::Backtrace;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

// Substituted when a captured error carries no message of its own. SARIF
// consumers require a stack's message to be present, so we never emit without one.
const FALLBACK_MESSAGE: &str = "no message given";

// We consume stack captures from a variety of runtimes, so a frame carries the
// lowest common denominator of identity. Everything beyond the function name is
// best-effort: some runtimes report no module, some strip file and line info.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>, // Declaring type or module path the function lives in
    pub function: String, // The name of the function the frame ran in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>, // Bare file name, with no directory component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>, // The line within the file, when the runtime reports it
}

// An error as captured at the failure site: whatever message the failure
// carried, plus the call stack at capture time, innermost frame first.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CapturedError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

impl CapturedError {
    pub fn new(message: Option<String>, frames: Vec<RawFrame>) -> Self {
        Self { message, frames }
    }

    // Snapshots the current thread's call stack, so an error raised deep in the
    // enclosing tool can be reported with the stack that produced it.
    pub fn capture(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            frames: current_frames(),
        }
    }

    pub fn from_json_str(payload: &str) -> Result<Self, Error> {
        serde_json::from_str(payload).map_err(Error::InvalidPayload)
    }

    // The message to report, with the fixed fallback applied when the error
    // carried none. Kept separate from the frame mapping so each half of the
    // derivation can be tested on its own.
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(FALLBACK_MESSAGE)
    }
}

// Walks the current thread's stack and resolves each frame to a RawFrame,
// innermost first. Frames whose symbols cannot be resolved are dropped, since
// a frame with no function identity has nothing to report.
pub fn current_frames() -> Vec<RawFrame> {
    let trace = Backtrace::new();
    let mut frames = Vec::new();
    for frame in trace.frames() {
        for symbol in frame.symbols() {
            let Some(name) = symbol.name() else {
                debug!("Dropping stack frame with no resolvable symbol");
                continue;
            };
            let (module, function) = split_symbol(&name.to_string());
            frames.push(RawFrame {
                module,
                function,
                filename: symbol
                    .filename()
                    .and_then(|path| path.file_name())
                    .map(|file| file.to_string_lossy().into_owned()),
                lineno: symbol.lineno(),
            });
        }
    }

    // A fresh capture starts inside the unwinder and this module; drop those
    // leading frames so the innermost frame is the caller's failure site.
    frames
        .into_iter()
        .skip_while(is_capture_machinery)
        .collect()
}

fn is_capture_machinery(frame: &RawFrame) -> bool {
    let Some(module) = frame.module.as_deref() else {
        return false;
    };
    in_module(module, "backtrace") || in_module(module, module_path!())
}

fn in_module(path: &str, root: &str) -> bool {
    path == root || (path.starts_with(root) && path[root.len()..].starts_with("::"))
}

// Demangled Rust symbols end in a ::h<16 hex digit> disambiguator, which is
// noise in a report; strip it before splitting the path from the plain name.
fn split_symbol(raw: &str) -> (Option<String>, String) {
    let name = strip_hash_suffix(raw);
    match name.rfind("::") {
        Some(idx) => (
            Some(name[..idx].to_string()),
            name[idx + 2..].to_string(),
        ),
        None => (None, name.to_string()),
    }
}

fn strip_hash_suffix(name: &str) -> &str {
    if let Some(idx) = name.rfind("::") {
        let tail = &name[idx + 2..];
        let looks_like_hash = tail.len() == 17
            && tail.starts_with('h')
            && tail[1..].chars().all(|c| c.is_ascii_hexdigit());
        if looks_like_hash {
            return &name[..idx];
        }
    }
    name
}
