use serde::Serialize;
use serde_json::Value;

use crate::{
    capture::{CapturedError, RawFrame},
    error::Error,
    location::{Location, LogicalLocation},
};

/// A SARIF `message` object (§3.11), reduced to the plain-text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    text: String,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A SARIF `stackFrame` object (§3.45): one entry of a captured call stack,
/// wrapping the location the frame ran at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackFrame {
    location: Location,
}

impl StackFrame {
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn to_json(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::Serialization)
    }
}

impl From<&RawFrame> for StackFrame {
    fn from(frame: &RawFrame) -> Self {
        // A raw frame's file name carries no directory information, so a
        // physical location built from it would point at an ambiguous path.
        // The frame gets a logical-only location instead.
        StackFrame::new(Location::logical(LogicalLocation::from(frame)))
    }
}

/// A SARIF `stack` object (§3.44): a message describing the error condition
/// plus the frames that were live when it was captured, innermost first.
///
/// A stack is read-only once built: the slice [`Stack::frames`] hands out
/// gives no way to add or remove frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stack {
    message: Message,
    frames: Vec<StackFrame>,
}

impl Stack {
    pub fn new(message: impl Into<String>, frames: Vec<StackFrame>) -> Self {
        Self {
            message: Message::new(message),
            frames,
        }
    }

    pub fn message(&self) -> &str {
        self.message.text()
    }

    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    pub fn to_json(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::Serialization)
    }
}

impl From<&CapturedError> for Stack {
    fn from(error: &CapturedError) -> Self {
        let frames = error.frames.iter().map(StackFrame::from).collect();
        Stack::new(error.message_text(), frames)
    }
}
