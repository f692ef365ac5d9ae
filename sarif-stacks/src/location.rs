use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::{capture::RawFrame, error::Error};

/// A SARIF `logicalLocation` object (§3.33): the function or type identity
/// of a point in a program, independent of any source artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalLocation {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    decorated_name: Option<String>,
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    properties: HashMap<String, Value>,
}

impl LogicalLocation {
    pub fn new(
        name: String,
        decorated_name: Option<String>,
        kind: String,
        fully_qualified_name: Option<String>,
        properties: HashMap<String, Value>,
    ) -> Self {
        Self {
            name,
            decorated_name,
            kind,
            fully_qualified_name,
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn fully_qualified_name(&self) -> Option<&str> {
        self.fully_qualified_name.as_deref()
    }
}

// The line number rides in the property bag: a logical location has no source
// artifact to hang a region off, but the line is still worth reporting.
impl From<&RawFrame> for LogicalLocation {
    fn from(frame: &RawFrame) -> Self {
        let fully_qualified_name = frame
            .module
            .as_ref()
            .map(|module| format!("{}.{}", module, frame.function));

        let mut properties = HashMap::new();
        if let Some(lineno) = frame.lineno {
            properties.insert("line-number".to_string(), Value::from(lineno));
        }

        LogicalLocation::new(
            frame.function.clone(),
            None,
            "function".to_string(),
            fully_qualified_name,
            properties,
        )
    }
}

/// A SARIF `artifactLocation` object (§3.4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactLocation {
    uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri_base_id: Option<String>,
}

impl ArtifactLocation {
    pub fn new(uri: String, uri_base_id: Option<String>) -> Self {
        Self { uri, uri_base_id }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// A SARIF `region` object (§3.30), reduced to the line span form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    start_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_line: Option<u32>,
}

impl Region {
    pub fn new(start_line: u32, end_line: Option<u32>) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }
}

/// A SARIF `physicalLocation` object (§3.29): a region inside a concrete
/// source artifact. Stack frames never produce one, but report-level locations
/// with a resolvable source path do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<Region>,
}

impl PhysicalLocation {
    pub fn new(artifact_location: ArtifactLocation, region: Option<Region>) -> Self {
        Self {
            artifact_location,
            region,
        }
    }

    pub fn artifact_location(&self) -> &ArtifactLocation {
        &self.artifact_location
    }
}

/// A SARIF `location` object (§3.28). The physical component is a proper
/// optional: a location that only knows what was running, and not where the
/// source lives, is still a complete location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    physical_location: Option<PhysicalLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    logical_locations: Vec<LogicalLocation>,
}

impl Location {
    pub fn new(
        physical_location: Option<PhysicalLocation>,
        logical_locations: Vec<LogicalLocation>,
    ) -> Self {
        Self {
            physical_location,
            logical_locations,
        }
    }

    // Most locations this crate builds describe a single logical point.
    pub fn logical(logical_location: LogicalLocation) -> Self {
        Self::new(None, vec![logical_location])
    }

    pub fn physical_location(&self) -> Option<&PhysicalLocation> {
        self.physical_location.as_ref()
    }

    pub fn logical_locations(&self) -> &[LogicalLocation] {
        &self.logical_locations
    }

    pub fn to_json(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::Serialization)
    }
}
