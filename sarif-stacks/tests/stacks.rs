use std::str::FromStr;

use assert_json_diff::{assert_json_eq, assert_json_include};
use sarif_stacks::{CapturedError, Stack};
use serde_json::{json, Value};

#[test]
fn it_formats_a_captured_payload_end_to_end() {
    let raw: &'static str = include_str!("./static/captured_error.json");
    let error: CapturedError = serde_json::from_str(raw).unwrap();

    let stack = Stack::from(&error);

    assert_json_eq!(
        stack.to_json().unwrap(),
        json!({
            "message": {
                "text": "Unable to read class file metadata for com.example.store.OrderIndex"
            },
            "frames": [
                {
                    "location": {
                        "logicalLocations": [{
                            "name": "readMembers",
                            "kind": "function",
                            "fullyQualifiedName": "com.example.engine.ClassfileReader.readMembers",
                            "properties": {"line-number": 318}
                        }]
                    }
                },
                {
                    "location": {
                        "logicalLocations": [{
                            "name": "expand",
                            "kind": "function",
                            "fullyQualifiedName": "com.example.engine.TypeGraph.expand",
                            "properties": {"line-number": 77}
                        }]
                    }
                },
                {
                    "location": {
                        "logicalLocations": [{
                            "name": "run",
                            "kind": "function",
                            "fullyQualifiedName": "com.example.engine.AnalysisDriver.run"
                        }]
                    }
                }
            ]
        })
    );
}

#[test]
fn serde_passthrough() {
    let raw: &'static str = include_str!("./static/captured_error.json");
    let before = Value::from_str(raw).unwrap();

    let parsed: CapturedError = serde_json::from_str(raw).unwrap();
    let after = serde_json::to_value(&parsed).unwrap();

    assert_eq!(before, after);
}

#[test]
fn it_reports_every_frame_of_a_fresh_capture() {
    let error = CapturedError::capture("walker fell over");
    let stack = Stack::from(&error);

    assert_eq!(stack.frames().len(), error.frames.len());
    assert_json_include!(
        actual: stack.to_json().unwrap(),
        expected: json!({
            "message": {"text": "walker fell over"}
        })
    );
}
