use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;

use super::Client;

#[derive(Clone, Copy, Debug, Serialize)]
struct BedTargetCommand {
    command: &'static str,
    target: u32,
}

#[derive(Clone, Debug, Serialize)]
struct ToolTargetsCommand {
    command: &'static str,
    targets: HashMap<String, u32>,
}

impl Client {
    /// Set the heated bed's target temperature, in degrees celsius. A
    /// target of 0 turns the heater off.
    pub async fn set_bed_target(&self, target: u32) -> Result<StatusCode> {
        let command = BedTargetCommand {
            command: "target",
            target,
        };
        let response = self
            .request(Method::POST, "/api/printer/bed")
            .json(&command)
            .send()
            .await?;
        Ok(response.status())
    }

    /// Set a tool's (hotend's) target temperature, in degrees celsius.
    /// Tools are addressed by index, `tool0` being the first extruder.
    pub async fn set_tool_target(&self, tool: u32, target: u32) -> Result<StatusCode> {
        let command = ToolTargetsCommand {
            command: "target",
            targets: HashMap::from([(format!("tool{}", tool), target)]),
        };
        let response = self
            .request(Method::POST, "/api/printer/tool")
            .json(&command)
            .send()
            .await?;
        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_bed_target_wire_shape() {
        let command = BedTargetCommand {
            command: "target",
            target: 60,
        };
        assert_eq!(
            serde_json::to_value(command).unwrap(),
            json!({"command": "target", "target": 60}),
        );
    }

    #[test]
    fn test_tool_target_wire_shape() {
        let command = ToolTargetsCommand {
            command: "target",
            targets: HashMap::from([("tool1".to_owned(), 210)]),
        };
        assert_eq!(
            serde_json::to_value(command).unwrap(),
            json!({"command": "target", "targets": {"tool1": 210}}),
        );
    }
}
