use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use super::Client;

/// One printable object of the current job, as reported by the Cancel
/// Object plugin.
///
/// Every field is required; a payload missing any of them fails to decode
/// rather than producing a partial record.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CancelObject {
    /// Identifier used to cancel this object.
    pub id: i64,

    /// Name of the object, as labeled in the sliced gcode.
    pub object: String,

    /// Whether this object has already been cancelled.
    pub cancelled: bool,

    /// Whether this object is the one being printed right now.
    pub active: bool,

    /// Whether the plugin marks this entry as ignored (helper geometry
    /// such as brims and skirts that cannot be cancelled on their own).
    pub ignore: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct ObjectListResponse {
    list: Vec<CancelObject>,
}

#[derive(Clone, Copy, Debug, Serialize)]
struct ObjectListCommand {
    command: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
struct CancelCommand {
    command: &'static str,
    cancelled: i64,
}

impl Client {
    /// List the objects of the current job known to the Cancel Object
    /// plugin. Fails if the plugin is not installed on the server.
    pub async fn cancel_object_list(&self) -> Result<Vec<CancelObject>> {
        let response: ObjectListResponse = self
            .request(Method::POST, "/api/plugin/cancelobject")
            .json(&ObjectListCommand { command: "objlist" })
            .send()
            .await?
            .json()
            .await?;
        Ok(response.list)
    }

    /// Ask the Cancel Object plugin to skip the object with the given id
    /// for the remainder of the job.
    pub async fn cancel_object(&self, id: i64) -> Result<StatusCode> {
        let response = self
            .request(Method::POST, "/api/plugin/cancelobject")
            .json(&CancelCommand {
                command: "cancel",
                cancelled: id,
            })
            .send()
            .await?;
        Ok(response.status())
    }
}
