use anyhow::Result;
use reqwest::{Method, StatusCode};

use super::Client;

/// Storage location of a file known to OctoPrint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOrigin {
    /// File stored on the server itself.
    Local,

    /// File stored on the printer's sd card.
    Sdcard,
}

impl FileOrigin {
    fn as_str(self) -> &'static str {
        match self {
            FileOrigin::Local => "local",
            FileOrigin::Sdcard => "sdcard",
        }
    }
}

impl std::fmt::Display for FileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileOrigin {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(FileOrigin::Local),
            "sdcard" => Ok(FileOrigin::Sdcard),
            other => anyhow::bail!("unknown file origin {:?}, expected local or sdcard", other),
        }
    }
}

impl Client {
    /// Delete a file from the given storage origin.
    ///
    /// A 409 status means the file is currently being printed and was left
    /// alone; it is reported as an ordinary status, not an error.
    pub async fn delete_file(&self, origin: FileOrigin, path: &str) -> Result<StatusCode> {
        let path = path.trim_start_matches('/');
        let response = self
            .request(Method::DELETE, &format!("/api/files/{}/{}", origin, path))
            .send()
            .await?;
        Ok(response.status())
    }
}
