#![deny(missing_docs)]
#![deny(missing_copy_implementations)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

//! This crate implements a typed client for the REST api exposed by the
//! OctoPrint print server, covering the job, temperature, file, and
//! Cancel Object plugin endpoints.
//!
//! Control calls return `Ok` whenever an exchange completed, carrying the
//! [reqwest::StatusCode] the server answered with, even for a 4xx or 5xx,
//! so the caller decides what counts as accepted. `Err` means the request
//! never completed at the transport level. [Client::job_info] additionally
//! keeps the status when the body fails to decode; see [JobSnapshot].

mod cancelobject;
mod files;
mod job;
mod temperature;

use anyhow::Result;
pub use cancelobject::CancelObject;
pub use files::FileOrigin;
pub use job::{JobDetails, JobFile, JobInformation, JobProgress, JobSnapshot};
pub use reqwest::StatusCode;

/// Client is a handle to an OctoPrint instance.
///
/// The handle only stores connection parameters. Every request opens its
/// own transient http connection, so a Client may be built per logical
/// call without any pooling concerns.
#[derive(Clone)]
pub struct Client {
    pub(crate) url_base: String,
    pub(crate) api_key: String,
    pub(crate) credentials: Option<(String, String)>,
}

impl Client {
    /// Create a new Client for the OctoPrint server at `url_base`,
    /// authenticating with the given application or api key.
    pub fn new(url_base: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            url_base: url_base.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            credentials: None,
        })
    }

    /// Attach HTTP Basic credentials, used by installations sitting behind
    /// an authenticating reverse proxy or web tunnel.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_owned(), password.to_owned()));
        self
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let client = reqwest::Client::new();
        let mut request = client
            .request(method, format!("{}{}", self.url_base, path))
            .header("X-Api-Key", &self.api_key);
        if let Some((username, password)) = &self.credentials {
            request = request.basic_auth(username, Some(password));
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slashes() {
        let client = Client::new("http://voron.local/", "KEY").unwrap();
        assert_eq!(client.url_base, "http://voron.local");

        let client = Client::new("https://tunnels.example.com/abc//", "KEY").unwrap();
        assert_eq!(client.url_base, "https://tunnels.example.com/abc");
    }
}
