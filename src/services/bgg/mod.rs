//! BoardGameGeek XML API v2 client
//!
//! BGG builds some reports (collections in particular) asynchronously: the first
//! request for a report answers `202 Accepted` with an empty body, and the same
//! request has to be repeated until the report is ready and comes back `200`.
//! [`BggClient::fetch_xml`] hides that protocol behind one awaitable call and is
//! shared by every resource type; only the endpoint and the mapper differ.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::time::Duration;

pub mod client;
pub mod mapper;
pub mod transport;
pub mod xml;

pub use client::BggClient;
pub use transport::{RawResponse, ReqwestTransport, Sleeper, TokioSleeper, Transport};
pub use xml::XmlElement;

/// The BGG endpoints this service reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    User,
    Collection,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::User => "user",
            Endpoint::Collection => "collection",
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Extra query parameters passed through to BGG untouched (`own=1`, `hot=1`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Query pairs for a request, `username` first. A `username` filter is ignored.
    pub fn to_query(&self, username: &str) -> Vec<(String, String)> {
        std::iter::once(("username".to_string(), username.to_string()))
            .chain(
                self.0
                    .iter()
                    .filter(|(k, _)| k.as_str() != "username")
                    .map(|(k, v)| (k.clone(), v.clone())),
            )
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// How long to wait between queued responses, and whether to give up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub queued_delay: Duration,
    /// `None` polls until BGG returns something other than 202
    pub max_queued_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            queued_delay: Duration::from_secs(5),
            max_queued_retries: None,
        }
    }
}
