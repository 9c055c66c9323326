//! Continuation handling for the three pagination styles of the Web API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::errors::SlackError;
use crate::request::prepare_iter_request;
use crate::types::{IterRequest, Params};

/// Pagination style of a Web API method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    /// Opaque token in `response_metadata.next_cursor`.
    Cursor,
    /// 1-indexed page number bounded by `paging.pages`.
    Page,
    /// Timestamp boundary walking backward through `messages[].ts`.
    Timeline,
}

impl PaginationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cursor => "cursor",
            Self::Page => "page",
            Self::Timeline => "timeline",
        }
    }
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaginationMode {
    type Err = SlackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cursor" => Ok(Self::Cursor),
            "page" => Ok(Self::Page),
            "timeline" => Ok(Self::Timeline),
            other => Err(SlackError::InvalidIterMode(other.to_string())),
        }
    }
}

/// Extract the continuation value from a decoded response.
///
/// Returns `None` when the response reports the last page, which ends the
/// iteration and is not an error. The response shape decides the style: a
/// `response_metadata` object wins over a `paging` object, which wins over
/// the `has_more`/`latest`/`messages` triple.
#[must_use]
pub fn decode_iter_request(data: &Value) -> Option<Value> {
    if let Some(metadata) = data.get("response_metadata") {
        return match metadata.get("next_cursor") {
            Some(Value::String(cursor)) if !cursor.is_empty() => {
                Some(Value::String(cursor.clone()))
            }
            _ => None,
        };
    }

    if let Some(paging) = data.get("paging") {
        return next_page(paging);
    }

    if data.get("has_more").and_then(Value::as_bool) == Some(true) {
        if let (Some(latest), Some(messages)) =
            (data.get("latest"), data.get("messages").and_then(Value::as_array))
        {
            return messages
                .iter()
                .rev()
                .find(|message| message.get("ts").is_some_and(|ts| ts_older(ts, latest)))
                .and_then(|message| message.get("ts"))
                .cloned();
        }
    }

    None
}

fn next_page(paging: &Value) -> Option<Value> {
    let page = paging.get("page").and_then(Value::as_i64)?;
    let pages = paging.get("pages").and_then(Value::as_i64)?;
    if page < pages {
        Some(Value::from(page + 1))
    } else {
        None
    }
}

// `ts` comes over the wire as either a number or a fixed-width decimal
// string; both orders agree for well-formed values.
fn ts_older(ts: &Value, latest: &Value) -> bool {
    match (ts, latest) {
        (Value::Number(_), Value::Number(_)) => match (ts.as_f64(), latest.as_f64()) {
            (Some(lhs), Some(rhs)) => lhs < rhs,
            _ => false,
        },
        (Value::String(lhs), Value::String(rhs)) => lhs < rhs,
        _ => false,
    }
}

/// Drives repeated page fetches for one method call without doing any I/O.
///
/// The caller loop is: [`next_request`] -> send over a transport ->
/// [`decode_response`] -> [`feed`] -> repeat until [`next_request`] returns
/// `None`.
///
/// [`next_request`]: Pager::next_request
/// [`feed`]: Pager::feed
/// [`decode_response`]: crate::response::decode_response
#[derive(Debug, Clone)]
pub struct Pager {
    endpoint: String,
    params: Params,
    itermode: Option<PaginationMode>,
    iterkey: Option<String>,
    itervalue: Option<Value>,
    limit: Option<u32>,
    done: bool,
}

impl Pager {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, params: Params) -> Self {
        Self {
            endpoint: endpoint.into(),
            params,
            itermode: None,
            iterkey: None,
            itervalue: None,
            limit: None,
            done: false,
        }
    }

    /// Override the page size requested from the API.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Override the pagination mode instead of using the registry default.
    #[must_use]
    pub const fn with_mode(mut self, itermode: PaginationMode) -> Self {
        self.itermode = Some(itermode);
        self
    }

    /// Override the response key holding the paged collection.
    #[must_use]
    pub fn with_key(mut self, iterkey: impl Into<String>) -> Self {
        self.iterkey = Some(iterkey.into());
        self
    }

    /// Build the request for the next page.
    ///
    /// Returns `Ok(None)` once a fed response reported the last page.
    pub fn next_request(&self) -> Result<Option<IterRequest>, SlackError> {
        if self.done {
            return Ok(None);
        }
        let request = prepare_iter_request(
            &self.endpoint,
            &self.params,
            self.itermode,
            self.iterkey.as_deref(),
            self.itervalue.clone(),
            self.limit,
        )?;
        Ok(Some(request))
    }

    /// Record the decoded response for the previous request and advance.
    pub fn feed(&mut self, data: &Value) {
        match decode_iter_request(data) {
            Some(value) => {
                trace!(endpoint = %self.endpoint, "continuing iteration");
                self.itervalue = Some(value);
            }
            None => self.done = true,
        }
    }

    /// Whether a fed response reported the last page.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }
}
