use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::pagination::PaginationMode;

/// Request parameters as an insertion-ordered JSON object.
pub type Params = Map<String, Value>;

/// Wire headers, name to value.
pub type Headers = HashMap<String, String>;

/// A wire-ready request produced by [`prepare_request`].
///
/// [`prepare_request`]: crate::request::prepare_request
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub url: String,
    pub body: RequestBody,
    pub headers: Headers,
}

/// Body shape expected by the target endpoint class.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured fields, form-encoded by the transport.
    Form(Params),
    /// Pre-serialized JSON string, expected by webhook URLs.
    Json(String),
}

impl RequestBody {
    #[must_use]
    pub fn as_form(&self) -> Option<&Params> {
        match self {
            Self::Form(params) => Some(params),
            Self::Json(_) => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&str> {
        match self {
            Self::Form(_) => None,
            Self::Json(raw) => Some(raw),
        }
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    Json(Value),
    Text(String),
}

impl DecodedBody {
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Parameters plus resolved pagination coordinates for one page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct IterRequest {
    pub params: Params,
    pub itermode: PaginationMode,
    pub iterkey: String,
}
