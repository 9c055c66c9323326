//! Wire request assembly for Web API and webhook endpoints.

use serde::Serialize;
use serde_json::Value;
use tracing::{instrument, trace};

use crate::errors::SlackError;
use crate::methods::{find_iteration, HOOK_URL, ROOT_URL};
use crate::pagination::PaginationMode;
use crate::types::{Headers, IterRequest, Params, PreparedRequest, RequestBody};

/// Page size requested when the caller does not override it.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Resolve the wire URL for an endpoint identifier.
///
/// Full Web API and webhook URLs pass through verbatim, anything else is
/// treated as a method name under the Web API base.
#[must_use]
pub fn find_url(endpoint: &str) -> String {
    if endpoint.starts_with(ROOT_URL) || endpoint.starts_with(HOOK_URL) {
        endpoint.to_string()
    } else {
        format!("{ROOT_URL}{endpoint}")
    }
}

fn serialize_params<P>(params: &P) -> Result<Params, SlackError>
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(params)? {
        Value::Object(map) => Ok(map),
        other => Err(SlackError::InvalidParameters(format!(
            "request parameters must serialize to a JSON object, got {other}"
        ))),
    }
}

/// Build the URL, body and headers for one API call.
///
/// The token is injected into the body under the `token` key, overwriting
/// any caller-supplied value. Webhook URLs get a pre-serialized JSON body,
/// every other endpoint a structured one for the transport to form-encode.
/// Per-call headers win over global headers on collision.
#[instrument(skip(params, headers, global_headers, token))]
pub fn prepare_request<P>(
    endpoint: &str,
    params: &P,
    headers: &Headers,
    global_headers: &Headers,
    token: &str,
) -> Result<PreparedRequest, SlackError>
where
    P: Serialize + ?Sized,
{
    let url = find_url(endpoint);

    let mut body = serialize_params(params)?;
    body.insert("token".to_string(), Value::String(token.to_string()));
    let body = if url.starts_with(HOOK_URL) {
        RequestBody::Json(serde_json::to_string(&body)?)
    } else {
        RequestBody::Form(body)
    };

    let mut merged = headers.clone();
    for (name, value) in global_headers {
        if !merged.contains_key(name) {
            merged.insert(name.clone(), value.clone());
        }
    }

    trace!(%url, "prepared request");
    Ok(PreparedRequest {
        url,
        body,
        headers: merged,
    })
}

/// Build the parameters for the next page of an iterating method call.
///
/// Resolves the pagination mode and response key through the method
/// registry, then injects the page size and the continuation value from the
/// previous response. The page size always overwrites a params-carried
/// value; `limit` keeps the caller's override.
#[instrument(skip(params, itervalue))]
pub fn prepare_iter_request<P>(
    endpoint: &str,
    params: &P,
    itermode: Option<PaginationMode>,
    iterkey: Option<&str>,
    itervalue: Option<Value>,
    limit: Option<u32>,
) -> Result<IterRequest, SlackError>
where
    P: Serialize + ?Sized,
{
    let (itermode, iterkey) = find_iteration(endpoint, itermode, iterkey)?;
    let mut params = serialize_params(params)?;
    let page_size = Value::from(limit.unwrap_or(DEFAULT_PAGE_SIZE));

    match itermode {
        PaginationMode::Cursor => {
            params.insert("limit".to_string(), page_size);
            if let Some(cursor) = itervalue {
                params.insert("cursor".to_string(), cursor);
            }
        }
        PaginationMode::Page => {
            params.insert("count".to_string(), page_size);
            if let Some(page) = itervalue {
                params.insert("page".to_string(), page);
            }
        }
        PaginationMode::Timeline => {
            params.insert("count".to_string(), page_size);
            if let Some(latest) = itervalue {
                params.insert("latest".to_string(), latest);
            }
        }
    }

    Ok(IterRequest {
        params,
        itermode,
        iterkey,
    })
}
