//! Wire response decoding and error classification.
//!
//! The pipeline is [`decode_body`] -> [`error_for_status`] ->
//! [`error_for_api_error`]. HTTP-level failures are classified before the
//! `ok` field is inspected, since a non-2xx body may not have the expected
//! JSON shape at all.

use serde_json::Value;
use tracing::warn;

use crate::errors::SlackError;
use crate::types::{DecodedBody, Headers};

fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

fn is_json(headers: &Headers) -> bool {
    header_value(headers, "content-type").is_some_and(|value| {
        value
            .trim()
            .to_ascii_lowercase()
            .starts_with("application/json")
    })
}

/// Decode a raw body using the `content-type` header.
///
/// A declared JSON body that fails to parse is an error; anything else is
/// decoded as UTF-8 text.
pub fn decode_body(headers: &Headers, body: &[u8]) -> Result<DecodedBody, SlackError> {
    if is_json(headers) {
        Ok(DecodedBody::Json(serde_json::from_slice(body)?))
    } else {
        Ok(DecodedBody::Text(String::from_utf8(body.to_vec())?))
    }
}

/// Classify the HTTP status of a response.
///
/// 2xx passes. 429 maps to [`SlackError::RateLimited`] with the
/// `Retry-After` header parsed as plain integer seconds, falling back to 1
/// when the header is missing or unparseable. Everything else maps to
/// [`SlackError::Http`] echoing status, headers and body.
pub fn error_for_status(
    status: u16,
    headers: &Headers,
    body: &DecodedBody,
) -> Result<(), SlackError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    if status == 429 {
        let retry_after = header_value(headers, "Retry-After")
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(1);
        warn!("rate limited by the Slack API, retry after {retry_after}s");
        return Err(SlackError::RateLimited {
            retry_after,
            headers: headers.clone(),
            body: body.clone(),
        });
    }

    Err(SlackError::Http {
        status,
        headers: headers.clone(),
        body: body.clone(),
    })
}

/// Classify the application-level outcome of a decoded response.
///
/// A JSON body with `ok: true` passes; a `warning` field on success is
/// surfaced through the tracing dispatcher without failing the call. A
/// missing or false `ok` fails with the `error` field, defaulting to
/// `unknow_error` as the API spells it.
pub fn error_for_api_error(headers: &Headers, body: &DecodedBody) -> Result<(), SlackError> {
    let data = match body {
        DecodedBody::Json(data) => data,
        DecodedBody::Text(_) => return Err(api_error(headers, body)),
    };

    if data.get("ok").and_then(Value::as_bool) == Some(true) {
        if let Some(warning) = data.get("warning") {
            match warning.as_str() {
                Some(text) => warn!("Slack API WARNING: {text}"),
                None => warn!("Slack API WARNING: {warning}"),
            }
        }
        return Ok(());
    }

    Err(api_error(headers, body))
}

fn api_error(headers: &Headers, body: &DecodedBody) -> SlackError {
    let error = body
        .as_json()
        .and_then(|data| data.get("error"))
        .and_then(Value::as_str)
        .unwrap_or("unknow_error")
        .to_string();

    SlackError::Api {
        error,
        headers: headers.clone(),
        data: body.clone(),
    }
}

/// Decode and classify a full wire response, returning the parsed payload.
pub fn decode_response(status: u16, headers: &Headers, body: &[u8]) -> Result<Value, SlackError> {
    let decoded = decode_body(headers, body)?;
    error_for_status(status, headers, &decoded)?;
    error_for_api_error(headers, &decoded)?;

    match decoded {
        DecodedBody::Json(data) => Ok(data),
        // A text body never passes the api error check above.
        DecodedBody::Text(_) => Err(api_error(headers, &decoded)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers_with(name: &str, value: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert(name.to_string(), value.to_string());
        headers
    }

    #[test]
    fn test_is_json_case_insensitive() {
        assert!(is_json(&headers_with("Content-Type", "Application/JSON")));
        assert!(is_json(&headers_with(
            "content-type",
            "application/json; charset=utf-8"
        )));
        assert!(!is_json(&headers_with("content-type", "text/html")));
        assert!(!is_json(&Headers::new()));
    }

    #[test]
    fn test_decode_body_declared_json_must_parse() {
        let headers = headers_with("content-type", "application/json");
        let err = decode_body(&headers, b"not json").unwrap_err();
        assert!(matches!(err, SlackError::Json(_)));
    }

    #[test]
    fn test_decode_body_invalid_utf8() {
        let err = decode_body(&Headers::new(), &[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, SlackError::Utf8(_)));
    }

    #[test]
    fn test_retry_after_whitespace() {
        let headers = headers_with("retry-after", " 30 ");
        match error_for_status(429, &headers, &DecodedBody::Json(json!({}))) {
            Err(SlackError::RateLimited { retry_after, .. }) => assert_eq!(retry_after, 30),
            other => panic!("Expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_retry_after_negative_passes_through() {
        let headers = headers_with("Retry-After", "-5");
        match error_for_status(429, &headers, &DecodedBody::Json(json!({}))) {
            Err(SlackError::RateLimited { retry_after, .. }) => assert_eq!(retry_after, -5),
            other => panic!("Expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_status_2xx_passes() {
        let body = DecodedBody::Json(json!({}));
        assert!(error_for_status(200, &Headers::new(), &body).is_ok());
        assert!(error_for_status(204, &Headers::new(), &body).is_ok());
        assert!(error_for_status(299, &Headers::new(), &body).is_ok());
    }

    #[test]
    fn test_api_error_on_text_body() {
        let body = DecodedBody::Text("internal error".to_string());
        match error_for_api_error(&Headers::new(), &body) {
            Err(SlackError::Api { error, .. }) => assert_eq!(error, "unknow_error"),
            other => panic!("Expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_non_boolean_ok() {
        let body = DecodedBody::Json(json!({"ok": "yes"}));
        assert!(error_for_api_error(&Headers::new(), &body).is_err());
    }
}
