//! Sans-I/O protocol core for the Slack Web and Real Time Messaging APIs.
//!
//! Everything here is a pure function of its inputs: build a wire request
//! with [`prepare_request`] or [`prepare_iter_request`], hand it to any
//! transport, then feed the raw `(status, headers, bytes)` response into
//! [`decode_response`]. Incoming RTM frames go through [`Event::from_rtm`]
//! and the classification helpers. No HTTP or WebSocket client is included
//! and none is assumed.

pub mod config;
pub mod errors;
pub mod events;
pub mod methods;
pub mod pagination;
pub mod request;
pub mod response;
pub mod routing;
pub mod types;

pub use config::{ConfigError, Token};
pub use errors::SlackError;
pub use events::{discard_event, needs_reconnect, Event, Message};
pub use pagination::{decode_iter_request, Pager, PaginationMode};
pub use request::{find_url, prepare_iter_request, prepare_request, DEFAULT_PAGE_SIZE};
pub use response::{decode_body, decode_response, error_for_api_error, error_for_status};
pub use routing::{EventRouter, MessageRouter, Route};
pub use types::{
    DecodedBody, Headers, IterRequest, Params, PreparedRequest, RequestBody,
};
