//! Real-time and Events API payloads.
//!
//! Events are open JSON objects rather than fixed structs; the API grows
//! fields without notice and handlers routinely need the raw shape. The
//! accessors below cover the fields the protocol itself cares about.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::SlackError;
use crate::types::Params;

/// A single incoming event as an open JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Params,
}

#[derive(Debug, Deserialize)]
struct EventsApiEnvelope {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    team_id: Option<String>,
    event: Params,
}

impl Event {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one raw RTM text frame.
    pub fn from_rtm(raw: &str) -> Result<Self, SlackError> {
        let event = serde_json::from_str(raw)?;
        Ok(event)
    }

    /// Unwrap an Events API envelope into the inner event.
    ///
    /// When a verification token or a team id is supplied, the envelope's
    /// `token` / `team_id` must match or the payload is rejected.
    pub fn from_http(
        payload: Value,
        verification_token: Option<&str>,
        team_id: Option<&str>,
    ) -> Result<Self, SlackError> {
        let envelope: EventsApiEnvelope = serde_json::from_value(payload)?;

        if let Some(expected) = verification_token {
            if envelope.token.as_deref() != Some(expected) {
                return Err(failed_verification(&envelope));
            }
        }
        if let Some(expected) = team_id {
            if envelope.team_id.as_deref() != Some(expected) {
                return Err(failed_verification(&envelope));
            }
        }

        Ok(Self {
            fields: envelope.event,
        })
    }

    /// The event's `type` tag.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    #[must_use]
    pub fn subtype(&self) -> Option<&str> {
        self.fields.get("subtype").and_then(Value::as_str)
    }

    /// Author bot id, looking through the nested `message` object that
    /// `message_changed` style events carry.
    #[must_use]
    pub fn bot_id(&self) -> Option<&str> {
        if let Some(id) = self.fields.get("bot_id").and_then(Value::as_str) {
            return Some(id);
        }
        self.fields
            .get("message")
            .and_then(|message| message.get("bot_id"))
            .and_then(Value::as_str)
    }

    /// Author user id, when the event carries one.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.fields
            .get("user")
            .or_else(|| self.fields.get("user_id"))
            .and_then(Value::as_str)
    }

    /// Whether this is a chat message (`message` type family).
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.event_type()
            .is_some_and(|event_type| event_type.starts_with("message"))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }
}

impl From<Params> for Event {
    fn from(fields: Params) -> Self {
        Self { fields }
    }
}

fn failed_verification(envelope: &EventsApiEnvelope) -> SlackError {
    SlackError::FailedVerification {
        token: envelope.token.clone(),
        team_id: envelope.team_id.clone(),
    }
}

/// A chat message, incoming or under construction.
///
/// Serializes transparently as its fields, so it can be passed directly as
/// request parameters to `chat.postMessage` and friends.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message {
    fields: Params,
}

impl Message {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message text, looking through the nested `message` object for
    /// edited-message envelopes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        if let Some(text) = self.fields.get("text").and_then(Value::as_str) {
            return Some(text);
        }
        self.fields
            .get("message")
            .and_then(|message| message.get("text"))
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn channel(&self) -> Option<&str> {
        self.fields.get("channel").and_then(Value::as_str)
    }

    #[must_use]
    pub fn subtype(&self) -> Option<&str> {
        self.fields.get("subtype").and_then(Value::as_str)
    }

    #[must_use]
    pub fn ts(&self) -> Option<&str> {
        self.fields.get("ts").and_then(Value::as_str)
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.fields
            .insert("text".to_string(), Value::String(text.into()));
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.fields
            .insert("channel".to_string(), Value::String(channel.into()));
        self
    }

    /// Reply skeleton addressed to this message's channel.
    ///
    /// Stays inside the thread when the original message lives in one.
    #[must_use]
    pub fn response(&self) -> Self {
        let mut reply = Self::new();
        if let Some(channel) = self.channel() {
            reply
                .fields
                .insert("channel".to_string(), Value::String(channel.to_string()));
        }
        if let Some(thread) = self.current_thread() {
            reply
                .fields
                .insert("thread_ts".to_string(), Value::String(thread.to_string()));
        }
        reply
    }

    /// Like [`response`], additionally rooting a new thread at this message
    /// when it is not already in one.
    ///
    /// [`response`]: Message::response
    #[must_use]
    pub fn response_in_thread(&self) -> Self {
        let mut reply = self.response();
        if !reply.fields.contains_key("thread_ts") {
            if let Some(root) = self.thread_root() {
                reply
                    .fields
                    .insert("thread_ts".to_string(), Value::String(root.to_string()));
            }
        }
        reply
    }

    fn current_thread(&self) -> Option<&str> {
        self.fields
            .get("message")
            .and_then(|message| message.get("thread_ts"))
            .and_then(Value::as_str)
            .or_else(|| self.fields.get("thread_ts").and_then(Value::as_str))
    }

    fn thread_root(&self) -> Option<&str> {
        let container = self.fields.get("message").map_or(&self.fields, |message| {
            message.as_object().unwrap_or(&self.fields)
        });
        container
            .get("thread_ts")
            .or_else(|| container.get("ts"))
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }
}

impl From<Params> for Message {
    fn from(fields: Params) -> Self {
        Self { fields }
    }
}

impl From<Event> for Message {
    fn from(event: Event) -> Self {
        Self {
            fields: event.fields,
        }
    }
}

impl From<Message> for Event {
    fn from(message: Message) -> Self {
        Self {
            fields: message.fields,
        }
    }
}

/// Whether an incoming event is housekeeping or a self-echo that must not
/// be fed back into handlers.
///
/// `reconnect_url` events are internal bookkeeping; a message authored by
/// the bot's own `bot_id` is an echo of its own output.
#[must_use]
pub fn discard_event(event: &Event, bot_id: &str) -> bool {
    if event.event_type() == Some("reconnect_url") {
        return true;
    }

    if event.is_message() && event.bot_id() == Some(bot_id) {
        debug!(bot_id, "discarding self-echo");
        return true;
    }

    false
}

/// Whether the event mandates tearing down and re-opening the RTM socket.
#[must_use]
pub fn needs_reconnect(event: &Event) -> bool {
    matches!(
        event.event_type(),
        Some("goodbye" | "team_migration_started")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> Event {
        match value {
            Value::Object(fields) => Event::from(fields),
            other => panic!("Expected an object, got {other}"),
        }
    }

    #[test]
    fn test_from_rtm() {
        let event = Event::from_rtm(r#"{"type": "message", "text": "hi"}"#).unwrap();
        assert_eq!(event.event_type(), Some("message"));
        assert!(event.is_message());
    }

    #[test]
    fn test_from_rtm_rejects_non_object() {
        assert!(Event::from_rtm("42").is_err());
        assert!(Event::from_rtm("not json").is_err());
    }

    #[test]
    fn test_from_http_unwraps_envelope() {
        let payload = json!({
            "token": "sekret",
            "team_id": "T000",
            "event": {"type": "reaction_added", "user": "U123"},
        });
        let event = Event::from_http(payload, None, None).unwrap();
        assert_eq!(event.event_type(), Some("reaction_added"));
        assert_eq!(event.user_id(), Some("U123"));
    }

    #[test]
    fn test_from_http_verifies_token() {
        let payload = json!({"token": "sekret", "team_id": "T000", "event": {"type": "x"}});
        assert!(Event::from_http(payload.clone(), Some("sekret"), None).is_ok());

        match Event::from_http(payload, Some("other"), None) {
            Err(SlackError::FailedVerification { token, .. }) => {
                assert_eq!(token.as_deref(), Some("sekret"));
            }
            other => panic!("Expected FailedVerification, got {other:?}"),
        }
    }

    #[test]
    fn test_from_http_verifies_team() {
        let payload = json!({"token": "sekret", "team_id": "T000", "event": {"type": "x"}});
        assert!(Event::from_http(payload.clone(), Some("sekret"), Some("T000")).is_ok());
        assert!(Event::from_http(payload, None, Some("T999")).is_err());
    }

    #[test]
    fn test_discard_event() {
        for value in [
            json!({"type": "reconnect_url"}),
            json!({"type": "message", "bot_id": "B1234"}),
            json!({"type": "message", "message": {"bot_id": "B1234"}}),
        ] {
            assert!(discard_event(&event(value), "B1234"));
        }

        for value in [
            json!({"type": "channel_joined"}),
            json!({"type": "message", "bot_id": "B5555"}),
            json!({"type": "message", "user_id": "U5555"}),
            json!({"type": "message", "message": {"bot_id": "B5555"}}),
        ] {
            assert!(!discard_event(&event(value), "B1234"));
        }
    }

    #[test]
    fn test_needs_reconnect() {
        for value in [
            json!({"type": "channel_joined"}),
            json!({"type": "message", "bot_id": "B5555"}),
        ] {
            assert!(!needs_reconnect(&event(value)));
        }

        for value in [
            json!({"type": "goodbye"}),
            json!({"type": "team_migration_started"}),
        ] {
            assert!(needs_reconnect(&event(value)));
        }
    }

    #[test]
    fn test_message_response_plain() {
        let message: Message = event(json!({
            "channel": "C111",
            "ts": "1000.000100",
            "text": "hello",
        }))
        .into();

        let reply = message.response();
        assert_eq!(reply.channel(), Some("C111"));
        assert_eq!(reply.get("thread_ts"), None);
    }

    #[test]
    fn test_message_response_inherits_thread() {
        let message: Message = event(json!({
            "channel": "C111",
            "ts": "1000.000200",
            "thread_ts": "1000.000100",
        }))
        .into();

        let reply = message.response();
        assert_eq!(reply.get("thread_ts"), Some(&json!("1000.000100")));
    }

    #[test]
    fn test_message_response_in_thread_roots_at_ts() {
        let message: Message = event(json!({
            "channel": "C111",
            "ts": "1000.000100",
        }))
        .into();

        let reply = message.response_in_thread();
        assert_eq!(reply.get("thread_ts"), Some(&json!("1000.000100")));
    }

    #[test]
    fn test_message_response_nested_envelope() {
        let message: Message = event(json!({
            "channel": "C111",
            "message": {"ts": "1000.000300", "thread_ts": "1000.000100"},
        }))
        .into();

        assert_eq!(message.response().get("thread_ts"), Some(&json!("1000.000100")));
    }

    #[test]
    fn test_message_text_nested() {
        let message: Message = event(json!({
            "message": {"text": "edited text"},
        }))
        .into();
        assert_eq!(message.text(), Some("edited text"));
    }

    #[test]
    fn test_message_serializes_as_params() {
        let message = Message::new().with_channel("C111").with_text("hello");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"channel": "C111", "text": "hello"}));
    }
}
