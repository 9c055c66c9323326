//! Handler lookup tables for incoming events.
//!
//! Routers only store and yield caller-supplied handler values; invoking
//! them, and whatever concurrency that involves, stays with the embedding
//! application.

use std::collections::HashMap;

use crate::events::{Event, Message};

/// Wildcard event type matching everything.
pub const ANY: &str = "*";

/// Handler lookup for real-time events, keyed by event type.
#[derive(Debug, Clone)]
pub struct EventRouter<H> {
    routes: HashMap<String, Vec<H>>,
}

impl<H> EventRouter<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a handler for an event type; [`ANY`] registers a wildcard.
    pub fn register(&mut self, event_type: impl Into<String>, handler: H) {
        self.routes.entry(event_type.into()).or_default().push(handler);
    }

    /// Handlers for the event's type, in registration order, followed by
    /// wildcard handlers.
    pub fn dispatch<'a>(&'a self, event: &Event) -> impl Iterator<Item = &'a H> + 'a {
        let typed = event
            .event_type()
            .filter(|event_type| *event_type != ANY)
            .and_then(|event_type| self.routes.get(event_type));
        let wildcard = self.routes.get(ANY);
        typed.into_iter().flatten().chain(wildcard.into_iter().flatten())
    }
}

impl<H> Default for EventRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Matching criteria for one message route.
///
/// The prefix matches against the start of the message text, command
/// style. An unset channel or subtype matches any message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    prefix: String,
    channel: Option<String>,
    subtype: Option<String>,
}

impl Route {
    #[must_use]
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            channel: None,
            subtype: None,
        }
    }

    /// Restrict the route to one channel.
    #[must_use]
    pub fn in_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Restrict the route to one message subtype.
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    fn matches(&self, message: &Message) -> bool {
        if !message
            .text()
            .unwrap_or_default()
            .starts_with(&self.prefix)
        {
            return false;
        }
        if let Some(channel) = &self.channel {
            if message.channel() != Some(channel.as_str()) {
                return false;
            }
        }
        match &self.subtype {
            Some(subtype) => message.subtype() == Some(subtype.as_str()),
            None => true,
        }
    }
}

/// Handler lookup for chat messages, matched on text prefix plus optional
/// channel and subtype filters.
#[derive(Debug, Clone)]
pub struct MessageRouter<H> {
    routes: Vec<(Route, H)>,
}

impl<H> MessageRouter<H> {
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn register(&mut self, route: Route, handler: H) {
        self.routes.push((route, handler));
    }

    /// Handlers whose route matches the message, in registration order.
    ///
    /// Matching happens up front; the yielded references borrow only the
    /// router, not the message.
    pub fn dispatch<'a>(&'a self, message: &Message) -> impl Iterator<Item = &'a H> + 'a {
        let matched: Vec<&'a H> = self
            .routes
            .iter()
            .filter(|(route, _)| route.matches(message))
            .map(|(_, handler)| handler)
            .collect();
        matched.into_iter()
    }
}

impl<H> Default for MessageRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}
