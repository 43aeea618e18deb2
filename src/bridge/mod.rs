//! The validated message layer between the host and its display surfaces.
//!
//! Values never cross by reference: the sender encodes to JSON and the
//! receiver decodes through one of the `accept_*` functions, which drop
//! anything outside the allow-list without raising an error on either side.

pub mod listeners;
pub mod protocol;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use listeners::{Disposer, HostEventListeners};
pub use protocol::{DisplayMessage, HostChannel, HostEvent, HostRequest, Invocation, Reply};

/// Serialize a bridge message for transport.
pub fn encode<T: Serialize>(message: &T) -> String {
    serde_json::to_string(message).unwrap_or_else(|e| {
        tracing::error!(error = %e, "bridge message failed to serialize");
        String::new()
    })
}

fn accept<T: DeserializeOwned>(direction: &str, raw: &str) -> Option<T> {
    match serde_json::from_str::<T>(raw) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::debug!(direction, error = %e, "dropping message outside the allow-list");
            None
        }
    }
}

/// Host side: decode a fire-and-forget message from a surface.
pub fn accept_send(raw: &str) -> Option<DisplayMessage> {
    accept("display->host", raw)
}

/// Host side: decode a request from a surface.
pub fn accept_invoke(raw: &str) -> Option<Invocation> {
    accept("display->host invoke", raw)
}

/// Surface side: decode an event pushed by the host.
pub fn accept_event(raw: &str) -> Option<HostEvent> {
    accept("host->display", raw)
}

/// Surface side: decode the host's answer to an invocation.
pub fn accept_reply(raw: &str) -> Option<Reply> {
    accept("host->display reply", raw)
}
