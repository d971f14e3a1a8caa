//! Success envelope for write operations
//!
//! `{<flag>: true, "message"?: ..., "data"?: ...}` where the flag key comes from
//! deployment configuration.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use inbox_common::EnvelopeStyle;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Success envelope
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    style: EnvelopeStyle,
    message: Option<&'static str>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Envelope carrying a record
    pub fn data(style: EnvelopeStyle, data: T) -> Self {
        Self {
            style,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a human-readable outcome
    #[must_use]
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Envelope<()> {
    /// Envelope with only an outcome message
    pub fn message(style: EnvelopeStyle, message: &'static str) -> Self {
        Self {
            style,
            message: Some(message),
            data: None,
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(self.style.flag_key(), &true)?;
        if let Some(message) = self.message {
            map.serialize_entry("message", message)?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
