//! Deprecation headers
//!
//! Marks responses from deprecated endpoints. The endpoint keeps working;
//! only headers change.

use axum::http::{header::HeaderName, HeaderValue, Response};

pub const DEPRECATION: HeaderName = HeaderName::from_static("deprecation");
pub const DEPRECATION_NOTICE: HeaderName = HeaderName::from_static("x-deprecation-notice");
pub const SUNSET: HeaderName = HeaderName::from_static("sunset");

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDeprecation {
    #[error("Deprecation notice cannot be sent as a header value: {0:?}")]
    Message(String),

    #[error("Sunset version cannot be sent as a header value: {0:?}")]
    Sunset(String),
}

/// Header values announced by a deprecated endpoint.
///
/// Values are encoded up front so annotating a response cannot fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deprecation {
    message: Option<HeaderValue>,
    sunset: Option<HeaderValue>,
}

impl Deprecation {
    pub fn new(message: Option<&str>, sunset_version: Option<&str>) -> Result<Self, InvalidDeprecation> {
        let message = message
            .map(|m| {
                HeaderValue::from_bytes(m.as_bytes())
                    .map_err(|_| InvalidDeprecation::Message(m.to_string()))
            })
            .transpose()?;

        let sunset = sunset_version
            .map(|v| {
                HeaderValue::from_str(&format!("API {v}"))
                    .map_err(|_| InvalidDeprecation::Sunset(v.to_string()))
            })
            .transpose()?;

        Ok(Self { message, sunset })
    }

    pub fn message(&self) -> Option<&HeaderValue> {
        self.message.as_ref()
    }

    pub fn sunset(&self) -> Option<&HeaderValue> {
        self.sunset.as_ref()
    }
}

/// Adds the deprecation headers to `response`, leaving status and body untouched.
///
/// Existing values are replaced, so annotating twice with the same
/// [`Deprecation`] yields the same headers as annotating once.
pub fn annotate<B>(mut response: Response<B>, deprecation: &Deprecation) -> Response<B> {
    let headers = response.headers_mut();
    headers.insert(DEPRECATION, HeaderValue::from_static("true"));

    if let Some(message) = &deprecation.message {
        headers.insert(DEPRECATION_NOTICE, message.clone());
    }
    if let Some(sunset) = &deprecation.sunset {
        headers.insert(SUNSET, sunset.clone());
    }

    response
}
