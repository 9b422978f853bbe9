//! HTTP-style request and response envelopes.

use std::collections::BTreeMap;

use base64::Engine;
use serde::Serialize;
use serde_json::Value;

use crate::error::RenderError;
use crate::model::ErModel;
use crate::params::OutputFormat;

/// Extract and validate the ER model carried in a request envelope.
///
/// The `body` may be a JSON string (HTTP API proxy events) or an inline object.
///
/// # Errors
///
/// Returns [`RenderError::MissingBody`] when there is no `body`,
/// [`RenderError::InvalidPayload`] when the body is empty, unparsable or has no
/// `entities`, and [`RenderError::InvalidModel`] when `entities` is present but
/// malformed.
pub fn parse_request(event: &Value) -> Result<ErModel, RenderError> {
    let body = event.get("body").ok_or(RenderError::MissingBody)?;

    let data = match body {
        Value::String(raw) => {
            serde_json::from_str::<Value>(raw).map_err(|_| RenderError::InvalidPayload)?
        }
        other => other.clone(),
    };

    if is_empty(&data) || data.get("entities").is_none() || !data.is_object() {
        return Err(RenderError::InvalidPayload);
    }

    serde_json::from_value(data).map_err(|e| RenderError::InvalidModel(e.to_string()))
}

/// Whether a JSON value counts as "nothing was sent".
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Response envelope understood by API Gateway proxy integrations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers, omitted on error responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Base64 image on success, `{"error": ...}` JSON otherwise.
    pub body: String,
    /// Set on success so the gateway decodes the body back to bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_base64_encoded: Option<bool>,
}

impl ResponseEnvelope {
    /// Build a 200 response carrying the encoded image.
    #[must_use]
    pub fn image(data: &[u8], format: OutputFormat, filename: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), format.content_type().to_string());
        headers.insert(
            "Content-Disposition".to_string(),
            format!("attachment; filename=\"{filename}.{}\"", format.extension()),
        );
        Self {
            status_code: 200,
            headers: Some(headers),
            body: base64::engine::general_purpose::STANDARD.encode(data),
            is_base64_encoded: Some(true),
        }
    }

    /// Build an error response with the error's status code and message.
    #[must_use]
    pub fn error(err: &RenderError) -> Self {
        Self {
            status_code: err.status_code(),
            headers: None,
            body: serde_json::json!({ "error": err.to_string() }).to_string(),
            is_base64_encoded: None,
        }
    }

    /// The `error` message of an error response, if any.
    #[cfg(test)]
    pub fn error_message(&self) -> Option<String> {
        let parsed: Value = serde_json::from_str(&self.body).ok()?;
        parsed.get("error")?.as_str().map(str::to_string)
    }
}
