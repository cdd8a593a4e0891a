use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Success envelope: `{"success": true, "message"?, ...payload}`.
///
/// The payload is flattened into the envelope, so a struct payload adds
/// its fields and a [`Named`] payload adds a single named field.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a message to an existing body.
    pub fn and_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> ApiResponse<Named<T>> {
    /// `{"success": true, "<key>": value}`
    pub fn named(key: &'static str, value: T) -> Self {
        Self::success(Named::new(key, value))
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

/// A value serialized as a one-entry map under `key`.
#[derive(Debug)]
pub struct Named<T> {
    key: &'static str,
    value: T,
}

impl<T> Named<T> {
    pub fn new(key: &'static str, value: T) -> Self {
        Self { key, value }
    }
}

impl<T: Serialize> Serialize for Named<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

/// 201 with the standard envelope.
pub struct Created<T: Serialize>(pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
