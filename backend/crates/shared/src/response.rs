//! Success response envelope

use serde::Serialize;

/// Every successful JSON response is wrapped as `{"data": …}`.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    #[inline]
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let value = serde_json::to_value(Envelope::new(serde_json::json!({"id": 1}))).unwrap();
        assert_eq!(value, serde_json::json!({"data": {"id": 1}}));
    }

    #[test]
    fn test_null_payload() {
        let value = serde_json::to_value(Envelope::new(Option::<u8>::None)).unwrap();
        assert_eq!(value, serde_json::json!({"data": null}));
    }
}
