use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rfbridge_core::BridgeError;

// ---------------------------------------------------------------------------
// Internal sentinel for rejected transmissions
// ---------------------------------------------------------------------------

/// Private sentinel error type used to carry an `Outcome::SendFailed` through
/// the `anyhow::Error` chain without adding an error variant to the core's
/// outcome taxonomy.
#[derive(Debug)]
struct SendFailedError(String);

impl std::fmt::Display for SendFailedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SendFailedError {}

// ---------------------------------------------------------------------------
// AppError — unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 502 Bad Gateway error for a rejected transmission.
    pub fn send_failed(command: impl std::fmt::Display) -> Self {
        Self(SendFailedError(format!("failed to send command '{command}' over the link")).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(s) = self.0.downcast_ref::<SendFailedError>() {
            let body = serde_json::json!({ "error": s.0.clone() });
            return (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<BridgeError>() {
            match e {
                BridgeError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
                BridgeError::PayloadTooLarge { .. }
                | BridgeError::ServoAngleOutOfRange(_)
                | BridgeError::SleepMinutesOutOfRange(_)
                | BridgeError::UnknownCommand(_) => StatusCode::BAD_REQUEST,
                BridgeError::Link(_)
                | BridgeError::ConfigNotFound(_)
                | BridgeError::Io(_)
                | BridgeError::Yaml(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn not_initialized_maps_to_503() {
        let err = AppError(BridgeError::NotInitialized.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn servo_range_maps_to_400() {
        let err = AppError(BridgeError::ServoAngleOutOfRange(200).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn sleep_range_maps_to_400() {
        let err = AppError(BridgeError::SleepMinutesOutOfRange(1000).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn payload_too_large_maps_to_400() {
        let err = AppError(BridgeError::PayloadTooLarge { len: 40, max: 32 }.into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn link_error_maps_to_500() {
        let err = AppError(BridgeError::Link("spi bus gone".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn send_failed_maps_to_502() {
        let err = AppError::send_failed("off");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn non_bridge_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("something unexpected"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_is_json_error_object() {
        let err = AppError(BridgeError::NotInitialized.into());
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(
            ct.to_str().unwrap().contains("application/json"),
            "expected JSON content type, got {:?}",
            ct
        );
    }
}
