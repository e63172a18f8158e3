/// Success envelope
///
/// Every successful response has the shape
///
/// ```json
/// { "status": "success", "message": "Login successful", "data": { ... } }
/// ```
///
/// `data` is omitted when there is nothing to return.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Successful API response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    status_code: StatusCode,

    status: &'static str,

    message: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            status: "success",
            message,
            data: Some(data),
        }
    }

    /// 201 with a payload
    pub fn created(message: &'static str, data: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    /// 200 without a payload
    pub fn message(message: &'static str) -> Self {
        Self {
            status_code: StatusCode::OK,
            status: "success",
            message,
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::ok("Done", 42)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Done");
        assert_eq!(json["data"], 42);
        assert!(json.get("statusCode").is_none());
    }

    #[test]
    fn test_message_only_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Done")).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiResponse::created("Made", ()).into_response().status(),
            StatusCode::CREATED
        );
        assert_eq!(
            ApiResponse::message("Done").into_response().status(),
            StatusCode::OK
        );
    }
}
