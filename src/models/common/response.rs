use serde::{Deserialize, Serialize};

use crate::models::ErrorCode;
use crate::models::common::PaginationInfo;

/// Uniform API envelope: `{success, message, data?, error?, pagination?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            pagination: None,
        }
    }

    pub fn success_paginated(
        data: T,
        pagination: PaginationInfo,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            pagination: Some(pagination),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
            error: Some(code),
            pagination: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            pagination: None,
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(code),
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(42, "ok");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_error_envelope_shape() {
        let resp = ApiResponse::error_empty(ErrorCode::NotFound, "missing");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "NOT_FOUND");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let resp = ApiResponse::success_paginated(
            vec![1, 2, 3],
            PaginationInfo {
                page: 1,
                page_size: 10,
                total: 3,
                total_pages: 1,
            },
            "ok",
        );
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["pagination"]["total"], 3);
    }
}
