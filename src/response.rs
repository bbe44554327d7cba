//! JSON envelope shared by every endpoint: `{ message, data, meta }`.

use serde::Serialize;
use utoipa::ToSchema;

/// Paging details of a list response. All fields are absent on single-record responses.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    /// Envelope of a failed request. `data` carries the failure details.
    pub fn failure(message: impl Into<String>, details: T) -> Self {
        Self {
            message: message.into(),
            data: Some(details),
            meta: Some(Meta::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_envelope_serializes_details() {
        let body = serde_json::to_value(ApiResponse::failure(
            "Not Found",
            serde_json::json!({ "path": "/nope" }),
        ))
        .unwrap();
        assert_eq!(body["message"], "Not Found");
        assert_eq!(body["data"]["path"], "/nope");
        assert!(body["meta"]["page"].is_null());
    }
}
