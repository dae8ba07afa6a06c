//! The `{ success, data?, message?, error? }` envelope every API response uses.

use crate::error::{ApiError, ApiResult};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// A successful response: status code plus envelope.
#[derive(Debug)]
pub struct ApiReply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl ApiReply {
    pub fn data<T: Serialize>(data: &T) -> ApiResult<Self> {
        Ok(Self {
            status: StatusCode::OK,
            envelope: Envelope {
                success: true,
                data: Some(to_value(data)?),
                message: None,
                error: None,
            },
        })
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Envelope {
                success: true,
                data: None,
                message: Some(message.into()),
                error: None,
            },
        }
    }

    pub fn created<T: Serialize>(message: impl Into<String>, data: &T) -> ApiResult<Self> {
        Ok(Self::message(message)
            .with_data(data)?
            .with_status(StatusCode::CREATED))
    }

    pub fn with_data<T: Serialize>(mut self, data: &T) -> ApiResult<Self> {
        self.envelope.data = Some(to_value(data)?);
        Ok(self)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

fn to_value<T: Serialize>(data: &T) -> ApiResult<Value> {
    serde_json::to_value(data).map_err(|e| ApiError::Internal(e.into()))
}

impl IntoResponse for ApiReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}
