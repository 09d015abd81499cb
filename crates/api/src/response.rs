//! # Response Envelope
//!
//! Every successful response wraps its payload as
//! `{"data": ..., "message": "...", "meta": {"http_status": 200, "length": n}}`.
//! `length` is only present for list payloads.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub http_status: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: String,
    pub meta: Meta,
}

fn ok_meta(length: Option<usize>) -> Meta {
    Meta {
        http_status: StatusCode::OK.as_u16(),
        length,
    }
}

/// Wraps a single object.
pub fn success<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        data: Some(data),
        message: String::new(),
        meta: ok_meta(None),
    })
}

/// Wraps a list and reports its length.
pub fn list<T: Serialize>(items: Vec<T>) -> Json<Envelope<Vec<T>>> {
    let length = items.len();
    Json(Envelope {
        data: Some(items),
        message: String::new(),
        meta: ok_meta(Some(length)),
    })
}

/// A payload-less success carrying only a message.
pub fn message(text: impl Into<String>) -> Json<Envelope<()>> {
    Json(Envelope {
        data: None,
        message: text.into(),
        meta: ok_meta(None),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub errors: Vec<ErrorInfo>,
    pub meta: Meta,
}

impl ErrorBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorInfo {
                code: status.as_u16(),
                message: message.into(),
            }],
            meta: Meta {
                http_status: status.as_u16(),
                length: None,
            },
        }
    }
}
