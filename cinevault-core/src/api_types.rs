use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller metadata carried by every v2 request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequestMeta {
    pub username: String,
    pub secret_code: String,
    #[serde(default)]
    pub additional_properties: HashMap<String, String>,
    pub name_of_server: String,
    /// Assigned by the server when the envelope is received.
    #[serde(skip, default = "Uuid::new_v4")]
    pub request_id: Uuid,
}

impl ApiRequestMeta {
    pub fn new(
        username: impl Into<String>,
        secret_code: impl Into<String>,
        name_of_server: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            secret_code: secret_code.into(),
            additional_properties: HashMap::new(),
            name_of_server: name_of_server.into(),
            request_id: Uuid::new_v4(),
        }
    }
}

/// v2 request envelope: [`ApiRequestMeta`] plus a typed `data` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest<T> {
    #[serde(flatten)]
    pub meta: ApiRequestMeta,
    pub data: T,
}

impl<T> ApiRequest<T> {
    pub fn new(meta: ApiRequestMeta, data: T) -> Self {
        Self { meta, data }
    }
}

/// v2 response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = ()> {
    pub status_code: u16,
    pub message: String,
    pub response_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn with_data(status_code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code,
            message: message.into(),
            response_id: Uuid::new_v4(),
            data: Some(data),
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_data(200, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_data(201, message, data)
    }
}

impl ApiResponse<()> {
    /// An envelope with no `data` member.
    pub fn message(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            response_id: Uuid::new_v4(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(
        items: Vec<T>,
        total_count: i64,
        page_number: i64,
        page_size: i64,
    ) -> Self {
        let total_pages = if page_size > 0 {
            (total_count + page_size - 1) / page_size
        } else {
            0
        };
        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
        }
    }
}
