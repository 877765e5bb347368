//! Request DTOs for Web API.

use serde::Deserialize;
use serde_json::Value;

use crate::file::{CreateFileRequest, ParentRef};

/// User registration request.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    #[serde(default)]
    pub email: Option<String>,
    /// Plain-text password.
    #[serde(default)]
    pub password: Option<String>,
}

/// File upload request.
///
/// Fields are kept as raw JSON values. A value of the wrong JSON type counts
/// as absent, so the service reports it with the usual validation message
/// instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileBody {
    /// Display name.
    #[serde(default)]
    pub name: Option<Value>,
    /// `folder`, `file` or `image`.
    #[serde(default, rename = "type")]
    pub file_type: Option<Value>,
    /// Parent folder id, as a number or a numeric string; absent or null means root.
    #[serde(default)]
    pub parent_id: Option<Value>,
    /// Initial visibility; only `true` publishes.
    #[serde(default)]
    pub is_public: Option<Value>,
    /// Base64 payload for files and images.
    #[serde(default)]
    pub data: Option<Value>,
}

fn string_value(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Parent reference from a JSON id.
fn parent_value(value: Option<Value>) -> ParentRef {
    match value {
        None | Some(Value::Null) => ParentRef::Root,
        Some(Value::Number(n)) => n.as_i64().map_or(ParentRef::Invalid, ParentRef::from_id),
        Some(Value::String(s)) => ParentRef::parse(&s),
        Some(_) => ParentRef::Invalid,
    }
}

impl From<CreateFileBody> for CreateFileRequest {
    fn from(body: CreateFileBody) -> Self {
        CreateFileRequest {
            name: string_value(body.name),
            file_type: string_value(body.file_type),
            parent: parent_value(body.parent_id),
            is_public: matches!(body.is_public, Some(Value::Bool(true))),
            data: string_value(body.data),
        }
    }
}

/// Query parameters for the file index.
///
/// Both values are kept as raw strings so that malformed input degrades
/// instead of failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuery {
    /// Parent folder id; defaults to root.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Zero-based page number.
    #[serde(default)]
    pub page: Option<String>,
}

impl IndexQuery {
    /// Parent to list.
    pub fn parent(&self) -> ParentRef {
        self.parent_id
            .as_deref()
            .map(ParentRef::parse)
            .unwrap_or_default()
    }

    /// Page number; absent, negative or malformed input is page 0.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(0)
            .max(0)
    }
}
