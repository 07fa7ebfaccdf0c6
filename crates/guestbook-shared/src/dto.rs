//! Request DTOs. Required fields arrive as `Option` so that a missing
//! field maps to `MissingRequiredFields` instead of a deserializer error.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a todo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub name: Option<String>,
    pub key: Option<String>,
    pub is_active: Option<bool>,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Request to comment on an uploaded media object.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub object_id: Option<Uuid>,
    pub user_name: Option<String>,
    pub comment: Option<String>,
}

/// Request to leave a wish in the guestbook.
#[derive(Debug, Clone, Deserialize)]
pub struct WishRequest {
    pub user_name: Option<String>,
    pub comment: Option<String>,
}

/// Public URL of a freshly uploaded media object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedMedia {
    pub url: String,
}
