use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::paging::Pager;

/// Todo entity - the template's reference CRUD record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub creator_id: Uuid,
    pub updater_id: Option<Uuid>,
    pub name: String,
    pub key: String,
    pub is_active: bool,
    pub code: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Create a new todo with generated ID and timestamps.
    pub fn new(
        creator_id: Uuid,
        name: String,
        key: String,
        is_active: bool,
        code: String,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            creator_id,
            updater_id: None,
            name,
            key,
            is_active,
            code,
            description,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Merge-patch update: only fields present in the request are written,
/// everything else is left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub name: Option<String>,
    pub key: Option<String>,
    pub is_active: Option<bool>,
    pub code: Option<String>,
    pub description: Option<String>,
}

/// List-query narrowing for todos. Absent predicates impose no condition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoFilter {
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub creator_id: Option<Uuid>,
    pub name: Option<String>,
    pub key: Option<String>,
    pub is_active: Option<bool>,
    pub code: Option<String>,
    pub pager: Pager,
}

/// Permitted single-field lookups.
///
/// A closed enum instead of a free-form (field, value) pair, so no caller
/// can splice an arbitrary column name into a query.
#[derive(Debug, Clone)]
pub enum TodoLookup {
    Key(String),
    Code(String),
}
