//! Guestbook entities: uploaded media, guest users, comments and wishes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::paging::Pager;

/// Media category of an uploaded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(()),
        }
    }
}

/// A file stored in the object bucket, tracked in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMedia {
    pub id: Uuid,
    pub creator_id: Option<Uuid>,
    pub name: String,
    pub object_type: MediaKind,
    pub file_type: String,
    pub url: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ObjectMedia {
    pub fn new(
        creator_id: Uuid,
        name: String,
        object_type: MediaKind,
        file_type: String,
        url: String,
        size: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            creator_id: Some(creator_id),
            name,
            object_type,
            file_type,
            url,
            size,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A guest identity created on the fly when someone signs the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestUser {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuestUser {
    pub fn new(username: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Comment left on a specific media object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub object_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(object_id: Uuid, user_id: Uuid, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            object_id,
            user_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Free-standing wish, not attached to any media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeddingWish {
    pub id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WeddingWish {
    pub fn new(user_id: Uuid, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Comment joined with its author and target media for the public feed.
#[derive(Debug, Clone, Serialize)]
pub struct CommentFeedItem {
    pub posted_at: DateTime<Utc>,
    pub object_id: Uuid,
    pub object_url: String,
    pub user_id: Uuid,
    pub username: String,
    pub comment: String,
}

/// Wish joined with its author.
#[derive(Debug, Clone, Serialize)]
pub struct WishFeedItem {
    pub posted_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub username: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentFilter {
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub object_id: Option<Uuid>,
    pub pager: Pager,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WishFilter {
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub pager: Pager,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestUserFilter {
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub username: Option<String>,
    pub pager: Pager,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaFilter {
    pub from_date: Option<i64>,
    pub to_date: Option<i64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub object_type: Option<MediaKind>,
    pub file_type: Option<String>,
    pub pager: Pager,
}
