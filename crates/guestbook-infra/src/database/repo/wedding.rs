//! Guestbook persistence gateway: guests, comments, wishes and media.

use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use guestbook_core::RepoError;
use guestbook_core::domain::{
    Comment, CommentFeedItem, CommentFilter, GuestUser, GuestUserFilter, MediaFilter, ObjectMedia,
    WeddingWish, WishFeedItem, WishFilter,
};

use super::map_db_err;
use crate::database::entity::{comment, guest_user, object_media, wedding_wish};
use crate::database::query;

const COMMENT_SORTABLE: &[comment::Column] = &[
    comment::Column::Id,
    comment::Column::CreatedAt,
    comment::Column::UpdatedAt,
];

const WISH_SORTABLE: &[wedding_wish::Column] = &[
    wedding_wish::Column::Id,
    wedding_wish::Column::CreatedAt,
    wedding_wish::Column::UpdatedAt,
];

const GUEST_SORTABLE: &[guest_user::Column] = &[
    guest_user::Column::Id,
    guest_user::Column::CreatedAt,
    guest_user::Column::UpdatedAt,
    guest_user::Column::Username,
];

const MEDIA_SORTABLE: &[object_media::Column] = &[
    object_media::Column::Id,
    object_media::Column::CreatedAt,
    object_media::Column::UpdatedAt,
    object_media::Column::Name,
];

#[derive(Debug, Clone, Copy)]
pub struct WeddingRepository {
    max_page_size: u64,
}

impl WeddingRepository {
    pub fn new(max_page_size: u64) -> Self {
        Self { max_page_size }
    }

    pub async fn create_guest<C: ConnectionTrait>(
        &self,
        conn: &C,
        guest: GuestUser,
    ) -> Result<GuestUser, RepoError> {
        let active: guest_user::ActiveModel = guest.into();
        let model = active.insert(conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    /// Guests are keyed by display name; signing twice reuses the identity.
    pub async fn find_guest_by_username<C: ConnectionTrait>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<Option<GuestUser>, RepoError> {
        let model = guest_user::Entity::find()
            .filter(guest_user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(Into::into))
    }

    pub async fn create_comment<C: ConnectionTrait>(
        &self,
        conn: &C,
        comment: Comment,
    ) -> Result<Comment, RepoError> {
        let active: comment::ActiveModel = comment.into();
        let model = active.insert(conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    pub async fn create_wish<C: ConnectionTrait>(
        &self,
        conn: &C,
        wish: WeddingWish,
    ) -> Result<WeddingWish, RepoError> {
        let active: wedding_wish::ActiveModel = wish.into();
        let model = active.insert(conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    pub async fn create_media<C: ConnectionTrait>(
        &self,
        conn: &C,
        media: ObjectMedia,
    ) -> Result<ObjectMedia, RepoError> {
        let active: object_media::ActiveModel = media.into();
        let model = active.insert(conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    pub async fn get_media<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
    ) -> Result<ObjectMedia, RepoError> {
        object_media::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    /// Pages comments, then resolves authors and target media in two
    /// batched lookups instead of a row-per-comment join.
    pub async fn comments<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentFeedItem>, RepoError> {
        let mut select = comment::Entity::find();
        select = query::time_range(
            select,
            comment::Column::CreatedAt,
            filter.from_date,
            filter.to_date,
        );
        if let Some(object_id) = filter.object_id {
            select = select.filter(comment::Column::ObjectId.eq(object_id));
        }
        let select = query::paginate(
            select,
            &filter.pager,
            COMMENT_SORTABLE,
            comment::Column::CreatedAt,
            self.max_page_size,
        )?;
        let comments = select.all(conn).await.map_err(map_db_err)?;
        if comments.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = comments.iter().map(|c| c.user_id).collect();
        let object_ids: Vec<Uuid> = comments.iter().map(|c| c.object_id).collect();

        let usernames: HashMap<Uuid, String> = guest_user::Entity::find()
            .filter(guest_user::Column::Id.is_in(user_ids))
            .all(conn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();
        let object_urls: HashMap<Uuid, String> = object_media::Entity::find()
            .filter(object_media::Column::Id.is_in(object_ids))
            .all(conn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|media| (media.id, media.url))
            .collect();

        Ok(comments
            .into_iter()
            .map(|comment| CommentFeedItem {
                posted_at: comment.created_at.into(),
                object_id: comment.object_id,
                object_url: object_urls
                    .get(&comment.object_id)
                    .cloned()
                    .unwrap_or_default(),
                user_id: comment.user_id,
                username: usernames.get(&comment.user_id).cloned().unwrap_or_default(),
                comment: comment.body,
            })
            .collect())
    }

    pub async fn wishes<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &WishFilter,
    ) -> Result<Vec<WishFeedItem>, RepoError> {
        let mut select = wedding_wish::Entity::find();
        select = query::time_range(
            select,
            wedding_wish::Column::CreatedAt,
            filter.from_date,
            filter.to_date,
        );
        let select = query::paginate(
            select,
            &filter.pager,
            WISH_SORTABLE,
            wedding_wish::Column::CreatedAt,
            self.max_page_size,
        )?;
        let wishes = select.all(conn).await.map_err(map_db_err)?;
        if wishes.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = wishes.iter().map(|w| w.user_id).collect();
        let usernames: HashMap<Uuid, String> = guest_user::Entity::find()
            .filter(guest_user::Column::Id.is_in(user_ids))
            .all(conn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|user| (user.id, user.username))
            .collect();

        Ok(wishes
            .into_iter()
            .map(|wish| WishFeedItem {
                posted_at: wish.created_at.into(),
                user_id: wish.user_id,
                username: usernames.get(&wish.user_id).cloned().unwrap_or_default(),
                comment: wish.body,
            })
            .collect())
    }

    pub async fn guests<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &GuestUserFilter,
    ) -> Result<Vec<GuestUser>, RepoError> {
        let mut select = guest_user::Entity::find();
        select = query::time_range(
            select,
            guest_user::Column::CreatedAt,
            filter.from_date,
            filter.to_date,
        );
        if let Some(username) = &filter.username {
            select = select.filter(guest_user::Column::Username.eq(username.as_str()));
        }
        let select = query::paginate(
            select,
            &filter.pager,
            GUEST_SORTABLE,
            guest_user::Column::CreatedAt,
            self.max_page_size,
        )?;
        let models = select.all(conn).await.map_err(map_db_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn media<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &MediaFilter,
    ) -> Result<Vec<ObjectMedia>, RepoError> {
        let mut select = object_media::Entity::find();
        select = query::time_range(
            select,
            object_media::Column::CreatedAt,
            filter.from_date,
            filter.to_date,
        );
        if let Some(name) = &filter.name {
            select = select.filter(object_media::Column::Name.eq(name.as_str()));
        }
        if let Some(url) = &filter.url {
            select = select.filter(object_media::Column::Url.eq(url.as_str()));
        }
        if let Some(kind) = filter.object_type {
            select = select.filter(object_media::Column::ObjectType.eq(kind.as_str()));
        }
        if let Some(file_type) = &filter.file_type {
            select = select.filter(object_media::Column::FileType.eq(file_type.as_str()));
        }
        let select = query::paginate(
            select,
            &filter.pager,
            MEDIA_SORTABLE,
            object_media::Column::CreatedAt,
            self.max_page_size,
        )?;
        let models = select.all(conn).await.map_err(map_db_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use guestbook_core::domain::MediaKind;

    use super::*;

    #[tokio::test]
    async fn empty_comment_page_skips_the_lookup_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<comment::Model>::new()])
            .into_connection();

        let feed = WeddingRepository::new(200)
            .comments(&db, &CommentFilter::default())
            .await
            .unwrap();

        assert!(feed.is_empty());
    }

    #[tokio::test]
    async fn comment_feed_joins_author_and_media() {
        let now = Utc::now().fixed_offset();
        let user_id = Uuid::new_v4();
        let object_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![comment::Model {
                id: Uuid::new_v4(),
                object_id,
                user_id,
                body: "congrats!".to_owned(),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([vec![guest_user::Model {
                id: user_id,
                username: "an".to_owned(),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([vec![object_media::Model {
                id: object_id,
                creator_id: None,
                name: "first-dance".to_owned(),
                object_type: "image".to_owned(),
                file_type: "jpg".to_owned(),
                url: "https://bucket.s3.amazonaws.com/image/first-dance.jpg".to_owned(),
                size: 1024,
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();

        let feed = WeddingRepository::new(200)
            .comments(&db, &CommentFilter::default())
            .await
            .unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].username, "an");
        assert_eq!(
            feed[0].object_url,
            "https://bucket.s3.amazonaws.com/image/first-dance.jpg"
        );
        assert_eq!(feed[0].comment, "congrats!");
    }

    #[tokio::test]
    async fn wish_feed_falls_back_to_an_empty_username() {
        let now = Utc::now().fixed_offset();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![wedding_wish::Model {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                body: "be happy".to_owned(),
                created_at: now,
                updated_at: now,
            }]])
            .append_query_results([Vec::<guest_user::Model>::new()])
            .into_connection();

        let feed = WeddingRepository::new(200)
            .wishes(&db, &WishFilter::default())
            .await
            .unwrap();

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].username, "");
    }

    #[tokio::test]
    async fn media_listing_maps_the_stored_kind() {
        let now = Utc::now().fixed_offset();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![object_media::Model {
                id: Uuid::new_v4(),
                creator_id: Some(Uuid::new_v4()),
                name: "toast".to_owned(),
                object_type: "video".to_owned(),
                file_type: "mp4".to_owned(),
                url: "https://bucket.s3.amazonaws.com/video/toast.mp4".to_owned(),
                size: 2048,
                created_at: now,
                updated_at: now,
            }]])
            .into_connection();

        let media = WeddingRepository::new(200)
            .media(&db, &MediaFilter::default())
            .await
            .unwrap();

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].object_type, MediaKind::Video);
    }
}
