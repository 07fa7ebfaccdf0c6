//! Guestbook orchestrator: comments, wishes, uploads and listings.

use sea_orm::{DbConn, TransactionTrait};
use uuid::Uuid;

use guestbook_core::domain::{
    Comment, CommentFeedItem, CommentFilter, GuestUser, GuestUserFilter, MediaFilter, MediaKind,
    ObjectMedia, WeddingWish, WishFeedItem, WishFilter,
};
use guestbook_core::paging::Page;
use guestbook_core::text::mask_banned;
use guestbook_infra::MediaStorage;
use guestbook_infra::database::WeddingRepository;
use guestbook_shared::dto::{CommentRequest, WishRequest};

use super::{required_text, timebox, txn_err};
use crate::middleware::error::{AppError, AppResult};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

#[derive(Clone)]
pub struct WeddingService {
    db: DbConn,
    repo: WeddingRepository,
    storage: MediaStorage,
}

impl WeddingService {
    pub fn new(db: DbConn, storage: MediaStorage, max_page_size: u64) -> Self {
        Self {
            db,
            repo: WeddingRepository::new(max_page_size),
            storage,
        }
    }

    /// Signs the guestbook with a comment on an uploaded media object.
    /// The guest identity is created on first use and reused afterwards.
    pub async fn comment(&self, req: CommentRequest) -> AppResult<Comment> {
        let object_id = req
            .object_id
            .ok_or_else(|| AppError::missing_fields("object_id is required"))?;
        let user_name = required_text(req.user_name, "user_name")?;
        let body = mask_banned(&required_text(req.comment, "comment")?);

        let txn = self.db.begin().await.map_err(txn_err)?;
        timebox(self.repo.get_media(&txn, object_id)).await?;
        let guest = self.resolve_guest(&txn, user_name).await?;
        let comment = timebox(
            self.repo
                .create_comment(&txn, Comment::new(object_id, guest.id, body)),
        )
        .await?;
        txn.commit().await.map_err(txn_err)?;

        Ok(comment)
    }

    pub async fn wish(&self, req: WishRequest) -> AppResult<WeddingWish> {
        let user_name = required_text(req.user_name, "user_name")?;
        let body = mask_banned(&required_text(req.comment, "comment")?);

        let txn = self.db.begin().await.map_err(txn_err)?;
        let guest = self.resolve_guest(&txn, user_name).await?;
        let wish = timebox(self.repo.create_wish(&txn, WeddingWish::new(guest.id, body))).await?;
        txn.commit().await.map_err(txn_err)?;

        Ok(wish)
    }

    /// Validates the file, writes it to the bucket and records it.
    pub async fn upload(
        &self,
        creator_id: Uuid,
        kind: MediaKind,
        file_name: &str,
        data: Vec<u8>,
    ) -> AppResult<ObjectMedia> {
        if data.is_empty() {
            return Err(AppError::validation("uploaded file is empty"));
        }
        let ext = extension(file_name)
            .ok_or_else(|| AppError::validation("file name has no extension"))?
            .to_ascii_lowercase();
        let allowed = match kind {
            MediaKind::Image => IMAGE_EXTENSIONS,
            MediaKind::Video => VIDEO_EXTENSIONS,
        };
        if !allowed.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "unsupported {kind} extension `{ext}`"
            )));
        }

        let key = format!(
            "{}/{}-{}",
            kind.as_str(),
            Uuid::new_v4().simple(),
            file_name
        );
        let size = data.len() as i64;
        let url = self
            .storage
            .put(&key, data, &content_type_for(kind, &ext))
            .await?;

        let media = ObjectMedia::new(creator_id, file_name.to_owned(), kind, ext, url, size);
        let txn = self.db.begin().await.map_err(txn_err)?;
        let created = timebox(self.repo.create_media(&txn, media)).await?;
        txn.commit().await.map_err(txn_err)?;

        tracing::info!(media_id = %created.id, kind = %kind, "media uploaded");
        Ok(created)
    }

    pub async fn comments(
        &self,
        filter: CommentFilter,
    ) -> AppResult<Page<CommentFilter, CommentFeedItem>> {
        let records = timebox(self.repo.comments(&self.db, &filter)).await?;
        Ok(Page::new(filter, records))
    }

    pub async fn wishes(&self, filter: WishFilter) -> AppResult<Page<WishFilter, WishFeedItem>> {
        let records = timebox(self.repo.wishes(&self.db, &filter)).await?;
        Ok(Page::new(filter, records))
    }

    pub async fn guests(
        &self,
        filter: GuestUserFilter,
    ) -> AppResult<Page<GuestUserFilter, GuestUser>> {
        let records = timebox(self.repo.guests(&self.db, &filter)).await?;
        Ok(Page::new(filter, records))
    }

    pub async fn media(&self, filter: MediaFilter) -> AppResult<Page<MediaFilter, ObjectMedia>> {
        let records = timebox(self.repo.media(&self.db, &filter)).await?;
        Ok(Page::new(filter, records))
    }

    async fn resolve_guest<C: sea_orm::ConnectionTrait>(
        &self,
        conn: &C,
        username: String,
    ) -> AppResult<GuestUser> {
        if let Some(existing) = timebox(self.repo.find_guest_by_username(conn, &username)).await? {
            return Ok(existing);
        }
        Ok(timebox(self.repo.create_guest(conn, GuestUser::new(username))).await?)
    }
}

fn extension(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn content_type_for(kind: MediaKind, ext: &str) -> String {
    match (kind, ext) {
        (MediaKind::Image, "jpg" | "jpeg") => "image/jpeg".to_owned(),
        (MediaKind::Image, _) => format!("image/{ext}"),
        (MediaKind::Video, "mov") => "video/quicktime".to_owned(),
        (MediaKind::Video, "mkv") => "video/x-matroska".to_owned(),
        (MediaKind::Video, _) => format!("video/{ext}"),
    }
}
