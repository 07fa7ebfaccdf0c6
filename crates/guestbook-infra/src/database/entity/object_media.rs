//! Uploaded media entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use guestbook_core::domain::MediaKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "object_media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub creator_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub object_type: String,
    #[sea_orm(column_type = "Text")]
    pub file_type: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    pub size: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for guestbook_core::domain::ObjectMedia {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            creator_id: model.creator_id,
            name: model.name,
            // The column is constrained to the two known values; anything
            // else would be a migration bug, not client input.
            object_type: model.object_type.parse().unwrap_or(MediaKind::Image),
            file_type: model.file_type,
            url: model.url,
            size: model.size,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<guestbook_core::domain::ObjectMedia> for ActiveModel {
    fn from(media: guestbook_core::domain::ObjectMedia) -> Self {
        Self {
            id: Set(media.id),
            creator_id: Set(media.creator_id),
            name: Set(media.name),
            object_type: Set(media.object_type.as_str().to_owned()),
            file_type: Set(media.file_type),
            url: Set(media.url),
            size: Set(media.size),
            created_at: Set(media.created_at.into()),
            updated_at: Set(media.updated_at.into()),
        }
    }
}
