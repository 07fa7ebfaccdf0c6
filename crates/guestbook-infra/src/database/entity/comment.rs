//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub object_id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::guest_user::Entity",
        from = "Column::UserId",
        to = "super::guest_user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GuestUser,
    #[sea_orm(
        belongs_to = "super::object_media::Entity",
        from = "Column::ObjectId",
        to = "super::object_media::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ObjectMedia,
}

impl Related<super::guest_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuestUser.def()
    }
}

impl Related<super::object_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ObjectMedia.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for guestbook_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            object_id: model.object_id,
            user_id: model.user_id,
            body: model.body,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<guestbook_core::domain::Comment> for ActiveModel {
    fn from(comment: guestbook_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            object_id: Set(comment.object_id),
            user_id: Set(comment.user_id),
            body: Set(comment.body),
            created_at: Set(comment.created_at.into()),
            updated_at: Set(comment.updated_at.into()),
        }
    }
}
