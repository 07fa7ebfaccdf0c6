//! Wedding wish entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wedding_wish")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
}

impl Related<super::guest_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GuestUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for guestbook_core::domain::WeddingWish {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            body: model.body,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<guestbook_core::domain::WeddingWish> for ActiveModel {
    fn from(wish: guestbook_core::domain::WeddingWish) -> Self {
        Self {
            id: Set(wish.id),
            user_id: Set(wish.user_id),
            body: Set(wish.body),
            created_at: Set(wish.created_at.into()),
            updated_at: Set(wish.updated_at.into()),
        }
    }
}
