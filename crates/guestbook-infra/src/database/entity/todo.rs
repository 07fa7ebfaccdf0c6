//! Todo entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub creator_id: Uuid,
    pub updater_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", unique)]
    pub key: String,
    pub is_active: bool,
    #[sea_orm(column_type = "Text", unique)]
    pub code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for guestbook_core::domain::Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            creator_id: model.creator_id,
            updater_id: model.updater_id,
            name: model.name,
            key: model.key,
            is_active: model.is_active,
            code: model.code,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}

impl From<guestbook_core::domain::Todo> for ActiveModel {
    fn from(todo: guestbook_core::domain::Todo) -> Self {
        Self {
            id: Set(todo.id),
            creator_id: Set(todo.creator_id),
            updater_id: Set(todo.updater_id),
            name: Set(todo.name),
            key: Set(todo.key),
            is_active: Set(todo.is_active),
            code: Set(todo.code),
            description: Set(todo.description),
            created_at: Set(todo.created_at.into()),
            updated_at: Set(todo.updated_at.into()),
            deleted_at: Set(todo.deleted_at.map(Into::into)),
        }
    }
}
