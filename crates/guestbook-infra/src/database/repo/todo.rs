//! Todo persistence gateway.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use guestbook_core::RepoError;
use guestbook_core::domain::{Todo, TodoFilter, TodoLookup, TodoPatch};

use super::map_db_err;
use crate::database::entity::todo;
use crate::database::query;

/// Fields a caller may sort todo listings by.
const SORTABLE: &[todo::Column] = &[
    todo::Column::Id,
    todo::Column::CreatedAt,
    todo::Column::UpdatedAt,
    todo::Column::Name,
];

/// Stateless gateway; callers hand in the connection or transaction so
/// orchestrators stay in charge of transaction boundaries.
#[derive(Debug, Clone, Copy)]
pub struct TodoRepository {
    max_page_size: u64,
}

impl TodoRepository {
    pub fn new(max_page_size: u64) -> Self {
        Self { max_page_size }
    }

    pub async fn create<C: ConnectionTrait>(&self, conn: &C, todo: Todo) -> Result<Todo, RepoError> {
        let active: todo::ActiveModel = todo.into();
        let model = active.insert(conn).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    /// Fetch by id, excluding soft-deleted rows.
    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> Result<Todo, RepoError> {
        todo::Entity::find_by_id(id)
            .filter(todo::Column::DeletedAt.is_null())
            .one(conn)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    pub async fn find_one<C: ConnectionTrait>(
        &self,
        conn: &C,
        lookup: &TodoLookup,
    ) -> Result<Todo, RepoError> {
        let select = todo::Entity::find().filter(todo::Column::DeletedAt.is_null());
        let select = match lookup {
            TodoLookup::Key(key) => select.filter(todo::Column::Key.eq(key.as_str())),
            TodoLookup::Code(code) => select.filter(todo::Column::Code.eq(code.as_str())),
        };

        select
            .one(conn)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    /// Progressive narrowing: each present predicate adds one condition.
    pub async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &TodoFilter,
    ) -> Result<Vec<Todo>, RepoError> {
        let mut select = todo::Entity::find().filter(todo::Column::DeletedAt.is_null());
        select = query::time_range(
            select,
            todo::Column::CreatedAt,
            filter.from_date,
            filter.to_date,
        );
        if let Some(creator_id) = filter.creator_id {
            select = select.filter(todo::Column::CreatorId.eq(creator_id));
        }
        if let Some(name) = &filter.name {
            select = select.filter(todo::Column::Name.eq(name.as_str()));
        }
        if let Some(key) = &filter.key {
            select = select.filter(todo::Column::Key.eq(key.as_str()));
        }
        if let Some(is_active) = filter.is_active {
            select = select.filter(todo::Column::IsActive.eq(is_active));
        }
        if let Some(code) = &filter.code {
            select = select.filter(todo::Column::Code.eq(code.as_str()));
        }

        let select = query::paginate(
            select,
            &filter.pager,
            SORTABLE,
            todo::Column::CreatedAt,
            self.max_page_size,
        )?;
        let models = select.all(conn).await.map_err(map_db_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Merge-patch update. Absent fields keep their stored values.
    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: Uuid,
        updater_id: Uuid,
        patch: &TodoPatch,
    ) -> Result<Todo, RepoError> {
        let mut active = todo::ActiveModel {
            id: Set(id),
            updater_id: Set(Some(updater_id)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        apply_patch(&mut active, patch);

        let model = todo::Entity::update(active)
            .filter(todo::Column::DeletedAt.is_null())
            .exec(conn)
            .await
            .map_err(map_db_err)?;
        Ok(model.into())
    }

    /// Marks the row deleted; listings and lookups stop seeing it.
    pub async fn soft_delete<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> Result<(), RepoError> {
        let result = todo::Entity::update_many()
            .col_expr(todo::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::DeletedAt.is_null())
            .exec(conn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    /// Removes the row outright, soft-deleted or not.
    pub async fn hard_delete<C: ConnectionTrait>(&self, conn: &C, id: Uuid) -> Result<(), RepoError> {
        let result = todo::Entity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

fn apply_patch(active: &mut todo::ActiveModel, patch: &TodoPatch) {
    if let Some(name) = &patch.name {
        active.name = Set(name.clone());
    }
    if let Some(key) = &patch.key {
        active.key = Set(key.clone());
    }
    if let Some(is_active) = patch.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(code) = &patch.code {
        active.code = Set(code.clone());
    }
    if let Some(description) = &patch.description {
        active.description = Set(Some(description.clone()));
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase, MockExecResult};

    use super::*;

    fn sample_model(id: Uuid) -> todo::Model {
        let now = Utc::now().fixed_offset();
        todo::Model {
            id,
            creator_id: Uuid::new_v4(),
            updater_id: None,
            name: "buy flowers".to_owned(),
            key: "buy-flowers".to_owned(),
            is_active: true,
            code: "TD-001".to_owned(),
            description: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn get_returns_the_mapped_record() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_model(id)]])
            .into_connection();

        let todo = TodoRepository::new(200).get(&db, id).await.unwrap();

        assert_eq!(todo.id, id);
        assert_eq!(todo.name, "buy flowers");
    }

    #[tokio::test]
    async fn get_maps_missing_rows_to_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<todo::Model>::new()])
            .into_connection();

        let err = TodoRepository::new(200)
            .get(&db, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn list_rejects_an_unknown_sort_field_before_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let filter = TodoFilter {
            pager: guestbook_core::paging::Pager {
                sort_by: Some("creator_secret".to_owned()),
                ..Default::default()
            },
            ..Default::default()
        };

        let err = TodoRepository::new(200)
            .list(&db, &filter)
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::InvalidFilter(_)));
    }

    #[tokio::test]
    async fn list_maps_every_returned_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sample_model(Uuid::new_v4()),
                sample_model(Uuid::new_v4()),
            ]])
            .into_connection();

        let todos = TodoRepository::new(200)
            .list(&db, &TodoFilter::default())
            .await
            .unwrap();

        assert_eq!(todos.len(), 2);
    }

    #[tokio::test]
    async fn soft_delete_requires_a_live_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = TodoRepository::new(200)
            .soft_delete(&db, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[test]
    fn empty_patch_touches_no_data_columns() {
        let mut active = <todo::ActiveModel as Default>::default();
        apply_patch(&mut active, &TodoPatch::default());

        assert!(matches!(active.name, ActiveValue::NotSet));
        assert!(matches!(active.key, ActiveValue::NotSet));
        assert!(matches!(active.is_active, ActiveValue::NotSet));
        assert!(matches!(active.code, ActiveValue::NotSet));
        assert!(matches!(active.description, ActiveValue::NotSet));
    }

    #[test]
    fn patch_sets_only_the_present_fields() {
        let mut active = <todo::ActiveModel as Default>::default();
        apply_patch(
            &mut active,
            &TodoPatch {
                name: Some("order cake".to_owned()),
                ..Default::default()
            },
        );

        assert!(matches!(active.name, ActiveValue::Set(_)));
        assert!(matches!(active.key, ActiveValue::NotSet));
    }
}
