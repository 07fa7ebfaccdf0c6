//! Todo orchestrator. Mutations run inside a transaction; an early
//! return drops the transaction and rolls it back.

use sea_orm::{DbConn, TransactionTrait};
use uuid::Uuid;

use guestbook_core::domain::{Todo, TodoFilter, TodoLookup, TodoPatch};
use guestbook_core::paging::Page;
use guestbook_infra::database::TodoRepository;
use guestbook_shared::dto::CreateTodoRequest;

use super::{required_text, timebox, txn_err};
use crate::middleware::error::AppResult;

#[derive(Clone)]
pub struct TodoService {
    db: DbConn,
    repo: TodoRepository,
}

impl TodoService {
    pub fn new(db: DbConn, max_page_size: u64) -> Self {
        Self {
            db,
            repo: TodoRepository::new(max_page_size),
        }
    }

    pub async fn create(&self, creator_id: Uuid, req: CreateTodoRequest) -> AppResult<Todo> {
        let name = required_text(req.name, "name")?;
        let key = required_text(req.key, "key")?;
        let code = required_text(req.code, "code")?;
        let is_active = req.is_active.unwrap_or(true);
        let todo = Todo::new(creator_id, name, key, is_active, code, req.description);

        let txn = self.db.begin().await.map_err(txn_err)?;
        let created = timebox(self.repo.create(&txn, todo)).await?;
        txn.commit().await.map_err(txn_err)?;

        tracing::info!(todo_id = %created.id, "todo created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Todo> {
        Ok(timebox(self.repo.get(&self.db, id)).await?)
    }

    pub async fn find_one(&self, lookup: TodoLookup) -> AppResult<Todo> {
        Ok(timebox(self.repo.find_one(&self.db, &lookup)).await?)
    }

    /// The page echoes the filter it was produced by.
    pub async fn list(&self, filter: TodoFilter) -> AppResult<Page<TodoFilter, Todo>> {
        let records = timebox(self.repo.list(&self.db, &filter)).await?;
        Ok(Page::new(filter, records))
    }

    pub async fn update(&self, id: Uuid, updater_id: Uuid, patch: TodoPatch) -> AppResult<Todo> {
        let txn = self.db.begin().await.map_err(txn_err)?;
        let updated = timebox(self.repo.update(&txn, id, updater_id, &patch)).await?;
        txn.commit().await.map_err(txn_err)?;

        tracing::info!(todo_id = %id, "todo updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(txn_err)?;
        timebox(self.repo.soft_delete(&txn, id)).await?;
        txn.commit().await.map_err(txn_err)?;

        tracing::info!(todo_id = %id, "todo soft-deleted");
        Ok(())
    }

    pub async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(txn_err)?;
        timebox(self.repo.hard_delete(&txn, id)).await?;
        txn.commit().await.map_err(txn_err)?;

        tracing::info!(todo_id = %id, "todo hard-deleted");
        Ok(())
    }
}
