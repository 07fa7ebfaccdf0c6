//! Orchestrators: validation, transactions and the query timebox sit
//! here, between the HTTP handlers and the repositories.

use std::future::Future;
use std::time::Duration;

use guestbook_core::RepoError;

use crate::middleware::error::AppError;

mod todo;
mod wedding;

pub use todo::TodoService;
pub use wedding::WeddingService;

/// Upper bound for any single repository call.
const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs a repository call under the shared timeout.
async fn timebox<T, F>(fut: F) -> Result<T, RepoError>
where
    F: Future<Output = Result<T, RepoError>>,
{
    tokio::time::timeout(QUERY_TIMEOUT, fut)
        .await
        .map_err(|_| RepoError::Timeout)?
}

fn txn_err(err: sea_orm::DbErr) -> AppError {
    AppError::from(RepoError::Connection(err.to_string()))
}

/// Pulls a required text field out of a request, trimming whitespace.
fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::missing_fields(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use guestbook_shared::ErrorCode;

    use super::*;

    #[test]
    fn required_text_trims_and_accepts() {
        let value = required_text(Some("  hello  ".to_owned()), "name").unwrap();
        assert_eq!(value, "hello");
    }

    #[test]
    fn required_text_rejects_absent_fields() {
        let err = required_text(None, "name").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredFields);
    }

    #[test]
    fn required_text_rejects_blank_fields() {
        let err = required_text(Some("   ".to_owned()), "comment").unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredFields);
    }

    #[tokio::test]
    async fn timebox_passes_results_through() {
        let value = timebox(async { Ok::<_, RepoError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn timebox_converts_elapsed_time_into_a_timeout_error() {
        tokio::time::pause();
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, RepoError>(())
        };
        let handle = tokio::spawn(timebox(slow));
        tokio::time::advance(Duration::from_secs(31)).await;
        let err = handle.await.unwrap().unwrap_err();
        assert!(matches!(err, RepoError::Timeout));
    }
}
