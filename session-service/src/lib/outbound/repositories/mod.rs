use std::future::Future;
use std::time::Duration;

use thiserror::Error;

pub mod credential;
pub mod schema;
pub mod token;

pub use credential::PostgresCredentialRepository;
pub use token::PostgresTokenRepository;

/// Failure of a single bounded store call.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{operation} timed out after {limit:?}")]
    TimedOut {
        operation: &'static str,
        limit: Duration,
    },
}

/// Run a store call under a time limit.
pub(crate) async fn bounded<T, F>(
    operation: &'static str,
    limit: Duration,
    query: F,
) -> Result<T, QueryError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(QueryError::from),
        Err(_) => {
            tracing::warn!(
                operation,
                limit_ms = limit.as_millis() as u64,
                "Store call timed out"
            );
            Err(QueryError::TimedOut { operation, limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_passes_result_through() {
        let result = bounded("noop", Duration::from_secs(1), async {
            Ok::<_, sqlx::Error>(7)
        })
        .await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let result = bounded("stall", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, sqlx::Error>(())
        })
        .await;

        assert!(matches!(
            result.unwrap_err(),
            QueryError::TimedOut {
                operation: "stall",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_bounded_maps_database_error() {
        let result = bounded("fail", Duration::from_secs(1), async {
            Err::<(), _>(sqlx::Error::RowNotFound)
        })
        .await;

        assert!(matches!(
            result.unwrap_err(),
            QueryError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
