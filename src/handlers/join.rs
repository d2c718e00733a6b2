//! Fan-out resolution for the composed views.

use std::future::Future;

use log::warn;
use serde::Serialize;

use crate::errors::AppError;

/// An association row whose linked entity could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinFailure {
    pub id: String,
    pub error: String,
}

#[derive(Debug)]
pub struct Joined<T> {
    pub items: Vec<T>,
    pub failures: Vec<JoinFailure>,
}

/// Resolves each row in order, one lookup at a time. A failed lookup is
/// logged and reported in `failures`; it never fails the whole join.
pub async fn best_effort_join<R, T, K, F, Fut>(rows: Vec<R>, key: K, mut resolve: F) -> Joined<T>
where
    K: Fn(&R) -> String,
    F: FnMut(R) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut joined = Joined {
        items: Vec::with_capacity(rows.len()),
        failures: Vec::new(),
    };

    for row in rows {
        let id = key(&row);
        match resolve(row).await {
            Ok(item) => joined.items.push(item),
            Err(err) => {
                warn!("skipping {}: {}", id, err);
                joined.failures.push(JoinFailure {
                    id,
                    error: err.message().to_string(),
                });
            }
        }
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_order_and_collects_failures() {
        let rows = vec!["a", "gone", "b"];
        let joined = best_effort_join(rows, |id| id.to_string(), |id| async move {
            if id == "gone" {
                Err(AppError::RpcError("no sql rows".into()))
            } else {
                Ok(id.to_uppercase())
            }
        })
        .await;

        assert_eq!(joined.items, ["A", "B"]);
        assert_eq!(
            joined.failures,
            [JoinFailure {
                id: "gone".into(),
                error: "no sql rows".into()
            }]
        );
    }

    #[tokio::test]
    async fn empty_page_joins_to_nothing() {
        let joined: Joined<String> =
            best_effort_join(Vec::<String>::new(), |id| id.clone(), |id| async move { Ok(id) }).await;
        assert!(joined.items.is_empty());
        assert!(joined.failures.is_empty());
    }
}
