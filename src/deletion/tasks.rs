use std::future::Future;

use futures::future::try_join_all;
use tokio::task::JoinHandle;

use super::models::DeletionError;


/// Runs `future` as its own task so it finishes even if the caller stops
/// waiting for it.
pub(crate) fn dispatch<T, F>(future: F) -> JoinHandle<Result<T, DeletionError>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, DeletionError>> + Send + 'static,
{
    tokio::spawn(future)
}


pub(crate) async fn join_task<T>(handle: JoinHandle<Result<T, DeletionError>>) -> Result<T, DeletionError> {
    handle
        .await
        .map_err(|e| DeletionError::Task(e.to_string()))?
}


/// Waits for every task and returns their results in dispatch order, or the
/// first error as soon as it happens. Tasks still running at that point are
/// detached, not aborted.
pub(crate) async fn join_fail_fast<T>(
    handles: Vec<JoinHandle<Result<T, DeletionError>>>,
) -> Result<Vec<T>, DeletionError> {
    try_join_all(handles.into_iter().map(join_task)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_results_keep_dispatch_order() {
        let handles = vec![
            dispatch(async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok(1)
            }),
            dispatch(async { Ok(2) }),
            dispatch(async { Ok(3) }),
        ];

        assert_eq!(join_fail_fast(handles).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_first_error_returned_and_siblings_keep_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let handles = vec![
            dispatch(async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                flag.store(true, Ordering::SeqCst);
                Ok(())
            }),
            dispatch(async {
                Err(DeletionError::Transport(ApiError::Status {
                    status: 500,
                    message: "boom".to_string(),
                }))
            }),
        ];

        let result = join_fail_fast(handles).await;
        tokio_test::assert_err!(result);
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_task_is_reported() {
        let handles: Vec<JoinHandle<Result<(), DeletionError>>> =
            vec![dispatch(async {
                if true {
                    panic!("task blew up");
                }
                Ok(())
            })];

        let err = join_fail_fast(handles).await.unwrap_err();
        assert!(matches!(err, DeletionError::Task(_)));
    }
}
