//! Bounded parallel map with streaming results.
//!
//! A fixed pool of workers pulls jobs from a shared queue, runs the action,
//! pauses, and pushes the result onto a channel. Results arrive in completion
//! order. The result channel closes once every worker has exited.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use tokio::sync::{Mutex, mpsc};

/// Run `action` over `items` with at most `workers` in flight.
///
/// Each worker sleeps for `pause` after finishing an item. The returned
/// receiver yields exactly one output per item (unless the action panics) and
/// closes after the last worker exits. Dropping the receiver stops workers at
/// their next send.
pub fn spawn_bounded<I, O, F, Fut>(
    items: Vec<I>,
    workers: usize,
    pause: Duration,
    action: F,
) -> mpsc::Receiver<O>
where
    I: Send + 'static,
    O: Send + 'static,
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
{
    let total = items.len();
    let workers = workers.clamp(1, total.max(1));
    debug!("Processing {} items with {} workers", total, workers);

    let (job_tx, job_rx) = mpsc::unbounded_channel();
    for item in items {
        // The receiver is alive in this scope, so this cannot fail
        let _ = job_tx.send(item);
    }
    drop(job_tx);

    let jobs = Arc::new(Mutex::new(job_rx));
    let action = Arc::new(action);
    let (result_tx, result_rx) = mpsc::channel(workers * 2);

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let jobs = Arc::clone(&jobs);
            let action = Arc::clone(&action);
            let results = result_tx.clone();
            tokio::spawn(async move {
                loop {
                    let job = jobs.lock().await.recv().await;
                    let Some(job) = job else {
                        break;
                    };

                    let output = action(job).await;
                    if results.send(output).await.is_err() {
                        debug!("Worker {} stopping: result receiver dropped", id);
                        break;
                    }

                    if !pause.is_zero() {
                        tokio::time::sleep(pause).await;
                    }
                }
            })
        })
        .collect();

    // The joiner owns the last sender; the channel closes when it finishes.
    tokio::spawn(async move {
        for joined in join_all(handles).await {
            if let Err(e) = joined {
                warn!("Worker task failed: {}", e);
            }
        }
        drop(result_tx);
    });

    result_rx
}

/// Drain a receiver into a vector.
pub async fn collect<O>(mut rx: mpsc::Receiver<O>) -> Vec<O> {
    let mut out = Vec::new();
    while let Some(item) = rx.recv().await {
        out.push(item);
    }
    out
}
