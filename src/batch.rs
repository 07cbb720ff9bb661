//! Batch aggregation: drives fetch → extract → chunk across every task.
//!
//! The whole batch is one explicit job object. Each task is processed in
//! order; a task's failure is captured as a [`ProcessingError`] and never
//! affects any other task. The job itself never fails: if every task
//! fails, `rows` is empty and `errors` is not, and the caller treats that
//! as "nothing to download" rather than a crash.

use reqwest::Client;

use crate::chunk::chunk_text;
use crate::extract::{extract_pages, join_pages};
use crate::fetch::{fetch_pdf, RetryPolicy};
use crate::models::{
    BatchResult, ContentRow, Origin, ProcessingError, SourceTask, Stage, MAX_CELL_CHARS,
};
use crate::progress::{ProgressEvent, ProgressReporter};

/// A resumable batch run: the task list, a cursor, and the partial result
/// accumulated so far. Owned by the driving loop for the lifetime of one
/// batch and discarded after completion.
pub struct BatchJob {
    tasks: Vec<SourceTask>,
    next_index: usize,
    result: BatchResult,
}

impl BatchJob {
    pub fn new(tasks: Vec<SourceTask>) -> Self {
        Self {
            tasks,
            next_index: 0,
            result: BatchResult::default(),
        }
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn processed(&self) -> usize {
        self.next_index
    }

    pub fn is_done(&self) -> bool {
        self.next_index >= self.tasks.len()
    }

    /// Partial result accumulated so far (read-only; for progress views).
    pub fn partial(&self) -> &BatchResult {
        &self.result
    }

    /// Process the next task, if any. Returns `false` when the job is done.
    pub async fn step(&mut self, client: &Client, policy: RetryPolicy) -> bool {
        let Some(task) = self.tasks.get(self.next_index) else {
            return false;
        };
        let identity = task.identity.clone();
        let origin = task.origin.clone();

        let bytes: Option<Vec<u8>> = match origin {
            Origin::Local(bytes) => Some(bytes),
            Origin::Remote(url) => match fetch_pdf(client, &url, policy).await {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    self.result.errors.push(ProcessingError {
                        identity: identity.clone(),
                        stage: Stage::Fetch,
                        message: e.to_string(),
                    });
                    None
                }
            },
        };

        if let Some(bytes) = bytes {
            match extract_pages(&bytes) {
                Ok(pages) => {
                    let full_text = join_pages(&pages);
                    for (idx, content) in chunk_text(&full_text, MAX_CELL_CHARS).into_iter().enumerate() {
                        self.result.rows.push(ContentRow {
                            identity: identity.clone(),
                            part: idx as u32 + 1,
                            content,
                        });
                    }
                }
                Err(e) => {
                    self.result.errors.push(ProcessingError {
                        identity,
                        stage: Stage::Extract,
                        message: e.to_string(),
                    });
                }
            }
        }

        self.next_index += 1;
        true
    }

    /// Drive the job to completion, emitting progress after each task.
    pub async fn run(
        mut self,
        client: &Client,
        policy: RetryPolicy,
        reporter: &dyn ProgressReporter,
    ) -> BatchResult {
        let total = self.total() as u64;
        while self.step(client, policy).await {
            reporter.report(ProgressEvent {
                n: self.processed() as u64,
                total,
            });
        }
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;

    fn local(identity: &str, bytes: &[u8]) -> SourceTask {
        SourceTask {
            identity: identity.to_string(),
            origin: Origin::Local(bytes.to_vec()),
        }
    }

    #[tokio::test]
    async fn all_corrupt_inputs_yield_errors_not_panics() {
        let tasks = vec![local("a.pdf", b"junk"), local("b.pdf", b"more junk")];
        let client = crate::fetch::build_client().unwrap();
        let result = BatchJob::new(tasks)
            .run(&client, RetryPolicy::default(), &NoProgress)
            .await;
        assert!(result.rows.is_empty());
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|e| e.stage == Stage::Extract));
    }

    #[tokio::test]
    async fn empty_task_list_completes_immediately() {
        let client = crate::fetch::build_client().unwrap();
        let mut job = BatchJob::new(Vec::new());
        assert!(job.is_done());
        assert!(!job.step(&client, RetryPolicy::default()).await);
        assert!(job.partial().rows.is_empty());
    }
}
