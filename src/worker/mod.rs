use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use chrono::Utc;
use model::keygen::{KeyGenRequest, KeyGenResult, ResultStatus};
use openssl::base64;
use repositories::requests::{ReceivedMessage, RequestsQueue, RequestsQueueError};
use repositories::results::{ResultsRepository, ResultsRepositoryError};

use crate::keys::{self, KeyGeneratorError};

pub mod health;

#[derive(Debug, Clone)]
pub struct WorkerOptions {
    pub result_ttl_seconds: i64,
    pub poll_max_messages: i64,
    pub poll_wait_seconds: i64,
    pub error_backoff: Duration,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            result_ttl_seconds: model::keygen::DEFAULT_RESULT_TTL_SECONDS,
            poll_max_messages: 10,
            poll_wait_seconds: 10,
            error_backoff: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessMessageError {
    #[error("invalid request message: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("{0}")]
    Generation(#[from] KeyGeneratorError),
    #[error("{0}")]
    Store(#[from] ResultsRepositoryError),
    #[error("{0}")]
    Ack(#[from] RequestsQueueError),
}

/// Consumes the request queue: per message, generate a keypair, write the
/// result, then ack. The only coordination with the HTTP fronts is through
/// the queue and the result store.
pub struct Worker {
    requests_queue: Arc<dyn RequestsQueue>,
    results_repository: Arc<dyn ResultsRepository>,
    options: WorkerOptions,
}

impl Worker {
    pub fn new(
        requests_queue: Arc<dyn RequestsQueue>,
        results_repository: Arc<dyn ResultsRepository>,
        options: WorkerOptions,
    ) -> Self {
        Self {
            requests_queue,
            results_repository,
            options,
        }
    }

    /// Polls until process termination. A failed poll is logged and retried
    /// after a short backoff so an unreachable backend never hot-loops.
    pub async fn run(&self) {
        loop {
            if let Err(e) = self.run_cycle().await {
                tracing::error!(error = ?e, "Request queue poll failed: {e}");
                tokio::time::sleep(self.options.error_backoff).await;
            }
        }
    }

    /// One poll/process/ack cycle. Messages are processed as independent
    /// tasks: one message failing, however it fails, never aborts its batch
    /// siblings. Failed messages stay un-acked and reappear after the
    /// visibility window (dead-lettering is queue configuration, not ours).
    pub async fn run_cycle(&self) -> Result<usize, RequestsQueueError> {
        let batch = self
            .requests_queue
            .poll(
                self.options.poll_max_messages,
                self.options.poll_wait_seconds,
            )
            .await?;
        let received = batch.len();

        let tasks: Vec<_> = batch
            .into_iter()
            .map(|message| {
                let requests_queue = self.requests_queue.clone();
                let results_repository = self.results_repository.clone();
                let result_ttl_seconds = self.options.result_ttl_seconds;
                tokio::spawn(process_message(
                    requests_queue,
                    results_repository,
                    result_ttl_seconds,
                    message,
                ))
            })
            .collect();

        for task in tasks {
            match task.await {
                Ok(Ok(correlation_id)) => {
                    tracing::info!(
                        correlation_id = correlation_id.as_str(),
                        "Stored result for {correlation_id}"
                    );
                }
                Ok(Err(e)) => {
                    tracing::error!(error = ?e, "Message left for redelivery: {e}");
                }
                Err(e) => {
                    tracing::error!(error = ?e, "Message processing task panicked: {e}");
                }
            }
        }

        Ok(received)
    }
}

/// Processes a single queue message. The result write happens strictly
/// before the ack: if the write fails the message is redelivered, and a
/// redelivered message simply overwrites the same record.
pub async fn process_message(
    requests_queue: Arc<dyn RequestsQueue>,
    results_repository: Arc<dyn ResultsRepository>,
    result_ttl_seconds: i64,
    message: ReceivedMessage,
) -> Result<String, ProcessMessageError> {
    let request: KeyGenRequest =
        serde_json::from_str(&message.body).map_err(ProcessMessageError::Malformed)?;

    tracing::info!(
        correlation_id = request.correlation_id.as_str(),
        "Processing request {} ({}-{})",
        request.correlation_id,
        request.key_type,
        request.key_bits,
    );

    let key_type = request.key_type;
    let key_bits = request.key_bits;
    let keypair = tokio::task::spawn_blocking(move || keys::generate(key_type, key_bits))
        .await
        .map_err(|e| {
            ProcessMessageError::Generation(KeyGeneratorError::Generation(
                anyhow!(e).context("Key generation task aborted"),
            ))
        })??;

    let now = Utc::now();
    let result = KeyGenResult {
        correlation_id: request.correlation_id.clone(),
        status: ResultStatus::Complete,
        key_type: request.key_type,
        public_key_b64: base64::encode_block(keypair.public.as_bytes()),
        private_key_b64: base64::encode_block(keypair.private.as_bytes()),
        created_at: now,
        ttl: now.timestamp() + result_ttl_seconds,
    };

    results_repository.store_result(result).await?;
    requests_queue.delete(&message.receipt_handle).await?;

    Ok(request.correlation_id)
}
