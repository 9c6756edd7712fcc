use crate::results::{ResultsRepository, ResultsRepositoryError};
use anyhow::anyhow;
use async_trait::async_trait;
use model::keygen::KeyGenResult;
use rusoto_sqs::{SendMessageRequest, Sqs};

const BACKEND_NAME: &str = "response queue";

/// Outbound-queue backend. Completed results are published to a response
/// queue owned by a downstream consumer; there is no lookup path, so a
/// status front cannot run against this backend.
pub struct ResponseQueueRepositoryImpl<T: Sqs + Sync + Send> {
    response_queue_url: String,
    sqs_client: T,
}

impl<T: Sqs + Sync + Send> ResponseQueueRepositoryImpl<T> {
    pub fn new(response_queue_url: String, sqs_client: T) -> Self {
        Self {
            response_queue_url,
            sqs_client,
        }
    }
}

#[async_trait]
impl<T: Sqs + Sync + Send> ResultsRepository for ResponseQueueRepositoryImpl<T> {
    async fn store_result(&self, result: KeyGenResult) -> Result<(), ResultsRepositoryError> {
        let message_body = serde_json::to_string(&result).map_err(|e| {
            ResultsRepositoryError::Unknown(anyhow!(e).context("Error serializing result message"))
        })?;

        self.sqs_client
            .send_message(SendMessageRequest {
                message_body,
                queue_url: self.response_queue_url.clone(),
                ..SendMessageRequest::default()
            })
            .await
            .map_err(|e| {
                ResultsRepositoryError::Unknown(anyhow!(e).context(format!(
                    "Error publishing result for correlation id: {}",
                    result.correlation_id
                )))
            })?;

        Ok(())
    }

    async fn get_result(
        &self,
        _correlation_id: &str,
    ) -> Result<KeyGenResult, ResultsRepositoryError> {
        Err(ResultsRepositoryError::LookupUnsupported(BACKEND_NAME))
    }
}
