use crate::requests::{ReceivedMessage, RequestsQueue, RequestsQueueError};
use anyhow::anyhow;
use async_trait::async_trait;
use model::keygen::KeyGenRequest;
use rusoto_sqs::{DeleteMessageRequest, ReceiveMessageRequest, SendMessageRequest, Sqs};

pub struct RequestsQueueImpl<T: Sqs + Sync + Send> {
    queue_url: String,
    sqs_client: T,
}

impl<T: Sqs + Sync + Send> RequestsQueueImpl<T> {
    pub fn new(queue_url: String, sqs_client: T) -> Self {
        Self {
            queue_url,
            sqs_client,
        }
    }
}

#[async_trait]
impl<T: Sqs + Sync + Send> RequestsQueue for RequestsQueueImpl<T> {
    async fn enqueue(&self, request: &KeyGenRequest) -> Result<String, RequestsQueueError> {
        let message_body = serde_json::to_string(request).map_err(|e| {
            RequestsQueueError::Unavailable(
                anyhow!(e).context("Error serializing request message"),
            )
        })?;

        let result = self
            .sqs_client
            .send_message(SendMessageRequest {
                message_body,
                queue_url: self.queue_url.clone(),
                ..SendMessageRequest::default()
            })
            .await
            .map_err(|e| {
                RequestsQueueError::Unavailable(anyhow!(e).context(format!(
                    "Error enqueueing request for correlation id: {}",
                    request.correlation_id
                )))
            })?;

        Ok(result.message_id.unwrap_or_default())
    }

    async fn poll(
        &self,
        max_messages: i64,
        wait_seconds: i64,
    ) -> Result<Vec<ReceivedMessage>, RequestsQueueError> {
        let result = self
            .sqs_client
            .receive_message(ReceiveMessageRequest {
                queue_url: self.queue_url.clone(),
                max_number_of_messages: Some(max_messages),
                wait_time_seconds: Some(wait_seconds),
                ..ReceiveMessageRequest::default()
            })
            .await
            .map_err(|e| {
                RequestsQueueError::Unavailable(
                    anyhow!(e).context("Error polling the request queue"),
                )
            })?;

        let messages = result
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|message| match (message.body, message.receipt_handle) {
                (Some(body), Some(receipt_handle)) => Some(ReceivedMessage {
                    body,
                    receipt_handle,
                    message_id: message.message_id,
                }),
                _ => {
                    // Cannot be acked without a receipt handle; let the
                    // visibility window return it.
                    tracing::warn!("Discarding received message without body or receipt handle");
                    None
                }
            })
            .collect();

        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), RequestsQueueError> {
        self.sqs_client
            .delete_message(DeleteMessageRequest {
                queue_url: self.queue_url.clone(),
                receipt_handle: receipt_handle.to_owned(),
            })
            .await
            .map_err(|e| {
                RequestsQueueError::Unavailable(
                    anyhow!(e).context("Error deleting message from the request queue"),
                )
            })
    }
}
