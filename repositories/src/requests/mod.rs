use async_trait::async_trait;
use model::keygen::KeyGenRequest;

pub mod requests_queue_impl;

#[cfg(feature = "test_mocks")]
use mockall::mock;

/// A message pulled from the request queue. The body is kept raw so a
/// malformed payload fails at the consumer, not at the poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub body: String,
    pub receipt_handle: String,
    pub message_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestsQueueError {
    #[error("{0:#}")]
    Unavailable(#[source] anyhow::Error),
}

/// Inbound work distribution. At-least-once delivery: a polled message stays
/// invisible for the queue's visibility window and reappears unless deleted.
#[async_trait]
pub trait RequestsQueue
where
    Self: Sync + Send,
{
    /// Enqueues a request and returns the queue message id.
    async fn enqueue(&self, request: &KeyGenRequest) -> Result<String, RequestsQueueError>;

    /// Long-polls for up to `max_messages`, waiting at most `wait_seconds`.
    /// An empty batch is a normal outcome.
    async fn poll(
        &self,
        max_messages: i64,
        wait_seconds: i64,
    ) -> Result<Vec<ReceivedMessage>, RequestsQueueError>;

    /// Acknowledges a message. Skipping this after processing is equivalent
    /// to a crash: the message is redelivered.
    async fn delete(&self, receipt_handle: &str) -> Result<(), RequestsQueueError>;
}

#[cfg(feature = "test_mocks")]
mock! {
    pub RequestsQueue {}
    #[async_trait]
    impl RequestsQueue for RequestsQueue {
        async fn enqueue(&self, request: &KeyGenRequest) -> Result<String, RequestsQueueError>;
        async fn poll(&self, max_messages: i64, wait_seconds: i64) -> Result<Vec<ReceivedMessage>, RequestsQueueError>;
        async fn delete(&self, receipt_handle: &str) -> Result<(), RequestsQueueError>;
    }
}
