use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize, Debug)]
pub struct Error {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct QueuedAcceptedBody {
    pub request_id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct PendingBody {
    pub status: String,
    pub correlation_id: String,
}
