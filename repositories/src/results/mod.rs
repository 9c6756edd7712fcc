use crate::impl_unknown_error_trait;
use async_trait::async_trait;
use model::keygen::KeyGenResult;
use serde::Serialize;

pub mod response_queue_repository_impl;
pub mod results_repository_impl;

#[cfg(feature = "test_mocks")]
use mockall::mock;

/// DynamoDB primary key for a result record.
#[derive(Serialize)]
struct ResultKey {
    pub correlation_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ResultsRepositoryError {
    #[error("{0:#}")]
    Unknown(anyhow::Error),
    #[error("{0}")]
    ResultNotFound(String),
    #[error("result lookups are not supported by the {0} backend")]
    LookupUnsupported(&'static str),
}

impl_unknown_error_trait!(ResultsRepositoryError);

/// Where completed results go. The keyed-table backend supports lookups;
/// the response-queue backend hands retrieval to a downstream consumer and
/// fails `get_result` with `LookupUnsupported`.
#[async_trait]
pub trait ResultsRepository
where
    Self: Sync + Send,
{
    async fn store_result(&self, result: KeyGenResult) -> Result<(), ResultsRepositoryError>;

    async fn get_result(&self, correlation_id: &str)
        -> Result<KeyGenResult, ResultsRepositoryError>;
}

#[cfg(feature = "test_mocks")]
mock! {
    pub ResultsRepository {}
    #[async_trait]
    impl ResultsRepository for ResultsRepository {
        async fn store_result(&self, result: KeyGenResult) -> Result<(), ResultsRepositoryError>;
        async fn get_result(&self, correlation_id: &str) -> Result<KeyGenResult, ResultsRepositoryError>;
    }
}
