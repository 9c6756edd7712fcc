use std::collections::HashMap;

use crate::deserialize::deserialize_from_dynamo;
use crate::results::{ResultKey, ResultsRepository, ResultsRepositoryError};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use model::keygen::KeyGenResult;
use rusoto_dynamodb::{AttributeValue, DynamoDb, GetItemInput, PutItemInput};

/// Keyed-table backend. Writes overwrite unconditionally, so a redelivered
/// request that regenerates a keypair simply wins the last write.
pub struct ResultsRepositoryImpl<T: DynamoDb + Sync + Send> {
    table_name: String,
    dynamodb_client: T,
}

impl<T: DynamoDb + Sync + Send> ResultsRepositoryImpl<T> {
    pub fn new(table_name: String, dynamodb_client: T) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }

    fn build_get_result_input(&self, correlation_id: &str) -> Result<GetItemInput, anyhow::Error> {
        let key = serde_dynamo::to_item(ResultKey {
            correlation_id: correlation_id.to_owned(),
        })
        .map_err(|e| anyhow!(e).context("Error building result record key"))?;

        Ok(GetItemInput {
            key,
            table_name: self.table_name.clone(),
            ..GetItemInput::default()
        })
    }

    fn build_store_result_input(&self, result: &KeyGenResult) -> Result<PutItemInput, anyhow::Error> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(result)
            .map_err(|e| anyhow!(e).context("Error serializing result record"))?;

        Ok(PutItemInput {
            item,
            table_name: self.table_name.clone(),
            ..PutItemInput::default()
        })
    }
}

#[async_trait]
impl<T: DynamoDb + Sync + Send> ResultsRepository for ResultsRepositoryImpl<T> {
    async fn store_result(&self, result: KeyGenResult) -> Result<(), ResultsRepositoryError> {
        let input = self
            .build_store_result_input(&result)
            .map_err(ResultsRepositoryError::Unknown)?;

        self.dynamodb_client.put_item(input).await.map_err(|e| {
            ResultsRepositoryError::Unknown(anyhow!(e).context(format!(
                "Error storing result for correlation id: {}",
                result.correlation_id
            )))
        })?;

        Ok(())
    }

    async fn get_result(
        &self,
        correlation_id: &str,
    ) -> Result<KeyGenResult, ResultsRepositoryError> {
        let input = self
            .build_get_result_input(correlation_id)
            .map_err(ResultsRepositoryError::Unknown)?;

        let record = self
            .dynamodb_client
            .get_item(input)
            .await
            .map_err(|e| {
                ResultsRepositoryError::Unknown(
                    anyhow!(e)
                        .context(format!("Error querying result by id: {correlation_id:?}")),
                )
            })?
            .item
            .ok_or_else(|| {
                ResultsRepositoryError::ResultNotFound(format!(
                    "Result with correlation id {correlation_id:?} not found"
                ))
            })?;

        let result: KeyGenResult = deserialize_from_dynamo(record)?;

        // DynamoDB TTL reaping is lazy; an expired record that is still
        // physically present must read as absent.
        if result.is_expired_at(Utc::now()) {
            return Err(ResultsRepositoryError::ResultNotFound(format!(
                "Result with correlation id {correlation_id:?} expired"
            )));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use common::test_tools::http::constants::{
        CORRELATION_ID_FOR_MOCK_REQUESTS, TABLE_NAME_FOR_MOCK_REQUESTS,
    };
    use common::test_tools::mocks::dynamodb_client::MockDbClient;
    use model::keygen::{KeyType, ResultStatus};
    use rstest::{fixture, rstest};
    use rusoto_core::RusotoError;
    use rusoto_dynamodb::{GetItemError, GetItemOutput, PutItemError, PutItemOutput};

    struct TestFixture {
        pub table_name: String,
        pub dynamodb_client: MockDbClient,
    }

    #[fixture]
    fn fixture() -> TestFixture {
        TestFixture {
            table_name: TABLE_NAME_FOR_MOCK_REQUESTS.to_owned(),
            dynamodb_client: MockDbClient::new(),
        }
    }

    fn build_result(ttl: i64) -> KeyGenResult {
        KeyGenResult {
            correlation_id: CORRELATION_ID_FOR_MOCK_REQUESTS.to_owned(),
            status: ResultStatus::Complete,
            key_type: KeyType::Ed25519,
            public_key_b64: "c3NoLWVkMjU1MTk=".to_owned(),
            private_key_b64: "LS0tLS1CRUdJTg==".to_owned(),
            created_at: Utc::now(),
            ttl,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn get_result_db_error(mut fixture: TestFixture) {
        fixture
            .dynamodb_client
            .expect_get_item()
            .once()
            .returning(|_| {
                Err(RusotoError::Service(GetItemError::InternalServerError(
                    "timeout!".to_owned(),
                )))
            });

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        let error = repo
            .get_result(CORRELATION_ID_FOR_MOCK_REQUESTS)
            .await
            .unwrap_err();
        assert!(matches!(error, ResultsRepositoryError::Unknown(_)));
        assert!(error.to_string().contains("timeout!"));
    }

    #[rstest]
    #[tokio::test]
    async fn get_result_not_found(mut fixture: TestFixture) {
        fixture
            .dynamodb_client
            .expect_get_item()
            .once()
            .returning(|_| Ok(GetItemOutput::default()));

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        let error = repo
            .get_result(CORRELATION_ID_FOR_MOCK_REQUESTS)
            .await
            .unwrap_err();
        assert!(matches!(error, ResultsRepositoryError::ResultNotFound(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn get_result_deserializing_error(mut fixture: TestFixture) {
        fixture
            .dynamodb_client
            .expect_get_item()
            .once()
            .returning(|_| {
                Ok(GetItemOutput {
                    item: Some(HashMap::default()),
                    ..GetItemOutput::default()
                })
            });

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        let error = repo
            .get_result(CORRELATION_ID_FOR_MOCK_REQUESTS)
            .await
            .unwrap_err();
        assert!(matches!(error, ResultsRepositoryError::Unknown(_)));
        assert!(error.to_string().contains("Error deserializing record"));
    }

    #[rstest]
    #[tokio::test]
    async fn get_result_expired_reads_as_absent(mut fixture: TestFixture) {
        let expired = build_result((Utc::now() - Duration::seconds(30)).timestamp());
        let record: HashMap<String, AttributeValue> = serde_dynamo::to_item(&expired).unwrap();
        fixture
            .dynamodb_client
            .expect_get_item()
            .once()
            .returning(move |_| {
                Ok(GetItemOutput {
                    item: Some(record.clone()),
                    ..GetItemOutput::default()
                })
            });

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        let error = repo
            .get_result(CORRELATION_ID_FOR_MOCK_REQUESTS)
            .await
            .unwrap_err();
        assert!(matches!(error, ResultsRepositoryError::ResultNotFound(_)));
        assert!(error.to_string().contains("expired"));
    }

    #[rstest]
    #[tokio::test]
    async fn get_result_found(mut fixture: TestFixture) {
        let expected = build_result((Utc::now() + Duration::hours(24)).timestamp());
        let record: HashMap<String, AttributeValue> = serde_dynamo::to_item(&expected).unwrap();
        fixture
            .dynamodb_client
            .expect_get_item()
            .with(mockall::predicate::eq(GetItemInput {
                key: serde_dynamo::to_item(ResultKey {
                    correlation_id: CORRELATION_ID_FOR_MOCK_REQUESTS.to_owned(),
                })
                .unwrap(),
                table_name: TABLE_NAME_FOR_MOCK_REQUESTS.to_owned(),
                ..GetItemInput::default()
            }))
            .once()
            .returning(move |_| {
                Ok(GetItemOutput {
                    item: Some(record.clone()),
                    ..GetItemOutput::default()
                })
            });

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        let result = repo
            .get_result(CORRELATION_ID_FOR_MOCK_REQUESTS)
            .await
            .unwrap();
        assert_eq!(expected.correlation_id, result.correlation_id);
        assert_eq!(expected.public_key_b64, result.public_key_b64);
        assert_eq!(expected.private_key_b64, result.private_key_b64);
        assert_eq!(expected.ttl, result.ttl);
    }

    #[rstest]
    #[tokio::test]
    async fn store_result_ok(mut fixture: TestFixture) {
        let result = build_result((Utc::now() + Duration::hours(24)).timestamp());
        let expected_item: HashMap<String, AttributeValue> =
            serde_dynamo::to_item(&result).unwrap();
        fixture
            .dynamodb_client
            .expect_put_item()
            .with(mockall::predicate::eq(PutItemInput {
                item: expected_item,
                table_name: TABLE_NAME_FOR_MOCK_REQUESTS.to_owned(),
                ..PutItemInput::default()
            }))
            .once()
            .returning(|_| Ok(PutItemOutput::default()));

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        repo.store_result(result).await.unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn store_result_db_error(mut fixture: TestFixture) {
        fixture
            .dynamodb_client
            .expect_put_item()
            .once()
            .returning(|_| {
                Err(RusotoError::Service(PutItemError::InternalServerError(
                    "throttled".to_owned(),
                )))
            });

        let repo = ResultsRepositoryImpl::new(fixture.table_name, fixture.dynamodb_client);
        let error = repo
            .store_result(build_result((Utc::now() + Duration::hours(24)).timestamp()))
            .await
            .unwrap_err();
        assert!(matches!(error, ResultsRepositoryError::Unknown(_)));
        assert!(error.to_string().contains("throttled"));
    }
}
