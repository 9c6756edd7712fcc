use anyhow::anyhow;
use http::StatusCode;
use lambda_http::{run, service_fn, Error, Request};
use serde_json::json;

use common::aws_clients::dynamodb::get_dynamodb_client;
use common::config::ConfigLoader;
use config::Config;
use keygen_service::http::errors::unknown_error_response;
use keygen_service::http::lambda_proxy::LambdaProxyHttpResponse;
use keygen_service::http_lambda_main;
use keygen_service::lambda_structure::http_lambda_main::{HttpLambdaResponse, RequestExtractor};
use keygen_service::result::error::LambdaError;
use repositories::results::results_repository_impl::ResultsRepositoryImpl;
use repositories::results::{ResultsRepository, ResultsRepositoryError};

mod config;

pub const CORRELATION_ID_PATH_PARAM: &str = "id";

pub struct State<R: ResultsRepository> {
    pub results_repository: R,
}

http_lambda_main!(
    {
        let config = ConfigLoader::load_default::<Config>().await;
        let results_repository =
            ResultsRepositoryImpl::new(config.results_table_name, get_dynamodb_client().await);

        State { results_repository }
    },
    keygen_fetch_result
);

async fn keygen_fetch_result(
    request: Request,
    state: &State<impl ResultsRepository>,
) -> HttpLambdaResponse {
    let correlation_id: String = request.extract_path_param(CORRELATION_ID_PATH_PARAM)?;

    match state.results_repository.get_result(&correlation_id).await {
        Ok(result) => {
            let body = serde_json::to_string(&result)
                .map_err(|e| unknown_error_response(LambdaError::Unknown(anyhow!("{e}"))))?;
            LambdaProxyHttpResponse {
                status_code: StatusCode::OK,
                body: Some(body),
                ..LambdaProxyHttpResponse::default()
            }
            .try_into()
        }
        // No record is the pending signal; a never-submitted id looks the
        // same as one still in flight.
        Err(ResultsRepositoryError::ResultNotFound(_)) => LambdaProxyHttpResponse {
            status_code: StatusCode::ACCEPTED,
            body: Some(
                json!({ "status": "pending", "correlation_id": correlation_id }).to_string(),
            ),
            ..LambdaProxyHttpResponse::default()
        }
        .try_into(),
        Err(e) => Err(unknown_error_response(LambdaError::Unknown(e.into()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use common::test_tools::dtos::{Error as ErrorBody, PendingBody};
    use common::test_tools::http::constants::CORRELATION_ID_FOR_MOCK_REQUESTS;
    use common::test_tools::http::helpers::{build_request, build_request_with_path_params};
    use lambda_http::Body;
    use mockall::predicate::eq;
    use model::keygen::{KeyGenResult, KeyType, ResultStatus};
    use repositories::results::MockResultsRepository;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    struct TestFixture {
        pub results_repository: MockResultsRepository,
    }

    #[fixture]
    fn fixture() -> TestFixture {
        TestFixture {
            results_repository: MockResultsRepository::new(),
        }
    }

    fn build_fetch_request() -> Request {
        build_request_with_path_params(
            Body::Empty,
            HashMap::from([(
                CORRELATION_ID_PATH_PARAM.to_owned(),
                CORRELATION_ID_FOR_MOCK_REQUESTS.to_owned(),
            )]),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_complete_result(mut fixture: TestFixture) {
        let now = Utc::now();
        let stored = KeyGenResult {
            correlation_id: CORRELATION_ID_FOR_MOCK_REQUESTS.to_owned(),
            status: ResultStatus::Complete,
            key_type: KeyType::Ed25519,
            public_key_b64: "c3NoLWVkMjU1MTk=".to_owned(),
            private_key_b64: "LS0tLS1CRUdJTg==".to_owned(),
            created_at: now,
            ttl: (now + Duration::hours(24)).timestamp(),
        };
        let expected = stored.clone();
        fixture
            .results_repository
            .expect_get_result()
            .with(eq(CORRELATION_ID_FOR_MOCK_REQUESTS))
            .once()
            .returning(move |_| Ok(stored.clone()));

        let response = keygen_fetch_result(
            build_fetch_request(),
            &State {
                results_repository: fixture.results_repository,
            },
        )
        .await
        .unwrap();

        assert_eq!(StatusCode::OK, response.status());
        let body: KeyGenResult = serde_json::from_str(response.body()).unwrap();
        assert_eq!(expected.correlation_id, body.correlation_id);
        assert_eq!(expected.public_key_b64, body.public_key_b64);
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_absent_result_is_pending(mut fixture: TestFixture) {
        fixture
            .results_repository
            .expect_get_result()
            .once()
            .returning(|_| {
                Err(ResultsRepositoryError::ResultNotFound(
                    "no such record".to_owned(),
                ))
            });

        let response = keygen_fetch_result(
            build_fetch_request(),
            &State {
                results_repository: fixture.results_repository,
            },
        )
        .await
        .unwrap();

        assert_eq!(StatusCode::ACCEPTED, response.status());
        let body: PendingBody = serde_json::from_str(response.body()).unwrap();
        assert_eq!("pending", body.status);
        assert_eq!(CORRELATION_ID_FOR_MOCK_REQUESTS, body.correlation_id);
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_missing_path_param_is_validation_error(fixture: TestFixture) {
        let response = keygen_fetch_result(
            build_request(Body::Empty),
            &State {
                results_repository: fixture.results_repository,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(StatusCode::BAD_REQUEST, response.status());
        let body: ErrorBody = serde_json::from_str(response.body()).unwrap();
        assert_eq!("validation", body.code);
        assert!(body.message.contains("id not found in request path"));
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_store_error_is_server_error(mut fixture: TestFixture) {
        fixture
            .results_repository
            .expect_get_result()
            .once()
            .returning(|_| {
                Err(ResultsRepositoryError::Unknown(anyhow!(
                    "results table is down"
                )))
            });

        let response = keygen_fetch_result(
            build_fetch_request(),
            &State {
                results_repository: fixture.results_repository,
            },
        )
        .await
        .unwrap_err();

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        let body: ErrorBody = serde_json::from_str(response.body()).unwrap();
        assert_eq!("server_error", body.code);
    }
}
