use std::str::FromStr;

use http::StatusCode;
use lambda_http::{run, service_fn, Error, Request};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use common::aws_clients::sqs::get_sqs_client;
use common::config::ConfigLoader;
use config::Config;
use dtos::{KeygenRequestBody, MAX_RSA_KEY_BITS, MIN_RSA_KEY_BITS};
use keygen_service::http::errors::{unknown_error_response, validation_error_response};
use keygen_service::http::lambda_proxy::LambdaProxyHttpResponse;
use keygen_service::http_lambda_main;
use keygen_service::lambda_structure::http_lambda_main::{HttpLambdaResponse, RequestExtractor};
use keygen_service::result::error::LambdaError;
use keygen_service::validations::http::content_type::validate_content_type;
use model::keygen::{KeyGenRequest, KeyType};
use repositories::requests::requests_queue_impl::RequestsQueueImpl;
use repositories::requests::RequestsQueue;

mod config;
mod dtos;

pub struct State<Q: RequestsQueue> {
    pub requests_queue: Q,
}

http_lambda_main!(
    {
        let config = ConfigLoader::load_default::<Config>().await;
        let requests_queue =
            RequestsQueueImpl::new(config.request_queue_url, get_sqs_client().await);

        State { requests_queue }
    },
    keygen_submit,
    [validate_content_type]
);

async fn keygen_submit(request: Request, state: &State<impl RequestsQueue>) -> HttpLambdaResponse {
    let body: KeygenRequestBody = request.extract_body()?;

    body.validate().map_err(|_| {
        validation_error_response(
            format!("key_bits must be between {MIN_RSA_KEY_BITS} and {MAX_RSA_KEY_BITS} for rsa"),
            None,
        )
    })?;

    let key_type = KeyType::from_str(&body.key_type).map_err(|_| {
        validation_error_response(format!("unsupported key type: {}", body.key_type), None)
    })?;

    let correlation_id = Uuid::new_v4();
    let keygen_request = KeyGenRequest {
        correlation_id: correlation_id.to_string(),
        key_type,
        key_bits: body.key_bits,
    };

    state
        .requests_queue
        .enqueue(&keygen_request)
        .await
        .map_err(|e| unknown_error_response(LambdaError::Unknown(e.into())))?;

    LambdaProxyHttpResponse {
        status_code: StatusCode::ACCEPTED,
        body: Some(json!({ "request_id": correlation_id, "status": "queued" }).to_string()),
        ..LambdaProxyHttpResponse::default()
    }
    .try_into()
}
