use std::str::FromStr;

use http::header::ToStrError;
use http::Response;
use lambda_http::{Body, Request, RequestExt};
use serde::de::DeserializeOwned;

use crate::http::errors::validation_error_response;
use crate::result::error::LambdaError;

pub type HttpLambdaResponse = Result<Response<String>, Response<String>>;

// This macro is the entry point for the binaries that sit behind the API
// Gateway. It reduces boilerplate, preserves state between executions and
// lets handlers surface an error as an HTTP response with the `?` operator.
//
// An optional third parameter is a list of request validations executed
// before the business logic, declared as
// `Fn(&Request) -> Result<(), Response<String>>` and kept under
// `<root>/src/validations/http/`.
//
// Example usage:
// ```
// http_lambda_main!(
// { .. State },
// main_fn,
// [
//   validation_1,
//   validation_2
// ]
// )
#[macro_export]
macro_rules! http_lambda_main {
    ($persisted_block:block, $handler: ident) => {
        http_lambda_main!($persisted_block, $handler, []);
    };
    ($persisted_block:block, $handler: ident, [$($validation:ident),*]) => {
        #[tokio::main]
        async fn main() -> Result<(), Error> {
            use http::Response;
            use lambda_http::{Body, RequestExt};
            use keygen_service::lambda_structure::http_lambda_main::RequestExtractor;
            use tracing_subscriber::{filter::LevelFilter, prelude::*};
            use tracing_log::LogTracer;
            use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};

            LogTracer::init()?;

            let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
            let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
            let bunyan_formatting_layer =
                BunyanFormattingLayer::new(app_name.to_string(), non_blocking_writer);

            tracing_subscriber::registry()
                .with(LevelFilter::INFO)
                .with(JsonStorageLayer)
                .with(bunyan_formatting_layer)
                .init();

            let persisted = { $persisted_block };

            let service = |request: Request| async {
                let payload = match request.body() {
                    Body::Empty => "No Payload".to_owned(),
                    _ => match request.extract_body::<serde_json::Value>() {
                        Ok(payload) => payload.to_string(),
                        Err(e) => return Ok(e.into()),
                    }
                };
                tracing::info!(payload = ?payload, "Execution started");

                $(
                if let Err(response) = $validation(&request) {
                    return Ok(response);
                }
                )*

                let response: Result<Response<String>, Error> =
                    match $handler(request, &persisted).await {
                        Ok(response) => Ok(response),
                        Err(response) => Ok(response),
                    };

                response
            };

            run(service_fn(service)).await
        }
    };
}

pub trait RequestExtractor {
    fn extract_path_param<T: DeserializeOwned + FromStr>(
        &self,
        param_name: &str,
    ) -> Result<T, RequestExtractorError>;

    fn extract_header<T: DeserializeOwned + FromStr>(
        &self,
        header_name: &str,
    ) -> Result<T, RequestExtractorError>;

    fn extract_body<T: DeserializeOwned>(&self) -> Result<T, RequestExtractorError>;
}

impl RequestExtractor for Request {
    fn extract_path_param<T: DeserializeOwned + FromStr>(
        &self,
        param_name: &str,
    ) -> Result<T, RequestExtractorError> {
        let path_parameter = self.path_parameters();
        match path_parameter.first(param_name) {
            None => Err(RequestExtractorError::PathParamNotFoundError(
                param_name.to_owned(),
            )),
            Some(value) => T::from_str(value).map_err(|_| {
                RequestExtractorError::PathParamWithWrongTypeError(param_name.to_owned())
            }),
        }
    }

    fn extract_header<T: DeserializeOwned + FromStr>(
        &self,
        header_name: &str,
    ) -> Result<T, RequestExtractorError> {
        let headers = self.headers();
        match headers.get(header_name) {
            None => Err(RequestExtractorError::HeaderNotFoundError(
                header_name.to_string(),
            )),
            Some(value) => {
                let val = value
                    .to_str()
                    .map_err(RequestExtractorError::HeaderDeserializingError)?;
                T::from_str(val).map_err(|_| {
                    RequestExtractorError::HeaderWithWrongTypeError(header_name.to_string())
                })
            }
        }
    }

    fn extract_body<T: DeserializeOwned>(&self) -> Result<T, RequestExtractorError> {
        match self.body() {
            Body::Text(json_str) => Ok(serde_json::from_str(json_str)
                .map_err(RequestExtractorError::BodyDeserializationError)?),
            Body::Empty => Err(RequestExtractorError::BodyIsEmptyError),
            _ => Err(RequestExtractorError::BodyWithWrongTypeError),
        }
    }
}

pub enum RequestExtractorError {
    PathParamNotFoundError(String),
    PathParamWithWrongTypeError(String),
    HeaderNotFoundError(String),
    HeaderWithWrongTypeError(String),
    HeaderDeserializingError(ToStrError),
    BodyIsEmptyError,
    BodyWithWrongTypeError,
    BodyDeserializationError(serde_json::Error),
}

impl From<RequestExtractorError> for Response<String> {
    fn from(error: RequestExtractorError) -> Self {
        match error {
            RequestExtractorError::PathParamNotFoundError(param_name) => {
                validation_error_response(format!("{param_name} not found in request path"), None)
            }
            RequestExtractorError::PathParamWithWrongTypeError(param_name) => {
                validation_error_response(
                    format!("{param_name} with wrong type in request path"),
                    None,
                )
            }
            RequestExtractorError::HeaderNotFoundError(header_name) => validation_error_response(
                format!("{header_name} not found in request headers"),
                None,
            ),
            RequestExtractorError::HeaderWithWrongTypeError(header_name) => {
                validation_error_response(
                    format!("{header_name} with wrong type in request headers"),
                    None,
                )
            }
            RequestExtractorError::HeaderDeserializingError(e) => {
                crate::http::errors::unknown_error_response(LambdaError::Unknown(
                    anyhow::anyhow!(e),
                ))
            }
            RequestExtractorError::BodyIsEmptyError => {
                validation_error_response("body was empty".to_owned(), None)
            }
            RequestExtractorError::BodyWithWrongTypeError => {
                validation_error_response("body wasn't a text type".to_owned(), None)
            }
            RequestExtractorError::BodyDeserializationError(e) => {
                let message =
                    if e.is_data() && !e.to_string().contains("data did not match any variant") {
                        e.to_string()
                    } else {
                        "body failed to be converted to a json object".to_owned()
                    };
                validation_error_response(message, None)
            }
        }
    }
}
