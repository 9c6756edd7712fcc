use std::sync::Arc;
use std::time::Duration;

use tracing::level_filters::LevelFilter;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use common::aws_clients::dynamodb::get_dynamodb_client;
use common::aws_clients::sqs::get_sqs_client;
use common::config::ConfigLoader;
use config::Config;
use keygen_service::worker::health;
use keygen_service::worker::{Worker, WorkerOptions};
use repositories::requests::requests_queue_impl::RequestsQueueImpl;
use repositories::requests::RequestsQueue;
use repositories::results::response_queue_repository_impl::ResponseQueueRepositoryImpl;
use repositories::results::results_repository_impl::ResultsRepositoryImpl;
use repositories::results::ResultsRepository;

mod config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    LogTracer::init()?;
    let app_name = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION")).to_string();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let bunyan_formatting_layer = BunyanFormattingLayer::new(app_name, non_blocking_writer);

    tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer)
        .init();

    let config = ConfigLoader::load_default::<Config>().await;

    let requests_queue: Arc<dyn RequestsQueue> = Arc::new(RequestsQueueImpl::new(
        config.request_queue_url.clone(),
        get_sqs_client().await,
    ));

    // A keyed table wins when both backends are configured; an outbound
    // queue store cannot serve the result lookup front.
    let results_repository: Arc<dyn ResultsRepository> =
        match (&config.results_table_name, &config.response_queue_url) {
            (Some(table_name), _) => Arc::new(ResultsRepositoryImpl::new(
                table_name.clone(),
                get_dynamodb_client().await,
            )),
            (None, Some(queue_url)) => Arc::new(ResponseQueueRepositoryImpl::new(
                queue_url.clone(),
                get_sqs_client().await,
            )),
            (None, None) => {
                panic!("Either RESULTS_TABLE_NAME or RESPONSE_QUEUE_URL must be set")
            }
        };

    let health_port = config.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(health_port).await {
            tracing::error!(error = ?e, "Health listener terminated: {e}");
        }
    });

    let options = WorkerOptions {
        result_ttl_seconds: config.result_ttl_seconds,
        poll_max_messages: config.poll_max_messages,
        poll_wait_seconds: config.poll_wait_seconds,
        error_backoff: Duration::from_secs(config.error_backoff_seconds),
    };

    tracing::info!(
        request_queue_url = config.request_queue_url,
        "Starting key generation worker"
    );

    Worker::new(requests_queue, results_repository, options)
        .run()
        .await;

    Ok(())
}
