use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    /// Inbound queue of key generation requests.
    pub request_queue_url: String,

    /// Keyed-table result backend. Takes precedence when set.
    pub results_table_name: Option<String>,

    /// Outbound-queue result backend, used when no table is configured.
    pub response_queue_url: Option<String>,

    #[serde(default = "default_result_ttl_seconds")]
    pub result_ttl_seconds: i64,

    #[serde(default = "default_poll_max_messages")]
    pub poll_max_messages: i64,

    #[serde(default = "default_poll_wait_seconds")]
    pub poll_wait_seconds: i64,

    #[serde(default = "default_error_backoff_seconds")]
    pub error_backoff_seconds: u64,

    #[serde(default = "default_health_port")]
    pub health_port: u16,
}

fn default_result_ttl_seconds() -> i64 {
    model::keygen::DEFAULT_RESULT_TTL_SECONDS
}

fn default_poll_max_messages() -> i64 {
    10
}

fn default_poll_wait_seconds() -> i64 {
    10
}

fn default_error_backoff_seconds() -> u64 {
    5
}

fn default_health_port() -> u16 {
    8080
}
