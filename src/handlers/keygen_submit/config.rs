use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub request_queue_url: String,
}
