pub const CORRELATION_ID_FOR_MOCK_REQUESTS: &str = "a58e4a4f-66d7-48d6-8ff3-9b09daebe066";
pub const QUEUE_URL_FOR_MOCK_REQUESTS: &str =
    "http://localstack:4566/000000000000/keygen-requests";
pub const RESPONSE_QUEUE_URL_FOR_MOCK_REQUESTS: &str =
    "http://localstack:4566/000000000000/keygen-results";
pub const TABLE_NAME_FOR_MOCK_REQUESTS: &str = "keygen-results";
