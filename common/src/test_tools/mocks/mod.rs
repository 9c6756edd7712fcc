pub mod dynamodb_client;
pub mod sqs_client;
