pub mod errors;
pub mod lambda_proxy;
