pub mod http;
pub mod keys;
pub mod lambda_structure;
pub mod result;
pub mod validations;
pub mod worker;
