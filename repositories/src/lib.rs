pub mod deserialize;
pub mod requests;
pub mod results;
