pub mod dtos;
pub mod http;
pub mod mocks;
