pub mod error;
pub mod forecast;
pub mod session;
pub mod upload;
