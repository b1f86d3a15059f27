pub mod config;
pub mod forecast_client;
pub mod response;
pub mod tabular;
