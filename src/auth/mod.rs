// Bearer-token authorization gate

pub mod api_token;
pub mod auth_middleware;
pub mod audit_logger;
