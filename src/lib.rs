// Library root for the card service

pub mod core;
pub mod store;
pub mod auth;
pub mod api;
pub mod metrics;
pub mod config;
