// Domain types and errors shared by the store and the HTTP layer

pub mod errors;
pub mod models;
