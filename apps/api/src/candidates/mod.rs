pub mod handlers;
pub mod requests;
pub mod service;
