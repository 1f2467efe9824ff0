pub mod action;
pub mod api_client;
pub mod common;
pub mod config;
pub mod error;
