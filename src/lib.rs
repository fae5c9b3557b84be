pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
