pub mod api;
pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod search;
pub mod services;

pub use app::{app, AppState};
