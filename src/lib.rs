pub mod app;
pub mod config;
pub mod discover;
pub mod error;
pub mod genres;
pub mod mcp;
pub mod models;
pub mod resolve;
pub mod tmdb;
pub mod tools;
