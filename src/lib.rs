//! Board API backend: stateless session-token authentication over an
//! in-process user directory.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
