pub mod access;
pub mod app;
pub mod auth;
pub mod config;
pub mod data;
pub mod micros;
pub mod plans;
pub mod profile;
pub mod progress;
pub mod state;
pub mod targets;
