//! Agroflight library
//!
//! Drone agricultural operations reporting: accounts, report submission,
//! dashboard and listing. The binary in `main.rs` serves it over HTTP.

pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod forms;
pub mod notice;
pub mod pages;
pub mod routes;
pub mod services;
