//! Melancholy Notes library
//!
//! This library exposes the note store, the services built on it and the
//! console front end, for the binary and for testing.

pub mod app;
pub mod config;
pub mod console;
pub mod database;
pub mod error;
pub mod services;
