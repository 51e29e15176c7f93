//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! The note store is opened here and made available through AppState.

use crate::config;
use crate::database;
use crate::error::Result;
use crate::services::NotesService;
use std::path::PathBuf;

/// Central application state holding all services
#[derive(Clone, Debug)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub notes_service: NotesService,
}

/// Application setup - called once on startup
pub async fn setup(app_data_dir: PathBuf) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", app_data_dir);

    std::fs::create_dir_all(&app_data_dir)?;

    let repo = database::open_store(&config::database_path(&app_data_dir)).await?;
    let notes_service = NotesService::new(repo);

    tracing::info!("Application initialized successfully");

    Ok(AppState {
        app_data_dir,
        notes_service,
    })
}
