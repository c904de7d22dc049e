//! Родословная собаки - stamtavlor för hundar
//!
//! Formulär, förhandsvisning och PNG-export byggd med Rust och egui.

#![allow(dead_code)]

pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

// Re-exports
pub use models::*;
pub use services::{ExportPipeline, GalleryStore, RenderSurface, SvgRasterizer};
pub use ui::{AppState, View};
pub use utils::{AppError, AppResult};
