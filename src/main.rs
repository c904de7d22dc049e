//! Родословная собаки - Entry Point

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(dead_code)]

mod app;
mod models;
mod services;
mod ui;
mod utils;

use app::PedigreeApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    // Initiera logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    tracing::info!("Startar Родословная собаки v{}", env!("CARGO_PKG_VERSION"));

    // Fönsterinställningar
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Родословная собаки")
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_app_id("dog-pedigree"),
        ..Default::default()
    };

    // Starta applikationen
    eframe::run_native(
        "Родословная собаки",
        options,
        Box::new(|cc| Ok(Box::new(PedigreeApp::new(cc)))),
    )
}
