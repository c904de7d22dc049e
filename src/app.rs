//! Huvudapplikation för Родословная собаки

use eframe::egui;
use std::sync::Arc;

use crate::models::AppSettings;
use crate::services::{ExportPipeline, SvgRasterizer};
use crate::ui::{
    state::AppState,
    theme::{configure_style, Colors, Icons},
    views::{CreateFormView, GalleryView, InstructionsView, PreviewView},
    StatusType, View,
};

/// Huvudapplikation
pub struct PedigreeApp {
    state: AppState,
    app_settings: AppSettings,
    rasterizer: Arc<SvgRasterizer>,
    pipeline: ExportPipeline,

    // Vyer
    create_form: CreateFormView,
    preview: PreviewView,
    gallery: GalleryView,
    instructions: InstructionsView,

    // Intern
    style_initialized: bool,
}

impl PedigreeApp {
    /// Skapa ny applikation
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        // Ladda appinställningar
        let app_settings = AppSettings::load();

        // Typsnitten laddas en gång och delas av förhandsvisning och export
        let rasterizer = Arc::new(SvgRasterizer::new());
        let pipeline = ExportPipeline::new(rasterizer.clone());

        let mut state = AppState::new();
        state.dark_mode = app_settings.dark_mode;

        Self {
            state,
            app_settings,
            rasterizer,
            pipeline,
            create_form: CreateFormView::new(),
            preview: PreviewView::new(),
            gallery: GalleryView::new(),
            instructions: InstructionsView::new(),
            style_initialized: false,
        }
    }

    fn save_settings(&mut self) {
        self.app_settings.dark_mode = self.state.dark_mode;
        if let Err(e) = self.app_settings.save() {
            tracing::error!("Kunde inte spara inställningar: {}", e);
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("{} Родословная собаки", Icons::DOG));
                ui.separator();

                let gallery_label = format!("{} Галерея ({})", Icons::IMAGES, self.state.gallery().len());
                let nav_items = [
                    (View::Create, format!("{} Создание", Icons::EDIT)),
                    (View::Preview, format!("{} Предпросмотр", Icons::EYE)),
                    (View::Gallery, gallery_label),
                    (View::Instructions, format!("{} Инструкция", Icons::BOOK)),
                ];

                for (view, label) in nav_items {
                    if ui
                        .selectable_label(self.state.current_view == view, label)
                        .clicked()
                    {
                        self.state.navigate(view);
                    }
                }

                // Höger sida
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    // Dark mode toggle
                    let mode_icon = if self.state.dark_mode { "🌙" } else { "☀" };
                    if ui.button(mode_icon).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        configure_style(ctx, self.state.dark_mode);
                        self.save_settings();
                    }

                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .small()
                            .weak(),
                    );
                });
            });
        });
    }
}

impl eframe::App for PedigreeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Konfigurera stil (endast första gången)
        if !self.style_initialized {
            configure_style(ctx, self.state.dark_mode);
            self.style_initialized = true;
        }

        // Rensa gamla statusmeddelanden
        self.state.clear_old_status();

        // Rendera om ytan när modellen ändrats
        self.state.refresh_surface(&self.app_settings.chart_font_family);

        // Hämta resultat från bakgrundsexporter
        self.state.poll_exports();
        if self.state.has_pending_exports() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.top_panel(ctx);

        // Statusbar
        if let Some(ref status) = self.state.status_message {
            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = match status.status_type {
                    StatusType::Success => Colors::SUCCESS,
                    StatusType::Error => Colors::ERROR,
                    StatusType::Info => Colors::INFO,
                };
                ui.colored_label(color, &status.text);
            });
            // Meddelandet ska försvinna även utan input
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }

        // Huvudinnehåll
        let mut settings_changed = false;
        egui::CentralPanel::default().show(ctx, |ui| match self.state.current_view {
            View::Create => {
                self.create_form.show(ui, &mut self.state);
            }
            View::Preview => {
                settings_changed = self.preview.show(
                    ui,
                    &mut self.state,
                    &self.rasterizer,
                    &self.pipeline,
                    &mut self.app_settings,
                );
            }
            View::Gallery => {
                self.gallery.show(ui, &mut self.state);
            }
            View::Instructions => {
                self.instructions.show(ui);
            }
        });

        if settings_changed {
            self.save_settings();
        }
    }
}
