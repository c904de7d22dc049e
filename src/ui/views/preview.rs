use egui::{self, RichText, TextureHandle};

use crate::models::AppSettings;
use crate::services::{ExportPipeline, SvgRasterizer};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::path::display_path;

/// Förhandsvisning av stamtavlan och export
pub struct PreviewView {
    texture: Option<TextureHandle>,
    /// Revisionen som texturen rastrerades från
    texture_revision: Option<u64>,
    render_error: Option<String>,
}

impl PreviewView {
    pub fn new() -> Self {
        Self {
            texture: None,
            texture_revision: None,
            render_error: None,
        }
    }

    /// Returnerar true om inställningarna ändrats och ska sparas
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &mut AppState,
        rasterizer: &SvgRasterizer,
        pipeline: &ExportPipeline,
        settings: &mut AppSettings,
    ) -> bool {
        self.refresh_texture(ui.ctx(), state, rasterizer);
        let mut settings_changed = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                self.show_canvas(ui, settings.preview_scale);

                ui.add_space(16.0);

                let export_button = egui::Button::new(
                    RichText::new(format!("{} Экспортировать PNG (1050×1050px)", Icons::DOWNLOAD))
                        .size(16.0)
                        .strong(),
                )
                .min_size(egui::vec2(280.0, 40.0));
                if ui.add(export_button).clicked() {
                    state.start_export(pipeline, settings.resolved_export_directory());
                }

                if state.has_pending_exports() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new("Экспорт...").color(Colors::TEXT_SECONDARY));
                    });
                }

                ui.label(
                    RichText::new("Размер идеально подходит для печати на кружке")
                        .small()
                        .color(Colors::TEXT_SECONDARY),
                );

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(format!(
                        "{} Папка: {}",
                        Icons::FOLDER,
                        display_path(&settings.resolved_export_directory())
                    ));
                    if ui.button("Изменить...").clicked() {
                        if let Some(path) = rfd::FileDialog::new().pick_folder() {
                            tracing::info!("Ny exportkatalog: {:?}", path);
                            settings.export_directory = Some(path);
                            settings_changed = true;
                        }
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Масштаб:");
                    let response = ui.add(
                        egui::Slider::new(&mut settings.preview_scale, 0.3..=1.0).fixed_decimals(2),
                    );
                    if response.drag_stopped() || (response.changed() && !response.dragged()) {
                        settings_changed = true;
                    }
                });
            });
        });

        settings_changed
    }

    fn refresh_texture(&mut self, ctx: &egui::Context, state: &AppState, rasterizer: &SvgRasterizer) {
        if self.texture_revision == Some(state.revision()) {
            return;
        }
        let Some(surface) = state.surface() else {
            return;
        };

        // Samma rastrering som exporten, i 1x
        match rasterizer.render_rgba(surface, surface.width, surface.height, 1.0) {
            Ok(rgba) => {
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                match &mut self.texture {
                    Some(texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("pedigree-preview", color_image, egui::TextureOptions::LINEAR));
                    }
                }
                self.render_error = None;
            }
            Err(e) => {
                tracing::error!("Förhandsvisning misslyckades: {}", e);
                self.render_error = Some(e.to_string());
            }
        }
        self.texture_revision = Some(state.revision());
    }

    fn show_canvas(&self, ui: &mut egui::Ui, scale: f32) {
        egui::Frame::none()
            .stroke(egui::Stroke::new(2.0, Colors::TEXT_MUTED))
            .rounding(8.0)
            .inner_margin(4.0)
            .show(ui, |ui| match (&self.texture, &self.render_error) {
                (_, Some(err)) => {
                    ui.colored_label(Colors::ERROR, err);
                }
                (Some(texture), None) => {
                    let size = texture.size_vec2() * scale;
                    ui.image((texture.id(), size));
                }
                (None, None) => {
                    ui.spinner();
                }
            });
    }
}

impl Default for PreviewView {
    fn default() -> Self {
        Self::new()
    }
}
