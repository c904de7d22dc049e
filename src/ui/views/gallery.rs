use std::collections::HashMap;

use egui::{self, RichText, TextureHandle};

use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};

const CARD_WIDTH: f32 = 240.0;
const CARD_PHOTO_HEIGHT: f32 = 160.0;

/// Galleri med sparade stamtavlor
pub struct GalleryView {
    /// Miniatyrer per post. Posterna ändras aldrig så index räcker som nyckel.
    thumbnails: HashMap<usize, Option<TextureHandle>>,
}

impl GalleryView {
    pub fn new() -> Self {
        Self {
            thumbnails: HashMap::new(),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        if state.gallery().is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.label(RichText::new(Icons::IMAGES).size(48.0).color(Colors::TEXT_MUTED));
                ui.add_space(16.0);
                ui.label(
                    RichText::new("Галерея пуста. Создайте и сохраните вашу первую родословную!")
                        .color(Colors::TEXT_SECONDARY),
                );
            });
            return;
        }

        let mut load_index = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
                for (index, entry) in state.gallery().entries().iter().enumerate() {
                    let texture = self.thumbnails.entry(index).or_insert_with(|| {
                        entry.model().photo.as_ref().and_then(|photo| {
                            super::photo_texture(ui.ctx(), &format!("gallery-{}", index), photo)
                        })
                    });

                    let clicked = egui::Frame::none()
                        .fill(ui.visuals().extreme_bg_color)
                        .rounding(8.0)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.set_width(CARD_WIDTH);
                            ui.vertical(|ui| {
                                if let Some(texture) = texture {
                                    let size = egui::vec2(CARD_WIDTH, CARD_PHOTO_HEIGHT);
                                    ui.add(
                                        egui::Image::new((texture.id(), size))
                                            .uv(super::cover_uv(texture.size_vec2(), size))
                                            .rounding(6.0),
                                    );
                                }

                                let model = entry.model();
                                ui.label(RichText::new(&model.name).strong().size(16.0));
                                ui.label(RichText::new(&model.breed).color(Colors::TEXT_SECONDARY));
                                ui.label(
                                    RichText::new(&model.birth_date)
                                        .small()
                                        .color(Colors::TEXT_MUTED),
                                );
                                ui.label(
                                    RichText::new(entry.saved_at().format("%d.%m.%Y %H:%M").to_string())
                                        .small()
                                        .color(Colors::TEXT_MUTED),
                                );

                                ui.add_space(8.0);
                                let button = egui::Button::new(format!("{} Загрузить", Icons::EYE))
                                    .min_size(egui::vec2(CARD_WIDTH, 28.0));
                                ui.add(button).clicked()
                            })
                            .inner
                        })
                        .inner;

                    if clicked {
                        load_index = Some(index);
                    }
                }
            });
        });

        if let Some(index) = load_index {
            state.load_from_gallery(index);
        }
    }
}

impl Default for GalleryView {
    fn default() -> Self {
        Self::new()
    }
}
