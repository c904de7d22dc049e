use std::path::{Path, PathBuf};

use egui::{self, RichText, TextureHandle};

use crate::models::{FieldPath, Rating, RatingKind, RelativeField, RelativeSlot};
use crate::ui::{
    state::AppState,
    theme::{Colors, Icons},
};
use crate::utils::file_ops::read_photo;
use crate::utils::path::{display_path, is_image_file, PHOTO_EXTENSIONS};

const THUMBNAIL_DISPLAY: f32 = 96.0;

/// Formulär för att fylla i stamtavlan
pub struct CreateFormView {
    /// Miniatyr och fotorevisionen den gjordes för
    thumbnail: Option<(u64, Option<TextureHandle>)>,
}

impl CreateFormView {
    pub fn new() -> Self {
        Self { thumbnail: None }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        // Ett foto kan också släppas på fönstret
        let dropped: Option<PathBuf> = ui.ctx().input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .find(|p| is_image_file(p))
        });
        if let Some(path) = dropped {
            load_photo(state, &path);
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(8.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());

                    ui.columns(2, |columns| {
                        self.main_info(&mut columns[0], state);
                        Self::ancestors(&mut columns[1], state);
                    });

                    ui.add_space(16.0);

                    let button = egui::Button::new(
                        RichText::new(format!("{} Сохранить в галерею", Icons::SAVE)).strong(),
                    )
                    .min_size(egui::vec2(ui.available_width(), 36.0));
                    if ui.add(button).clicked() {
                        state.save_to_gallery();
                    }
                });
        });
    }

    fn main_info(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.label(RichText::new(format!("{} Основная информация", Icons::PERSON)).heading());
        ui.add_space(8.0);

        text_field(ui, state, FieldPath::Name, "Кличка собаки *", "Шопен");
        text_field(ui, state, FieldPath::Breed, "Порода", "Бордер-колли");
        text_field(ui, state, FieldPath::BirthDate, "Дата рождения", "ДР: 30.02.22");

        ui.label("Фото собаки");
        ui.label(RichText::new("или перетащите файл в окно").small().color(Colors::TEXT_MUTED));
        ui.horizontal(|ui| {
            if ui.button(format!("{} Загрузить фото", Icons::UPLOAD)).clicked() {
                pick_photo(state);
            }
            if state.model().photo.is_some()
                && ui.button(Icons::DELETE).on_hover_text("Удалить фото").clicked()
            {
                state.clear_photo();
            }
        });
        self.show_thumbnail(ui, state);

        ui.add_space(8.0);
        for kind in RatingKind::ALL {
            rating_buttons(ui, state, kind);
            ui.add_space(4.0);
        }
    }

    fn show_thumbnail(&mut self, ui: &mut egui::Ui, state: &AppState) {
        let Some(photo) = state.model().photo.as_ref() else {
            self.thumbnail = None;
            return;
        };

        let revision = state.photo_revision();
        let stale = !matches!(self.thumbnail, Some((r, _)) if r == revision);
        if stale {
            let texture = super::photo_texture(ui.ctx(), "form-photo", photo);
            self.thumbnail = Some((revision, texture));
        }

        if let Some((_, Some(texture))) = &self.thumbnail {
            let size = egui::vec2(THUMBNAIL_DISPLAY, THUMBNAIL_DISPLAY);
            ui.add(
                egui::Image::new((texture.id(), size))
                    .uv(super::cover_uv(texture.size_vec2(), size))
                    .rounding(8.0),
            );
        } else {
            ui.label(RichText::new("Не удалось показать фото").color(Colors::TEXT_MUTED).small());
        }
    }

    fn ancestors(ui: &mut egui::Ui, state: &mut AppState) {
        ui.label(RichText::new(format!("{} Родители", Icons::PEOPLE)).heading());
        ui.add_space(8.0);

        text_field(
            ui,
            state,
            FieldPath::Relative(RelativeSlot::Father, RelativeField::Name),
            RelativeSlot::Father.label(),
            "Клички отца",
        );
        text_field(
            ui,
            state,
            FieldPath::Relative(RelativeSlot::Father, RelativeField::BirthDate),
            "Дата рождения отца",
            "ДР: XX.XX.XX",
        );
        text_field(
            ui,
            state,
            FieldPath::Relative(RelativeSlot::Mother, RelativeField::Name),
            RelativeSlot::Mother.label(),
            "Клички матери",
        );
        text_field(
            ui,
            state,
            FieldPath::Relative(RelativeSlot::Mother, RelativeField::BirthDate),
            "Дата рождения матери",
            "ДР: XX.XX.XX",
        );

        ui.add_space(8.0);
        ui.label(RichText::new(format!("{} Бабушки и дедушки", Icons::PEOPLE)).heading());
        ui.add_space(8.0);

        egui::Grid::new("grandparents_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let slots = &RelativeSlot::ALL[2..];
                for pair in slots.chunks(2) {
                    for slot in pair {
                        ui.vertical(|ui| grandparent_fields(ui, state, *slot));
                    }
                    ui.end_row();
                }
            });
    }
}

impl Default for CreateFormView {
    fn default() -> Self {
        Self::new()
    }
}

fn text_field(ui: &mut egui::Ui, state: &mut AppState, path: FieldPath, label: &str, hint: &str) {
    ui.label(label);
    let mut value = state.model().field(path).to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_field(path, value);
    }
    ui.add_space(4.0);
}

fn grandparent_fields(ui: &mut egui::Ui, state: &mut AppState, slot: RelativeSlot) {
    ui.label(RichText::new(slot.label()).small());
    for (field, hint) in [(RelativeField::Name, "Кличка"), (RelativeField::BirthDate, "ДР")] {
        let path = FieldPath::Relative(slot, field);
        let mut value = state.model().field(path).to_string();
        if ui
            .add(egui::TextEdit::singleline(&mut value).hint_text(hint).desired_width(160.0))
            .changed()
        {
            state.set_field(path, value);
        }
    }
}

fn rating_buttons(ui: &mut egui::Ui, state: &mut AppState, kind: RatingKind) {
    let icon = match kind {
        RatingKind::Health => Icons::HEART,
        RatingKind::Awards => Icons::TROPHY,
    };
    ui.label(format!("{} {}", icon, kind.label()));

    let current = state.model().rating(kind).value();
    ui.horizontal(|ui| {
        for value in 0..=Rating::MAX {
            if ui.selectable_label(current == value, value.to_string()).clicked() && current != value {
                state.set_rating(kind, i32::from(value));
            }
        }
    });
}

fn pick_photo(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Фото собаки")
        .add_filter("Изображения", PHOTO_EXTENSIONS)
        .pick_file()
    else {
        return;
    };
    load_photo(state, &path);
}

fn load_photo(state: &mut AppState, path: &Path) {
    match read_photo(path) {
        Ok(photo) => state.set_photo(photo),
        Err(e) => {
            tracing::error!("Kunde inte läsa foto {}: {}", display_path(path), e);
            state.show_error(&e.user_message());
        }
    }
}
