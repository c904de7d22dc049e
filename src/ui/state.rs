use std::path::PathBuf;

use crate::models::{FieldPath, PedigreeModel, Photo, RatingKind};
use crate::services::{build_chart, ExportJob, ExportPipeline, GalleryStore, RenderSurface};

pub const MSG_SAVED: &str = "Родословная сохранена в галерею!";
pub const MSG_LOADED: &str = "Родословная загружена!";
pub const MSG_EXPORTED: &str = "Родословная успешно экспортирована!";
pub const MSG_EXPORT_STARTED: &str = "Экспорт начат:";

/// Aktuell flik i applikationen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Create,
    Preview,
    Gallery,
    Instructions,
}

/// Sessionens tillstånd. Skapas vid start och lånas ut till vyerna.
#[derive(Default)]
pub struct AppState {
    /// Aktuell vy
    pub current_view: View,

    /// Stamtavlan som redigeras
    model: PedigreeModel,

    /// Sparade stamtavlor
    gallery: GalleryStore,

    /// Ökas vid varje lyckad ändring av modellen
    revision: u64,
    /// Ökas bara när fotot byts, för miniatyrer
    photo_revision: u64,
    rendered_revision: Option<u64>,
    surface: Option<RenderSurface>,

    /// Exporter som körs i bakgrunden
    pending_exports: Vec<ExportJob>,

    /// Statusmeddelande
    pub status_message: Option<StatusMessage>,

    /// Dark mode
    pub dark_mode: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigera till vy
    pub fn navigate(&mut self, view: View) {
        self.current_view = view;
    }

    pub fn model(&self) -> &PedigreeModel {
        &self.model
    }

    pub fn gallery(&self) -> &GalleryStore {
        &self.gallery
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn photo_revision(&self) -> u64 {
        self.photo_revision
    }

    fn bump_revision(&mut self) {
        self.revision += 1;
    }

    // --- Redigering ---

    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) {
        let value = value.into();
        if self.model.field(path) == value {
            return;
        }
        tracing::debug!("Fält {} ändrat", path);
        self.model.set_field(path, value);
        self.bump_revision();
    }

    pub fn set_photo(&mut self, photo: Photo) {
        tracing::info!("Nytt foto ({})", photo.mime_type());
        self.model.set_photo(photo);
        self.photo_revision += 1;
        self.bump_revision();
    }

    pub fn clear_photo(&mut self) {
        if self.model.photo.is_some() {
            self.model.clear_photo();
            self.photo_revision += 1;
            self.bump_revision();
        }
    }

    /// Returnerar false om värdet avvisades
    pub fn set_rating(&mut self, kind: RatingKind, value: i32) -> bool {
        match self.model.set_rating(kind, value) {
            Ok(()) => {
                self.bump_revision();
                true
            }
            Err(e) => {
                tracing::warn!("Betyg avvisat: {}", e);
                self.show_error(&e.user_message());
                false
            }
        }
    }

    // --- Galleri ---

    pub fn save_to_gallery(&mut self) -> bool {
        match self.gallery.save(&self.model) {
            Ok(_) => {
                self.show_success(MSG_SAVED);
                true
            }
            Err(e) => {
                tracing::warn!("Kunde inte spara: {}", e);
                self.show_error(&e.user_message());
                false
            }
        }
    }

    /// Ersätt arbetsmodellen med en kopia från galleriet
    pub fn load_from_gallery(&mut self, index: usize) -> bool {
        match self.gallery.select(index) {
            Ok(model) => {
                tracing::info!("Laddade '{}' från galleriet", model.name);
                self.model = model;
                self.photo_revision += 1;
                self.bump_revision();
                self.show_success(MSG_LOADED);
                true
            }
            Err(e) => {
                tracing::error!("Kunde inte ladda post {}: {}", index, e);
                self.show_error(&e.user_message());
                false
            }
        }
    }

    // --- Rendering ---

    pub fn needs_render(&self) -> bool {
        self.rendered_revision != Some(self.revision)
    }

    /// Rendera om ytan om modellen ändrats sedan förra gången
    pub fn refresh_surface(&mut self, font_family: &str) -> bool {
        if !self.needs_render() {
            return false;
        }
        let chart = build_chart(&self.model);
        self.surface = Some(RenderSurface::from_chart(&chart, font_family));
        self.rendered_revision = Some(self.revision);
        true
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    // --- Export ---

    pub fn start_export(&mut self, pipeline: &ExportPipeline, dir: PathBuf) {
        let job = pipeline.spawn(self.surface.clone(), self.model.name.clone(), dir);
        self.show_info(&format!("{} {}", MSG_EXPORT_STARTED, job.file_name()));
        self.pending_exports.push(job);
    }

    pub fn has_pending_exports(&self) -> bool {
        !self.pending_exports.is_empty()
    }

    /// Hämta färdiga exporter och visa resultatet
    pub fn poll_exports(&mut self) {
        let mut finished = Vec::new();
        self.pending_exports.retain(|job| match job.poll() {
            Some(result) => {
                finished.push(result);
                false
            }
            None => true,
        });

        for result in finished {
            match result {
                Ok(file) => {
                    tracing::info!("Exporterade {:?}", file.path);
                    self.show_success(&format!("{} {}", MSG_EXPORTED, file.summary()));
                }
                Err(e) => {
                    tracing::error!("Export misslyckades: {}", e);
                    self.show_error(&e.user_message());
                }
            }
        }
    }

    // --- Status ---

    /// Visa statusmeddelande
    pub fn show_status(&mut self, message: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: message.to_string(),
            status_type,
            created_at: std::time::Instant::now(),
        });
    }

    /// Visa framgångsmeddelande
    pub fn show_success(&mut self, message: &str) {
        self.show_status(message, StatusType::Success);
    }

    /// Visa informationsmeddelande
    pub fn show_info(&mut self, message: &str) {
        self.show_status(message, StatusType::Info);
    }

    /// Visa felmeddelande
    pub fn show_error(&mut self, message: &str) {
        self.show_status(message, StatusType::Error);
    }

    /// Rensa statusmeddelande om det är för gammalt
    pub fn clear_old_status(&mut self) {
        if let Some(ref status) = self.status_message {
            if status.created_at.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }
}

/// Statusmeddelande
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub status_type: StatusType,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    Success,
    Error,
    Info,
}
