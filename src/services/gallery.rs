//! Galleri med sparade stamtavlor (endast i minnet, för sessionen)

use chrono::{DateTime, Local};

use crate::models::PedigreeModel;
use crate::utils::error::{AppError, AppResult};

/// Oföränderlig kopia av en stamtavla vid sparandet
#[derive(Debug, Clone)]
pub struct GallerySnapshot {
    model: PedigreeModel,
    saved_at: DateTime<Local>,
}

impl GallerySnapshot {
    pub fn model(&self) -> &PedigreeModel {
        &self.model
    }

    pub fn saved_at(&self) -> DateTime<Local> {
        self.saved_at
    }
}

/// Lista som bara kan växa, äldst först
#[derive(Debug, Default)]
pub struct GalleryStore {
    entries: Vec<GallerySnapshot>,
}

impl GalleryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spara en kopia av modellen. Returnerar antalet poster efteråt.
    pub fn save(&mut self, model: &PedigreeModel) -> AppResult<usize> {
        if !model.has_name() {
            return Err(AppError::MissingRequiredField("name"));
        }

        self.entries.push(GallerySnapshot {
            model: model.clone(),
            saved_at: Local::now(),
        });

        tracing::info!("Sparade '{}' i galleriet ({} poster)", model.name, self.entries.len());
        Ok(self.entries.len())
    }

    /// Hämta en ny kopia av posten att använda som arbetsmodell
    pub fn select(&self, index: usize) -> AppResult<PedigreeModel> {
        self.entries
            .get(index)
            .map(|entry| entry.model.clone())
            .ok_or(AppError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn entries(&self) -> &[GallerySnapshot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
