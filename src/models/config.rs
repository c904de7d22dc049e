use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Standardtypsnitt i stamtavlan
pub const DEFAULT_CHART_FONT: &str = "Montserrat";

/// Förhandsvisningens skala i förhållande till 1050x1050
pub const DEFAULT_PREVIEW_SCALE: f32 = 0.7;

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("ru", "dogpedigree", "DogPedigree")
}

/// Applikationsinställningar (sparas som TOML)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub dark_mode: bool,
    /// Katalog för exporterade PNG-filer (None = Hämtade filer)
    pub export_directory: Option<PathBuf>,
    pub chart_font_family: String,
    pub preview_scale: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            export_directory: None,
            chart_font_family: DEFAULT_CHART_FONT.to_string(),
            preview_scale: DEFAULT_PREVIEW_SCALE,
        }
    }
}

impl AppSettings {
    pub fn settings_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    pub fn load() -> Self {
        let path = Self::settings_path();

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Ogiltig inställningsfil {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Self = toml::from_str(content)?;
        if !(0.1..=2.0).contains(&settings.preview_scale) {
            settings.preview_scale = DEFAULT_PREVIEW_SCALE;
        }
        if settings.chart_font_family.trim().is_empty() {
            settings.chart_font_family = DEFAULT_CHART_FONT.to_string();
        }
        Ok(settings)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Katalog dit exporter skrivs
    pub fn resolved_export_directory(&self) -> PathBuf {
        self.export_directory
            .clone()
            .or_else(dirs::download_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_settings_toml_roundtrip() {
        let settings = AppSettings {
            dark_mode: true,
            export_directory: Some(PathBuf::from("/tmp/export")),
            chart_font_family: "PT Sans".into(),
            preview_scale: 0.5,
        };
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let loaded = AppSettings::from_toml(&toml_str).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_app_settings_missing_keys() {
        // Äldre fil utan export_directory och preview_scale
        let old_toml = r#"
dark_mode = true
"#;
        let loaded = AppSettings::from_toml(old_toml).unwrap();
        assert!(loaded.dark_mode);
        assert_eq!(loaded.export_directory, None);
        assert_eq!(loaded.chart_font_family, DEFAULT_CHART_FONT);
        assert_eq!(loaded.preview_scale, DEFAULT_PREVIEW_SCALE);
    }

    #[test]
    fn test_app_settings_rejects_bad_values() {
        let loaded = AppSettings::from_toml("preview_scale = 40.0\nchart_font_family = \"  \"").unwrap();
        assert_eq!(loaded.preview_scale, DEFAULT_PREVIEW_SCALE);
        assert_eq!(loaded.chart_font_family, DEFAULT_CHART_FONT);

        assert!(AppSettings::from_toml("dark_mode = \"ja\"").is_err());
    }

    #[test]
    fn test_explicit_export_directory_wins() {
        let settings = AppSettings {
            export_directory: Some(PathBuf::from("/srv/out")),
            ..Default::default()
        };
        assert_eq!(settings.resolved_export_directory(), PathBuf::from("/srv/out"));
    }
}
