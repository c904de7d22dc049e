use egui::{Color32, FontFamily, FontId, TextStyle, Visuals};

/// Konfigurera applikationens utseende
pub fn configure_style(ctx: &egui::Context, dark_mode: bool) {
    let mut style = (*ctx.style()).clone();

    // Typsnitt
    style.text_styles = [
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12.0);

    style.visuals = if dark_mode { dark_visuals() } else { light_visuals() };

    ctx.set_style(style);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Color32::from_rgb(32, 28, 24);
    visuals.window_fill = Color32::from_rgb(42, 37, 32);
    visuals.extreme_bg_color = Color32::from_rgb(24, 21, 18);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(56, 50, 44);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(72, 62, 50);
    visuals.widgets.active.bg_fill = Color32::from_rgb(92, 74, 50);

    // Accent i bärnsten
    visuals.selection.bg_fill = Color32::from_rgb(180, 83, 9);

    visuals
}

fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    // Varm bakgrund, vita kort
    visuals.panel_fill = Color32::from_rgb(255, 247, 237);
    visuals.window_fill = Color32::WHITE;
    visuals.extreme_bg_color = Color32::WHITE;

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(254, 243, 199);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(253, 230, 138);
    visuals.widgets.active.bg_fill = Color32::from_rgb(252, 211, 77);

    visuals.selection.bg_fill = Color32::from_rgb(251, 191, 36);

    visuals
}

/// Färgpalett för applikationen
pub struct Colors;

impl Colors {
    // Primär (bärnsten)
    pub const PRIMARY: Color32 = Color32::from_rgb(217, 119, 6);
    pub const PRIMARY_HOVER: Color32 = Color32::from_rgb(180, 83, 9);

    // Framgång
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

    // Fel
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    // Info
    pub const INFO: Color32 = Color32::from_rgb(59, 130, 246);

    // Text
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(156, 163, 175);

    // Tips-rutan
    pub const TIP_BG: Color32 = Color32::from_rgb(255, 251, 235);
    pub const TIP_BORDER: Color32 = Color32::from_rgb(253, 230, 138);
}

/// Ikoner (Unicode)
pub struct Icons;

impl Icons {
    pub const DOG: &'static str = "🐕";
    pub const EDIT: &'static str = "✏";
    pub const EYE: &'static str = "👁";
    pub const IMAGES: &'static str = "🖼";
    pub const BOOK: &'static str = "📖";
    pub const PERSON: &'static str = "👤";
    pub const PEOPLE: &'static str = "👥";
    pub const UPLOAD: &'static str = "📤";
    pub const DOWNLOAD: &'static str = "⬇";
    pub const SAVE: &'static str = "💾";
    pub const FOLDER: &'static str = "📁";
    pub const DELETE: &'static str = "🗑";
    pub const HEART: &'static str = "❤";
    pub const TROPHY: &'static str = "🏆";
    pub const LIGHTBULB: &'static str = "💡";
}
