//! Visningsyta för stamtavlan: ett SVG-dokument byggt från layouten

use std::fmt::Write as _;

use crate::models::RatingKind;
use crate::services::pedigree_chart::{PedigreeChart, Point, Portrait, RatingSlot, TextLine};

const INK: &str = "#000000";
const BACKGROUND: &str = "#ffffff";
const PLACEHOLDER_FILL: &str = "#e5e7eb";
const PLACEHOLDER_ICON: &str = "#9ca3af";
const SLOT_EMPTY_STROKE: &str = "#9ca3af";
const HEART_FILL: &str = "#ef4444";
const TROPHY_FILL: &str = "#f59e0b";

/// Hjärta i enhetsrutan [-1, 1]
const HEART_PATH: &str =
    "M 0 0.9 C -1.25 0.05 -0.65 -1.05 0 -0.35 C 0.65 -1.05 1.25 0.05 0 0.9 Z";

/// Pokal i enhetsrutan [-1, 1]
const TROPHY_PATH: &str = "M -0.6 -0.85 H 0.6 V -0.25 C 0.6 0.2 0.3 0.4 0 0.4 \
     C -0.3 0.4 -0.6 0.2 -0.6 -0.25 Z \
     M -0.6 -0.7 H -0.9 C -0.9 -0.2 -0.75 0 -0.55 0.05 L -0.55 -0.1 \
     C -0.7 -0.15 -0.75 -0.35 -0.75 -0.55 H -0.6 Z \
     M 0.6 -0.7 H 0.9 C 0.9 -0.2 0.75 0 0.55 0.05 L 0.55 -0.1 \
     C 0.7 -0.15 0.75 -0.35 0.75 -0.55 H 0.6 Z \
     M -0.12 0.4 H 0.12 V 0.65 H 0.4 V 0.88 H -0.4 V 0.65 H -0.12 Z";

/// Huvud med öron, platshållare när foto saknas
const DOG_ICON_PATH: &str = "M -0.55 -0.35 C -0.55 -0.75 0.55 -0.75 0.55 -0.35 \
     L 0.55 0.25 C 0.55 0.7 -0.55 0.7 -0.55 0.25 Z \
     M -0.55 -0.4 C -0.85 -0.6 -1 -0.2 -0.95 0.25 C -0.8 0.3 -0.65 0.1 -0.55 -0.05 Z \
     M 0.55 -0.4 C 0.85 -0.6 1 -0.2 0.95 0.25 C 0.8 0.3 0.65 0.1 0.55 -0.05 Z";

/// Renderad stamtavla redo att visas eller rastreras
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSurface {
    pub svg: String,
    /// Logisk storlek i designenheter
    pub width: u32,
    pub height: u32,
}

impl RenderSurface {
    pub fn from_chart(chart: &PedigreeChart, font_family: &str) -> Self {
        Self {
            svg: chart_to_svg(chart, font_family),
            width: chart.width.round() as u32,
            height: chart.height.round() as u32,
        }
    }
}

/// Bygg SVG för hela diagrammet. Kanter ritas först så att de hamnar under text och foto.
pub fn chart_to_svg(chart: &PedigreeChart, font_family: &str) -> String {
    let mut svg = String::with_capacity(8 * 1024);
    let (w, h) = (chart.width, chart.height);

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
    );
    let _ = write!(svg, "<rect width=\"{w}\" height=\"{h}\" fill=\"{BACKGROUND}\"/>");

    svg.push_str("<g fill=\"none\">");
    for edge in &chart.edges {
        let _ = write!(
            svg,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{INK}\" stroke-width=\"{}\"/>",
            edge.start.x, edge.start.y, edge.end.x, edge.end.y, edge.stroke_width
        );
    }
    svg.push_str("</g>");

    let family = font_family_list(font_family);
    for line in chart.texts() {
        text_svg(&mut svg, line, &family);
    }

    portrait_svg(&mut svg, &chart.portrait);

    for row in &chart.ratings {
        for slot in &row.slots {
            rating_slot_svg(&mut svg, row.kind, slot);
        }
    }

    svg.push_str("</svg>");
    svg
}

fn font_family_list(primary: &str) -> String {
    let primary = primary.trim().replace(['"', '\''], "");
    if primary.is_empty() {
        "sans-serif".to_string()
    } else {
        format!("'{}', sans-serif", escape_xml(&primary))
    }
}

fn text_svg(svg: &mut String, line: &TextLine, family: &str) {
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" \
         font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" letter-spacing=\"{:.2}\" fill=\"{INK}\">{}</text>",
        line.center.x,
        line.center.y,
        family,
        line.font_size,
        line.weight.css_value(),
        line.letter_spacing * line.font_size,
        escape_xml(&line.text)
    );
}

fn portrait_svg(svg: &mut String, portrait: &Portrait) {
    let Point { x: cx, y: cy } = portrait.center;
    let r = portrait.radius;

    match &portrait.photo {
        Some(photo) => {
            let _ = write!(
                svg,
                "<defs><clipPath id=\"portrait-clip\"><circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\"/></clipPath></defs>\
                 <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{BACKGROUND}\"/>\
                 <image x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" preserveAspectRatio=\"xMidYMid slice\" \
                 clip-path=\"url(#portrait-clip)\" xlink:href=\"{}\"/>",
                cx - r,
                cy - r,
                2.0 * r,
                2.0 * r,
                photo.data_uri()
            );
        }
        None => {
            let _ = write!(
                svg,
                "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{r:.2}\" fill=\"{PLACEHOLDER_FILL}\"/>"
            );
            // Ikonen är 80 enheter bred
            let _ = write!(
                svg,
                "<path d=\"{DOG_ICON_PATH}\" fill=\"{PLACEHOLDER_ICON}\" transform=\"translate({cx:.2} {cy:.2}) scale(40)\"/>"
            );
        }
    }

    // Ramen ligger innanför cirkelns ytterkant
    let border_r = r - portrait.border_width / 2.0;
    let _ = write!(
        svg,
        "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{border_r:.2}\" fill=\"none\" stroke=\"{INK}\" stroke-width=\"{}\"/>",
        portrait.border_width
    );
}

fn rating_slot_svg(svg: &mut String, kind: RatingKind, slot: &RatingSlot) {
    let Point { x, y } = slot.center;
    let k = slot.size / 2.0;
    let stroke = 1.5 / k;

    match (kind, slot.filled) {
        (RatingKind::Health, true) => {
            let _ = write!(
                svg,
                "<path d=\"{HEART_PATH}\" fill=\"{HEART_FILL}\" transform=\"translate({x:.2} {y:.2}) scale({k:.3})\"/>"
            );
        }
        (RatingKind::Health, false) => {
            let _ = write!(
                svg,
                "<path d=\"{HEART_PATH}\" fill=\"{BACKGROUND}\" stroke=\"{SLOT_EMPTY_STROKE}\" stroke-width=\"{stroke:.3}\" \
                 transform=\"translate({x:.2} {y:.2}) scale({k:.3})\"/>"
            );
        }
        (RatingKind::Awards, true) => {
            let _ = write!(
                svg,
                "<path d=\"{TROPHY_PATH}\" fill=\"{TROPHY_FILL}\" transform=\"translate({x:.2} {y:.2}) scale({k:.3})\"/>"
            );
        }
        (RatingKind::Awards, false) => {
            let _ = write!(
                svg,
                "<circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{:.2}\" fill=\"{BACKGROUND}\" stroke=\"{SLOT_EMPTY_STROKE}\" stroke-width=\"1.5\"/>",
                k * 0.8
            );
        }
    }
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            // Otillåtna i XML, ett enda sådant tecken fäller hela dokumentet
            c if c.is_control() || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldPath, PedigreeModel, Photo};
    use crate::services::pedigree_chart::build_chart;

    #[test]
    fn test_surface_has_canvas_size() {
        let surface = RenderSurface::from_chart(&build_chart(&PedigreeModel::new()), "Montserrat");
        assert_eq!((surface.width, surface.height), (1050, 1050));
        assert!(surface.svg.starts_with("<svg"));
        assert!(surface.svg.ends_with("</svg>"));
        assert!(surface.svg.contains("viewBox=\"0 0 1050 1050\""));
    }

    #[test]
    fn test_edges_are_drawn_before_text() {
        let surface = RenderSurface::from_chart(&build_chart(&PedigreeModel::new()), "Montserrat");
        let last_line = surface.svg.rfind("<line").unwrap();
        let first_text = surface.svg.find("<text").unwrap();
        let portrait = surface.svg.find("fill=\"#e5e7eb\"").unwrap();
        assert!(last_line < first_text);
        assert!(last_line < portrait);
        assert_eq!(surface.svg.matches("<line").count(), 6);
    }

    #[test]
    fn test_text_is_escaped() {
        let model = PedigreeModel::new().with_field(FieldPath::Breed, "<Бордер & колли>");
        let svg = chart_to_svg(&build_chart(&model), "Montserrat");
        assert!(svg.contains("&lt;Бордер &amp; колли&gt;"));
        assert!(!svg.contains("<Бордер"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let model = PedigreeModel::new().with_field(FieldPath::Name, "Rex\u{1}\u{b}");
        let svg = chart_to_svg(&build_chart(&model), "Montserrat");
        assert!(svg.contains(">REX</text>"));
        assert!(!svg.contains('\u{1}'));
        assert!(!svg.contains('\u{b}'));
        assert_eq!(escape_xml("a\tb\u{7f}\u{FFFF}c"), "a\tbc");
    }

    #[test]
    fn test_photo_is_embedded_as_data_uri() {
        let mut model = PedigreeModel::new();
        model.set_photo(Photo::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0]));
        let svg = chart_to_svg(&build_chart(&model), "Montserrat");
        assert!(svg.contains("xlink:href=\"data:image/jpeg;base64,"));
        assert!(svg.contains("clip-path=\"url(#portrait-clip)\""));
    }

    #[test]
    fn test_font_family_fallback() {
        assert_eq!(font_family_list("Montserrat"), "'Montserrat', sans-serif");
        assert_eq!(font_family_list("  "), "sans-serif");
        assert_eq!(font_family_list("Evil\"Font"), "'EvilFont', sans-serif");
    }
}
