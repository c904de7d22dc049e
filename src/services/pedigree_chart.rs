//! Layout av stamtavlan på en fast kvadratisk duk (1050x1050)
//!
//! Alla koordinater är designenheter med origo uppe till vänster.
//! `build_chart` är en ren funktion: samma modell ger alltid samma layout.

use crate::models::{PedigreeModel, Photo, Rating, RatingKind, RelativeSlot};

/// Dukens storlek i designenheter
pub const CANVAS_SIZE: f32 = 1050.0;

/// Linjetjocklek för kanter
pub const EDGE_STROKE_WIDTH: f32 = 2.0;

/// Bredd på etikettytan för föräldrar och far-/morföräldrar
pub const LABEL_WIDTH: f32 = 200.0;

pub const PLACEHOLDER_NAME: &str = "КЛИЧКА";
pub const PLACEHOLDER_BREED: &str = "ПОРОДА";
pub const PLACEHOLDER_BIRTH_DATE: &str = "ДР: XX.XX.XXXX";

const PORTRAIT_DIAMETER: f32 = 192.0;
const PORTRAIT_BORDER: f32 = 4.0;
const PORTRAIT_MARGIN: f32 = 16.0;

const RATING_SLOT_SIZE: f32 = 28.0;
const RATING_SLOT_GAP: f32 = 8.0;
const RATING_GROUP_GAP: f32 = 32.0;
const RATING_ROW_HEIGHT: f32 = 32.0;
const RATING_MARGIN: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Roll för en nod i diagrammet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Subject,
    Relative(RelativeSlot),
}

impl NodeRole {
    pub const ALL: [NodeRole; 7] = [
        NodeRole::Subject,
        NodeRole::Relative(RelativeSlot::Father),
        NodeRole::Relative(RelativeSlot::Mother),
        NodeRole::Relative(RelativeSlot::PaternalGrandfather),
        NodeRole::Relative(RelativeSlot::PaternalGrandmother),
        NodeRole::Relative(RelativeSlot::MaternalGrandfather),
        NodeRole::Relative(RelativeSlot::MaternalGrandmother),
    ];

    /// Punkt där kanterna möts
    pub fn anchor(&self) -> Point {
        match self {
            Self::Subject => Point::new(525.0, 525.0),
            Self::Relative(RelativeSlot::Father) => Point::new(350.0, 300.0),
            Self::Relative(RelativeSlot::Mother) => Point::new(700.0, 300.0),
            Self::Relative(RelativeSlot::PaternalGrandfather) => Point::new(200.0, 150.0),
            Self::Relative(RelativeSlot::PaternalGrandmother) => Point::new(200.0, 450.0),
            Self::Relative(RelativeSlot::MaternalGrandfather) => Point::new(850.0, 150.0),
            Self::Relative(RelativeSlot::MaternalGrandmother) => Point::new(850.0, 450.0),
        }
    }

    /// Text som visas när namnet saknas
    pub fn name_placeholder(&self) -> &'static str {
        match self {
            Self::Subject => PLACEHOLDER_NAME,
            Self::Relative(RelativeSlot::Father) => "ОТЕЦ",
            Self::Relative(RelativeSlot::Mother) => "МАТЬ",
            Self::Relative(RelativeSlot::PaternalGrandfather) => "ДЕДУШКА ПО ОТЦУ",
            Self::Relative(RelativeSlot::PaternalGrandmother) => "БАБУШКА ПО ОТЦУ",
            Self::Relative(RelativeSlot::MaternalGrandfather) => "ДЕДУШКА ПО МАТЕРИ",
            Self::Relative(RelativeSlot::MaternalGrandmother) => "БАБУШКА ПО МАТЕРИ",
        }
    }

    /// Etikettens övre vänstra hörn (gäller släktingar)
    fn label_origin(&self) -> Point {
        match self {
            Self::Subject => Point::new(0.0, 0.0),
            Self::Relative(RelativeSlot::Father) => Point::new(250.0, 220.0),
            Self::Relative(RelativeSlot::Mother) => Point::new(600.0, 220.0),
            Self::Relative(RelativeSlot::PaternalGrandfather) => Point::new(100.0, 48.0),
            Self::Relative(RelativeSlot::PaternalGrandmother) => Point::new(100.0, 370.0),
            Self::Relative(RelativeSlot::MaternalGrandfather) => Point::new(750.0, 48.0),
            Self::Relative(RelativeSlot::MaternalGrandmother) => Point::new(750.0, 370.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Semibold,
    Bold,
}

impl FontWeight {
    pub fn css_value(&self) -> u16 {
        match self {
            Self::Regular => 400,
            Self::Semibold => 600,
            Self::Bold => 700,
        }
    }
}

/// En centrerad textrad
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Mittpunkt för raden (horisontellt och vertikalt)
    pub center: Point,
    pub font_size: f32,
    pub weight: FontWeight,
    /// Teckenavstånd i em
    pub letter_spacing: f32,
    pub is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartNode {
    pub role: NodeRole,
    pub anchor: Point,
    pub label_box: Rect,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartEdge {
    pub from: NodeRole,
    pub to: NodeRole,
    pub start: Point,
    pub end: Point,
    pub stroke_width: f32,
}

/// Rund fotoplats i mitten
#[derive(Debug, Clone, PartialEq)]
pub struct Portrait {
    pub center: Point,
    pub radius: f32,
    pub border_width: f32,
    /// None = platshållarikon
    pub photo: Option<Photo>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSlot {
    pub center: Point,
    pub size: f32,
    pub filled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub kind: RatingKind,
    pub slots: Vec<RatingSlot>,
}

/// Färdig layout för hela stamtavlan
#[derive(Debug, Clone, PartialEq)]
pub struct PedigreeChart {
    pub width: f32,
    pub height: f32,
    /// Ritas under all text och fotot
    pub edges: Vec<ChartEdge>,
    pub nodes: Vec<ChartNode>,
    pub portrait: Portrait,
    pub ratings: Vec<RatingRow>,
}

impl PedigreeChart {
    pub fn node(&self, role: NodeRole) -> Option<&ChartNode> {
        self.nodes.iter().find(|n| n.role == role)
    }

    /// All text i diagrammet i ritordning
    pub fn texts(&self) -> impl Iterator<Item = &TextLine> {
        self.nodes.iter().flat_map(|n| n.lines.iter())
    }

    pub fn rating_row(&self, kind: RatingKind) -> Option<&RatingRow> {
        self.ratings.iter().find(|r| r.kind == kind)
    }
}

/// Bygg layouten för en modell
pub fn build_chart(model: &PedigreeModel) -> PedigreeChart {
    let edges = EDGE_PAIRS
        .iter()
        .map(|&(from, to)| ChartEdge {
            from,
            to,
            start: from.anchor(),
            end: to.anchor(),
            stroke_width: EDGE_STROKE_WIDTH,
        })
        .collect();

    let mut nodes = Vec::with_capacity(NodeRole::ALL.len());
    for slot in RelativeSlot::ALL {
        nodes.push(relative_node(model, slot));
    }

    let (subject, portrait, ratings) = subject_block(model);
    nodes.push(subject);

    PedigreeChart {
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
        edges,
        nodes,
        portrait,
        ratings,
    }
}

const EDGE_PAIRS: [(NodeRole, NodeRole); 6] = [
    (NodeRole::Subject, NodeRole::Relative(RelativeSlot::Father)),
    (NodeRole::Subject, NodeRole::Relative(RelativeSlot::Mother)),
    (
        NodeRole::Relative(RelativeSlot::Father),
        NodeRole::Relative(RelativeSlot::PaternalGrandfather),
    ),
    (
        NodeRole::Relative(RelativeSlot::Father),
        NodeRole::Relative(RelativeSlot::PaternalGrandmother),
    ),
    (
        NodeRole::Relative(RelativeSlot::Mother),
        NodeRole::Relative(RelativeSlot::MaternalGrandfather),
    ),
    (
        NodeRole::Relative(RelativeSlot::Mother),
        NodeRole::Relative(RelativeSlot::MaternalGrandmother),
    ),
];

/// Textvärde eller platshållare; blanka fält räknas som tomma
fn text_or(value: &str, placeholder: &str, uppercase: bool) -> (String, bool) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        (placeholder.to_string(), true)
    } else if uppercase {
        (trimmed.to_uppercase(), false)
    } else {
        (trimmed.to_string(), false)
    }
}

/// Typografi per nivå: (namnstorlek, namnradhöjd, datumstorlek, datumradhöjd)
fn relative_typography(slot: RelativeSlot) -> (f32, f32, f32, f32) {
    match slot {
        RelativeSlot::Father | RelativeSlot::Mother => (16.0, 24.0, 14.0, 20.0),
        _ => (14.0, 20.0, 12.0, 16.0),
    }
}

fn relative_node(model: &PedigreeModel, slot: RelativeSlot) -> ChartNode {
    let role = NodeRole::Relative(slot);
    let relative = model.relative(slot);
    let origin = role.label_origin();
    let (name_size, name_height, date_size, date_height) = relative_typography(slot);
    let center_x = origin.x + LABEL_WIDTH / 2.0;

    let (name, name_placeholder) = text_or(&relative.name, role.name_placeholder(), true);
    let (date, date_placeholder) = text_or(&relative.birth_date, PLACEHOLDER_BIRTH_DATE, false);

    let date_top = origin.y + name_height + 4.0;

    ChartNode {
        role,
        anchor: role.anchor(),
        label_box: Rect {
            x: origin.x,
            y: origin.y,
            width: LABEL_WIDTH,
            height: name_height + 4.0 + date_height,
        },
        lines: vec![
            TextLine {
                text: name,
                center: Point::new(center_x, origin.y + name_height / 2.0),
                font_size: name_size,
                weight: FontWeight::Semibold,
                letter_spacing: 0.025,
                is_placeholder: name_placeholder,
            },
            TextLine {
                text: date,
                center: Point::new(center_x, date_top + date_height / 2.0),
                font_size: date_size,
                weight: FontWeight::Regular,
                letter_spacing: 0.0,
                is_placeholder: date_placeholder,
            },
        ],
    }
}

fn subject_block(model: &PedigreeModel) -> (ChartNode, Portrait, Vec<RatingRow>) {
    let role = NodeRole::Subject;
    let anchor = role.anchor();

    // Blockets rader uppifrån: foto, namn, ras, födelsedatum, betyg
    let name_height = 32.0;
    let breed_gap = 8.0;
    let breed_height = 24.0;
    let date_gap = 4.0;
    let date_height = 20.0;

    let block_height = PORTRAIT_DIAMETER
        + PORTRAIT_MARGIN
        + name_height
        + breed_gap
        + breed_height
        + date_gap
        + date_height
        + RATING_MARGIN
        + RATING_ROW_HEIGHT;
    let block_width = rating_rows_width().max(PORTRAIT_DIAMETER);
    let top = anchor.y - block_height / 2.0;

    let portrait = Portrait {
        center: Point::new(anchor.x, top + PORTRAIT_DIAMETER / 2.0),
        radius: PORTRAIT_DIAMETER / 2.0,
        border_width: PORTRAIT_BORDER,
        photo: model.photo.clone(),
    };

    let name_top = top + PORTRAIT_DIAMETER + PORTRAIT_MARGIN;
    let breed_top = name_top + name_height + breed_gap;
    let date_top = breed_top + breed_height + date_gap;
    let ratings_top = date_top + date_height + RATING_MARGIN;

    let (name, name_placeholder) = text_or(&model.name, PLACEHOLDER_NAME, true);
    let (breed, breed_placeholder) = text_or(&model.breed, PLACEHOLDER_BREED, false);
    let (date, date_placeholder) = text_or(&model.birth_date, PLACEHOLDER_BIRTH_DATE, false);

    let lines = vec![
        TextLine {
            text: name,
            center: Point::new(anchor.x, name_top + name_height / 2.0),
            font_size: 24.0,
            weight: FontWeight::Bold,
            letter_spacing: 0.05,
            is_placeholder: name_placeholder,
        },
        TextLine {
            text: breed,
            center: Point::new(anchor.x, breed_top + breed_height / 2.0),
            font_size: 16.0,
            weight: FontWeight::Regular,
            letter_spacing: 0.0,
            is_placeholder: breed_placeholder,
        },
        TextLine {
            text: date,
            center: Point::new(anchor.x, date_top + date_height / 2.0),
            font_size: 14.0,
            weight: FontWeight::Regular,
            letter_spacing: 0.0,
            is_placeholder: date_placeholder,
        },
    ];

    let node = ChartNode {
        role,
        anchor,
        label_box: Rect {
            x: anchor.x - block_width / 2.0,
            y: top,
            width: block_width,
            height: block_height,
        },
        lines,
    };

    let ratings = rating_rows(model, ratings_top + RATING_ROW_HEIGHT / 2.0, anchor.x);

    (node, portrait, ratings)
}

fn rating_group_width() -> f32 {
    Rating::SLOTS as f32 * RATING_SLOT_SIZE + (Rating::SLOTS - 1) as f32 * RATING_SLOT_GAP
}

fn rating_rows_width() -> f32 {
    RatingKind::ALL.len() as f32 * rating_group_width()
        + (RatingKind::ALL.len() - 1) as f32 * RATING_GROUP_GAP
}

/// Hälsa till vänster, utmärkelser till höger
fn rating_rows(model: &PedigreeModel, center_y: f32, center_x: f32) -> Vec<RatingRow> {
    let mut group_left = center_x - rating_rows_width() / 2.0;

    RatingKind::ALL
        .iter()
        .map(|&kind| {
            let slots = model
                .rating(kind)
                .slots()
                .iter()
                .enumerate()
                .map(|(i, &filled)| RatingSlot {
                    center: Point::new(
                        group_left
                            + i as f32 * (RATING_SLOT_SIZE + RATING_SLOT_GAP)
                            + RATING_SLOT_SIZE / 2.0,
                        center_y,
                    ),
                    size: RATING_SLOT_SIZE,
                    filled,
                })
                .collect();
            group_left += rating_group_width() + RATING_GROUP_GAP;
            RatingRow { kind, slots }
        })
        .collect()
}
