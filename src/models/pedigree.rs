//! Stamtavla för en hund: hunden själv, föräldrar och fyra far-/morföräldrar

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

use crate::utils::error::{AppError, AppResult};

/// Namn och födelsedatum för en släkting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relative {
    pub name: String,
    pub birth_date: String,
}

/// De fyra fasta platserna för far- och morföräldrar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grandparents {
    pub paternal_grandfather: Relative,
    pub paternal_grandmother: Relative,
    pub maternal_grandfather: Relative,
    pub maternal_grandmother: Relative,
}

/// Betygstyp (hälsa eller utmärkelser)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingKind {
    Health,
    Awards,
}

impl RatingKind {
    pub const ALL: [RatingKind; 2] = [RatingKind::Health, RatingKind::Awards];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Health => "Здоровье (0-3)",
            Self::Awards => "Награды (0-3)",
        }
    }
}

impl fmt::Display for RatingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Awards => write!(f, "awards"),
        }
    }
}

/// Betyg 0..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 3;
    pub const SLOTS: usize = Self::MAX as usize;

    pub fn new(kind: RatingKind, value: i32) -> AppResult<Self> {
        if (0..=Self::MAX as i32).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(AppError::InvalidRange { kind, value })
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Fyllda/tomma platser, index < betyg är fyllt
    pub fn slots(&self) -> [bool; Self::SLOTS] {
        std::array::from_fn(|i| i < self.0 as usize)
    }
}

/// Foto av hunden, lagrat som råa bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    mime_type: String,
    bytes: Vec<u8>,
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Photo {
    const FALLBACK_MIME: &'static str = "application/octet-stream";

    /// Skapa foto från bytes, MIME-typ gissas från innehållet.
    /// Format som SVG-rastreringen inte kan läsa (t.ex. BMP) kodas om till PNG.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let format = match image::guess_format(&bytes) {
            Ok(format) => format,
            Err(_) => {
                return Self {
                    mime_type: Self::FALLBACK_MIME.to_string(),
                    bytes,
                }
            }
        };

        if Self::embeds_natively(format) {
            return Self {
                mime_type: format.to_mime_type().to_string(),
                bytes,
            };
        }

        match Self::reencode_png(&bytes) {
            Ok(png) => {
                tracing::debug!("Kodade om foto från {:?} till PNG", format);
                Self {
                    mime_type: ImageFormat::Png.to_mime_type().to_string(),
                    bytes: png,
                }
            }
            Err(e) => {
                tracing::warn!("Kunde inte koda om foto ({:?}): {}", format, e);
                Self {
                    mime_type: format.to_mime_type().to_string(),
                    bytes,
                }
            }
        }
    }

    /// Format som kan bäddas in direkt i stamtavlans SVG
    fn embeds_natively(format: ImageFormat) -> bool {
        matches!(
            format,
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP
        )
    }

    fn reencode_png(bytes: &[u8]) -> image::ImageResult<Vec<u8>> {
        let img = image::load_from_memory(bytes)?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Tolka en `data:<mime>;base64,<data>`-referens
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let rest = uri.strip_prefix("data:")?;
        let (header, payload) = rest.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        let bytes = STANDARD.decode(payload.trim()).ok()?;
        let mime_type = if mime_type.is_empty() {
            Self::FALLBACK_MIME.to_string()
        } else {
            mime_type.to_string()
        };
        Some(Self { mime_type, bytes })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Inbäddningsbar referens för SVG/HTML
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Plats för en släkting i stamtavlan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeSlot {
    Father,
    Mother,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandfather,
    MaternalGrandmother,
}

impl RelativeSlot {
    pub const ALL: [RelativeSlot; 6] = [
        Self::Father,
        Self::Mother,
        Self::PaternalGrandfather,
        Self::PaternalGrandmother,
        Self::MaternalGrandfather,
        Self::MaternalGrandmother,
    ];

    fn path_prefix(&self) -> &'static str {
        match self {
            Self::Father => "father",
            Self::Mother => "mother",
            Self::PaternalGrandfather => "grandparents.paternalGrandfather",
            Self::PaternalGrandmother => "grandparents.paternalGrandmother",
            Self::MaternalGrandfather => "grandparents.maternalGrandfather",
            Self::MaternalGrandmother => "grandparents.maternalGrandmother",
        }
    }

    /// Etikett i formuläret
    pub fn label(&self) -> &'static str {
        match self {
            Self::Father => "Кличка отца",
            Self::Mother => "Кличка матери",
            Self::PaternalGrandfather => "Дед по отцу",
            Self::PaternalGrandmother => "Бабушка по отцу",
            Self::MaternalGrandfather => "Дед по матери",
            Self::MaternalGrandmother => "Бабушка по матери",
        }
    }
}

/// Fält hos en släkting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeField {
    Name,
    BirthDate,
}

/// Sökväg till ett textfält i modellen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Name,
    Breed,
    BirthDate,
    Relative(RelativeSlot, RelativeField),
}

impl FieldPath {
    /// Alla textfält i modellen
    pub fn all() -> Vec<FieldPath> {
        let mut paths = vec![Self::Name, Self::Breed, Self::BirthDate];
        for slot in RelativeSlot::ALL {
            paths.push(Self::Relative(slot, RelativeField::Name));
            paths.push(Self::Relative(slot, RelativeField::BirthDate));
        }
        paths
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Breed => write!(f, "breed"),
            Self::BirthDate => write!(f, "birthDate"),
            Self::Relative(slot, RelativeField::Name) => write!(f, "{}.name", slot.path_prefix()),
            Self::Relative(slot, RelativeField::BirthDate) => {
                write!(f, "{}.birthDate", slot.path_prefix())
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => return Ok(Self::Name),
            "breed" => return Ok(Self::Breed),
            "birthDate" => return Ok(Self::BirthDate),
            _ => {}
        }

        let (prefix, leaf) = s
            .rsplit_once('.')
            .ok_or_else(|| AppError::unknown_field(s))?;

        let field = match leaf {
            "name" => RelativeField::Name,
            "birthDate" => RelativeField::BirthDate,
            _ => return Err(AppError::unknown_field(s)),
        };

        RelativeSlot::ALL
            .into_iter()
            .find(|slot| slot.path_prefix() == prefix)
            .map(|slot| Self::Relative(slot, field))
            .ok_or_else(|| AppError::unknown_field(s))
    }
}

/// Hela stamtavlan för en hund
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PedigreeModel {
    pub name: String,
    pub breed: String,
    pub birth_date: String,
    pub photo: Option<Photo>,
    pub father: Relative,
    pub mother: Relative,
    pub grandparents: Grandparents,
    pub health: Rating,
    pub awards: Rating,
}

impl PedigreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relative(&self, slot: RelativeSlot) -> &Relative {
        match slot {
            RelativeSlot::Father => &self.father,
            RelativeSlot::Mother => &self.mother,
            RelativeSlot::PaternalGrandfather => &self.grandparents.paternal_grandfather,
            RelativeSlot::PaternalGrandmother => &self.grandparents.paternal_grandmother,
            RelativeSlot::MaternalGrandfather => &self.grandparents.maternal_grandfather,
            RelativeSlot::MaternalGrandmother => &self.grandparents.maternal_grandmother,
        }
    }

    fn relative_mut(&mut self, slot: RelativeSlot) -> &mut Relative {
        match slot {
            RelativeSlot::Father => &mut self.father,
            RelativeSlot::Mother => &mut self.mother,
            RelativeSlot::PaternalGrandfather => &mut self.grandparents.paternal_grandfather,
            RelativeSlot::PaternalGrandmother => &mut self.grandparents.paternal_grandmother,
            RelativeSlot::MaternalGrandfather => &mut self.grandparents.maternal_grandfather,
            RelativeSlot::MaternalGrandmother => &mut self.grandparents.maternal_grandmother,
        }
    }

    /// Läs ett textfält
    pub fn field(&self, path: FieldPath) -> &str {
        match path {
            FieldPath::Name => &self.name,
            FieldPath::Breed => &self.breed,
            FieldPath::BirthDate => &self.birth_date,
            FieldPath::Relative(slot, RelativeField::Name) => &self.relative(slot).name,
            FieldPath::Relative(slot, RelativeField::BirthDate) => &self.relative(slot).birth_date,
        }
    }

    fn field_mut(&mut self, path: FieldPath) -> &mut String {
        match path {
            FieldPath::Name => &mut self.name,
            FieldPath::Breed => &mut self.breed,
            FieldPath::BirthDate => &mut self.birth_date,
            FieldPath::Relative(slot, RelativeField::Name) => &mut self.relative_mut(slot).name,
            FieldPath::Relative(slot, RelativeField::BirthDate) => {
                &mut self.relative_mut(slot).birth_date
            }
        }
    }

    /// Ersätt ett textfält, resten av trädet lämnas orört
    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) {
        *self.field_mut(path) = value.into();
    }

    /// Som `set_field` men returnerar ett nytt värde
    pub fn with_field(mut self, path: FieldPath, value: impl Into<String>) -> Self {
        self.set_field(path, value);
        self
    }

    pub fn set_photo(&mut self, photo: Photo) {
        self.photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    pub fn rating(&self, kind: RatingKind) -> Rating {
        match kind {
            RatingKind::Health => self.health,
            RatingKind::Awards => self.awards,
        }
    }

    /// Sätt betyg. Värden utanför 0..=3 avvisas och modellen lämnas oförändrad.
    pub fn set_rating(&mut self, kind: RatingKind, value: i32) -> AppResult<()> {
        let rating = Rating::new(kind, value)?;
        match kind {
            RatingKind::Health => self.health = rating,
            RatingKind::Awards => self.awards = rating,
        }
        Ok(())
    }

    /// Namnet krävs för att spara i galleriet
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> PedigreeModel {
        let mut model = PedigreeModel::new();
        for (i, path) in FieldPath::all().into_iter().enumerate() {
            model.set_field(path, format!("v{}", i));
        }
        model
    }

    #[test]
    fn test_set_field_changes_only_that_field() {
        let base = populated();
        for path in FieldPath::all() {
            let updated = base.clone().with_field(path, "Ny");
            assert_eq!(updated.field(path), "Ny");
            for other in FieldPath::all().into_iter().filter(|p| *p != path) {
                assert_eq!(updated.field(other), base.field(other), "{} ändrades", other);
            }
            assert_eq!(updated.health, base.health);
            assert_eq!(updated.awards, base.awards);
            assert_eq!(updated.photo, base.photo);
        }
    }

    #[test]
    fn test_field_path_parse() {
        for path in FieldPath::all() {
            let parsed: FieldPath = path.to_string().parse().unwrap();
            assert_eq!(parsed, path);
        }
        assert_eq!(
            "grandparents.maternalGrandmother.birthDate".parse::<FieldPath>().unwrap(),
            FieldPath::Relative(RelativeSlot::MaternalGrandmother, RelativeField::BirthDate)
        );
        assert!(matches!(
            "father.weight".parse::<FieldPath>(),
            Err(AppError::UnknownField(_))
        ));
        assert!(matches!(
            "uncle.name".parse::<FieldPath>(),
            Err(AppError::UnknownField(_))
        ));
    }

    #[test]
    fn test_set_rating_valid_and_idempotent() {
        let mut model = PedigreeModel::new();
        for kind in RatingKind::ALL {
            for v in 0..=3 {
                model.set_rating(kind, v).unwrap();
                let once = model.clone();
                model.set_rating(kind, v).unwrap();
                assert_eq!(model, once);
                assert_eq!(model.rating(kind).value(), v as u8);
            }
        }
    }

    #[test]
    fn test_set_rating_out_of_range() {
        let mut model = PedigreeModel::new();
        model.set_rating(RatingKind::Health, 2).unwrap();
        let before = model.clone();

        for bad in [-1, 4, 100, i32::MIN] {
            let err = model.set_rating(RatingKind::Health, bad).unwrap_err();
            assert!(matches!(
                err,
                AppError::InvalidRange { kind: RatingKind::Health, value } if value == bad
            ));
            assert!(model.set_rating(RatingKind::Awards, bad).is_err());
        }
        assert_eq!(model, before);
    }

    #[test]
    fn test_rating_slots() {
        let r = Rating::new(RatingKind::Awards, 2).unwrap();
        assert_eq!(r.slots(), [true, true, false]);
        assert_eq!(Rating::default().slots(), [false, false, false]);
    }

    #[test]
    fn test_photo_data_uri() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let photo = Photo::from_bytes(png.to_vec());
        assert_eq!(photo.mime_type(), "image/png");

        let uri = photo.data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(Photo::from_data_uri(&uri), Some(photo));

        let unknown = Photo::from_bytes(vec![1, 2, 3]);
        assert_eq!(unknown.mime_type(), "application/octet-stream");
        assert!(Photo::from_data_uri("https://example.com/dog.png").is_none());
    }

    #[test]
    fn test_bmp_photo_is_stored_as_png() {
        let img = image::RgbImage::from_pixel(8, 4, image::Rgb([200, 10, 10]));
        let mut bmp = Vec::new();
        img.write_to(&mut Cursor::new(&mut bmp), ImageFormat::Bmp).unwrap();

        let photo = Photo::from_bytes(bmp);
        assert_eq!(photo.mime_type(), "image/png");
        assert!(photo.data_uri().starts_with("data:image/png;base64,"));

        let decoded = image::load_from_memory_with_format(photo.bytes(), ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        assert_eq!(decoded.dimensions(), (8, 4));
        assert_eq!(decoded.get_pixel(3, 2).0, [200, 10, 10]);
    }

    #[test]
    fn test_has_name() {
        let mut model = PedigreeModel::new();
        assert!(!model.has_name());
        model.set_field(FieldPath::Name, "   ");
        assert!(!model.has_name());
        model.set_field(FieldPath::Name, "Rex");
        assert!(model.has_name());
    }
}
