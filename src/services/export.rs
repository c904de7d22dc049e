//! Export av stamtavlan till PNG
//!
//! Ytan rastreras i dubbel pixeltäthet (1050x1050 enheter -> 2100x2100 px)
//! på opak vit bakgrund. Rastrering och skrivning sker i en bakgrundstråd;
//! resultatet levereras en gång via en kanal som UI:t pollar.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

use crate::services::surface::RenderSurface;
use crate::utils::error::{AppError, AppResult};
use crate::utils::path::sanitize_filename;

/// Logisk storlek på exporten
pub const EXPORT_SIZE: u32 = 1050;

/// Pixeltäthet vid export
pub const EXPORT_SCALE: f32 = 2.0;

const FALLBACK_FILE_STEM: &str = "pedigree";
const FILE_SUFFIX: &str = "_родословная.png";

/// Förmåga att rastrera en yta till en PNG-bild
pub trait Rasterizer: Send + Sync {
    fn render_to_image(
        &self,
        surface: &RenderSurface,
        width: u32,
        height: u32,
        scale: f32,
    ) -> AppResult<Vec<u8>>;
}

/// Rastrering av SVG-ytan med resvg
pub struct SvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    /// Skapa rastrerare med systemets typsnitt (laddas en gång)
    pub fn new() -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::info!("Laddade {} typsnitt för rastrering", fontdb.len());
        Self::with_fontdb(fontdb)
    }

    pub fn with_fontdb(fontdb: usvg::fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Rastrera ytan till RGBA-pixlar på vit bakgrund
    pub fn render_rgba(
        &self,
        surface: &RenderSurface,
        width: u32,
        height: u32,
        scale: f32,
    ) -> AppResult<RgbaImage> {
        let pixel_width = (width as f32 * scale).round() as u32;
        let pixel_height = (height as f32 * scale).round() as u32;

        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);

        let tree = usvg::Tree::from_str(&surface.svg, &opt)
            .map_err(|e| AppError::export_failure(format!("ogiltig SVG: {}", e)))?;

        let mut pixmap = Pixmap::new(pixel_width, pixel_height).ok_or_else(|| {
            AppError::export_failure(format!(
                "kunde inte allokera bild {}x{}",
                pixel_width, pixel_height
            ))
        })?;
        pixmap.fill(Color::WHITE);

        // Skala så att ytans logiska storlek fyller exakt hela bilden
        let size = tree.size();
        let transform = Transform::from_scale(
            pixel_width as f32 / size.width(),
            pixel_height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // Opak bakgrund: förmultiplicerad RGBA är identisk med rak RGBA
        RgbaImage::from_raw(pixel_width, pixel_height, pixmap.take())
            .ok_or_else(|| AppError::export_failure("felaktig pixelbuffert"))
    }
}

impl Rasterizer for SvgRasterizer {
    fn render_to_image(
        &self,
        surface: &RenderSurface,
        width: u32,
        height: u32,
        scale: f32,
    ) -> AppResult<Vec<u8>> {
        let rgba = self.render_rgba(surface, width, height, scale)?;
        encode_opaque_png(rgba)
    }
}

/// Koda som RGB-PNG utan alfakanal
fn encode_opaque_png(rgba: RgbaImage) -> AppResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();
    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| AppError::export_failure(format!("PNG-kodning: {}", e)))?;
    Ok(buf)
}

/// Filnamn för exporten, `<namn>_родословная.png`
pub fn export_file_name(dog_name: &str) -> String {
    let stem = sanitize_filename(dog_name.trim());
    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem
    };
    format!("{}{}", stem, FILE_SUFFIX)
}

/// Resultat av en lyckad export
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub size: usize,
}

impl ExportedFile {
    pub fn summary(&self) -> String {
        format!(
            "{} ({}x{} px, {} KB)",
            self.file_name,
            self.pixel_width,
            self.pixel_height,
            self.size / 1024
        )
    }
}

/// Export-pipeline: yta -> PNG -> fil
#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Rastrera ytan i exportstorlek
    pub fn rasterize(&self, surface: Option<&RenderSurface>) -> AppResult<Vec<u8>> {
        let surface =
            surface.ok_or_else(|| AppError::export_failure("ingen renderad yta att exportera"))?;
        self.rasterizer
            .render_to_image(surface, EXPORT_SIZE, EXPORT_SIZE, EXPORT_SCALE)
    }

    /// Rastrera och skriv filen till katalogen. Vid fel skapas ingen fil.
    pub fn export_to_dir(
        &self,
        surface: Option<&RenderSurface>,
        dog_name: &str,
        dir: &Path,
    ) -> AppResult<ExportedFile> {
        let png = self.rasterize(surface)?;
        let file_name = export_file_name(dog_name);
        let path = write_atomically(dir, &file_name, &png)?;

        let pixel_size = (EXPORT_SIZE as f32 * EXPORT_SCALE).round() as u32;
        Ok(ExportedFile {
            path,
            file_name,
            pixel_width: pixel_size,
            pixel_height: pixel_size,
            size: png.len(),
        })
    }

    /// Starta export i bakgrunden. Ytan kopieras så att modellen kan fortsätta redigeras.
    pub fn spawn(
        &self,
        surface: Option<RenderSurface>,
        dog_name: String,
        dir: PathBuf,
    ) -> ExportJob {
        let (tx, rx) = mpsc::channel();
        let file_name = export_file_name(&dog_name);
        let pipeline = self.clone();

        tracing::info!("Startar export av {} till {:?}", file_name, dir);

        std::thread::spawn(move || {
            let result = pipeline.export_to_dir(surface.as_ref(), &dog_name, &dir);
            // Mottagaren kan redan vara borta om appen stängts
            let _ = tx.send(result);
        });

        ExportJob { rx, file_name }
    }
}

fn write_atomically(dir: &Path, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::export_failure(format!("kunde inte skapa katalog {:?}: {}", dir, e))
    })?;

    let path = dir.join(file_name);
    let write_err =
        |e: std::io::Error| AppError::export_failure(format!("kunde inte skriva {:?}: {}", path, e));

    // Egen temporärfil per jobb; tas bort automatiskt om något misslyckas
    let mut part = tempfile::Builder::new()
        .prefix(".")
        .suffix(".part")
        .tempfile_in(dir)
        .map_err(write_err)?;
    part.write_all(bytes).map_err(write_err)?;
    part.persist(&path).map_err(|e| write_err(e.error))?;

    Ok(path)
}

/// Pågående export. Varje jobb ger exakt ett resultat.
pub struct ExportJob {
    rx: Receiver<AppResult<ExportedFile>>,
    file_name: String,
}

impl ExportJob {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Hämta resultatet om det är klart
    pub fn poll(&self) -> Option<AppResult<ExportedFile>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AppError::export_failure(
                "exporttråden avslutades oväntat",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::models::{FieldPath, PedigreeModel, Photo, RatingKind};
    use crate::services::pedigree_chart::build_chart;

    fn surface_for(model: &PedigreeModel) -> RenderSurface {
        RenderSurface::from_chart(&build_chart(model), "Montserrat")
    }

    fn pipeline() -> ExportPipeline {
        // Tom typsnittsdatabas räcker för geometrin och håller testerna snabba
        ExportPipeline::new(Arc::new(SvgRasterizer::with_fontdb(
            usvg::fontdb::Database::new(),
        )))
    }

    fn wait(job: ExportJob) -> AppResult<ExportedFile> {
        job.rx
            .recv_timeout(Duration::from_secs(60))
            .expect("exporten blev aldrig klar")
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn render_to_image(&self, _: &RenderSurface, _: u32, _: u32, _: f32) -> AppResult<Vec<u8>> {
            Err(AppError::export_failure("rastrering misslyckades"))
        }
    }

    fn red_png(size: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(size, size, image::Rgba([220, 0, 0, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Шопен"), "Шопен_родословная.png");
        assert_eq!(export_file_name(""), "pedigree_родословная.png");
        assert_eq!(export_file_name("   "), "pedigree_родословная.png");
        assert_eq!(export_file_name("Rex/Max"), "Rex_Max_родословная.png");
    }

    #[test]
    fn test_export_populated_model_is_opaque_2100_png() {
        let mut model = PedigreeModel::new()
            .with_field(FieldPath::Name, "Шопен")
            .with_field(FieldPath::Breed, "Бордер-колли");
        model.set_rating(RatingKind::Health, 2).unwrap();
        model.set_rating(RatingKind::Awards, 1).unwrap();
        model.set_photo(Photo::from_bytes(red_png(16)));

        let dir = tempfile::tempdir().unwrap();
        let exported = pipeline()
            .export_to_dir(Some(&surface_for(&model)), &model.name, dir.path())
            .unwrap();

        assert!(exported.file_name.contains("Шопен"));
        assert!(exported.path.exists());
        assert_eq!((exported.pixel_width, exported.pixel_height), (2100, 2100));

        let bytes = fs::read(&exported.path).unwrap();
        assert_eq!(bytes.len(), exported.size);
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (2100, 2100));
        assert!(!img.color().has_alpha());

        let rgb = img.to_rgb8();
        // Hörnet är vitt
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
        // Kanten barn -> far, utanför porträttet
        let edge = rgb.get_pixel(770, 690).0;
        assert!(edge.iter().all(|&c| c < 100), "kantpixel {:?}", edge);
        // Fotot fyller porträttcirkeln
        let photo = rgb.get_pixel(1050, 890).0;
        assert!(photo[0] > 180 && photo[1] < 60 && photo[2] < 60, "fotopixel {:?}", photo);

        // Ingen kvarlämnad temporärfil
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_export_shows_bmp_photo_in_portrait() {
        let img = image::RgbImage::from_pixel(16, 16, image::Rgb([220, 0, 0]));
        let mut bmp = Vec::new();
        img.write_to(&mut Cursor::new(&mut bmp), ImageFormat::Bmp).unwrap();

        let mut model = PedigreeModel::new().with_field(FieldPath::Name, "Бим");
        model.set_photo(Photo::from_bytes(bmp));

        let png = pipeline().rasterize(Some(&surface_for(&model))).unwrap();
        let rgb = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgb8();
        let photo = rgb.get_pixel(1050, 890).0;
        assert!(photo[0] > 180 && photo[1] < 60 && photo[2] < 60, "fotopixel {:?}", photo);
    }

    #[test]
    fn test_name_with_control_character_still_exports() {
        let model = PedigreeModel::new().with_field(FieldPath::Name, "Rex\u{1}");
        let png = pipeline().rasterize(Some(&surface_for(&model))).unwrap();
        let img = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (2100, 2100));
    }

    #[test]
    fn test_export_without_surface_fails_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = pipeline().export_to_dir(None, "Rex", dir.path()).unwrap_err();
        assert!(matches!(err, AppError::ExportFailure(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rasterizer_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = ExportPipeline::new(Arc::new(FailingRasterizer));
        let model = PedigreeModel::new().with_field(FieldPath::Name, "Rex");

        let err = pipeline
            .export_to_dir(Some(&surface_for(&model)), &model.name, dir.path())
            .unwrap_err();
        assert!(matches!(err, AppError::ExportFailure(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_surface_is_export_failure() {
        let surface = RenderSurface {
            svg: "inte svg".into(),
            width: 1050,
            height: 1050,
        };
        let err = pipeline().rasterize(Some(&surface)).unwrap_err();
        assert!(matches!(err, AppError::ExportFailure(_)));
    }

    #[test]
    fn test_background_jobs_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline();
        let model = PedigreeModel::new().with_field(FieldPath::Name, "Rex");

        let ok_job = pipeline.spawn(Some(surface_for(&model)), model.name.clone(), dir.path().into());
        let failed_job = pipeline.spawn(None, "Max".into(), dir.path().into());
        assert_eq!(ok_job.file_name(), "Rex_родословная.png");

        assert!(matches!(wait(failed_job), Err(AppError::ExportFailure(_))));
        let exported = wait(ok_job).unwrap();
        assert_eq!(exported.path, dir.path().join("Rex_родословная.png"));
        assert!(!dir.path().join("Max_родословная.png").exists());
    }

    #[test]
    fn test_concurrent_exports_of_same_dog_both_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline();
        let model = PedigreeModel::new().with_field(FieldPath::Name, "Rex");
        let surface = surface_for(&model);

        for _ in 0..5 {
            let first = pipeline.spawn(Some(surface.clone()), "Rex".into(), dir.path().into());
            let second = pipeline.spawn(Some(surface.clone()), "Rex".into(), dir.path().into());

            let a = wait(first).unwrap();
            let b = wait(second).unwrap();
            assert_eq!(a.path, b.path);
        }

        // Bara den färdiga filen finns kvar, inga temporärfiler
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Rex_родословная.png".to_string()]);
        let img = image::open(dir.path().join("Rex_родословная.png")).unwrap();
        assert_eq!((img.width(), img.height()), (2100, 2100));
    }

    #[test]
    fn test_preview_render_at_native_size() {
        let surface = surface_for(&PedigreeModel::new());
        let rgba = SvgRasterizer::with_fontdb(usvg::fontdb::Database::new())
            .render_rgba(&surface, surface.width, surface.height, 1.0)
            .unwrap();
        assert_eq!(rgba.dimensions(), (1050, 1050));
        assert!(rgba.pixels().all(|p| p.0[3] == 255));
    }
}
