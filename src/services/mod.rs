//! Tjänster för stamtavlan
//!
//! Layout, rendering, export och galleri. Inget här känner till egui.

pub mod export;
pub mod gallery;
pub mod pedigree_chart;
pub mod surface;

pub use export::{ExportJob, ExportPipeline, ExportedFile, Rasterizer, SvgRasterizer};
pub use gallery::{GallerySnapshot, GalleryStore};
pub use pedigree_chart::{build_chart, NodeRole, PedigreeChart};
pub use surface::RenderSurface;
