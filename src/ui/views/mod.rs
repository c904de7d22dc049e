mod create_form;
mod gallery;
mod instructions;
mod preview;

pub use create_form::CreateFormView;
pub use gallery::GalleryView;
pub use instructions::InstructionsView;
pub use preview::PreviewView;

use egui::TextureHandle;

use crate::models::Photo;

/// Största sida för miniatyrer i formulär och galleri
const THUMBNAIL_SIZE: u32 = 320;

/// Avkoda ett foto till en textur i miniatyrstorlek
pub(crate) fn photo_texture(ctx: &egui::Context, name: &str, photo: &Photo) -> Option<TextureHandle> {
    let img = match image::load_from_memory(photo.bytes()) {
        Ok(img) => img,
        Err(e) => {
            tracing::warn!("Kunde inte avkoda foto ({}): {}", photo.mime_type(), e);
            return None;
        }
    };
    let rgba = img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Some(ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR))
}

/// Rektangel som täcker `target` med bevarat bildförhållande (object-fit: cover)
pub(crate) fn cover_uv(texture_size: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let tex_aspect = texture_size.x / texture_size.y.max(1.0);
    let target_aspect = target.x / target.y.max(1.0);
    if tex_aspect > target_aspect {
        let w = target_aspect / tex_aspect;
        egui::Rect::from_min_max(egui::pos2((1.0 - w) / 2.0, 0.0), egui::pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = tex_aspect / target_aspect;
        egui::Rect::from_min_max(egui::pos2(0.0, (1.0 - h) / 2.0), egui::pos2(1.0, (1.0 + h) / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_uv_crops_wide_image() {
        let uv = cover_uv(egui::vec2(200.0, 100.0), egui::vec2(100.0, 100.0));
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn test_cover_uv_crops_tall_image() {
        let uv = cover_uv(egui::vec2(100.0, 400.0), egui::vec2(200.0, 100.0));
        assert_eq!(uv.min.x, 0.0);
        assert!((uv.min.y - 0.4375).abs() < 1e-6);
        assert!((uv.max.y - 0.5625).abs() < 1e-6);
    }
}
