use std::path::Path;

/// Filändelser som erbjuds i fotodialogen
pub const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Tecken som inte får förekomma i filnamn på någon plattform
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Sökväg för statusraden, hemkatalogen visas som ~
pub fn display_path(path: &Path) -> String {
    dirs::home_dir()
        .and_then(|home| path.strip_prefix(home).ok().map(|rest| format!("~/{}", rest.display())))
        .unwrap_or_else(|| path.display().to_string())
}

/// Gör en hunds namn användbart som filnamn. Kyrilliska tecken behålls.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) || c.is_control() { '_' } else { c })
        .collect();

    // Punkter i kanterna ger dolda filer eller ".."
    replaced.trim().trim_matches('.').trim().to_string()
}

/// Har filen en ändelse som fotodialogen godtar
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| PHOTO_EXTENSIONS.iter().any(|p| p.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_dog_names() {
        assert_eq!(sanitize_filename("Шопен"), "Шопен");
        assert_eq!(sanitize_filename("Rex/Max"), "Rex_Max");
        assert_eq!(sanitize_filename("Бим: Чёрное ухо"), "Бим_ Чёрное ухо");
        assert_eq!(sanitize_filename("<Лайка>"), "_Лайка_");
        assert_eq!(sanitize_filename(" ..Тузик.. "), "Тузик");
        assert_eq!(sanitize_filename(".."), "");
    }

    #[test]
    fn test_photo_extensions() {
        assert!(is_image_file(Path::new("dog.jpeg")));
        assert!(is_image_file(Path::new("DOG.PNG")));
        assert!(is_image_file(Path::new("puppy.webp")));
        assert!(!is_image_file(Path::new("pedigree.pdf")));
        assert!(!is_image_file(Path::new("README")));
    }

    #[test]
    fn test_display_path_outside_home() {
        assert_eq!(display_path(Path::new("/tmp/export")), "/tmp/export");
    }
}
