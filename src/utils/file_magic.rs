/// Check that the leading bytes of an upload match its claimed image
/// extension. Photos are the only upload type this system accepts.
pub fn validate_image_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        ".bmp" => data.starts_with(b"BM"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_image_magic_bytes(&png_header, ".png"));
        assert!(validate_image_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_image_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_image_magic_bytes(&jpeg_header, ".jpg"));
        assert!(validate_image_magic_bytes(&jpeg_header, ".jpeg"));
        assert!(!validate_image_magic_bytes(&jpeg_header, ".png"));
    }

    #[test]
    fn test_non_image_rejected() {
        assert!(!validate_image_magic_bytes(b"%PDF-1.4", ".pdf"));
        assert!(!validate_image_magic_bytes(&[], ".png"));
    }
}
