use crate::PreviewBitmap;

/// Longest edge of a rendered preview, in pixels. Large floor plans are
/// downscaled so the UI never holds a full-resolution copy.
pub const MAX_PREVIEW_EDGE: u32 = 1024;

#[derive(Debug, thiserror::Error)]
#[error("could not decode image: {0}")]
pub struct PreviewError(#[from] image::ImageError);

/// Decodes raw file bytes into a display-ready RGBA bitmap, preserving
/// aspect ratio while capping the longest edge at [`MAX_PREVIEW_EDGE`].
pub fn render_preview(bytes: &[u8]) -> Result<PreviewBitmap, PreviewError> {
    let decoded = image::load_from_memory(bytes)?;
    let scaled = if decoded.width() > MAX_PREVIEW_EDGE || decoded.height() > MAX_PREVIEW_EDGE {
        decoded.thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE)
    } else {
        decoded
    };
    let rgba = scaled.to_rgba8();
    Ok(PreviewBitmap {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::{render_preview, MAX_PREVIEW_EDGE};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = image::DynamicImage::new_rgb8(width, height);
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    #[test]
    fn small_image_keeps_its_dimensions() {
        let bitmap = render_preview(&png_bytes(64, 48)).expect("decode");
        assert_eq!((bitmap.width, bitmap.height), (64, 48));
        assert_eq!(bitmap.rgba.len(), 64 * 48 * 4);
    }

    #[test]
    fn oversized_image_is_downscaled_preserving_aspect() {
        let bitmap = render_preview(&png_bytes(MAX_PREVIEW_EDGE * 2, MAX_PREVIEW_EDGE)).expect("decode");
        assert_eq!(bitmap.width, MAX_PREVIEW_EDGE);
        assert_eq!(bitmap.height, MAX_PREVIEW_EDGE / 2);
    }

    #[test]
    fn garbage_bytes_fail_without_panicking() {
        assert!(render_preview(b"definitely not an image").is_err());
    }
}
