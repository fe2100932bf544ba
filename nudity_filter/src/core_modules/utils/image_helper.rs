pub mod image_helper {
    use crate::error::{FilterError, Result};
    use image::{ExtendedColorType, GrayImage, ImageEncoder, ImageError};
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;

    /// Encodes a grayscale mask as PNG at `path`.
    pub fn save_mask(path: &Path, mask: &GrayImage) -> Result<()> {
        let mask_write_error = |source: ImageError| FilterError::MaskWrite {
            path: path.to_path_buf(),
            source,
        };

        let output = File::create(path).map_err(|e| mask_write_error(ImageError::IoError(e)))?;
        let encoder = image::codecs::png::PngEncoder::new(BufWriter::new(output));

        encoder
            .write_image(mask.as_raw(), mask.width(), mask.height(), ExtendedColorType::L8)
            .map_err(mask_write_error)?;

        Ok(())
    }
}
