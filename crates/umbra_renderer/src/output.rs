//! Persisting rendered images.
//!
//! Plain-text PPM is written by hand; any other extension is handed to the
//! `image` crate's encoders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::ImageBuffer;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Pixel buffer does not match a {width}x{height} image")]
    SizeMismatch { width: u32, height: u32 },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write an image as plain-text PPM (`P3`), top scanline first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in &image.pixels {
        writeln!(writer, "{r} {g} {b}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Save an image, picking the format from the file extension.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path)?;
        write_ppm(image, BufWriter::new(file))?;
    } else {
        let rgb = image::RgbImage::from_raw(image.width, image.height, image.as_raw()).ok_or(
            OutputError::SizeMismatch {
                width: image.width,
                height: image.height,
            },
        )?;
        rgb.save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
