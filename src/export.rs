use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

use crate::{field::Field, interpolator::ResultFrame, strategy::Strategy};

pub const BEST_FOLDER: &str = "best";
pub const LABELS_FOLDER: &str = "labels";
pub const WOVEN_FOLDER: &str = "woven";
pub const FIELD_FOLDER: &str = "field";

/// Fixed folder layout below the output folder.
/// Every image of a frame is stored as `<output>/<folder>/<frame>.png`.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Creates all folders that will be written to.
    pub fn create_dirs(&self, weave: bool, save_fields: bool) -> Result<()> {
        let mut folders: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
        folders.push(BEST_FOLDER);
        folders.push(LABELS_FOLDER);
        if weave {
            folders.push(WOVEN_FOLDER);
        }
        if save_fields {
            folders.push(FIELD_FOLDER);
        }
        for folder in folders {
            let dir = self.root.join(folder);
            fs::create_dir_all(&dir)
                .with_context(|| format!("could not create output folder {:?}", dir))?;
        }
        Ok(())
    }

    pub fn path(&self, folder: &str, frame_name: &str) -> PathBuf {
        // `frame_name` is a file stem and may itself contain dots
        self.root.join(folder).join(format!("{}.png", frame_name))
    }

    /// Writes the four strategy images, the best image and the label map.
    pub fn save_result(&self, frame_name: &str, result: &ResultFrame) -> Result<()> {
        for strategy in Strategy::ALL.iter().copied() {
            result
                .image(strategy)
                .save(self.path(strategy.name(), frame_name))
                .with_context(|| format!("could not save {} image", strategy))?;
        }
        result
            .best()
            .save(self.path(BEST_FOLDER, frame_name))
            .context("could not save best image")?;
        result
            .labels()
            .save(self.path(LABELS_FOLDER, frame_name))
            .context("could not save label map")?;
        Ok(())
    }

    pub fn save_woven(&self, frame_name: &str, woven: &RgbImage) -> Result<()> {
        woven
            .save(self.path(WOVEN_FOLDER, frame_name))
            .context("could not save woven frame")
    }

    pub fn save_field(&self, frame_name: &str, field_image: &RgbImage) -> Result<()> {
        field_image
            .save(self.path(FIELD_FOLDER, frame_name))
            .context("could not save field")
    }
}

/// Interleaves the known field rows with reconstructed rows into a
/// full-height frame. Rows without a reconstruction stay black.
pub fn weave(field_image: &RgbImage, reconstructed: &RgbImage, field: Field) -> RgbImage {
    let (width, height) = field_image.dimensions();
    RgbImage::from_fn(width, height * 2, |x, y| {
        if field.kept_row(y / 2) == y {
            return *field_image.get_pixel(x, y / 2);
        }
        let row = match field {
            Field::Odd => y / 2,
            Field::Even => (y + 1) / 2,
        };
        if row < height {
            *reconstructed.get_pixel(x, row)
        } else {
            Rgb([0, 0, 0])
        }
    })
}
