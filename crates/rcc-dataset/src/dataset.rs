//! Composite rotation dataset.
//!
//! Pairs an [`ImageSource`] with a fixed table of random angles: each
//! access fetches the base image, squares it, rotates it by its assigned
//! angle, and returns the (image, angle) pair.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};
use tracing::warn;

use rcc_core::{Error, ImageTensor, Result};

use crate::angles::rand_angles;
use crate::source::ImageSource;
use crate::transform::{rotate, to_square};

/// A single self-supervised sample.
///
/// `angle` is the fraction of a full turn in [0, 1) that produced `image`;
/// it is the regression target for the rotation task.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RotationItem {
    /// Rotated square image, CHW float
    pub image: ImageTensor,
    /// Assigned rotation as a fraction of a full turn
    pub angle: f32,
}

/// Dataset serving (rotated image, angle) pairs over any image source.
pub struct RotationDataset<S> {
    source: S,
    angles: Vec<f32>,
}

impl<S: ImageSource> RotationDataset<S> {
    /// Wraps `source`, assigning one angle per index.
    ///
    /// The angle table is generated here, once, and never resized; repeated
    /// reads of the same index always see the same angle.
    pub fn new(source: S, seed: u64) -> Self {
        let angles = rand_angles(source.len(), seed);
        Self { source, angles }
    }

    /// The angle assigned to `index`, if in range
    pub fn angle(&self, index: usize) -> Option<f32> {
        self.angles.get(index).copied()
    }

    /// Fetches, squares, and rotates the sample at `index`.
    pub fn item(&self, index: usize) -> Result<RotationItem> {
        let angle = self.angles.get(index).copied().ok_or_else(|| {
            Error::Dataset(format!(
                "Index {} out of range for dataset of length {}",
                index,
                self.angles.len()
            ))
        })?;

        let image = self.source.get(index)?;
        let image = to_square(image);
        let image = rotate(&image, angle * 360.0);

        Ok(RotationItem { image, angle })
    }
}

impl<S: ImageSource + Send + Sync> Dataset<RotationItem> for RotationDataset<S> {
    fn get(&self, index: usize) -> Option<RotationItem> {
        match self.item(index) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("Failed to load sample {}: {}", index, err);
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.source.len()
    }
}
