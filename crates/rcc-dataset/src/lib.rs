//! Rotation dataset layer for the RCC self-supervised task.
//!
//! This crate feeds a rotation-angle-prediction pipeline: it discovers
//! image paths, decodes and normalizes them through an [`ImageSource`],
//! assigns each sample a random rotation angle, and serves rotated
//! (image, angle) pairs through `burn`'s dataset abstraction.

pub mod angles;
pub mod batcher;
pub mod dataset;
pub mod loader;
pub mod source;
pub mod transform;

pub use angles::rand_angles;
pub use batcher::{RotationBatch, RotationBatcher};
pub use dataset::{RotationDataset, RotationItem};
pub use loader::collect_image_paths;
pub use source::{ImageSource, PathImageSource};
pub use transform::{rotate, to_square};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::angles::*;
    pub use crate::batcher::*;
    pub use crate::dataset::*;
    pub use crate::loader::*;
    pub use crate::source::*;
    pub use crate::transform::*;
    pub use rcc_core::prelude::*;
}
