//! Configuration structures for the RCC data-loading layer.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Per-channel normalization policy applied to pixel values in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NormalizeConfig {
    /// Channel means [R, G, B]
    pub mean: [f32; 3],
    /// Channel standard deviations [R, G, B]
    pub std: [f32; 3],
}

impl NormalizeConfig {
    /// Creates a normalization policy, rejecting zero deviations
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Result<Self> {
        if std.iter().any(|&s| s == 0.0) {
            return Err(Error::Config(
                "Normalization std must be non-zero for every channel".to_string(),
            ));
        }
        Ok(Self { mean, std })
    }

    /// ImageNet statistics, the conventional default for pretrained backbones
    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }

    /// No-op policy (zero mean, unit deviation)
    pub fn identity() -> Self {
        Self {
            mean: [0.0, 0.0, 0.0],
            std: [1.0, 1.0, 1.0],
        }
    }

    /// Normalizes a single value from channel `c`
    pub fn apply(&self, c: usize, value: f32) -> f32 {
        (value - self.mean[c]) / self.std[c]
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self::imagenet()
    }
}

/// A fractional sub-range [start, end) over an ordered path list.
///
/// Index bounds are obtained by truncation: a list of length N with range
/// (0.0, 0.5) yields the first floor(N/2) paths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PathRange {
    /// Start fraction in [0, 1]
    pub start: f32,
    /// End fraction in [0, 1]
    pub end: f32,
}

impl PathRange {
    /// Creates a range, validating 0 <= start <= end <= 1
    pub fn new(start: f32, end: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) {
            return Err(Error::Config(
                "Range fractions must be between 0.0 and 1.0".to_string(),
            ));
        }
        if start > end {
            return Err(Error::Config(
                "Range start must not exceed range end".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The whole list
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }

    /// Converts the fractions to index bounds over a list of length `len`
    pub fn bounds(&self, len: usize) -> (usize, usize) {
        let start = (self.start * len as f32) as usize;
        let end = (self.end * len as f32) as usize;
        (start, end)
    }
}

impl Default for PathRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Configuration for building a rotation dataset from an image folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// Which slice of the ordered path list this source owns
    pub range: PathRange,
    /// Normalization policy
    pub norm: NormalizeConfig,
    /// Square side to resize decoded images to; `None` keeps source sizes
    pub resize: Option<u32>,
    /// Random seed for the angle table
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            range: PathRange::full(),
            norm: NormalizeConfig::imagenet(),
            resize: None,
            seed: 42,
        }
    }
}

impl DataConfig {
    /// Save the configuration to a JSON file for reproducibility
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        Ok(config)
    }
}
