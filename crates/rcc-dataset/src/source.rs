//! Image source adapters.
//!
//! An [`ImageSource`] maps an index to a decoded, normalized RGB image
//! tensor. [`PathImageSource`] is the filesystem-backed implementation: it
//! owns a contiguous fractional slice of an ordered path list and decodes
//! files on demand, with no retry and no caching.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::ImageReader;
use rcc_core::{DataConfig, Error, ImageTensor, NormalizeConfig, PathRange, Result};
use tracing::debug;

use crate::loader::collect_image_paths;

/// Indexed access to decoded image tensors.
pub trait ImageSource {
    /// Number of samples this source serves
    fn len(&self) -> usize;

    /// Whether the source is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the image at `index` into a normalized CHW tensor
    fn get(&self, index: usize) -> Result<ImageTensor>;
}

/// Image source backed by a slice of filesystem paths.
pub struct PathImageSource {
    paths: Vec<PathBuf>,
    norm: NormalizeConfig,
    resize: Option<u32>,
}

impl PathImageSource {
    /// Creates a source owning the `range` slice of `paths`.
    ///
    /// The slice is taken at construction; the source never sees paths
    /// outside it. Use `(0.0, 0.5)` to select the first half.
    pub fn new(paths: Vec<PathBuf>, range: PathRange, norm: NormalizeConfig) -> Self {
        let (start, end) = range.bounds(paths.len());
        debug!("Path source owns [{}, {}) of {} paths", start, end, paths.len());

        Self {
            paths: paths[start..end].to_vec(),
            norm,
            resize: None,
        }
    }

    /// Resizes every decoded image to a `side` x `side` square.
    ///
    /// Required when items are batched, so shapes stack.
    pub fn with_resize(mut self, side: u32) -> Self {
        self.resize = Some(side);
        self
    }

    /// Creates a source from a path list and a [`DataConfig`]
    pub fn from_config(paths: Vec<PathBuf>, config: &DataConfig) -> Self {
        let mut source = Self::new(paths, config.range, config.norm);
        source.resize = config.resize;
        source
    }

    /// Scans `root` for images and builds a source over them
    pub fn from_dir<P: AsRef<Path>>(root: P, config: &DataConfig) -> Result<Self> {
        let paths = collect_image_paths(root)?;
        Ok(Self::from_config(paths, config))
    }
}

impl ImageSource for PathImageSource {
    fn len(&self) -> usize {
        self.paths.len()
    }

    fn get(&self, index: usize) -> Result<ImageTensor> {
        let path = self.paths.get(index).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "Index {} out of range for source of length {}",
                index,
                self.paths.len()
            ))
        })?;

        let mut img = ImageReader::open(path)?.decode()?;
        if let Some(side) = self.resize {
            img = img.resize_exact(side, side, FilterType::Triangle);
        }

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        // CHW, scaled to [0, 1], then normalized per channel.
        let mut data = Vec::with_capacity(3 * (width as usize) * (height as usize));
        for c in 0..3 {
            for y in 0..height {
                for x in 0..width {
                    let pixel = rgb.get_pixel(x, y);
                    data.push(self.norm.apply(c, pixel[c] as f32 / 255.0));
                }
            }
        }

        ImageTensor::new(data, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_image(path: &Path, width: u32, height: u32, color: [u8; 3]) {
        let img = image::ImageBuffer::from_fn(width, height, |_, _| image::Rgb(color));
        img.save(path).unwrap();
    }

    fn create_test_paths(dir: &TempDir, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.path().join(format!("img_{:03}.png", i));
                create_test_image(&path, 8, 8, [128, 64, 32]);
                path
            })
            .collect()
    }

    #[test]
    fn test_source_returns_three_channels() {
        let dir = TempDir::new().unwrap();
        let paths = create_test_paths(&dir, 3);
        let source = PathImageSource::new(paths, PathRange::full(), NormalizeConfig::identity());

        for idx in 0..source.len() {
            let tensor = source.get(idx).unwrap();
            assert_eq!(tensor.channels(), 3);
            assert_eq!(tensor.data().len(), 3 * 8 * 8);
        }
    }

    #[test]
    fn test_half_range_length_is_floor() {
        let dir = TempDir::new().unwrap();

        let paths = create_test_paths(&dir, 5);
        let range = PathRange::new(0.0, 0.5).unwrap();
        let source = PathImageSource::new(paths, range, NormalizeConfig::identity());
        assert_eq!(source.len(), 2);

        let paths = create_test_paths(&dir, 4);
        let source = PathImageSource::new(paths, range, NormalizeConfig::identity());
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_range_selects_tail_slice() {
        let dir = TempDir::new().unwrap();
        let paths = create_test_paths(&dir, 4);
        let range = PathRange::new(0.5, 1.0).unwrap();
        let source = PathImageSource::new(paths, range, NormalizeConfig::identity());

        assert_eq!(source.len(), 2);
        assert!(source.get(1).is_ok());
        assert!(source.get(2).is_err());
    }

    #[test]
    fn test_pixel_values_are_normalized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        create_test_image(&path, 4, 4, [102, 102, 102]);

        let norm = NormalizeConfig::new([0.2, 0.2, 0.2], [0.5, 0.5, 0.5]).unwrap();
        let source = PathImageSource::new(vec![path], PathRange::full(), norm);
        let tensor = source.get(0).unwrap();

        // 102/255 = 0.4, (0.4 - 0.2) / 0.5 = 0.4
        for c in 0..3 {
            assert!((tensor.get(c, 0, 0) - 0.4).abs() < 1e-5);
        }
    }

    #[test]
    fn test_resize_to_square() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wide.png");
        create_test_image(&path, 16, 8, [10, 20, 30]);

        let source = PathImageSource::new(
            vec![path],
            PathRange::full(),
            NormalizeConfig::identity(),
        )
        .with_resize(8);
        let tensor = source.get(0).unwrap();

        assert_eq!(tensor.width(), 8);
        assert_eq!(tensor.height(), 8);
        assert!(tensor.is_square());
    }

    #[test]
    fn test_unreadable_path_propagates_error() {
        let source = PathImageSource::new(
            vec![PathBuf::from("/nonexistent/missing.png")],
            PathRange::full(),
            NormalizeConfig::identity(),
        );
        assert!(source.get(0).is_err());
    }

    #[test]
    fn test_corrupt_file_propagates_decoder_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let source =
            PathImageSource::new(vec![path], PathRange::full(), NormalizeConfig::identity());
        assert!(matches!(source.get(0), Err(Error::Image(_))));
    }

    #[test]
    fn test_from_dir_uses_config() {
        let dir = TempDir::new().unwrap();
        create_test_paths(&dir, 6);

        let config = DataConfig {
            range: PathRange::new(0.0, 0.5).unwrap(),
            resize: Some(4),
            ..DataConfig::default()
        };
        let source = PathImageSource::from_dir(dir.path(), &config).unwrap();

        assert_eq!(source.len(), 3);
        let tensor = source.get(0).unwrap();
        assert_eq!(tensor.width(), 4);
    }
}
