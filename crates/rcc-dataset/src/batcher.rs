//! Batch collation for the framework dataloader.

use burn::data::dataloader::batcher::Batcher;
use burn::prelude::*;

use crate::dataset::RotationItem;

/// A batch of rotated images and their angle targets.
#[derive(Clone, Debug)]
pub struct RotationBatch<B: Backend> {
    /// Images with shape [batch_size, 3, side, side]
    pub images: Tensor<B, 4>,
    /// Angle targets in [0, 1) with shape [batch_size]
    pub angles: Tensor<B, 1>,
}

/// Batcher stacking rotation items into tensors.
///
/// All items in a batch must share one square side; configure a fixed
/// `resize` on the source when batching.
#[derive(Clone, Debug)]
pub struct RotationBatcher<B: Backend> {
    #[allow(dead_code)]
    device: B::Device,
}

impl<B: Backend> RotationBatcher<B> {
    /// Creates a batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<B, RotationItem, RotationBatch<B>> for RotationBatcher<B> {
    fn batch(&self, items: Vec<RotationItem>, device: &B::Device) -> RotationBatch<B> {
        let batch_size = items.len();
        let side = items
            .first()
            .map(|item| item.image.width() as usize)
            .unwrap_or(0);

        let images_data: Vec<f32> = items
            .iter()
            .flat_map(|item| item.image.data().iter().copied())
            .collect();
        let images = Tensor::<B, 4>::from_floats(
            TensorData::new(images_data, [batch_size, 3, side, side]),
            device,
        );

        let angles_data: Vec<f32> = items.iter().map(|item| item.angle).collect();
        let angles =
            Tensor::<B, 1>::from_floats(TensorData::new(angles_data, [batch_size]), device);

        RotationBatch { images, angles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn_ndarray::NdArray;
    use rcc_core::ImageTensor;

    type TestBackend = NdArray;

    fn solid_item(side: u32, value: f32, angle: f32) -> RotationItem {
        let data = vec![value; 3 * (side as usize) * (side as usize)];
        RotationItem {
            image: ImageTensor::new(data, side, side).unwrap(),
            angle,
        }
    }

    #[test]
    fn test_batch_shapes() {
        let device = Default::default();
        let batcher = RotationBatcher::<TestBackend>::new(device);

        let items = vec![solid_item(4, 0.1, 0.25), solid_item(4, 0.2, 0.75)];
        let batch = batcher.batch(items, &Default::default());

        assert_eq!(batch.images.dims(), [2, 3, 4, 4]);
        assert_eq!(batch.angles.dims(), [2]);
    }

    #[test]
    fn test_batch_angle_order() {
        let device = Default::default();
        let batcher = RotationBatcher::<TestBackend>::new(device);

        let items = vec![
            solid_item(2, 0.0, 0.125),
            solid_item(2, 0.0, 0.5),
            solid_item(2, 0.0, 0.875),
        ];
        let batch = batcher.batch(items, &Default::default());

        let angles = batch.angles.into_data().to_vec::<f32>().unwrap();
        assert_eq!(angles, vec![0.125, 0.5, 0.875]);
    }

    #[test]
    fn test_batch_preserves_pixel_values() {
        let device = Default::default();
        let batcher = RotationBatcher::<TestBackend>::new(device);

        let items = vec![solid_item(2, 0.25, 0.0), solid_item(2, 0.75, 0.0)];
        let batch = batcher.batch(items, &Default::default());

        let values = batch.images.into_data().to_vec::<f32>().unwrap();
        assert_eq!(values.len(), 2 * 3 * 2 * 2);
        assert!(values[..12].iter().all(|&v| v == 0.25));
        assert!(values[12..].iter().all(|&v| v == 0.75));
    }
}
