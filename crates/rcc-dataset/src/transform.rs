//! Square cropping and rotation on image tensors.

use rcc_core::ImageTensor;

const EPS: f32 = 1e-3;

/// Center-crops a tensor to a square with side `min(width, height)`.
///
/// A square input is returned unchanged. Cropping rather than padding keeps
/// the rotation label independent of border artifacts.
pub fn to_square(img: ImageTensor) -> ImageTensor {
    if img.is_square() {
        return img;
    }

    let side = img.width().min(img.height());
    let x0 = (img.width() - side) / 2;
    let y0 = (img.height() - side) / 2;

    let mut out = ImageTensor::zeros(side, side);
    for c in 0..img.channels() {
        for y in 0..side {
            for x in 0..side {
                out.set(c, x, y, img.get(c, x0 + x, y0 + y));
            }
        }
    }
    out
}

/// Rotates a tensor around its center by `angle_deg` degrees.
///
/// Each destination pixel is mapped back into the source with the inverse
/// rotation and sampled bilinearly. Samples falling outside the source are
/// filled with 0.0. Output dimensions equal input dimensions, and an angle
/// of 0 is an exact identity.
pub fn rotate(img: &ImageTensor, angle_deg: f32) -> ImageTensor {
    let width = img.width();
    let height = img.height();

    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    let cx = (width as f32 - 1.0) * 0.5;
    let cy = (height as f32 - 1.0) * 0.5;
    let max_x = width as f32 - 1.0;
    let max_y = height as f32 - 1.0;

    let mut out = ImageTensor::zeros(width, height);

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let src_x = cx + dx * cos_a + dy * sin_a;
            let src_y = cy - dx * sin_a + dy * cos_a;

            // Tolerance band absorbs float error on the source border.
            if src_x < -EPS || src_y < -EPS || src_x > max_x + EPS || src_y > max_y + EPS {
                continue;
            }
            let src_x = src_x.clamp(0.0, max_x);
            let src_y = src_y.clamp(0.0, max_y);

            let x0 = src_x.floor() as u32;
            let y0 = src_y.floor() as u32;
            let x1 = (x0 + 1).min(width - 1);
            let y1 = (y0 + 1).min(height - 1);
            let fx = src_x - x0 as f32;
            let fy = src_y - y0 as f32;

            let w00 = (1.0 - fx) * (1.0 - fy);
            let w10 = fx * (1.0 - fy);
            let w01 = (1.0 - fx) * fy;
            let w11 = fx * fy;

            for c in 0..img.channels() {
                let value = img.get(c, x0, y0) * w00
                    + img.get(c, x1, y0) * w10
                    + img.get(c, x0, y1) * w01
                    + img.get(c, x1, y1) * w11;
                out.set(c, x, y, value);
            }
        }
    }

    out
}
