use crate::data::image::Image;
use crate::error::Error;
use crate::filter::border::BorderMode;

/// Width and height of a convolution kernel. Both must be odd.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KernelSize {
    pub width: usize,
    pub height: usize,
}

impl KernelSize {
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

// Binomial kernels used for small sizes when no sigma is given.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Standard deviation used for a kernel of `size` taps when none is supplied.
pub fn default_sigma(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Builds a normalized 1D Gaussian kernel. A `sigma` of zero or less is derived
/// from `size`.
pub fn gaussian_kernel(size: usize, sigma: f32) -> Result<Vec<f32>, Error> {
    if size == 0 || size % 2 == 0 {
        return Err(Error::InvalidKernel(format!(
            "Kernel size must be a positive odd number, got {size}"
        )));
    }

    if sigma <= 0.0 {
        if let Some(kernel) = SMALL_KERNELS.get(size / 2) {
            return Ok(kernel.to_vec());
        }
    }

    let sigma = if sigma > 0.0 {
        sigma
    } else {
        default_sigma(size)
    };

    let radius = (size / 2) as f32;
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - radius;
            (scale * x * x).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|weight| *weight /= sum);

    Ok(kernel)
}

/// Separable Gaussian blur. The output has the same shape as the input.
pub fn gaussian_blur(
    image: &Image,
    kernel_size: KernelSize,
    sigma: f32,
    border: BorderMode,
) -> Result<Image, Error> {
    let kernel_x = gaussian_kernel(kernel_size.width, sigma)?;
    let kernel_y = gaussian_kernel(kernel_size.height, sigma)?;

    let (height, width, channels) = image.shape();

    log::debug!(
        "Blurring {height}x{width}x{channels} image with {}x{} kernel ({border:?})",
        kernel_size.width,
        kernel_size.height
    );

    if image.is_empty() {
        return Ok(image.clone());
    }

    let source = image.as_raw();
    let constant = border.constant_value();
    let radius_x = (kernel_x.len() / 2) as isize;
    let radius_y = (kernel_y.len() / 2) as isize;

    let mut horizontal = vec![0.0f32; source.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, weight) in kernel_x.iter().enumerate() {
                    let sample_x = x as isize + k as isize - radius_x;
                    let value = match border.resolve(sample_x, width) {
                        Some(sample_x) => source[image.index(y, sample_x, c)] as f32,
                        None => constant,
                    };
                    acc += weight * value;
                }
                horizontal[image.index(y, x, c)] = acc;
            }
        }
    }

    let mut output = vec![0u8; source.len()];
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for (k, weight) in kernel_y.iter().enumerate() {
                    let sample_y = y as isize + k as isize - radius_y;
                    let value = match border.resolve(sample_y, height) {
                        Some(sample_y) => horizontal[image.index(sample_y, x, c)],
                        None => constant,
                    };
                    acc += weight * value;
                }
                output[image.index(y, x, c)] = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Image::new(height, width, channels, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels_are_normalized_and_symmetric() {
        for size in [1, 3, 5, 7, 9, 13, 31] {
            let kernel = gaussian_kernel(size, 0.0).unwrap();
            let sum: f32 = kernel.iter().sum();

            assert_eq!(kernel.len(), size);
            assert!((sum - 1.0).abs() < 1e-5, "size {size} sums to {sum}");
            for i in 0..size / 2 {
                assert!((kernel[i] - kernel[size - 1 - i]).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn small_kernels_use_binomial_weights() {
        assert_eq!(
            gaussian_kernel(7, 0.0).unwrap(),
            vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125]
        );
    }

    #[test]
    fn explicit_sigma_overrides_table() {
        let kernel = gaussian_kernel(3, 10.0).unwrap();

        assert!((kernel[0] - kernel[1]).abs() < 0.01);
    }

    #[test]
    fn sigma_four_flattens_both_kernels() {
        let low = gaussian_kernel(7, 4.0).unwrap();
        let high = gaussian_kernel(13, 4.0).unwrap();

        assert_ne!(low, gaussian_kernel(7, 0.0).unwrap());
        assert!(low[3] < 0.17 && low[0] > 0.1);
        assert!(high[6] < gaussian_kernel(13, 0.0).unwrap()[6]);
    }

    #[test]
    fn derived_sigma_grows_with_size() {
        assert!((default_sigma(13) - 2.3).abs() < 1e-6);
        assert!(default_sigma(13) > default_sigma(7));
    }

    #[test]
    fn rejects_even_and_zero_sizes() {
        assert!(gaussian_kernel(0, 0.0).is_err());
        assert!(gaussian_kernel(4, 0.0).is_err());
    }

    #[test]
    fn blur_preserves_shape() {
        let image = Image::new(5, 4, 3, (0..60).collect()).unwrap();
        let blurred = gaussian_blur(&image, KernelSize::square(13), 0.0, BorderMode::Reflect101)
            .unwrap();

        assert_eq!(blurred.shape(), image.shape());
    }

    #[test]
    fn constant_image_is_fixed_point() {
        let image = Image::filled(4, 4, 1, 200).unwrap();

        for border in [
            BorderMode::Reflect101,
            BorderMode::Reflect,
            BorderMode::Replicate,
            BorderMode::Constant(200),
        ] {
            for size in [3, 7, 13] {
                let blurred = gaussian_blur(&image, KernelSize::square(size), 0.0, border).unwrap();
                assert_eq!(blurred, image, "{border:?} with size {size}");
            }
        }
    }

    #[test]
    fn constant_border_darkens_edges() {
        let image = Image::filled(3, 3, 1, 100).unwrap();
        let blurred =
            gaussian_blur(&image, KernelSize::square(3), 0.0, BorderMode::Constant(0)).unwrap();

        assert_eq!(blurred.get(1, 1, 0), Some(100));
        assert_eq!(blurred.get(0, 0, 0), Some(56));
    }

    #[test]
    fn impulse_spreads_with_kernel_weights() {
        let mut data = vec![0u8; 25];
        data[12] = 255;
        let image = Image::new(5, 5, 1, data).unwrap();

        let blurred =
            gaussian_blur(&image, KernelSize::square(3), 0.0, BorderMode::Reflect101).unwrap();

        // 255 * 0.5 * 0.5
        assert_eq!(blurred.get(2, 2, 0), Some(64));
        // 255 * 0.25 * 0.5
        assert_eq!(blurred.get(2, 1, 0), Some(32));
        assert_eq!(blurred.get(0, 0, 0), Some(0));
    }

    #[test]
    fn derived_sigma_kernel_weights_impulse() {
        let mut data = vec![0u8; 15 * 15];
        data[7 * 15 + 7] = 255;
        let image = Image::new(15, 15, 1, data).unwrap();

        let blurred =
            gaussian_blur(&image, KernelSize::square(13), 0.0, BorderMode::Reflect101).unwrap();

        // Separable response is 255 * k[i] * k[j] with sigma 2.3:
        // k[6] = 0.17422, k[5] = 0.15851, k[1] = 0.01640
        assert_eq!(blurred.get(7, 7, 0), Some(8));
        assert_eq!(blurred.get(7, 6, 0), Some(7));
        assert_eq!(blurred.get(6, 6, 0), Some(6));
        assert_eq!(blurred.get(7, 2, 0), Some(1));
        assert_eq!(blurred.get(2, 2, 0), Some(0));
        assert_eq!(blurred.get(0, 0, 0), Some(0));
    }

    #[test]
    fn derived_sigma_kernel_smooths_step_edge() {
        let data: Vec<u8> = (0..20).map(|x| if x < 10 { 0 } else { 200 }).collect();
        let image = Image::new(1, 20, 1, data).unwrap();
        let size = KernelSize {
            width: 13,
            height: 1,
        };

        let blurred = gaussian_blur(&image, size, 0.0, BorderMode::Reflect101).unwrap();
        let row = blurred.as_raw();

        // Symmetric around the edge: values at 9 and 10 sum to the step height.
        assert_eq!(row[9] as u16 + row[10] as u16, 200);
        assert!(row.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(row[0], 0);
        assert_eq!(row[19], 200);
        assert!(row[9] > 50 && row[9] < 100);
    }

    #[test]
    fn channels_are_filtered_independently() {
        let image = Image::new(1, 3, 2, vec![10, 90, 10, 90, 10, 90]).unwrap();
        let blurred =
            gaussian_blur(&image, KernelSize::square(3), 0.0, BorderMode::Reflect101).unwrap();

        assert_eq!(blurred, image);
    }

    #[test]
    fn rectangular_kernel() {
        let image = Image::new(1, 3, 1, vec![0, 100, 0]).unwrap();
        let size = KernelSize {
            width: 3,
            height: 1,
        };
        let blurred = gaussian_blur(&image, size, 0.0, BorderMode::Reflect101).unwrap();

        // Reflect101 mirrors the centre sample into both borders.
        assert_eq!(blurred.as_raw(), &[50, 50, 50]);
    }
}
