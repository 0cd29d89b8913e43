use num_traits::NumCast;

use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use sono_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for pixel intensity types.
///
/// Send and Sync is required for parallel pixel iteration.
pub trait PixelType: Copy + Default + Send + Sync + NumCast {}

impl<T> PixelType for T where T: Copy + Default + Send + Sync + NumCast {}

/// Represents a single acquired image with pixel data.
///
/// The image is stored as an owned contiguous buffer with row-major
/// (H, W, C) layout, where H is the height of the image.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS>
where
    T: PixelType,
{
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use sono_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 1>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height * CHANNELS {
            return Err(ImageError::InvalidDataLength(
                data.len(),
                size.width * size.height * CHANNELS,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and a constant pixel value.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError> {
        let data = vec![val; size.width * size.height * CHANNELS];
        Image::new(size, data)
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of rows (height) of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The number of columns (width) of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The number of elements in the image buffer.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// The number of channels of the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel value at the given row, column and channel.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get(&self, row: usize, col: usize, ch: usize) -> Option<&T> {
        if row >= self.size.height || col >= self.size.width || ch >= CHANNELS {
            return None;
        }
        self.data
            .get((row * self.size.width + col) * CHANNELS + ch)
    }

    /// Get the pixel value at the given row, column and channel without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `row < height`, `col < width` and `ch < CHANNELS`.
    pub unsafe fn get_unchecked(&self, row: usize, col: usize, ch: usize) -> &T {
        self.data
            .get_unchecked((row * self.size.width + col) * CHANNELS + ch)
    }

    /// A view of the image buffer as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// A mutable view of the image buffer as a flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Cast the pixel value at the given row and column of channel 0 to f64.
    ///
    /// Returns 0.0 if the coordinates are out of bounds or the cast fails.
    pub fn get_f64(&self, row: usize, col: usize) -> f64 {
        self.get(row, col, 0)
            .and_then(|v| num_traits::cast::<T, f64>(*v))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_new_and_access() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0, 1, 2, 3, 4, 5],
        )?;

        assert_eq!(image.rows(), 2);
        assert_eq!(image.cols(), 3);
        assert_eq!(image.numel(), 6);
        assert_eq!(image.get(1, 2, 0), Some(&5));
        assert_eq!(image.get(2, 0, 0), None);

        Ok(())
    }

    #[test]
    fn image_invalid_data_length() {
        let res = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            vec![0u8; 5],
        );
        assert_eq!(res.err(), Some(ImageError::InvalidDataLength(5, 6)));
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            7u8,
        )?;
        assert!(image.as_slice().iter().all(|&v| v == 7));
        Ok(())
    }

    #[test]
    fn image_get_f64() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![10, 20],
        )?;
        assert_eq!(image.get_f64(0, 1), 20.0);
        assert_eq!(image.get_f64(5, 5), 0.0);
        Ok(())
    }
}
