use crate::error::ImageError;
use crate::image::{Image, ImageSize};

/// A beam sector validity mask shared by all frames of an acquisition.
///
/// A nonzero mask pixel marks the corresponding frame pixel as valid
/// ultrasound beam data; zero marks blank border. The mask is read-only
/// during reconstruction.
#[derive(Clone, Debug)]
pub struct FrameMask {
    image: Image<u8, 1>,
}

impl FrameMask {
    /// Create a mask from a single-channel image.
    pub fn from_image(image: Image<u8, 1>) -> Self {
        Self { image }
    }

    /// Create a mask marking every pixel as valid.
    pub fn full(size: ImageSize) -> Result<Self, ImageError> {
        Ok(Self {
            image: Image::from_size_val(size, 255)?,
        })
    }

    /// The size of the mask in pixels.
    pub fn size(&self) -> ImageSize {
        self.image.size()
    }

    /// Whether the pixel at the given column and row is valid beam data.
    ///
    /// Out-of-bounds coordinates are reported as invalid.
    pub fn is_valid(&self, col: usize, row: usize) -> bool {
        matches!(self.image.get(row, col, 0), Some(&v) if v > 0)
    }

    /// The fraction of mask pixels marked valid, in [0, 1].
    pub fn valid_fraction(&self) -> f64 {
        if self.image.numel() == 0 {
            return 0.0;
        }
        let valid = self.image.as_slice().iter().filter(|&&v| v > 0).count();
        valid as f64 / self.image.numel() as f64
    }

    /// The leftmost and rightmost columns containing any valid pixel.
    ///
    /// Returns `None` for an all-invalid mask.
    pub fn valid_column_bounds(&self) -> Option<(usize, usize)> {
        let mut bounds: Option<(usize, usize)> = None;
        for col in 0..self.image.cols() {
            let any_valid = (0..self.image.rows()).any(|row| self.is_valid(col, row));
            if any_valid {
                bounds = match bounds {
                    None => Some((col, col)),
                    Some((lo, _)) => Some((lo, col)),
                };
            }
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_full_is_all_valid() -> Result<(), ImageError> {
        let mask = FrameMask::full(ImageSize {
            width: 3,
            height: 2,
        })?;
        assert!(mask.is_valid(0, 0));
        assert!(mask.is_valid(2, 1));
        assert!(!mask.is_valid(3, 0));
        assert_eq!(mask.valid_fraction(), 1.0);
        Ok(())
    }

    #[test]
    fn mask_column_bounds() -> Result<(), ImageError> {
        // valid pixels only in columns 1 and 3
        let data = vec![
            0, 255, 0, 9, 0, //
            0, 0, 0, 0, 0,
        ];
        let mask = FrameMask::from_image(Image::new(
            ImageSize {
                width: 5,
                height: 2,
            },
            data,
        )?);
        assert_eq!(mask.valid_column_bounds(), Some((1, 3)));
        assert!((mask.valid_fraction() - 0.2).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn mask_empty_column_bounds() -> Result<(), ImageError> {
        let mask = FrameMask::from_image(Image::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?);
        assert_eq!(mask.valid_column_bounds(), None);
        Ok(())
    }
}
