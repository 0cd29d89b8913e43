use crate::bbox::BoundingBox3;
use crate::error::VolumeError;

/// Default maximum number of voxels in the output volume.
pub const DEFAULT_MAX_VOLUME_SIZE: f64 = (32 * 1024 * 1024) as f64;

/// Output-volume sizing calculator.
///
/// Derives an isotropic voxel grid (spacing + dimension) for the output
/// volume from the acquired data's physical extent, subject to a maximum
/// total voxel budget. The invariant `dim[i] == ceil(range[i] / spacing)`
/// holds after every setter call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeParams {
    extent: BoundingBox3,
    input_spacing: f64,
    input_dim: [usize; 3],
    spacing: f64,
    dim: [usize; 3],
    max_volume_size: f64,
}

impl VolumeParams {
    /// Create sizing parameters from acquisition metadata.
    ///
    /// The spacing starts at the native input spacing and is then
    /// constrained to [`DEFAULT_MAX_VOLUME_SIZE`] voxels.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::DegenerateExtent`] if any extent range is
    /// zero or negative, and [`VolumeError::InvalidSpacing`] for a
    /// non-positive input spacing. The setters below perform no such
    /// validation; they operate on an already-valid object.
    pub fn new(
        extent: BoundingBox3,
        input_spacing: f64,
        input_dim: [usize; 3],
    ) -> Result<Self, VolumeError> {
        let range = extent.range();
        if range.iter().any(|&r| r <= 0.0) {
            return Err(VolumeError::DegenerateExtent(range[0], range[1], range[2]));
        }
        if input_spacing <= 0.0 {
            return Err(VolumeError::InvalidSpacing(input_spacing));
        }

        let mut params = Self {
            extent,
            input_spacing,
            input_dim,
            spacing: input_spacing,
            dim: [0; 3],
            max_volume_size: DEFAULT_MAX_VOLUME_SIZE,
        };
        params.set_spacing(input_spacing);
        params.constrain_volume_size(DEFAULT_MAX_VOLUME_SIZE);
        Ok(params)
    }

    /// Set the isotropic voxel spacing and recompute the dimensions.
    ///
    /// The spacing is applied unconditionally; passing a non-positive
    /// value is the caller's responsibility.
    pub fn set_spacing(&mut self, spacing: f64) {
        let range = self.extent.range();
        self.spacing = spacing;
        for i in 0..3 {
            self.dim[i] = (range[i] / spacing).ceil() as usize;
        }
    }

    /// Set the dimension along one axis by back-solving the spacing.
    ///
    /// Spacing is isotropic, so this recomputes all three dimensions,
    /// not only the named axis.
    pub fn set_dim(&mut self, axis: usize, dim: usize) {
        let spacing = self.extent.range()[axis] / dim as f64;
        self.set_spacing(spacing);
    }

    /// Constrain the total voxel count to `max_size` by increasing spacing.
    ///
    /// The spacing is first reset to the native input spacing, undoing any
    /// previous constraint; it is then increased (never decreased below the
    /// native baseline) with a closed-form cube-root solve assuming
    /// isotropic spacing.
    pub fn constrain_volume_size(&mut self, max_size: f64) {
        self.max_volume_size = max_size;
        self.set_spacing(self.input_spacing);

        if self.volume_size() as f64 > max_size {
            let range = self.extent.range();
            let spacing = (range[0] * range[1] * range[2] / max_size).cbrt();
            self.set_spacing(spacing);
        }
    }

    /// The total number of output voxels: `dim[0] * dim[1] * dim[2]`.
    pub fn volume_size(&self) -> u64 {
        self.dim.iter().map(|&d| d as u64).product()
    }

    /// The current isotropic voxel spacing (mm).
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// The current output dimensions in voxels.
    pub fn dim(&self) -> [usize; 3] {
        self.dim
    }

    /// The current maximum voxel budget.
    pub fn max_volume_size(&self) -> f64 {
        self.max_volume_size
    }

    /// The acquisition bounding box (mm, world space).
    pub fn extent(&self) -> BoundingBox3 {
        self.extent
    }

    /// The native input spacing (mm).
    pub fn input_spacing(&self) -> f64 {
        self.input_spacing
    }

    /// The native input voxel count.
    pub fn input_dim(&self) -> [usize; 3] {
        self.input_dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn box_mm(x: f64, y: f64, z: f64) -> BoundingBox3 {
        BoundingBox3::new([0.0, 0.0, 0.0], [x, y, z])
    }

    fn assert_dim_invariant(params: &VolumeParams) {
        let range = params.extent().range();
        for i in 0..3 {
            assert_eq!(
                params.dim()[i],
                (range[i] / params.spacing()).ceil() as usize
            );
        }
    }

    #[test]
    fn params_small_volume_keeps_input_spacing() -> Result<(), VolumeError> {
        let params = VolumeParams::new(box_mm(10.0, 10.0, 10.0), 0.5, [20, 20, 20])?;
        assert_relative_eq!(params.spacing(), 0.5);
        assert_eq!(params.dim(), [20, 20, 20]);
        assert_dim_invariant(&params);
        Ok(())
    }

    #[test]
    fn params_constrained_by_budget() -> Result<(), VolumeError> {
        // 100x100x50 mm at 0.5 mm native spacing against a 1e6 voxel budget
        let mut params = VolumeParams::new(box_mm(100.0, 100.0, 50.0), 0.5, [200, 200, 100])?;
        params.constrain_volume_size(1_000_000.0);

        assert!(params.spacing() > 0.5);
        // the ceil on each axis may push the product slightly over the
        // exact cube-root solve, so allow a 2% rounding margin
        assert!(params.volume_size() as f64 <= 1_000_000.0 * 1.02);
        assert_dim_invariant(&params);
        Ok(())
    }

    #[test]
    fn params_set_spacing_recomputes_dim() -> Result<(), VolumeError> {
        let mut params = VolumeParams::new(box_mm(10.0, 20.0, 30.0), 1.0, [10, 20, 30])?;
        params.set_spacing(2.0);
        assert_eq!(params.dim(), [5, 10, 15]);
        assert_dim_invariant(&params);
        Ok(())
    }

    #[test]
    fn params_set_dim_changes_all_axes() -> Result<(), VolumeError> {
        let mut params = VolumeParams::new(box_mm(10.0, 20.0, 30.0), 1.0, [10, 20, 30])?;
        params.set_dim(0, 5);
        assert_relative_eq!(params.spacing(), 2.0);
        assert_eq!(params.dim(), [5, 10, 15]);
        assert_dim_invariant(&params);
        Ok(())
    }

    #[test]
    fn params_constrain_is_undone_before_reapplying() -> Result<(), VolumeError> {
        let mut params = VolumeParams::new(box_mm(100.0, 100.0, 50.0), 0.5, [200, 200, 100])?;
        params.constrain_volume_size(1_000_000.0);
        let constrained = params.spacing();

        // a larger budget resets to the native spacing
        params.constrain_volume_size(1e9);
        assert_relative_eq!(params.spacing(), 0.5);
        assert!(constrained > params.spacing());
        assert_dim_invariant(&params);
        Ok(())
    }

    #[test]
    fn params_degenerate_extent_rejected() {
        let extent = BoundingBox3::new([0.0, 0.0, 0.0], [10.0, 0.0, 10.0]);
        let res = VolumeParams::new(extent, 1.0, [10, 1, 10]);
        assert_eq!(res.err(), Some(VolumeError::DegenerateExtent(10.0, 0.0, 10.0)));
    }

    #[test]
    fn params_invalid_spacing_rejected() {
        let res = VolumeParams::new(box_mm(10.0, 10.0, 10.0), 0.0, [1, 1, 1]);
        assert_eq!(res.err(), Some(VolumeError::InvalidSpacing(0.0)));
    }
}
