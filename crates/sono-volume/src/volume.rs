use crate::params::VolumeParams;

/// A dense 3D voxel volume with 8-bit unsigned intensities.
///
/// Voxels are stored x-fastest: `index = x + y * dim[0] + z * dim[0] * dim[1]`.
/// A voxel value of 0 means "no intensity deposited yet"; deposited values
/// are floor-clamped to 1 so a measured zero is distinguishable from an
/// unvisited voxel.
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    dim: [usize; 3],
    spacing: f64,
    origin: [f64; 3],
    data: Vec<u8>,
}

impl Volume {
    /// Create an empty (all-zero) volume.
    pub fn new(dim: [usize; 3], spacing: f64, origin: [f64; 3]) -> Self {
        Self {
            dim,
            spacing,
            origin,
            data: vec![0; dim[0] * dim[1] * dim[2]],
        }
    }

    /// Create an empty volume sized by the given parameters.
    ///
    /// The origin is volume-local zero; the caller's poses are expected to
    /// map pixel coordinates directly into this volume's space.
    pub fn from_params(params: &VolumeParams) -> Self {
        Self::new(params.dim(), params.spacing(), [0.0, 0.0, 0.0])
    }

    /// The volume dimensions in voxels.
    pub fn dim(&self) -> [usize; 3] {
        self.dim
    }

    /// The isotropic voxel spacing (mm).
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// The world-space origin of voxel (0, 0, 0).
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// The total number of voxels.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Whether a signed voxel index lies within the volume bounds.
    pub fn contains_index(&self, x: i64, y: i64, z: i64) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.dim[0]
            && (y as usize) < self.dim[1]
            && (z as usize) < self.dim[2]
    }

    /// The flat buffer offset of a voxel.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.dim[0] + z * self.dim[0] * self.dim[1]
    }

    /// Get a voxel value, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        if x >= self.dim[0] || y >= self.dim[1] || z >= self.dim[2] {
            return None;
        }
        Some(self.data[self.index(x, y, z)])
    }

    /// Set a voxel value; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) {
        if x < self.dim[0] && y < self.dim[1] && z < self.dim[2] {
            let idx = self.index(x, y, z);
            self.data[idx] = value;
        }
    }

    /// A view of the voxel buffer as a flat slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// A mutable view of the voxel buffer as a flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The number of voxels holding a deposited (nonzero) value.
    pub fn filled_count(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_layout_is_x_fastest() {
        let mut volume = Volume::new([3, 2, 2], 1.0, [0.0; 3]);
        volume.set(1, 0, 0, 10);
        volume.set(0, 1, 0, 20);
        volume.set(0, 0, 1, 30);
        assert_eq!(volume.as_slice()[1], 10);
        assert_eq!(volume.as_slice()[3], 20);
        assert_eq!(volume.as_slice()[6], 30);
    }

    #[test]
    fn volume_bounds() {
        let mut volume = Volume::new([2, 2, 2], 1.0, [0.0; 3]);
        assert!(volume.contains_index(1, 1, 1));
        assert!(!volume.contains_index(-1, 0, 0));
        assert!(!volume.contains_index(0, 2, 0));

        volume.set(5, 5, 5, 99); // ignored
        assert_eq!(volume.filled_count(), 0);
        assert_eq!(volume.get(5, 5, 5), None);
    }

    #[test]
    fn volume_filled_count() {
        let mut volume = Volume::new([2, 2, 1], 1.0, [0.0; 3]);
        volume.set(0, 0, 0, 1);
        volume.set(1, 1, 0, 255);
        assert_eq!(volume.filled_count(), 2);
        assert_eq!(volume.numel(), 4);
    }
}
