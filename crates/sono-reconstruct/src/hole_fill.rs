use rayon::prelude::*;

use sono_volume::Volume;

use crate::cancel::CancelToken;
use crate::error::ReconstructError;

/// Default maximum cubic search radius for hole filling, in voxels.
pub const DEFAULT_INTERPOLATION_STEPS: usize = 3;

/// Upper bound on the configurable search radius.
pub const MAX_INTERPOLATION_STEPS: usize = 10;

/// Resolve unvisited voxels of a binned volume by local averaging.
///
/// Every voxel runs an expanding search: the full cubic neighbourhood of
/// half-width `local_area` is scanned (interior included, not just the
/// growing shell) and all nonzero neighbours are averaged. A nonzero voxel
/// therefore resolves immediately at radius 0 to its own value; only
/// genuine holes search outward, up to `steps` voxels. Holes with no
/// nonzero neighbour within that radius stay 0. Each radius re-scans the
/// whole cube, interior included, so the average at the first resolving
/// radius covers every nonzero neighbour within it.
///
/// The pass reads only the frozen input volume and writes a fresh output,
/// parallelised across z-slabs.
///
/// # Arguments
///
/// * `src` - The binned volume.
/// * `steps` - Maximum search radius in voxels, in `1..=10`.
/// * `token` - Cancellation flag, checked per z-slice.
///
/// # Errors
///
/// Returns [`ReconstructError::InvalidInterpolationSteps`] for a radius
/// outside `1..=10` and [`ReconstructError::Cancelled`] on cancellation.
pub fn fill_holes(
    src: &Volume,
    steps: usize,
    token: &CancelToken,
) -> Result<Volume, ReconstructError> {
    if !(1..=MAX_INTERPOLATION_STEPS).contains(&steps) {
        return Err(ReconstructError::InvalidInterpolationSteps(steps));
    }

    let mut dst = Volume::new(src.dim(), src.spacing(), src.origin());
    if src.numel() == 0 {
        return Ok(dst);
    }

    let dim = src.dim();
    let src_data = src.as_slice();
    let slab = dim[0] * dim[1];

    dst.as_slice_mut()
        .par_chunks_mut(slab)
        .enumerate()
        .try_for_each(|(z, dst_slab)| {
            if token.is_cancelled() {
                return Err(ReconstructError::Cancelled);
            }
            for y in 0..dim[1] {
                for x in 0..dim[0] {
                    dst_slab[x + y * dim[0]] = resolve_voxel(src_data, dim, [x, y, z], steps);
                }
            }
            Ok(())
        })?;

    Ok(dst)
}

/// Run the expanding-cube search for one voxel against the frozen source.
fn resolve_voxel(src: &[u8], dim: [usize; 3], voxel: [usize; 3], steps: usize) -> u8 {
    let [x, y, z] = [voxel[0] as i64, voxel[1] as i64, voxel[2] as i64];
    let mut local_area = 0i64;

    loop {
        let mut sum = 0u32;
        let mut count = 0u32;

        for dz in -local_area..=local_area {
            for dy in -local_area..=local_area {
                for dx in -local_area..=local_area {
                    let (nx, ny, nz) = (x + dx, y + dy, z + dz);
                    if nx < 0
                        || ny < 0
                        || nz < 0
                        || nx >= dim[0] as i64
                        || ny >= dim[1] as i64
                        || nz >= dim[2] as i64
                    {
                        continue;
                    }
                    let value =
                        src[nx as usize + ny as usize * dim[0] + nz as usize * dim[0] * dim[1]];
                    if value > 0 {
                        sum += value as u32;
                        count += 1;
                    }
                }
            }
        }

        if count > 0 {
            let average = (sum as f64 / count as f64).round() as u32;
            return average.clamp(1, 255) as u8;
        }

        local_area += 1;
        if local_area > steps as i64 {
            // still a hole after the maximum radius
            return 0;
        }
    }
}
