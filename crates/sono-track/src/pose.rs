/// A rigid tracked pose mapping frame-local coordinates into reference space.
///
/// Stored as a 3x3 rotation block and a translation vector, i.e. the upper
/// 3x4 affine block of a rigid 4x4 matrix. The projective bottom row is
/// never carried: tracked poses are rigid by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    rotation: [[f64; 3]; 3],
    translation: [f64; 3],
}

impl Pose {
    /// Create a pose from a rotation matrix and a translation vector.
    pub fn new(rotation: [[f64; 3]; 3], translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity pose.
    pub fn identity() -> Self {
        Self {
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0, 0.0, 0.0],
        }
    }

    /// Create a pose from a row-major 4x4 rigid matrix.
    ///
    /// Only the upper 3x4 rotation+translation block is used; the bottom
    /// row is ignored.
    ///
    /// Example:
    ///
    /// ```
    /// use sono_track::Pose;
    ///
    /// let m = [
    ///     [1.0, 0.0, 0.0, 5.0],
    ///     [0.0, 1.0, 0.0, 6.0],
    ///     [0.0, 0.0, 1.0, 7.0],
    ///     [0.0, 0.0, 0.0, 1.0],
    /// ];
    /// let pose = Pose::from_matrix4(&m);
    /// assert_eq!(pose.translation(), [5.0, 6.0, 7.0]);
    /// ```
    pub fn from_matrix4(m: &[[f64; 4]; 4]) -> Self {
        let mut rotation = [[0.0; 3]; 3];
        for (i, row) in rotation.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                *val = m[i][j];
            }
        }
        Self {
            rotation,
            translation: [m[0][3], m[1][3], m[2][3]],
        }
    }

    /// The rotation block of the pose.
    pub fn rotation(&self) -> &[[f64; 3]; 3] {
        &self.rotation
    }

    /// The translation vector of the pose.
    pub fn translation(&self) -> [f64; 3] {
        self.translation
    }

    /// Transform a point: `R * p + t`.
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        let r = &self.rotation;
        [
            r[0][0] * p[0] + r[0][1] * p[1] + r[0][2] * p[2] + self.translation[0],
            r[1][0] * p[0] + r[1][1] * p[1] + r[1][2] * p[2] + self.translation[1],
            r[2][0] * p[0] + r[2][1] * p[1] + r[2][2] * p[2] + self.translation[2],
        ]
    }

    /// Rotate a direction vector: `R * v` (no translation).
    pub fn rotate_vector(&self, v: [f64; 3]) -> [f64; 3] {
        let r = &self.rotation;
        [
            r[0][0] * v[0] + r[0][1] * v[1] + r[0][2] * v[2],
            r[1][0] * v[0] + r[1][1] * v[1] + r[1][2] * v[2],
            r[2][0] * v[0] + r[2][1] * v[1] + r[2][2] * v[2],
        ]
    }

    /// The pose flattened as a row-major 3x4 affine.
    ///
    /// Layout: `[r00 r01 r02 tx | r10 r11 r12 ty | r20 r21 r22 tz]`.
    pub fn to_affine(&self) -> [f64; 12] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            r[0][0], r[0][1], r[0][2], t[0], //
            r[1][0], r[1][1], r[1][2], t[1], //
            r[2][0], r[2][1], r[2][2], t[2],
        ]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
