use glam::Vec3;

/// Represent an orthonormal frame
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    frame: glam::Mat3,
}

impl Frame {
    /// Construct a Frame from a single vector using the algorithm described in
    /// “Building an Orthonormal Basis, Revisited (JCGT).” Accessed August 6, 2024. https://jcgt.org/published/0006/01/01/.
    /// n is expected to be normalized and will be used as the +z axis
    pub fn new(n: Vec3) -> Self {
        let sign = f32::signum(n.z);
        let a = -1.0 / (sign + n.z);
        let b = n.x * n.y * a;

        let this = Self {
            frame: glam::Mat3::from_cols(
                Vec3::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
                Vec3::new(b, sign + n.y * n.y * a, -n.y),
                n,
            ),
        };
        debug_assert!(
            (this.frame * this.frame.transpose() - glam::Mat3::IDENTITY)
                .to_cols_array()
                .into_iter()
                .map(f32::abs)
                .fold(0.0, f32::max)
                < 1e-3
                || !n.is_normalized()
        );

        this
    }

    pub fn to_local(&self, global: Vec3) -> Vec3 {
        self.frame.transpose() * global
    }

    pub fn from_local(&self, local: Vec3) -> Vec3 {
        self.frame * local
    }

    /// Tangent
    pub fn x(&self) -> Vec3 {
        self.frame.col(0)
    }
    /// Bitangent
    pub fn y(&self) -> Vec3 {
        self.frame.col(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(f: &Frame) {
        let z = f.from_local(Vec3::Z);
        for (a, b) in [(f.x(), f.y()), (f.y(), z), (f.x(), z)] {
            assert!(a.dot(b).abs() < 1e-5);
        }
        for v in [f.x(), f.y(), z] {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn frame_is_orthonormal() {
        for n in [
            Vec3::Z,
            -Vec3::Z,
            Vec3::X,
            Vec3::new(1.0, 0.0, -1.0).normalize(),
            Vec3::new(0.3, -0.7, 0.2).normalize(),
        ] {
            let f = Frame::new(n);
            assert_orthonormal(&f);
            assert!((f.from_local(Vec3::Z) - n).length() < 1e-6);
        }
    }

    #[test]
    fn local_roundtrip() {
        let f = Frame::new(Vec3::new(0.3, -0.7, 0.2).normalize());
        let v = Vec3::new(0.1, 2.0, -0.5);
        assert!((f.from_local(f.to_local(v)) - v).length() < 1e-5);
        assert!((f.to_local(f.y()) - Vec3::Y).length() < 1e-5);
    }
}
