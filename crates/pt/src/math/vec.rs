pub use glam::Vec3;

use crate::color::Rgb;

pub trait Vec3AsRgbExt {
    fn rgb(&self) -> Rgb;
}

impl Vec3AsRgbExt for Vec3 {
    fn rgb(&self) -> Rgb {
        Rgb::from_array(self.to_array())
    }
}

pub trait Vec3SameDirExt {
    fn same_direction(self, other: Self) -> Self;
}

impl Vec3SameDirExt for Vec3 {
    /// Return self if self and other are pointing in the same general direction (self.dot(other) >= 0.0) else, returns -self
    fn same_direction(self, other: Self) -> Self {
        if self.dot(other) >= 0.0 {
            self
        } else {
            -self
        }
    }
}

pub trait Vec3AsNonZero: Sized {
    /// None when every component is within `eps` of zero, or when one is NaN
    ///
    /// The length is not looked at: a short but well defined direction is kept.
    fn into_non_zero(self, eps: f32) -> Option<Self>;
}

impl Vec3AsNonZero for Vec3 {
    fn into_non_zero(self, eps: f32) -> Option<Self> {
        use super::float::FloatAsExt;
        if self.is_nan() {
            return None;
        }
        self.to_array()
            .into_iter()
            .any(|c| c.into_non_zero(eps).is_some())
            .then_some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_direction_flips() {
        let n = Vec3::Z;
        assert_eq!(n.same_direction(Vec3::new(0.3, 0.0, 1.0)), n);
        assert_eq!(n.same_direction(Vec3::new(0.3, 0.0, -1.0)), -n);
    }

    #[test]
    fn zero_is_decided_per_component() {
        let eps = crate::math::float::RAY_EPSILON;
        assert!(Vec3::ZERO.into_non_zero(eps).is_none());
        assert!(Vec3::splat(4e-5).into_non_zero(eps).is_none());
        // longer than eps overall, but no component reaches it
        assert!(Vec3::new(4e-5, -4e-5, 4e-5).into_non_zero(eps).is_none());
        let short = Vec3::new(0.0, 1e-4, 0.0);
        assert_eq!(short.into_non_zero(eps), Some(short));
        assert!(Vec3::new(f32::NAN, 1.0, 0.0).into_non_zero(eps).is_none());
    }
}
