/// Threshold under which a ray related quantity is considered to be zero
pub const RAY_EPSILON: f32 = 0.00005;

/// Largest f32 strictly smaller than one
pub const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;

pub fn is_almost_zero(v: f32) -> bool {
    v.abs() < RAY_EPSILON
}

pub trait FloatAsExt {
    /// Returns `Some(f)` is f is far enough from zero (far is given by eps) else returns None
    /// The result value is guaranted to be far enough from 0
    ///
    /// Returns None for NaN and Some(f) for +/- infty
    fn into_non_zero(self, eps: Self) -> Option<f32>;

    /// Returns `Some(f)` is f is finite else returns None
    /// The result value is guaranted to be finite
    ///
    /// Returns None for NaN and +/- infty
    fn into_finite(self) -> Option<f32>;

    /// Clamp into [-1, 1], the domain of acos and asin. NaN is mapped to 0.
    fn clamp_unit(self) -> f32;
}

impl FloatAsExt for f32 {
    fn into_non_zero(self, eps: Self) -> Option<f32> {
        (self.abs() > eps).then_some(self)
    }

    fn into_finite(self) -> Option<f32> {
        self.is_finite().then_some(self)
    }

    fn clamp_unit(self) -> f32 {
        if self.is_nan() {
            0.0
        } else {
            self.clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_almost_zero, FloatAsExt};

    #[test]
    fn as_non_zero_test() {
        assert_eq!(0.0.into_non_zero(0.1), None);
        assert_eq!(1.0.into_non_zero(0.1), Some(1.0));
        assert_eq!((-0.01).into_non_zero(0.1), None);
        assert_eq!((-1.0).into_non_zero(0.1), Some(-1.0));
        assert_eq!(f32::NAN.into_non_zero(0.1), None);
        assert_eq!(f32::INFINITY.into_non_zero(0.1), Some(f32::INFINITY));
    }

    #[test]
    fn as_finite_test() {
        assert_eq!((-0.01).into_finite(), Some(-0.01));
        assert_eq!(f32::NAN.into_finite(), None);
        assert_eq!(f32::INFINITY.into_finite(), None);
    }

    #[test]
    fn clamp_unit_test() {
        assert_eq!(1.0000001f32.clamp_unit(), 1.0);
        assert_eq!((-2.0f32).clamp_unit(), -1.0);
        assert_eq!(f32::NAN.clamp_unit(), 0.0);
        assert!(is_almost_zero(1e-6));
        assert!(!is_almost_zero(1e-3));
    }
}
