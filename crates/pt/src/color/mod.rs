use std::marker::PhantomData;

use colorspace::Colorspace;

pub mod colorspace;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Zeroable)]
pub struct Color<S>(pub [f32; 3], PhantomData<S>)
where
    S: colorspace::Colorspace;

unsafe impl<S: colorspace::Colorspace> bytemuck::Pod for Color<S> {}

impl<S: Colorspace> std::ops::Add for Color<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_array([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl<S: Colorspace> std::ops::AddAssign for Color<S> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Componentwise product, light of each channel is filtered independently
impl<S: Colorspace> std::ops::Mul for Color<S> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_array([
            self.0[0] * rhs.0[0],
            self.0[1] * rhs.0[1],
            self.0[2] * rhs.0[2],
        ])
    }
}

impl<S: Colorspace> std::ops::MulAssign for Color<S> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<S: Colorspace> std::ops::Mul<Color<S>> for f32 {
    type Output = Color<S>;

    fn mul(self, rhs: Color<S>) -> Self::Output {
        Color::from_array([self * rhs.0[0], self * rhs.0[1], self * rhs.0[2]])
    }
}

impl<S: Colorspace> std::ops::Mul<f32> for Color<S> {
    type Output = Color<S>;

    fn mul(self, rhs: f32) -> Self::Output {
        rhs * self
    }
}

impl<S: Colorspace> std::ops::Div<f32> for Color<S> {
    type Output = Color<S>;

    fn div(self, rhs: f32) -> Self::Output {
        Color::from_array([self.0[0] / rhs, self.0[1] / rhs, self.0[2] / rhs])
    }
}

#[allow(non_camel_case_types)]
pub type sRgb = Color<colorspace::sRGB>;
pub type Rgb = Color<colorspace::Linear_RGB>;

impl<S: Colorspace> Color<S> {
    pub const fn from_array(arr: [f32; 3]) -> Self {
        Self(arr, PhantomData)
    }

    pub const fn splat(v: f32) -> Self {
        Self::from_array([v, v, v])
    }

    pub const fn to_array(self) -> [f32; 3] {
        self.0
    }

    /// Quantize to 8 bits, rounding to nearest. Values are clamped to [0, 1] first.
    pub fn to_byte_array(self) -> [u8; 3] {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255. + 0.5) as u8)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    pub fn is_black(&self) -> bool {
        self.0.iter().all(|&c| c == 0.0)
    }

    pub fn min_element(&self) -> f32 {
        self.0[0].min(self.0[1]).min(self.0[2])
    }
}

impl Rgb {
    /// Apply the sRGB transfer curve, values end up in [0, 1]
    pub fn to_srgb(self) -> sRgb {
        Color::from_array(self.to_array().map(colorspace::sRGB::from_linear_rgb))
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn componentwise_ops() {
        let a = Rgb::from_array([0.5, 1.0, 2.0]);
        let b = Rgb::from_array([2.0, 0.5, 0.0]);
        assert_eq!((a * b).to_array(), [1.0, 0.5, 0.0]);
        assert_eq!((a + b).to_array(), [2.5, 1.5, 2.0]);
        assert_eq!((2.0 * a).to_array(), [1.0, 2.0, 4.0]);
        assert_eq!((a / 2.0).to_array(), [0.25, 0.5, 1.0]);
    }

    #[test]
    fn bytes_are_clamped() {
        let c = Rgb::from_array([-1.0, 0.5, 7.0]);
        assert_eq!(c.to_byte_array(), [0, 128, 255]);
        assert!(Rgb::splat(0.0).is_black());
        assert_eq!(Rgb::splat(4.0).to_srgb().to_array(), [1.0; 3]);
        assert!(!Rgb::from_array([f32::NAN, 0.0, 0.0]).is_finite());
        assert_eq!(Rgb::from_array([0.5, -0.25, 2.0]).min_element(), -0.25);
    }
}
