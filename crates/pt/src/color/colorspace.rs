/// The colorspaces
///
/// A colour is stored as three numbers, the colorspace says what they mean.
/// The integrator only ever does maths in linear RGB, sRGB is what gets
/// written to disk.

pub trait Colorspace: Copy + Clone + Send + Sync + bytemuck::Zeroable + bytemuck::Pod {}

/// Linear sRGB: same primaries as sRGB but without the transfer curve.
///
/// The way to go for math manipulations: light adds up linearly in it.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Zeroable, bytemuck::Pod)]
#[allow(non_camel_case_types)]
pub struct Linear_RGB;
impl Colorspace for Linear_RGB {}

/// sRGB same as Linear sRGB but transformed with a non linear transform such that low brightness values (which differences are perceptually easier to distinguish)
/// have more space to work with (mainly when using integers for colors)
///
/// YOU CAN'T DO MATH ON sRGB USE LINEAR sRGB
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Zeroable, bytemuck::Pod)]
#[allow(non_camel_case_types)]
pub struct sRGB;
impl Colorspace for sRGB {}

impl sRGB {
    pub fn from_linear_rgb(linear: f32) -> f32 {
        // NaN maps to black
        if linear.is_nan() {
            return 0.0;
        }
        // the curve lands a few ulps short of 1
        if linear >= 1.0 {
            return 1.0;
        }
        let linear = linear.max(0.0);
        if linear < 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    }
}
