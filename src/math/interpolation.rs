//! Easing and interpolation primitives shared by the noise generators

use num_traits::Float;

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`
///
/// Has zero first and second derivatives at 0 and 1, which hides the
/// lattice structure of gradient noise.
#[inline]
pub fn fade<T: Float>(t: T) -> T {
    let three = T::one() + T::one() + T::one();
    let five = three + T::one() + T::one();
    let six = three + three;
    let ten = five + five;
    let fifteen = ten + five;
    t * t * t * (t * (t * six - fifteen) + ten)
}

/// Cubic smoothstep `3t^2 - 2t^3`
#[inline]
pub fn smoothstep<T: Float>(t: T) -> T {
    let two = T::one() + T::one();
    let three = two + T::one();
    t * t * (three - two * t)
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + t * (b - a)
}

/// Round to the nearest integer and clamp into the 8-bit channel range
#[inline]
pub fn to_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
