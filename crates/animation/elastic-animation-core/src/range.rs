//! Range mapping helpers: the value a range takes at a given progression point.
//!
//! `point` is deliberately not clamped so callers can overshoot a range with eased
//! progress above 1.0.

use std::ops::{Range, RangeInclusive};

/// Numeric types that can be mapped over a range.
pub trait Interpolate: Copy {
    /// `from + (to - from) * point`.
    fn interpolate(from: Self, to: Self, point: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(from: Self, to: Self, point: f64) -> Self {
        (to - from) * point + from
    }
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(from: Self, to: Self, point: f64) -> Self {
        (to - from) * point as f32 + from
    }
}

// Integers round the scaled distance, then offset from the start.
macro_rules! impl_interpolate_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Interpolate for $t {
                #[inline]
                fn interpolate(from: Self, to: Self, point: f64) -> Self {
                    let distance = to as f64 - from as f64;
                    (from as f64 + (distance * point).round()) as $t
                }
            }
        )*
    };
}

impl_interpolate_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Value between `min` and `max` at `point`; `reversed` runs from `max` to `min`.
#[inline]
pub fn value_between<T: Interpolate>(min: T, max: T, point: f64, reversed: bool) -> T {
    let (from, to) = if reversed { (max, min) } else { (min, max) };
    T::interpolate(from, to, point)
}

/// Range extension mirroring [`value_between`] with the range bounds as min/max.
pub trait AnimatableRange<T> {
    fn value_at(&self, point: f64, reversed: bool) -> T;
}

impl<T: Interpolate> AnimatableRange<T> for RangeInclusive<T> {
    #[inline]
    fn value_at(&self, point: f64, reversed: bool) -> T {
        value_between(*self.start(), *self.end(), point, reversed)
    }
}

impl<T: Interpolate> AnimatableRange<T> for Range<T> {
    #[inline]
    fn value_at(&self, point: f64, reversed: bool) -> T {
        value_between(self.start, self.end, point, reversed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_round_the_distance() {
        assert_eq!((0i32..=10).value_at(0.26, false), 3);
        assert_eq!((0i32..=10).value_at(0.26, true), 7);
        assert_eq!(value_between(10u32, 20u32, 0.5, true), 15);
    }

    #[test]
    fn unsigned_reversed_does_not_underflow() {
        assert_eq!(value_between(0u8, 200u8, 0.25, true), 150);
        assert_eq!(value_between(0usize, 4usize, 1.0, true), 0);
    }
}
