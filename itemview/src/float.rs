//! Float helpers that work with and without `std`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("itemview requires either the `std` or the `libm` feature for float math");

#[cfg(feature = "std")]
mod imp {
    #[inline]
    pub(crate) fn sin(x: f32) -> f32 {
        x.sin()
    }

    #[inline]
    pub(crate) fn cos(x: f32) -> f32 {
        x.cos()
    }

    #[inline]
    pub(crate) fn round(x: f32) -> f32 {
        x.round()
    }

    #[inline]
    pub(crate) fn ceil(x: f32) -> f32 {
        x.ceil()
    }

    #[inline]
    pub(crate) fn floor(x: f32) -> f32 {
        x.floor()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod imp {
    #[inline]
    pub(crate) fn sin(x: f32) -> f32 {
        libm::sinf(x)
    }

    #[inline]
    pub(crate) fn cos(x: f32) -> f32 {
        libm::cosf(x)
    }

    #[inline]
    pub(crate) fn round(x: f32) -> f32 {
        libm::roundf(x)
    }

    #[inline]
    pub(crate) fn ceil(x: f32) -> f32 {
        libm::ceilf(x)
    }

    #[inline]
    pub(crate) fn floor(x: f32) -> f32 {
        libm::floorf(x)
    }
}

pub(crate) use imp::{ceil, cos, floor, round, sin};

#[inline]
pub(crate) fn abs(x: f32) -> f32 {
    if x < 0.0 { -x } else { x }
}

#[inline]
pub(crate) fn to_radians(degrees: f32) -> f32 {
    degrees * (core::f32::consts::PI / 180.0)
}

/// Comparison tolerance used for positions and overshoot amounts.
pub const EPSILON: f32 = f32::EPSILON;
