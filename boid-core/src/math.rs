//! Float helpers that route to `std` when available and to `libm` otherwise.

/// `sqrt(x*x + y*y)` without intermediate overflow.
#[inline]
pub(crate) fn hypot(x: f32, y: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.hypot(y)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::hypotf(x, y)
    }
}

#[inline]
pub(crate) fn acos(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.acos()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::acosf(x)
    }
}

#[inline]
pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

#[inline]
pub(crate) fn abs(x: f32) -> f32 {
    libm::fabsf(x)
}

/// Truncated remainder, same sign as `x` (C `fmod`).
#[inline]
pub(crate) fn fmod(x: f32, y: f32) -> f32 {
    libm::fmodf(x, y)
}

#[inline]
pub(crate) fn floor(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.floor()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::floorf(x)
    }
}

#[inline]
pub(crate) fn ceil(x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        x.ceil()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::ceilf(x)
    }
}
