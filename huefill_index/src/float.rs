// Copyright 2025 the Huefill Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `f32` functions that `core` lacks, backed by `libm` in `no_std` builds.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("huefill_index requires either the `std` or `libm` feature");

/// Square root and power for `f32` without `std`.
///
/// With `std` enabled the inherent methods take precedence and this trait is not imported.
#[cfg(not(feature = "std"))]
pub(crate) trait FloatFuncs: Sized {
    fn sqrt(self) -> Self;
    fn powf(self, n: Self) -> Self;
}

#[cfg(not(feature = "std"))]
impl FloatFuncs for f32 {
    #[inline]
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }

    #[inline]
    fn powf(self, n: Self) -> Self {
        libm::powf(self, n)
    }
}
