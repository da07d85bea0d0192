//! Pure geometry helpers shared by tools and face effects.

pub(crate) mod face;
pub(crate) mod interpolate;
pub(crate) mod mapping;
