//! Pixel storage and the primitives every tool is built from.

pub(crate) mod blend;
pub(crate) mod blur;
pub(crate) mod codec;
pub(crate) mod coverage;
pub(crate) mod surface;
