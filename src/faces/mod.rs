//! Face detection records and the per-face privacy effects that consume them.

pub(crate) mod detection;
pub(crate) mod effects;
