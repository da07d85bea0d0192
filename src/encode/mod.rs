//! Everything that leaves the editing core: committed artifacts, filter bakes, and exports.

pub(crate) mod export;
pub(crate) mod filters;
pub(crate) mod sink;
