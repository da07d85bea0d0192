//! Editor configuration loaded from JSON.

pub(crate) mod editor;
