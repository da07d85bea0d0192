//! The editing session: one surface, one optional checkpoint, and the stroke state machine.

pub(crate) mod edit_session;
