//! Boundary contracts for the external collaborators: the face detector and the AI edit service.

pub(crate) mod detector;
pub(crate) mod edit;
