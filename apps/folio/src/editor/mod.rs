// Editing layer: replace-on-write sequence ops, the draft aggregate that
// centralizes the keep-at-least-one floor and duplicate suppression, and
// submit-time validation.

pub mod draft;
pub mod ops;
pub mod tags;
pub mod validate;

pub use draft::{DraftError, ResumeDraft};
pub use validate::FieldError;
