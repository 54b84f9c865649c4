pub mod format;
pub mod validators;
