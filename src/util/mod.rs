//! Small shared building blocks for forms and lists.

pub mod busy;
pub mod field;
pub mod lifecycle;
pub mod validate;
