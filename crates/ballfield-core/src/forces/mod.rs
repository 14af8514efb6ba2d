/// Pointer-driven force fields.
pub mod hand;
