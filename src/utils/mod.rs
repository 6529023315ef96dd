//! Shared helpers for normalizing user-supplied patterns.

pub mod validation;
