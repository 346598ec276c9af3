//! Request middleware.

pub mod not_found;
