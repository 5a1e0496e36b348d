//! View selection and navigation boundaries.

pub mod navigation;
