//! Small helpers shared across the build.

pub mod minify;
