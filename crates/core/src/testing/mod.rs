//! Test doubles for the converter seam.
//!
//! Exposed as a regular module so integration tests and downstream
//! presentation layers can exercise the batch runner without ffmpeg.

mod mock_converter;

pub use mock_converter::MockConverter;
