#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, decoding/encoding failures
/// and invalid source images.
pub mod error;

/// Conversions between platform images and masks.
///
/// See [`adapter::extract_intensity_channel`] and [`adapter::encode_as_image`].
pub mod adapter;

/// High-level reading, writing and mask generation functions.
///
/// See [`functional::mask_image_dilated`] for the one-call pipeline.
pub mod functional;

pub use crate::error::IoError;
