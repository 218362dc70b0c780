#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// single-channel mask buffer module.
pub mod mask;

/// intensity sample types.
pub mod intensity;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::intensity::Intensity;
pub use crate::mask::{ImageSize, MaskBuffer};
