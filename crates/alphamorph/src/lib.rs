#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use alphamorph_image as image;

#[doc(inline)]
pub use alphamorph_imgproc as imgproc;

#[doc(inline)]
pub use alphamorph_io as io;
