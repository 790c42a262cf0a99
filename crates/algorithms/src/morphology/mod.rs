//! Binary mathematical morphology on change masks
//!
//! Masks are `Raster<u8>` with 0 for background and [`MASK_ON`] for
//! foreground. Neighbours outside the raster never constrain the result:
//! erosion does not eat into regions touching the image edge and dilation
//! does not grow from outside it.
//!
//! - **Erosion**: a pixel stays set only if every element neighbour is set
//! - **Dilation**: a pixel becomes set if any element neighbour is set
//! - **Closing**: dilation then erosion (fills small gaps)
//! - **Opening**: erosion then dilation (removes specks)

mod closing;
mod dilate;
mod element;
mod erode;
mod opening;

pub use closing::{closing, Closing, ClosingParams};
pub use dilate::dilate;
pub use element::StructuringElement;
pub use erode::erode;
pub use opening::{opening, Opening, OpeningParams};

/// Value of a set pixel in a binary mask
pub const MASK_ON: u8 = u8::MAX;
