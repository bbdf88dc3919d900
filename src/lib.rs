//! Utilities for 8-bit, 3-channel images stored as dense row-major arrays of
//! shape (height, width, 3).
//!
//! - [`write_png`]: store an image as `<title>.png` and report its size in bits.
//! - [`overlap`]: crop two images to their shared upper-left region.
//! - [`cumulative_sum`]: wrapping 8-bit running sum over all values.

pub mod cumsum;
pub mod error;
pub mod image;
pub mod overlap;
pub mod png;
pub mod report;
pub mod template;

pub use crate::cumsum::{cumulative_sum, cumulative_sum_in_place};
pub use crate::error::{Error, Result};
pub use crate::image::{Image, CHANNELS};
pub use crate::overlap::{overlap, overlap_shape};
pub use crate::report::{write_png, write_png_to, write_png_with};
pub use crate::template::Template;
