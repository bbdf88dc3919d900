use log::debug;

use crate::image::Image;

/// Height and width shared by `a` and `b` when aligned at the upper-left corner.
pub fn overlap_shape(a: &Image, b: &Image) -> (usize, usize) {
    (a.height().min(b.height()), a.width().min(b.width()))
}

/// Crop `a` and `b` to their common upper-left region.
///
/// Rows are only removed from the bottom and columns from the right. Both
/// results are independent copies; neither aliases its source.
pub fn overlap(a: &Image, b: &Image) -> (Image, Image) {
    let (height, width) = overlap_shape(a, b);
    debug!(
        "overlap of {:?} and {:?} is {}x{}",
        a.shape(),
        b.shape(),
        height,
        width
    );

    (a.window(height, width), b.window(height, width))
}
