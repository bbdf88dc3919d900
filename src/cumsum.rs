use crate::image::Image;

/// Running 8-bit sum of all values of `image` in row-major order.
///
/// Overflow wraps modulo 256. The result has the shape of `image`; the
/// input is left untouched.
pub fn cumulative_sum(image: &Image) -> Image {
    let mut csum = image.clone();
    cumulative_sum_in_place(&mut csum);
    csum
}

/// Replace every value of `image` with the wrapping sum of itself and all
/// values preceding it in row-major order.
pub fn cumulative_sum_in_place(image: &mut Image) {
    let mut acc = 0u8;
    for v in image.as_bytes_mut().iter_mut() {
        acc = acc.wrapping_add(*v);
        *v = acc;
    }
}
