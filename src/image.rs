use std::ops::Index;

use itertools::iproduct;

use crate::error::{Error, Result};

/// Number of 8-bit channels per pixel (RGB or HSV, the functions do not care).
pub const CHANNELS: usize = 3;

/// Dense row-major 8-bit image of shape (height, width, 3).
///
/// Value at (row, col, channel) lives at `row * width * 3 + col * 3 + channel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    height: usize,
    width: usize,
    data: Vec<u8>,
}

impl Image {
    pub fn new(height: usize, width: usize, data: Vec<u8>) -> Result<Image> {
        let expected = value_count(height, width)?;

        if data.len() != expected {
            return Err(Error::shape(
                &[height, width, CHANNELS],
                format!("expected {} values, got {}", expected, data.len()),
            ));
        }

        Ok(Image {
            height,
            width,
            data,
        })
    }

    /// Build an image from an arbitrary-rank shape, rejecting anything that
    /// is not (height, width, 3).
    pub fn from_shape(shape: &[usize], data: Vec<u8>) -> Result<Image> {
        match *shape {
            [height, width, CHANNELS] => Image::new(height, width, data),
            [_, _, channels] => Err(Error::shape(
                shape,
                format!("expected {} channels, got {}", CHANNELS, channels),
            )),
            _ => Err(Error::shape(
                shape,
                format!("expected rank 3, got rank {}", shape.len()),
            )),
        }
    }

    /// # Panics
    ///
    /// Panics if `height * width * 3` overflows `usize`.
    pub fn zeros(height: usize, width: usize) -> Image {
        Image {
            height,
            width,
            data: vec![0u8; value_count_or_panic(height, width)],
        }
    }

    /// # Panics
    ///
    /// Panics if `height * width * 3` overflows `usize`.
    pub fn from_fn<F>(height: usize, width: usize, mut f: F) -> Image
    where
        F: FnMut(usize, usize, usize) -> u8,
    {
        value_count_or_panic(height, width);

        let data = iproduct!(0..height, 0..width, 0..CHANNELS)
            .map(|(row, col, channel)| f(row, col, channel))
            .collect();

        Image {
            height,
            width,
            data,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, CHANNELS)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn offset(&self, row: usize, col: usize, channel: usize) -> usize {
        row * self.width * CHANNELS + col * CHANNELS + channel
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row < self.height && col < self.width && channel < CHANNELS {
            Some(self.data[self.offset(row, col, channel)])
        } else {
            None
        }
    }

    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; CHANNELS]> {
        if row < self.height && col < self.width {
            let start = self.offset(row, col, 0);
            let mut px = [0u8; CHANNELS];
            px.copy_from_slice(&self.data[start..start + CHANNELS]);
            Some(px)
        } else {
            None
        }
    }

    /// Copy out the top-left `height` x `width` window.
    pub fn crop(&self, height: usize, width: usize) -> Result<Image> {
        if height > self.height || width > self.width {
            return Err(Error::shape(
                &[height, width, CHANNELS],
                format!(
                    "crop window exceeds image of {}x{}",
                    self.height, self.width
                ),
            ));
        }

        Ok(self.window(height, width))
    }

    /// Top-left window, clamped to the image bounds.
    pub(crate) fn window(&self, height: usize, width: usize) -> Image {
        let height = height.min(self.height);
        let width = width.min(self.width);

        if height == 0 || width == 0 {
            return Image {
                height,
                width,
                data: Vec::new(),
            };
        }

        let row_len = width * CHANNELS;
        let mut data = Vec::with_capacity(height * row_len);
        for row in 0..height {
            let start = self.offset(row, 0, 0);
            data.extend_from_slice(&self.data[start..start + row_len]);
        }

        Image {
            height,
            width,
            data,
        }
    }
}

fn value_count(height: usize, width: usize) -> Result<usize> {
    height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::shape(&[height, width, CHANNELS], "size overflows usize"))
}

fn value_count_or_panic(height: usize, width: usize) -> usize {
    match value_count(height, width) {
        Ok(n) => n,
        Err(err) => panic!("{}", err),
    }
}

impl Index<(usize, usize, usize)> for Image {
    type Output = u8;

    fn index(&self, (row, col, channel): (usize, usize, usize)) -> &u8 {
        assert!(
            row < self.height && col < self.width && channel < CHANNELS,
            "index ({}, {}, {}) out of bounds for shape {:?}",
            row,
            col,
            channel,
            self.shape()
        );
        &self.data[self.offset(row, col, channel)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_row_major_layout() {
        let image = Image::from_fn(2, 3, |r, c, ch| (r * 100 + c * 10 + ch) as u8);

        for (row, col, channel) in iproduct!(0..2, 0..3, 0..CHANNELS) {
            let flat = row * 3 * CHANNELS + col * CHANNELS + channel;
            assert_eq!(image.as_bytes()[flat], image[(row, col, channel)]);
            assert_eq!(
                image[(row, col, channel)],
                (row * 100 + col * 10 + channel) as u8
            );
        }
    }

    #[rstest]
    #[case(2, 2, 12)]
    #[case(0, 5, 0)]
    #[case(5, 0, 0)]
    #[case(1, 1, 3)]
    fn test_new(#[case] height: usize, #[case] width: usize, #[case] len: usize) {
        let image = Image::new(height, width, vec![7u8; len]).expect("valid shape");
        assert_eq!(image.shape(), (height, width, CHANNELS));
    }

    #[rstest]
    #[case(2, 2, 11)]
    #[case(1, 1, 4)]
    #[case(0, 1, 3)]
    fn test_new_length_mismatch(#[case] height: usize, #[case] width: usize, #[case] len: usize) {
        assert!(matches!(
            Image::new(height, width, vec![0u8; len]),
            Err(Error::Shape { .. })
        ));
    }

    #[rstest]
    #[case(vec![2, 2, 4], 16)]
    #[case(vec![2, 2, 1], 4)]
    #[case(vec![2, 6], 12)]
    #[case(vec![1, 2, 2, 3], 12)]
    #[case(vec![], 0)]
    fn test_from_shape_rejects(#[case] shape: Vec<usize>, #[case] len: usize) {
        assert!(matches!(
            Image::from_shape(&shape, vec![0u8; len]),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn test_from_shape() {
        let image = Image::from_shape(&[1, 2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(image.pixel(0, 1), Some([4, 5, 6]));
        assert_eq!(image.pixel(1, 0), None);
        assert_eq!(image.get(0, 0, 3), None);
    }

    #[test]
    fn test_crop() {
        let image = Image::from_fn(3, 4, |r, c, ch| (r * 16 + c * 4 + ch) as u8);
        let cropped = image.crop(2, 3).unwrap();

        assert_eq!(cropped.shape(), (2, 3, CHANNELS));
        for (row, col, channel) in iproduct!(0..2, 0..3, 0..CHANNELS) {
            assert_eq!(cropped[(row, col, channel)], image[(row, col, channel)]);
        }
    }

    #[rstest]
    #[case(4, 1)]
    #[case(1, 5)]
    fn test_crop_too_large(#[case] height: usize, #[case] width: usize) {
        let image = Image::zeros(3, 4);
        assert!(image.crop(height, width).is_err());
    }

    #[rstest]
    #[case(0, usize::MAX)]
    #[case(usize::MAX, 0)]
    #[case(0, 0)]
    fn test_zeros_empty(#[case] height: usize, #[case] width: usize) {
        let image = Image::zeros(height, width);
        assert!(image.is_empty());
        assert_eq!(image.shape(), (height, width, CHANNELS));
    }

    #[test]
    #[should_panic(expected = "size overflows usize")]
    fn test_zeros_overflow() {
        Image::zeros(usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "size overflows usize")]
    fn test_from_fn_overflow() {
        Image::from_fn(usize::MAX / 2, 2, |_, _, _| 0);
    }

    #[test]
    fn test_new_overflow() {
        assert!(matches!(
            Image::new(usize::MAX, 2, Vec::new()),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn test_crop_empty() {
        let image = Image::zeros(3, 4);
        let cropped = image.crop(0, 4).unwrap();
        assert!(cropped.is_empty());
        assert_eq!(cropped.shape(), (0, 4, CHANNELS));
    }
}
