use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use png::{BitDepth, ColorType, Decoder, Transformations};

use crate::error::{Error, Result};
use crate::image::Image;

/// Decode an 8-bit RGB PNG stream into an [`Image`].
///
/// Other color types and bit depths are rejected rather than converted.
pub fn decode<R: Read>(reader: R) -> Result<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buffer = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer)?;

    if info.color_type != ColorType::Rgb || info.bit_depth != BitDepth::Eight {
        return Err(Error::Unsupported(format!(
            "expected 8-bit RGB PNG, got {:?} at {:?}",
            info.color_type, info.bit_depth
        )));
    }

    buffer.truncate(info.buffer_size());

    Image::new(info.height as usize, info.width as usize, buffer)
}

pub fn read_png(path: &Path) -> Result<Image> {
    let file = File::open(path)?;
    let image = decode(BufReader::new(file))?;
    debug!("read {:?} with shape {:?}", path, image.shape());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::png::{Encode, RgbEncoder};
    use std::io::{BufWriter, Cursor};

    #[test]
    fn test_decode_encoded() {
        let image = Image::from_fn(3, 2, |r, c, ch| (r * 31 + c * 17 + ch * 5) as u8);
        let encoded = RgbEncoder::new().encode(&image).unwrap();

        let decoded = decode(Cursor::new(encoded)).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_rejects_grayscale() {
        let mut png_buffer: Vec<u8> = Vec::new();
        {
            let mut encoder = png::Encoder::new(BufWriter::new(&mut png_buffer), 2, 2);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0u8, 1, 2, 3]).unwrap();
            writer.finish().unwrap();
        }

        assert!(matches!(
            decode(Cursor::new(png_buffer)),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode(Cursor::new(vec![1u8, 2, 3, 4])),
            Err(Error::Decoding(_))
        ));
    }
}
