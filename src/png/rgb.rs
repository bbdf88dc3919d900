use std::io::BufWriter;

use log::debug;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::error::{Error, Result};
use crate::image::Image;
use crate::png::Encode;

/// Lossless 8-bit RGB encoder; width and height come from each image.
#[derive(Debug)]
pub struct RgbEncoder {
    compression: Compression,
    filter: FilterType,
}

impl RgbEncoder {
    pub fn new() -> RgbEncoder {
        RgbEncoder {
            compression: Compression::Default,
            filter: FilterType::Sub,
        }
    }

    pub fn with_compression(mut self, compression: Compression) -> RgbEncoder {
        self.compression = compression;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> RgbEncoder {
        self.filter = filter;
        self
    }
}

impl Default for RgbEncoder {
    fn default() -> Self {
        RgbEncoder::new()
    }
}

fn dimension(value: usize, name: &str) -> Result<u32> {
    match u32::try_from(value) {
        Ok(0) => Err(Error::Unencodable(format!(
            "PNG cannot store an image with zero {}",
            name
        ))),
        Ok(v) => Ok(v),
        Err(_) => Err(Error::Unencodable(format!(
            "{} {} does not fit in a PNG header",
            name, value
        ))),
    }
}

impl Encode for RgbEncoder {
    fn encode(&self, image: &Image) -> Result<Vec<u8>> {
        let width = dimension(image.width(), "width")?;
        let height = dimension(image.height(), "height")?;

        let mut png_buffer: Vec<u8> = Vec::new();

        // in a block so the BufWriter is flushed before the buffer is returned
        {
            let mut encoder = Encoder::new(BufWriter::new(&mut png_buffer), width, height);

            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_compression(self.compression);
            encoder.set_filter(self.filter);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(image.as_bytes())?;
            writer.finish()?;
        }

        debug!(
            "encoded {}x{} image into {} PNG bytes",
            height,
            width,
            png_buffer.len()
        );

        Ok(png_buffer)
    }
}
