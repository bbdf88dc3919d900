pub use self::reader::*;
pub use self::rgb::*;

mod reader;
mod rgb;

use crate::error::Result;
use crate::image::Image;

pub trait Encode {
    fn encode(&self, image: &Image) -> Result<Vec<u8>>;
}
