use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgEnum, Parser, Subcommand};
use log::info;
use png::Compression;

use pixelkit::png::{read_png, Encode, RgbEncoder};
use pixelkit::{cumulative_sum_in_place, overlap, write_png_with, Image, Template};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store an image as <title>.png and print its size in bits
    Png {
        #[clap(parse(try_from_str=file_exists))]
        input: PathBuf,

        /// Output title; the file is written to <title>.png
        #[clap(short = 't', long)]
        title: String,

        /// Report template with slots for the title and the size in bits
        #[clap(short = 'f', long, default_value = "{}: {} bits", parse(try_from_str=parse_template))]
        format: Template,

        /// PNG compression level
        #[clap(short = 'c', long, arg_enum, default_value = "default")]
        compression: CompressionLevel,
    },

    /// Crop two images to their shared upper-left region
    Overlap {
        #[clap(parse(try_from_str=file_exists))]
        a: PathBuf,
        #[clap(parse(try_from_str=file_exists))]
        b: PathBuf,
        out_a: PathBuf,
        out_b: PathBuf,
    },

    /// Replace every value with the 8-bit running sum in row-major order
    Cumsum {
        #[clap(parse(try_from_str=file_exists))]
        input: PathBuf,
        output: PathBuf,
    },
}

#[derive(ArgEnum, Clone, Copy, Debug)]
enum CompressionLevel {
    Fast,
    Default,
    Best,
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Compression {
        match level {
            CompressionLevel::Fast => Compression::Fast,
            CompressionLevel::Default => Compression::Default,
            CompressionLevel::Best => Compression::Best,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Cli::parse();

    match args.command {
        Command::Png {
            input,
            title,
            format,
            compression,
        } => {
            let image = load(&input)?;
            let encoder = RgbEncoder::new().with_compression(compression.into());

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_png_with(&encoder, &image, &title, &format, &mut out)
                .with_context(|| format!("failed to write {}.png", title))?;
        }
        Command::Overlap { a, b, out_a, out_b } => {
            let a = load(&a)?;
            let b = load(&b)?;

            let (a, b) = overlap(&a, &b);
            info!("overlap region: {}x{}", a.height(), a.width());

            save(&a, &out_a)?;
            save(&b, &out_b)?;
        }
        Command::Cumsum { input, output } => {
            let mut image = load(&input)?;
            cumulative_sum_in_place(&mut image);
            save(&image, &output)?;
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<Image> {
    read_png(path).with_context(|| format!("failed to read {:?}", path))
}

fn save(image: &Image, path: &Path) -> Result<()> {
    let png_data = RgbEncoder::new()
        .encode(image)
        .with_context(|| format!("failed to encode {:?}", path))?;
    std::fs::write(path, png_data).with_context(|| format!("failed to write {:?}", path))?;
    info!("wrote {:?}", path);

    Ok(())
}

fn file_exists(s: &str) -> Result<PathBuf, String> {
    let mut path = PathBuf::new();
    path.push(s);

    if !path.exists() {
        return Err(String::from("path does not exist"));
    }
    Ok(path)
}

fn parse_template(s: &str) -> Result<Template, String> {
    Template::parse(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("{}: {} bits", true)]
    #[case("{0} {1}", true)]
    #[case("{} {} {}", false)]
    fn test_parse_template(#[case] s: &str, #[case] ok: bool) {
        assert_eq!(parse_template(s).is_ok(), ok);
    }

    #[test]
    fn test_file_exists() {
        assert!(file_exists("/definitely/not/a/real/path.png").is_err());
        assert!(file_exists(std::env::temp_dir().to_str().unwrap()).is_ok());
    }
}
