use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

use crate::error::{Error, Result};
use crate::image::Image;
use crate::png::{Encode, RgbEncoder};
use crate::template::Template;

/// Store `image` as `<title>.png`, print `formatter` applied to the title and
/// the file size in bits to stdout, and return that size.
///
/// The file is written next to its destination under a unique temporary name
/// and renamed into place. When `<title>.png` is a symlink, its target is
/// replaced and the link is left alone.
pub fn write_png(image: &Image, title: &str, formatter: &Template) -> Result<u64> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_png_to(image, title, formatter, &mut out)
}

/// Same as [`write_png`], with the report line written to `out`.
pub fn write_png_to<W: Write>(
    image: &Image,
    title: &str,
    formatter: &Template,
    out: &mut W,
) -> Result<u64> {
    write_png_with(&RgbEncoder::new(), image, title, formatter, out)
}

pub fn write_png_with<E: Encode, W: Write>(
    encoder: &E,
    image: &Image,
    title: &str,
    formatter: &Template,
    out: &mut W,
) -> Result<u64> {
    if title.is_empty() {
        return Err(Error::Validation(String::from("title must not be empty")));
    }

    let png_data = encoder.encode(image)?;

    let path = PathBuf::from(format!("{}.png", title));
    let png_bits = 8 * write_atomic(&path, &png_data)?;
    debug!("wrote {:?} ({} bits)", path, png_bits);

    writeln!(out, "{}", formatter.render(title, png_bits))?;

    Ok(png_bits)
}

fn write_synced(file: &mut File, data: &[u8]) -> io::Result<u64> {
    file.write_all(data)?;
    file.sync_all()?;
    file.stream_position()
}

static TMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Follow `path` if it is a symlink, so the link target gets replaced.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => Ok(target),
            // dangling link: create the file it points to
            Err(_) => {
                let link = fs::read_link(path)?;
                Ok(match path.parent() {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                })
            }
        },
        _ => Ok(path.to_path_buf()),
    }
}

/// Write `data` to a fresh sibling temporary file, then rename it over `path`.
/// Returns the number of bytes in the file.
fn write_atomic(path: &Path, data: &[u8]) -> Result<u64> {
    let path = resolve_target(path)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let tmp_path = PathBuf::from(tmp_name);

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)?;

    let written = write_synced(&mut file, data).and_then(|written| {
        drop(file);
        fs::rename(&tmp_path, &path).map(|_| written)
    });

    match written {
        Ok(written) => Ok(written),
        Err(err) => {
            let _ = fs::remove_file(&tmp_path);
            Err(err.into())
        }
    }
}
