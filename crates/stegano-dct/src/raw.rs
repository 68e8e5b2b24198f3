//! Raw image container.
//!
//! ```text
//! +-----------+-----------+-------------+--------------------------------+
//! | width i32 | height i32 | channels i32 | width * height * channels bytes |
//! +-----------+-----------+-------------+--------------------------------+
//! ```
//!
//! The header integers use the byte order of the host. Pixel bytes are
//! interleaved per pixel, rows top to bottom.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};

use crate::error::{Result, StegoError};
use crate::image::Image;
use crate::pipeline::Stage;

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 12;

/// Loads a raw image from `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    info!("Loading image from {path:?}");
    let file = File::open(path).map_err(|source| StegoError::ReadError { source })?;

    let image = read_image(BufReader::new(file))?;
    debug!(
        "{}: {}x{} with {} channels",
        Stage::Loaded,
        image.width(),
        image.height(),
        image.channels()
    );

    Ok(image)
}

/// Saves `image` to `path`, replacing any existing file.
pub fn save<P: AsRef<Path>>(path: P, image: &Image) -> Result<()> {
    let path = path.as_ref();
    info!("Saving image to {path:?}");
    let file = File::create(path).map_err(|source| StegoError::WriteError { source })?;

    let mut writer = BufWriter::new(file);
    write_image(&mut writer, image)?;
    writer
        .flush()
        .map_err(|source| StegoError::WriteError { source })?;
    debug!("{}", Stage::Saved);

    Ok(())
}

pub fn read_image<R: Read>(mut reader: R) -> Result<Image> {
    let width = read_dimension(&mut reader, "width")?;
    let height = read_dimension(&mut reader, "height")?;
    let channels = read_dimension(&mut reader, "channels")?;
    let channels = u8::try_from(channels)
        .map_err(|_| StegoError::invalid_image(format!("unsupported channel count {channels}")))?;

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|len| len.checked_mul(channels as usize))
        .ok_or_else(|| StegoError::invalid_image("pixel buffer size overflows"))?;

    let mut pixels = Vec::new();
    let read = reader
        .take(len as u64)
        .read_to_end(&mut pixels)
        .map_err(|source| StegoError::ReadError { source })?;
    if read < len {
        return Err(StegoError::invalid_image(format!(
            "truncated pixel data: expected {len} bytes but got {read}"
        )));
    }

    Image::new(width, height, channels, pixels)
}

pub fn write_image<W: Write>(mut writer: W, image: &Image) -> Result<()> {
    for value in [image.width(), image.height(), image.channels() as u32] {
        let value = i32::try_from(value)
            .map_err(|_| StegoError::invalid_image(format!("dimension {value} does not fit the header")))?;
        writer
            .write_i32::<NativeEndian>(value)
            .map_err(|source| StegoError::WriteError { source })?;
    }

    writer
        .write_all(image.pixels())
        .map_err(|source| StegoError::WriteError { source })
}

fn read_dimension<R: Read>(reader: &mut R, name: &str) -> Result<u32> {
    let value = match reader.read_i32::<NativeEndian>() {
        Ok(value) => value,
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(StegoError::invalid_image(format!("truncated header, missing {name}")))
        }
        Err(source) => return Err(StegoError::ReadError { source }),
    };

    u32::try_from(value)
        .map_err(|_| StegoError::invalid_image(format!("negative {name} {value}")))
}
