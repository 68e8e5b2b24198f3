//! # Stegano DCT
//!
//! Hides a byte string in the parity of quantized DCT coefficients of the
//! luma plane of a raw RGB(A) image, and recovers it again.
//!
//! - [`StegoPipeline`] embeds into and extracts from an in-memory [`Image`]
//! - [`commands`] works on raw image files, see [`raw`] for the container
//!
//! # Usage Examples
//!
//! ## Hide and unveil a message in memory
//!
//! ```rust
//! use stegano_dct::{Image, Payload, StegoPipeline};
//!
//! let cover = Image::from_fn(64, 64, 3, |row, col, channel| {
//!     let value = match channel {
//!         0 => 60 + (col * 5 + row * 3) % 120,
//!         1 => 80 + (col * 2 + row * 7) % 100,
//!         _ => 70 + (col * 4 + row * 4) % 110,
//!     };
//!     value as u8
//! })
//! .expect("Failed to create cover image");
//!
//! let pipeline = StegoPipeline::new();
//! let secret = pipeline
//!     .hide(cover, &Payload::from("Hello World!"))
//!     .expect("Failed to hide message");
//!
//! let message = pipeline.unveil(&secret).expect("Failed to unveil message");
//! assert_eq!(message.as_bytes(), b"Hello World!");
//! ```
//!
//! ## Hide a message in a raw image file
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stegano_dct::{commands, CodecOptions};
//!
//! commands::hide(
//!     Path::new("cover.raw"),
//!     Path::new("output_image.raw"),
//!     b"Hello World!",
//!     CodecOptions::default(),
//! )
//! .expect("Failed to hide message");
//! ```

#![warn(clippy::redundant_else)]

pub mod block;
pub mod codec;
pub mod color;
pub mod commands;
pub mod error;
pub mod image;
pub mod options;
pub mod payload;
pub mod pipeline;
pub mod raw;
pub mod transform;

pub use crate::block::BlockLayout;
pub use crate::codec::ParityCodec;
pub use crate::error::{Result, StegoError};
pub use crate::image::Image;
pub use crate::options::{CodecOptions, DEFAULT_QUANTIZATION_STEP};
pub use crate::payload::Payload;
pub use crate::pipeline::{Stage, StegoPipeline};
pub use crate::transform::BLOCK_SIZE;
