//! # tile-rle
//!
//! Run-length encoder for tile and tilemap data. The output is a stream of
//! records that a tiny in-ROM unpacker expands: a byte with bit 7 clear is
//! copied once, a byte with bit 7 set is repeated (with the bit cleared) as
//! many times as the following byte says.
//!
//! ## Quick Start
//!
//! ```rust
//! use tile_rle::encode;
//!
//! assert_eq!(encode(&[0x41, 0x41, 0x41]), vec![0xC1, 0x03]);
//! assert_eq!(encode(&[0x01, 0x02, 0x03]), vec![0x01, 0x02, 0x03]);
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use tile_rle::{pipeline, RleConfig};
//! use std::path::Path;
//!
//! # fn example() -> tile_rle::Result<()> {
//! let stats = pipeline::encode_file(Path::new("tiles.bin"), Path::new("tiles.rle"), &RleConfig::default())?;
//! println!("Compression ratio: {:.2}x", stats.ratio);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod rle;

// Re-export commonly used types for convenience
pub use config::{HighBitPolicy, ReportFormat, RleConfig};
pub use error::{Result, RleError};
pub use pipeline::{encode_buffer, encode_file, EncodeStats};
pub use rle::{encode, encoded_len, records, Record, Records, RunLengthEncoder, MAX_RUN_LENGTH, RUN_FLAG};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
