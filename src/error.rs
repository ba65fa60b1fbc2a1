use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RleError>;

#[derive(Error, Debug)]
pub enum RleError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Failed to read {}: {source}", .path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write {}: {source}", .path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Byte 0x{value:02X} at offset {offset} has bit 7 set and cannot be encoded losslessly")]
	HighBitValue { offset: usize, value: u8 },

	#[error("Configuration error: {0}")]
	ConfigError(String),

	#[error("Failed to serialize report: {0}")]
	Json(#[from] serde_json::Error),
}
