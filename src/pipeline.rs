use crate::config::{HighBitPolicy, RleConfig};
use crate::error::{Result, RleError};
use crate::rle::{self, Record};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncodeStats {
	pub original_size: u64,
	pub encoded_size: u64,
	pub ratio: f64,
	pub literal_records: u64,
	pub run_records: u64,
	pub high_bit_records: u64,
}

impl EncodeStats {
	fn record(&mut self, record: &Record) {
		match record {
			Record::Literal(_) => self.literal_records += 1,
			Record::Run { .. } => self.run_records += 1,
		}
		if record.loses_high_bit() {
			self.high_bit_records += 1;
		}
	}
}

/// Encodes an in-memory buffer, applying the configured high-bit policy.
pub fn encode_buffer(data: &[u8], config: &RleConfig) -> Result<(Vec<u8>, EncodeStats)> {
	if config.high_bit == HighBitPolicy::Reject {
		if let Some(offset) = data.iter().position(|&b| b & rle::RUN_FLAG != 0) {
			return Err(RleError::HighBitValue { offset, value: data[offset] });
		}
	}

	let start = Instant::now();
	let mut encoded = Vec::with_capacity(data.len());
	let mut stats = EncodeStats { original_size: data.len() as u64, ..Default::default() };
	let mut first_high_bit = None;
	let mut offset = 0usize;

	for record in rle::records(data) {
		stats.record(&record);
		if first_high_bit.is_none() && record.loses_high_bit() {
			first_high_bit = Some(offset);
		}
		offset += record.input_len();
		record.write_to(&mut encoded);
	}

	stats.encoded_size = encoded.len() as u64;
	stats.ratio = if stats.encoded_size > 0 { stats.original_size as f64 / stats.encoded_size as f64 } else { 0.0 };

	if let (HighBitPolicy::Warn, Some(first)) = (config.high_bit, first_high_bit) {
		log::warn!(
			"{} record(s) carry a value with bit 7 set (first at input offset {}); output will not unpack losslessly",
			stats.high_bit_records,
			first
		);
	}

	log::debug!(
		"encoded {} -> {} bytes ({} literal, {} run records) in {:.2?}",
		stats.original_size,
		stats.encoded_size,
		stats.literal_records,
		stats.run_records,
		start.elapsed()
	);

	Ok((encoded, stats))
}

/// Reads all of `reader`, encodes it and writes the result to `writer` in one go.
pub fn encode<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &RleConfig,
) -> Result<EncodeStats> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let (encoded, stats) = encode_buffer(&buffer, config)?;

	writer.write_all(&encoded)?;
	writer.flush()?;
	Ok(stats)
}

pub fn encode_file(input: &Path, output: &Path, config: &RleConfig) -> Result<EncodeStats> {
	log::info!("encoding {} to {}", input.display(), output.display());

	let mut buffer = Vec::new();
	File::open(input)
		.and_then(|f| BufReader::new(f).read_to_end(&mut buffer))
		.map_err(|source| RleError::Read { path: input.to_path_buf(), source })?;

	// Policy failures must not leave a truncated output file behind.
	let (encoded, stats) = encode_buffer(&buffer, config)?;

	File::create(output)
		.and_then(|f| {
			let mut writer = BufWriter::new(f);
			writer.write_all(&encoded)?;
			writer.flush()
		})
		.map_err(|source| RleError::Write { path: output.to_path_buf(), source })?;

	Ok(stats)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn test_encode_stream() {
		let mut reader = Cursor::new(vec![0x01, 0x01, 0x02, 0x02, 0x02]);
		let mut out = Vec::new();
		let stats = encode(&mut reader, &mut out, &RleConfig::default()).unwrap();

		assert_eq!(out, vec![0x81, 0x02, 0x82, 0x03]);
		assert_eq!(stats.original_size, 5);
		assert_eq!(stats.encoded_size, 4);
		assert_eq!(stats.run_records, 2);
		assert_eq!(stats.literal_records, 0);
		assert!((stats.ratio - 1.25).abs() < f64::EPSILON);
	}

	#[test]
	fn test_empty_stream() {
		let mut reader = Cursor::new(Vec::<u8>::new());
		let mut out = Vec::new();
		let stats = encode(&mut reader, &mut out, &RleConfig::default()).unwrap();

		assert!(out.is_empty());
		assert_eq!(stats, EncodeStats::default());
	}

	#[test]
	fn test_high_bit_allowed_and_counted() {
		let data = [0x01, 0x90, 0x90, 0xFF];
		for policy in [HighBitPolicy::Allow, HighBitPolicy::Warn] {
			let config = RleConfig::default().with_high_bit(policy);
			let (encoded, stats) = encode_buffer(&data, &config).unwrap();
			assert_eq!(encoded, rle::encode(&data));
			assert_eq!(stats.high_bit_records, 2);
		}
	}

	#[test]
	fn test_high_bit_rejected() {
		let config = RleConfig::default().with_high_bit(HighBitPolicy::Reject);
		let err = encode_buffer(&[0x01, 0x02, 0x85, 0x03], &config).unwrap_err();
		match err {
			RleError::HighBitValue { offset, value } => {
				assert_eq!(offset, 2);
				assert_eq!(value, 0x85);
			}
			other => panic!("unexpected error: {}", other),
		}

		assert!(encode_buffer(&[0x01, 0x7F, 0x7F], &config).is_ok());
	}

	#[test]
	fn test_rejected_stream_writes_nothing() {
		let config = RleConfig::default().with_high_bit(HighBitPolicy::Reject);
		let mut reader = Cursor::new(vec![0xAA; 4]);
		let mut out = Vec::new();
		assert!(encode(&mut reader, &mut out, &config).is_err());
		assert!(out.is_empty());
	}
}
