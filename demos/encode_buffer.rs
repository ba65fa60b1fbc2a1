use tile_rle::{encode_buffer, records, RleConfig};

fn main() {
	let tiles = b"\x00\x00\x00\x00\x01\x02\x02\x02".to_vec();
	let (encoded, stats) = encode_buffer(&tiles, &RleConfig::default()).unwrap();
	println!("encoded {} -> {} bytes: {:02X?}", stats.original_size, stats.encoded_size, encoded);

	for record in records(&tiles) {
		println!("  {:?}", record);
	}
}
