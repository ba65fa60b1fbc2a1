//! Run-Length Encoding for tile data
//!
//! Format: a byte with bit 7 clear is a literal and stands for itself. A byte
//! with bit 7 set is a run marker carrying the value in its low 7 bits, and the
//! byte after it is the run length (2..=255). There is no header and no
//! terminator.
//!
//! The unpacker only understands 7-bit values. Bytes with bit 7 set are still
//! encoded, but the result is ambiguous; see [`Record::loses_high_bit`].

/// Longest run a single record can describe.
pub const MAX_RUN_LENGTH: u8 = 0xFF;

/// Bit set on the first byte of a run record.
pub const RUN_FLAG: u8 = 0x80;

/// One committed run of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// A single occurrence of `value`.
    Literal(u8),
    /// `count` consecutive occurrences of `value`, `count` in 2..=255.
    Run { value: u8, count: u8 },
}

impl Record {
    pub fn value(&self) -> u8 {
        match *self {
            Record::Literal(value) => value,
            Record::Run { value, .. } => value,
        }
    }

    /// Number of input bytes this record stands for.
    pub fn input_len(&self) -> usize {
        match *self {
            Record::Literal(_) => 1,
            Record::Run { count, .. } => count as usize,
        }
    }

    /// Number of bytes this record occupies in the encoded stream.
    pub fn encoded_len(&self) -> usize {
        match self {
            Record::Literal(_) => 1,
            Record::Run { .. } => 2,
        }
    }

    /// True when the value has bit 7 set. A literal then reads as a run
    /// marker, and a marker has no room for the bit.
    pub fn loses_high_bit(&self) -> bool {
        self.value() & RUN_FLAG != 0
    }

    /// Appends the wire form of this record to `out`.
    ///
    /// A `Run` must have `count` in 2..=255; [`records`] only yields such runs.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match *self {
            Record::Literal(value) => out.push(value),
            Record::Run { value, count } => {
                debug_assert!(count >= 2, "run record with count {}", count);
                out.push(RUN_FLAG | value);
                out.push(count);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Run {
    value: u8,
    count: u8,
}

impl Run {
    fn open(value: u8) -> Self {
        Self { value, count: 1 }
    }

    fn commit(self) -> Record {
        if self.count == 1 {
            Record::Literal(self.value)
        } else {
            Record::Run { value: self.value, count: self.count }
        }
    }
}

/// Iterator over the records of an input buffer, in output order.
///
/// Created by [`records`]. Each iterator owns its own run state, so two
/// iterators over the same input never influence each other.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    bytes: std::slice::Iter<'a, u8>,
    run: Option<Run>,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        for &byte in self.bytes.by_ref() {
            if let Some(run) = &mut self.run {
                if run.value == byte && run.count < MAX_RUN_LENGTH {
                    run.count += 1;
                    continue;
                }
            }

            // Either nothing is open yet, the value changed, or the run is full.
            if let Some(closed) = self.run.replace(Run::open(byte)) {
                return Some(closed.commit());
            }
        }

        self.run.take().map(Run::commit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.bytes.len() + self.run.is_some() as usize;
        (pending.min(1), Some(pending))
    }
}

impl std::iter::FusedIterator for Records<'_> {}

/// Splits `data` into records without serialising them.
pub fn records(data: &[u8]) -> Records<'_> {
    Records {
        bytes: data.iter(),
        run: None,
    }
}

/// Encodes `data`, returning a freshly allocated buffer.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(data.len());
    encode_into(data, &mut encoded);
    encoded
}

/// Appends the encoding of `data` to `out`.
pub fn encode_into(data: &[u8], out: &mut Vec<u8>) {
    for record in records(data) {
        record.write_to(out);
    }
}

/// Exact length of `encode(data)`, computed without allocating.
pub fn encoded_len(data: &[u8]) -> usize {
    records(data).map(|record| record.encoded_len()).sum()
}

/// Stateless handle around [`encode`].
///
/// Run state lives inside each call, so one encoder can be reused or shared
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthEncoder;

impl RunLengthEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        encode(data)
    }

    pub fn encode_into(&self, data: &[u8], out: &mut Vec<u8>) {
        encode_into(data, out)
    }
}
