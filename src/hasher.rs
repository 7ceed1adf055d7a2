use fasthash::spooky;
use std::hash::{BuildHasher, Hasher};

/// Streaming adapter over the 64-bit SpookyHash.
///
/// Bytes written through [`Hasher::write`] are buffered and hashed in one
/// pass on [`Hasher::finish`], so the result depends only on the byte
/// sequence and not on how it was split across writes.
#[derive(Default, Clone, Debug)]
pub struct SpookyHasher {
    buffer: Vec<u8>,
}

impl Hasher for SpookyHasher {
    fn finish(&self) -> u64 {
        spooky::hash64(self.buffer.as_slice())
    }

    fn write(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }
}

/// Unseeded builder for [`SpookyHasher`]; equal keys hash equally across runs.
#[derive(Default, Clone, Copy, Debug)]
pub struct SpookyBuildHasher;

impl BuildHasher for SpookyBuildHasher {
    type Hasher = SpookyHasher;

    fn build_hasher(&self) -> SpookyHasher {
        SpookyHasher::default()
    }
}
