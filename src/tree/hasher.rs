//! Streaming accumulators and the factory capability that produces them
//!
//! The engine only ever sees `dyn DigestFactory`; which algorithm sits behind it is
//! decided by the caller.

use crate::types::Digest;
use std::sync::Arc;

/// Stateful hash over an incrementally supplied byte stream
pub trait Accumulator: Send {
    /// Feed more bytes
    fn update(&mut self, bytes: &[u8]);

    /// Consume the accumulator and produce the digest
    fn finalize(self: Box<Self>) -> Digest;
}

/// Produces fresh, independent accumulators of one algorithm.
pub trait DigestFactory: Send + Sync {
    fn create(&self) -> Box<dyn Accumulator>;
}

impl<F> DigestFactory for F
where
    F: Fn() -> Box<dyn Accumulator> + Send + Sync,
{
    fn create(&self) -> Box<dyn Accumulator> {
        self()
    }
}

/// Shareable factory for any accumulator with a `Default` starting state
pub fn factory<A>() -> Arc<dyn DigestFactory>
where
    A: Accumulator + Default + 'static,
{
    Arc::new(|| Box::new(A::default()) as Box<dyn Accumulator>)
}

/// Hash a complete in-memory buffer with one accumulator from `factory`
pub fn digest_bytes(factory: &dyn DigestFactory, bytes: &[u8]) -> Digest {
    let mut accumulator = factory.create();
    accumulator.update(bytes);
    accumulator.finalize()
}

/// Fold already-computed child digests, in the given order, into one digest
pub fn combine_digests<'a, I>(factory: &dyn DigestFactory, digests: I) -> Digest
where
    I: IntoIterator<Item = &'a Digest>,
{
    let mut accumulator = factory.create();
    for digest in digests {
        accumulator.update(digest.as_bytes());
    }
    accumulator.finalize()
}

/// BLAKE3
#[derive(Default)]
pub struct Blake3(blake3::Hasher);

impl Accumulator for Blake3 {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(self.0.finalize().as_bytes().to_vec())
    }
}

/// Adapter for the RustCrypto `Digest` family (MD5, SHA-1, SHA-2, SHA-3)
#[derive(Default)]
pub struct RustCrypto<D>(D);

impl<D> Accumulator for RustCrypto<D>
where
    D: sha2::Digest + Send,
{
    fn update(&mut self, bytes: &[u8]) {
        sha2::Digest::update(&mut self.0, bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(sha2::Digest::finalize(self.0).to_vec())
    }
}

/// CRC-32 (IEEE), emitted big-endian
pub struct Crc32(crc32fast::Hasher);

impl Default for Crc32 {
    fn default() -> Self {
        Self(crc32fast::Hasher::new())
    }
}

impl Accumulator for Crc32 {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(self.0.finalize().to_be_bytes().to_vec())
    }
}

/// XXH3 64-bit, emitted big-endian
pub struct Xxh3_64(xxhash_rust::xxh3::Xxh3);

impl Default for Xxh3_64 {
    fn default() -> Self {
        Self(xxhash_rust::xxh3::Xxh3::new())
    }
}

impl Accumulator for Xxh3_64 {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(self.0.digest().to_be_bytes().to_vec())
    }
}

/// XXH3 128-bit, emitted big-endian
pub struct Xxh3_128(xxhash_rust::xxh3::Xxh3);

impl Default for Xxh3_128 {
    fn default() -> Self {
        Self(xxhash_rust::xxh3::Xxh3::new())
    }
}

impl Accumulator for Xxh3_128 {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(self.0.digest128().to_be_bytes().to_vec())
    }
}

/// Adler-32, emitted big-endian
pub struct Adler32(adler::Adler32);

impl Default for Adler32 {
    fn default() -> Self {
        Self(adler::Adler32::new())
    }
}

impl Accumulator for Adler32 {
    fn update(&mut self, bytes: &[u8]) {
        self.0.write_slice(bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(self.0.checksum().to_be_bytes().to_vec())
    }
}

/// 64-bit FNV-1a, emitted big-endian
#[derive(Default)]
pub struct Fnv64a(fnv::FnvHasher);

impl Accumulator for Fnv64a {
    fn update(&mut self, bytes: &[u8]) {
        std::hash::Hasher::write(&mut self.0, bytes);
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(std::hash::Hasher::finish(&self.0).to_be_bytes().to_vec())
    }
}

/// Word size of an FNV variant: offset basis, prime and big-endian output
pub trait FnvWord: Copy + Send + 'static {
    const OFFSET_BASIS: Self;
    const PRIME: Self;

    fn mix(self, byte: u8) -> Self;
    fn multiply(self) -> Self;
    fn to_be_vec(self) -> Vec<u8>;
}

macro_rules! fnv_word {
    ($word:ty, $offset:expr, $prime:expr) => {
        impl FnvWord for $word {
            const OFFSET_BASIS: Self = $offset;
            const PRIME: Self = $prime;

            fn mix(self, byte: u8) -> Self {
                self ^ <$word>::from(byte)
            }

            fn multiply(self) -> Self {
                self.wrapping_mul(Self::PRIME)
            }

            fn to_be_vec(self) -> Vec<u8> {
                self.to_be_bytes().to_vec()
            }
        }
    };
}

fnv_word!(u32, 0x811c_9dc5, 0x0100_0193);
fnv_word!(u64, 0xcbf2_9ce4_8422_2325, 0x0000_0100_0000_01b3);
fnv_word!(
    u128,
    0x6c62_272e_07bb_0142_62b8_2175_6295_c58d,
    0x0000_0000_0100_0000_0000_0000_0000_013b
);

/// FNV-1 (`XOR_FIRST = false`) or FNV-1a (`XOR_FIRST = true`) over `W`.
///
/// Covers the widths and variants `fnv::FnvHasher` does not.
pub struct Fnv<W, const XOR_FIRST: bool>(W);

impl<W: FnvWord, const XOR_FIRST: bool> Default for Fnv<W, XOR_FIRST> {
    fn default() -> Self {
        Self(W::OFFSET_BASIS)
    }
}

impl<W: FnvWord, const XOR_FIRST: bool> Accumulator for Fnv<W, XOR_FIRST> {
    fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = if XOR_FIRST {
                self.0.mix(byte).multiply()
            } else {
                self.0.multiply().mix(byte)
            };
        }
    }

    fn finalize(self: Box<Self>) -> Digest {
        Digest::new(self.0.to_be_vec())
    }
}

pub type Fnv32 = Fnv<u32, false>;
pub type Fnv32a = Fnv<u32, true>;
pub type Fnv64 = Fnv<u64, false>;
pub type Fnv128 = Fnv<u128, false>;
pub type Fnv128a = Fnv<u128, true>;
