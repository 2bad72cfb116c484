//! Supported digest algorithms
//!
//! Fixed name → factory table used by the CLI and configuration. The digest engine never
//! looks anything up here; callers resolve a name once and pass the factory down.

use crate::error::ApiError;
use crate::tree::hasher::{
    self, Adler32, Blake3, Crc32, DigestFactory, Fnv128, Fnv128a, Fnv32, Fnv32a, Fnv64, Fnv64a,
    RustCrypto, Xxh3_128, Xxh3_64,
};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Algorithm used when none is configured
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm::Sha256;

/// A selectable digest algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Adler32,
    Blake3,
    Crc32Ieee,
    Fnv32,
    Fnv32a,
    Fnv64,
    Fnv64a,
    Fnv128,
    Fnv128a,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Xxh3_64,
    Xxh3_128,
}

impl Algorithm {
    /// Every algorithm, sorted by name
    pub const ALL: [Algorithm; 23] = [
        Algorithm::Adler32,
        Algorithm::Blake3,
        Algorithm::Crc32Ieee,
        Algorithm::Fnv128,
        Algorithm::Fnv128a,
        Algorithm::Fnv32,
        Algorithm::Fnv32a,
        Algorithm::Fnv64,
        Algorithm::Fnv64a,
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha224,
        Algorithm::Sha256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
        Algorithm::Sha384,
        Algorithm::Sha512,
        Algorithm::Sha512_224,
        Algorithm::Sha512_256,
        Algorithm::Xxh3_128,
        Algorithm::Xxh3_64,
    ];

    pub fn all() -> &'static [Algorithm] {
        &Self::ALL
    }

    /// Stable identifier accepted on the command line and in config files
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Adler32 => "adler32",
            Algorithm::Blake3 => "blake3",
            Algorithm::Crc32Ieee => "crc32ieee",
            Algorithm::Fnv32 => "fnv/32",
            Algorithm::Fnv32a => "fnv/32a",
            Algorithm::Fnv64 => "fnv/64",
            Algorithm::Fnv64a => "fnv/64a",
            Algorithm::Fnv128 => "fnv/128",
            Algorithm::Fnv128a => "fnv/128a",
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha224 => "sha224",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
            Algorithm::Sha512_224 => "sha512/224",
            Algorithm::Sha512_256 => "sha512/256",
            Algorithm::Sha3_224 => "sha3-224",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Sha3_512 => "sha3-512",
            Algorithm::Xxh3_64 => "xxh3/64",
            Algorithm::Xxh3_128 => "xxh3/128",
        }
    }

    /// Digest length in bytes
    pub fn output_len(self) -> usize {
        match self {
            Algorithm::Adler32 | Algorithm::Crc32Ieee | Algorithm::Fnv32 | Algorithm::Fnv32a => 4,
            Algorithm::Fnv64 | Algorithm::Fnv64a | Algorithm::Xxh3_64 => 8,
            Algorithm::Fnv128 | Algorithm::Fnv128a | Algorithm::Md5 | Algorithm::Xxh3_128 => 16,
            Algorithm::Sha1 => 20,
            Algorithm::Sha224 | Algorithm::Sha512_224 | Algorithm::Sha3_224 => 28,
            Algorithm::Blake3
            | Algorithm::Sha256
            | Algorithm::Sha512_256
            | Algorithm::Sha3_256 => 32,
            Algorithm::Sha384 | Algorithm::Sha3_384 => 48,
            Algorithm::Sha512 | Algorithm::Sha3_512 => 64,
        }
    }

    pub fn factory(self) -> Arc<dyn DigestFactory> {
        match self {
            Algorithm::Adler32 => hasher::factory::<Adler32>(),
            Algorithm::Blake3 => hasher::factory::<Blake3>(),
            Algorithm::Crc32Ieee => hasher::factory::<Crc32>(),
            Algorithm::Fnv32 => hasher::factory::<Fnv32>(),
            Algorithm::Fnv32a => hasher::factory::<Fnv32a>(),
            Algorithm::Fnv64 => hasher::factory::<Fnv64>(),
            Algorithm::Fnv64a => hasher::factory::<Fnv64a>(),
            Algorithm::Fnv128 => hasher::factory::<Fnv128>(),
            Algorithm::Fnv128a => hasher::factory::<Fnv128a>(),
            Algorithm::Md5 => hasher::factory::<RustCrypto<md5::Md5>>(),
            Algorithm::Sha1 => hasher::factory::<RustCrypto<sha1::Sha1>>(),
            Algorithm::Sha224 => hasher::factory::<RustCrypto<sha2::Sha224>>(),
            Algorithm::Sha256 => hasher::factory::<RustCrypto<sha2::Sha256>>(),
            Algorithm::Sha384 => hasher::factory::<RustCrypto<sha2::Sha384>>(),
            Algorithm::Sha512 => hasher::factory::<RustCrypto<sha2::Sha512>>(),
            Algorithm::Sha512_224 => hasher::factory::<RustCrypto<sha2::Sha512_224>>(),
            Algorithm::Sha512_256 => hasher::factory::<RustCrypto<sha2::Sha512_256>>(),
            Algorithm::Sha3_224 => hasher::factory::<RustCrypto<sha3::Sha3_224>>(),
            Algorithm::Sha3_256 => hasher::factory::<RustCrypto<sha3::Sha3_256>>(),
            Algorithm::Sha3_384 => hasher::factory::<RustCrypto<sha3::Sha3_384>>(),
            Algorithm::Sha3_512 => hasher::factory::<RustCrypto<sha3::Sha3_512>>(),
            Algorithm::Xxh3_64 => hasher::factory::<Xxh3_64>(),
            Algorithm::Xxh3_128 => hasher::factory::<Xxh3_128>(),
        }
    }

    /// Comma-separated list of every supported name
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        DEFAULT_ALGORITHM
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| ApiError::UnsupportedAlgorithm {
                name: s.to_string(),
                supported: Self::supported_names(),
            })
    }
}
