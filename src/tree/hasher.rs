//! Digest computation for seal trees
//!
//! Wraps the hash backends behind a streaming [`Accumulator`]. Parents fold
//! each child's digest into their own accumulator as soon as the child is
//! built, so no level ever materializes the full list of child digests.

use crate::error::SealError;
use crate::types::{Digest, DIGEST_LEN};
use sha2::Digest as _;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Hash algorithms a seal can be computed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-256 (SHA-2, 32-byte digest)
    #[default]
    Sha256,
    /// BLAKE3 in its default 32-byte output mode
    Blake3,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Sha256, HashAlgorithm::Blake3];

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }

    /// Output length in bytes reported by the backend
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => <sha2::Sha256 as sha2::Digest>::output_size(),
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => blake3::OUT_LEN,
            #[cfg(not(feature = "blake3"))]
            HashAlgorithm::Blake3 => DIGEST_LEN,
        }
    }

    fn compiled_in(&self) -> bool {
        match self {
            HashAlgorithm::Sha256 => true,
            HashAlgorithm::Blake3 => cfg!(feature = "blake3"),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "blake3" => Ok(HashAlgorithm::Blake3),
            _ => Err(SealError::AlgorithmUnavailable(s.to_string())),
        }
    }
}

/// Outcome of the backend self-test, one slot per algorithm in `HashAlgorithm::ALL`
static BACKEND: OnceLock<[bool; 2]> = OnceLock::new();

/// Initialize the hash backend.
///
/// Runs a self-test of every compiled-in algorithm and caches the result.
/// Idempotent: later calls return the cached outcome. Succeeds when the
/// default algorithm is usable.
pub fn init() -> Result<(), SealError> {
    ensure_available(HashAlgorithm::default())
}

/// Fail fast with `AlgorithmUnavailable` unless `algorithm` can be opened.
pub fn ensure_available(algorithm: HashAlgorithm) -> Result<(), SealError> {
    let status = BACKEND.get_or_init(|| {
        let status = HashAlgorithm::ALL.map(self_test);
        debug!(?status, "Hash backend initialized");
        status
    });
    let index = HashAlgorithm::ALL
        .iter()
        .position(|candidate| *candidate == algorithm)
        .unwrap_or(0);
    if status[index] {
        Ok(())
    } else {
        Err(SealError::AlgorithmUnavailable(algorithm.name().to_string()))
    }
}

/// Split streaming must agree with a one-shot digest and differ from the empty digest.
fn self_test(algorithm: HashAlgorithm) -> bool {
    if !algorithm.compiled_in() || algorithm.output_len() != DIGEST_LEN {
        return false;
    }
    let probe = b"sealdir backend self-test";
    let (Some(mut whole), Some(mut split), Some(empty)) = (
        State::new(algorithm),
        State::new(algorithm),
        State::new(algorithm),
    ) else {
        return false;
    };
    whole.update(probe);
    split.update(&probe[..7]);
    split.update(&probe[7..]);
    let whole = whole.finalize();
    let passed = whole == split.finalize() && whole != empty.finalize();
    if !passed {
        warn!(algorithm = %algorithm, "Hash backend self-test failed");
    }
    passed
}

enum State {
    Sha256(sha2::Sha256),
    #[cfg(feature = "blake3")]
    Blake3(Box<blake3::Hasher>),
}

impl State {
    fn new(algorithm: HashAlgorithm) -> Option<Self> {
        match algorithm {
            HashAlgorithm::Sha256 => Some(State::Sha256(sha2::Sha256::new())),
            #[cfg(feature = "blake3")]
            HashAlgorithm::Blake3 => Some(State::Blake3(Box::new(blake3::Hasher::new()))),
            #[cfg(not(feature = "blake3"))]
            HashAlgorithm::Blake3 => None,
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        match self {
            State::Sha256(hasher) => hasher.update(bytes),
            #[cfg(feature = "blake3")]
            State::Blake3(hasher) => {
                hasher.update(bytes);
            }
        }
    }

    fn finalize(self) -> Digest {
        match self {
            State::Sha256(hasher) => {
                let mut bytes = [0u8; DIGEST_LEN];
                bytes.copy_from_slice(&hasher.finalize());
                Digest::from_array(bytes)
            }
            #[cfg(feature = "blake3")]
            State::Blake3(hasher) => Digest::from_array(*hasher.finalize().as_bytes()),
        }
    }
}

/// Streaming hash context: open, write any number of times, finalize once
pub struct Accumulator {
    state: State,
}

impl Accumulator {
    pub fn open(algorithm: HashAlgorithm) -> Result<Self, SealError> {
        ensure_available(algorithm)?;
        let state = State::new(algorithm)
            .ok_or_else(|| SealError::AlgorithmUnavailable(algorithm.name().to_string()))?;
        Ok(Self { state })
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Write a digest's bytes, folding it into this accumulator
    pub fn write_digest(&mut self, digest: &Digest) {
        self.state.update(digest.as_bytes());
    }

    pub fn finalize(self) -> Digest {
        self.state.finalize()
    }
}

impl std::io::Write for Accumulator {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.state.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// One-shot digest of an in-memory message
pub fn digest_bytes(algorithm: HashAlgorithm, message: &[u8]) -> Result<Digest, SealError> {
    let mut acc = Accumulator::open(algorithm)?;
    acc.write(message);
    Ok(acc.finalize())
}

/// Combine two digests: `hash(a ++ b)`. Order-sensitive.
pub fn combine(algorithm: HashAlgorithm, a: &Digest, b: &Digest) -> Result<Digest, SealError> {
    let mut acc = Accumulator::open(algorithm)?;
    acc.write_digest(a);
    acc.write_digest(b);
    Ok(acc.finalize())
}
