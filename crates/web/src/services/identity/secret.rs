//! Admin auth key and timing-safe comparison.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use subtle::{Choice, ConstantTimeEq};

/// Something a presented credential can be checked against.
pub trait SecretMatcher {
    /// Returns true iff `candidate` equals the secret.
    fn matches(&self, candidate: &str) -> bool;
}

/// The process-wide admin auth key.
///
/// Loaded once from configuration and never mutated. `Debug` is redacted.
#[derive(Clone)]
pub struct AdminSecret(SecretString);

impl AdminSecret {
    /// Wrap a configured secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self(secret)
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret([REDACTED])")
    }
}

impl SecretMatcher for AdminSecret {
    fn matches(&self, candidate: &str) -> bool {
        let (equal, _) = compare(candidate.as_bytes(), self.0.expose_secret().as_bytes());
        equal.into()
    }
}

/// Compare `candidate` against `secret` without branching on their contents.
///
/// Every byte of `secret` is visited regardless of where the first mismatch
/// is; missing candidate bytes compare as zero and the length check is folded
/// into the same accumulator. Returns the result and the number of secret
/// bytes visited.
fn compare(candidate: &[u8], secret: &[u8]) -> (Choice, usize) {
    let mut equal = candidate.len().ct_eq(&secret.len());
    let mut visited = 0;

    for (i, expected) in secret.iter().enumerate() {
        let provided = candidate.get(i).copied().unwrap_or(0);
        equal &= provided.ct_eq(expected);
        visited += 1;
    }

    (equal, visited)
}
