//! Salted password hashes for players and the admin.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of random bytes in a salt (hex-encoded to twice as many chars).
pub const SALT_BYTES: usize = 16;

/// A salted SHA-256 hash of a secret. Also the stored shape of the admin record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub salt: String,
    pub hash: String,
}

impl Credential {
    /// Hash `secret` under a fresh random salt.
    pub fn new(secret: &str) -> Self {
        let mut bytes = [0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::with_salt(hex::encode(bytes), secret)
    }

    /// Hash `secret` under the given salt.
    pub fn with_salt(salt: impl Into<String>, secret: &str) -> Self {
        let salt = salt.into();
        let hash = hash_secret(&salt, secret);
        Self { salt, hash }
    }

    /// Recompute the hash with the stored salt and compare.
    pub fn verify(&self, secret: &str) -> bool {
        hash_secret(&self.salt, secret) == self.hash
    }
}

/// Lowercase hex SHA-256 of `"{salt}|{secret}"`.
pub fn hash_secret(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"|");
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}
