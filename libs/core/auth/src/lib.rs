//! Password hashing utility
//!
//! Wraps bcrypt with an explicitly injected cost factor. The cost is part of
//! the configuration handed to the hasher at construction rather than read
//! from the process environment inside the hashing functions, so callers
//! control exactly which settings are in effect.

use bcrypt::DEFAULT_COST;
use core_config::{env_or_default, ConfigError, FromEnv};
use thiserror::Error;

/// Valid bcrypt cost range
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Invalid bcrypt cost factor {0}: must be between {MIN_COST} and {MAX_COST}")]
    InvalidCost(u32),

    #[error("Hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

pub type HashResult<T> = Result<T, HashError>;

/// Hashing configuration loaded from the environment.
///
/// `HASH_COST` sets the bcrypt cost factor; absent or unparseable values
/// fall back to the bcrypt default.
#[derive(Clone, Debug)]
pub struct HashConfig {
    pub cost: u32,
}

impl HashConfig {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl FromEnv for HashConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let cost = env_or_default("HASH_COST", &DEFAULT_COST.to_string())
            .parse()
            .unwrap_or(DEFAULT_COST);
        Ok(Self { cost })
    }
}

/// Salted one-way password hasher.
///
/// Each call to [`hash`](PasswordHasher::hash) generates a fresh random salt;
/// [`verify`](PasswordHasher::verify) performs a constant-time comparison of
/// a candidate against a stored hash.
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given configuration.
    ///
    /// Fails if the configured cost factor is outside bcrypt's valid range.
    pub fn new(config: HashConfig) -> HashResult<Self> {
        if !(MIN_COST..=MAX_COST).contains(&config.cost) {
            return Err(HashError::InvalidCost(config.cost));
        }
        Ok(Self { cost: config.cost })
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> HashResult<String> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// A mismatch returns `Ok(false)`; a malformed stored hash is an error
    /// rather than a silent `false` so corrupt records surface in logs.
    pub fn verify(&self, candidate: &str, stored_hash: &str) -> HashResult<bool> {
        Ok(bcrypt::verify(candidate, stored_hash)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the tests fast; MIN_COST is still a valid bcrypt cost.
    fn test_hasher() -> PasswordHasher {
        PasswordHasher::new(HashConfig::new(MIN_COST)).unwrap()
    }

    #[test]
    fn test_hash_roundtrip() {
        let hasher = test_hasher();
        let hash = hasher.hash("s3cret").unwrap();

        assert!(hasher.verify("s3cret", &hash).unwrap());
        assert!(!hasher.verify("s3cretx", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = test_hasher();
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();

        // Fresh salt per call means distinct hashes for the same input
        assert_ne!(a, b);
        assert!(hasher.verify("same password", &a).unwrap());
        assert!(hasher.verify("same password", &b).unwrap());
    }

    #[test]
    fn test_empty_password() {
        let hasher = test_hasher();
        let hash = hasher.hash("").unwrap();
        assert!(hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify("x", &hash).unwrap());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        assert!(matches!(
            PasswordHasher::new(HashConfig::new(MIN_COST - 1)),
            Err(HashError::InvalidCost(_))
        ));
        assert!(matches!(
            PasswordHasher::new(HashConfig::new(MAX_COST + 1)),
            Err(HashError::InvalidCost(_))
        ));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = test_hasher();
        assert!(hasher.verify("anything", "not-a-bcrypt-hash").is_err());
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_var("HASH_COST", Some("6"), || {
            let config = HashConfig::from_env().unwrap();
            assert_eq!(config.cost, 6);
        });

        temp_env::with_var_unset("HASH_COST", || {
            let config = HashConfig::from_env().unwrap();
            assert_eq!(config.cost, DEFAULT_COST);
        });

        temp_env::with_var("HASH_COST", Some("lots"), || {
            let config = HashConfig::from_env().unwrap();
            assert_eq!(config.cost, DEFAULT_COST);
        });
    }
}
