//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::{OsRng, RngCore},
    },
};

use quill_core::ports::{AuthError, PasswordService};

/// Shortest salt Argon2 accepts, in bytes.
pub const MIN_SALT_LEN: usize = 8;
/// Longest salt that fits a PHC salt string (64 base64 characters), in bytes.
pub const MAX_SALT_LEN: usize = 48;

/// Password hashing configuration.
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Salt length is drawn uniformly from `salt_len_min..=salt_len_max`
    /// bytes on every hash. Set both to the same value for a fixed length.
    pub salt_len_min: usize,
    pub salt_len_max: usize,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            salt_len_min: 8,
            salt_len_max: 32,
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id-based password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
    salt_len_min: usize,
    salt_len_max: usize,
}

impl Argon2PasswordService {
    pub fn new(config: PasswordConfig) -> Result<Self, AuthError> {
        if config.salt_len_min < MIN_SALT_LEN
            || config.salt_len_max > MAX_SALT_LEN
            || config.salt_len_min > config.salt_len_max
        {
            return Err(AuthError::HashingError(format!(
                "salt length range {}..={} outside {}..={}",
                config.salt_len_min, config.salt_len_max, MIN_SALT_LEN, MAX_SALT_LEN
            )));
        }

        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            salt_len_min: config.salt_len_min,
            salt_len_max: config.salt_len_max,
        })
    }

    fn generate_salt(&self) -> Result<SaltString, AuthError> {
        let span = (self.salt_len_max - self.salt_len_min + 1) as u32;
        let len = self.salt_len_min + (OsRng.next_u32() % span) as usize;

        let mut bytes = [0u8; MAX_SALT_LEN];
        OsRng.fill_bytes(&mut bytes[..len]);

        SaltString::encode_b64(&bytes[..len]).map_err(|e| AuthError::HashingError(e.to_string()))
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            salt_len_min: 8,
            salt_len_max: 32,
        }
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = self.generate_salt()?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash is malformed");
            return false;
        };

        // Cost parameters come from the stored hash, not from `self`.
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap(salt_len_min: usize, salt_len_max: usize) -> Argon2PasswordService {
        Argon2PasswordService::new(PasswordConfig {
            salt_len_min,
            salt_len_max,
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn salt_chars(hash: &str) -> usize {
        PasswordHash::new(hash).unwrap().salt.unwrap().as_str().len()
    }

    #[test]
    fn test_hash_and_verify() {
        let service = cheap(8, 32);
        let password = "secure_password_123";

        let hash = service.hash(password).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify(password, &hash));
        assert!(!service.verify("wrong_password", &hash));
    }

    #[test]
    fn test_same_password_hashes_differ() {
        let service = cheap(16, 16);
        assert_ne!(service.hash("pw1").unwrap(), service.hash("pw1").unwrap());
    }

    #[test]
    fn test_malformed_hash_fails_verification() {
        let service = cheap(8, 32);
        assert!(!service.verify("pw", "not-a-hash"));
        assert!(!service.verify("pw", ""));
    }

    #[test]
    fn test_fixed_salt_length() {
        let service = cheap(16, 16);
        // 16 bytes -> 22 unpadded base64 characters
        assert_eq!(salt_chars(&service.hash("pw").unwrap()), 22);
    }

    #[test]
    fn test_salt_length_stays_in_range() {
        let service = cheap(8, 32);
        for _ in 0..20 {
            let chars = salt_chars(&service.hash("pw").unwrap());
            assert!((11..=43).contains(&chars), "salt of {chars} chars");
        }
    }

    #[test]
    fn test_rejects_bad_salt_range() {
        let config = |min, max| PasswordConfig {
            salt_len_min: min,
            salt_len_max: max,
            ..PasswordConfig::default()
        };

        assert!(Argon2PasswordService::new(config(4, 16)).is_err());
        assert!(Argon2PasswordService::new(config(16, 8)).is_err());
        assert!(Argon2PasswordService::new(config(8, 64)).is_err());
    }
}
