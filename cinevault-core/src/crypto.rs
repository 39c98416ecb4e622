use argon2::{
    Algorithm, Argon2, ParamsBuilder, Version,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
};
pub use argon2::Params;
use password_hash::Error as PasswordHashError;
use rand::{TryRngCore, rngs::OsRng};
use thiserror::Error;
use zeroize::Zeroizing;

/// Argon2id password hashing with a server-side pepper.
///
/// The pepper is appended to the password before hashing and never stored
/// alongside the hash, so a leaked `users` table alone cannot be brute-forced.
#[derive(Debug)]
pub struct PasswordCrypto {
    argon2: Argon2<'static>,
    pepper: Zeroizing<Vec<u8>>,
}

#[derive(Debug, Error)]
pub enum PasswordCryptoError {
    #[error("password pepper must not be empty")]
    EmptyPepper,
    #[error("invalid Argon2 parameters: {0}")]
    InvalidArgon2Params(String),
    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

impl From<PasswordHashError> for PasswordCryptoError {
    fn from(err: PasswordHashError) -> Self {
        PasswordCryptoError::PasswordHash(err.to_string())
    }
}

impl PasswordCrypto {
    const DEFAULT_MEMORY_KIB: u32 = 64 * 1024; // 64 MiB
    const DEFAULT_ITERATIONS: u32 = 3;
    const DEFAULT_PARALLELISM: u32 = 1;
    const SALT_LENGTH: usize = password_hash::Salt::RECOMMENDED_LENGTH;

    pub fn new(pepper: impl AsRef<[u8]>) -> Result<Self, PasswordCryptoError> {
        Self::with_params(
            pepper,
            ParamsBuilder::new()
                .m_cost(Self::DEFAULT_MEMORY_KIB)
                .t_cost(Self::DEFAULT_ITERATIONS)
                .p_cost(Self::DEFAULT_PARALLELISM)
                .output_len(32)
                .build()
                .map_err(|err| {
                    PasswordCryptoError::InvalidArgon2Params(err.to_string())
                })?,
        )
    }

    /// Caller-chosen Argon2 cost, mostly for tests.
    pub fn with_params(
        pepper: impl AsRef<[u8]>,
        params: Params,
    ) -> Result<Self, PasswordCryptoError> {
        let pepper = pepper.as_ref();
        if pepper.is_empty() {
            return Err(PasswordCryptoError::EmptyPepper);
        }

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::default(), params),
            pepper: Zeroizing::new(pepper.to_vec()),
        })
    }

    fn peppered(&self, password: &str) -> Zeroizing<Vec<u8>> {
        let mut material = Zeroizing::new(Vec::with_capacity(
            password.len() + self.pepper.len(),
        ));
        material.extend_from_slice(password.as_bytes());
        material.extend_from_slice(&self.pepper);
        material
    }

    /// Returns a PHC string suitable for the `users.password_hash` column.
    pub fn hash_password(
        &self,
        password: &str,
    ) -> Result<String, PasswordCryptoError> {
        let material = self.peppered(password);

        let mut salt_bytes = [0u8; Self::SALT_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| PasswordCryptoError::PasswordHash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;
        Ok(self.argon2.hash_password(&material, &salt)?.to_string())
    }

    /// Checks `password` against a PHC string produced by
    /// [`hash_password`](Self::hash_password) under the same pepper.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PasswordCryptoError> {
        let parsed = PasswordHash::new(password_hash)?;
        let material = self.peppered(password);
        Ok(self.argon2.verify_password(&material, &parsed).is_ok())
    }
}
