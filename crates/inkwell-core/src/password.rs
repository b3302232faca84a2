use anyhow::Context;
use inkwell_types::Result;

/// Default bcrypt work factor. Matches the usual production setting; raising
/// it slows brute-force at the cost of login latency.
pub const DEFAULT_COST: u32 = 10;

/// One-way salted hashing and verification of plaintext passwords.
/// Pure over its inputs; verification never reveals which part mismatched.
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let digest = bcrypt::hash(plaintext, self.cost).context("bcrypt hash failed")?;
        Ok(digest)
    }

    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool> {
        let ok = bcrypt::verify(plaintext, digest).context("bcrypt verify failed")?;
        Ok(ok)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
