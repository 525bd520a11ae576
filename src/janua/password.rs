use anyhow::{Context, Result};

/// Work factor inherited from the original service.
pub const DEFAULT_COST: u32 = 12;

/// One-way password hashing via bcrypt. Hashing at cost 12 is CPU-bound, so
/// both operations run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    #[must_use]
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Lower costs keep the test suite fast; production uses [`DEFAULT_COST`].
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String> {
        let cost = self.cost;
        let password = password.to_string();

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("password hashing task panicked")?
            .context("failed to hash password")
    }

    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("password verification task panicked")?
            .context("failed to verify password")
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
