/// Credential service - registration and password checks
use crate::error::{Result, ServerError};
use fave_core::{FaveError, NewUser, User, UserStore};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "Incorrect username or password";

/// A registration candidate
#[derive(Clone)]
pub struct RegisterUser {
    pub username: String,
    pub password: String,
    /// Optional confirmation; when present it must equal `password`
    pub password2: Option<String>,
}

/// Login credentials
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegisterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUser")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Plaintext behind the hash verified for unknown usernames
const DUMMY_PASSWORD: &str = "fave-unknown-user";

/// Registers users and verifies their passwords against stored bcrypt hashes
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
    /// Hash at `bcrypt_cost`, built on first use
    dummy_hash: OnceCell<String>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            bcrypt_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new user and return a confirmation message
    pub async fn register_user(&self, candidate: RegisterUser) -> Result<String> {
        if candidate.username.trim().is_empty() {
            return Err(ServerError::Validation("Username is required".to_string()));
        }
        if candidate.password.trim().is_empty() {
            return Err(ServerError::Validation("Password is required".to_string()));
        }
        if let Some(confirm) = &candidate.password2 {
            if *confirm != candidate.password {
                return Err(ServerError::Validation("Passwords do not match".to_string()));
            }
        }

        let password_hash = self.hash_password(candidate.password).await?;

        let new_user = NewUser {
            username: candidate.username,
            password_hash,
        };

        match self.store.create_user(new_user).await {
            Ok(user) => {
                tracing::info!("Registered user {}", user.username);
                Ok(format!("User {} successfully registered", user.username))
            }
            Err(FaveError::Duplicate(_)) => {
                Err(ServerError::Validation("User Name already taken".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check login credentials and return the matching user
    ///
    /// Unknown usernames and wrong passwords fail with the same error, and
    /// both pay for one bcrypt verification.
    pub async fn check_user(&self, credentials: Credentials) -> Result<User> {
        let Some(stored) = self
            .store
            .find_credentials_by_username(&credentials.username)
            .await?
        else {
            let dummy = self.dummy_hash().await?.to_string();
            let _ = self.verify_password(credentials.password, dummy).await;
            return Err(invalid_credentials());
        };

        let matches = self
            .verify_password(credentials.password, stored.password_hash)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Stored hash for {} could not be checked: {}", credentials.username, e);
                false
            });

        if !matches {
            return Err(invalid_credentials());
        }

        Ok(stored.user)
    }

    /// Hash a password using bcrypt
    pub async fn hash_password(&self, password: String) -> Result<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServerError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(ServerError::from)
    }

    async fn dummy_hash(&self) -> Result<&str> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.hash_password(DUMMY_PASSWORD.to_string()))
            .await?;
        Ok(hash.as_str())
    }

    /// Verify a password against a hash
    pub async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| ServerError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(ServerError::from)
    }
}

fn invalid_credentials() -> ServerError {
    ServerError::Authentication(INVALID_CREDENTIALS.to_string())
}
