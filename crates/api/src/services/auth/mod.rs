//! Authentication service.
//!
//! Provides username/password registration and login. Passwords are hashed
//! with Argon2id and never stored or logged in the clear.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use tradepost_core::{Role, UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration, login, and user lookup for the other
/// services.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the username is already taken.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        // Validate username
        let username = Username::parse(username)?;

        // Validate password
        validate_password(password)?;

        // Hash password
        let password_hash = hash_password(password)?;

        // Create user
        let user = self
            .users
            .create(&username, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with username and password.
    ///
    /// A malformed username fails the same way as a wrong password, so the
    /// response never reveals whether an account exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        // Get user with password hash
        let (user, password_hash) = self
            .users
            .get_password_hash(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[test]
    fn test_validate_password_rejects_short_passwords() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hash_password_produces_verifiable_hash() {
        let hash = hash_password("correct horse").expect("hash password");
        assert_ne!(hash, "correct horse");
        assert!(hash.starts_with("$argon2"));

        assert!(verify_password("correct horse", &hash).is_ok());
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("whatever", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_and_login_round_trip() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let registered = auth
            .register("alice", "password123", Role::Regular)
            .await
            .expect("register");
        assert_eq!(registered.username.as_str(), "alice");
        assert_eq!(registered.role, Role::Regular);

        let logged_in = auth.login("alice", "password123").await.expect("login");
        assert_eq!(logged_in.id, registered.id);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "password123", Role::Regular)
            .await
            .expect("register");

        let err = auth
            .login("alice", "wrong password")
            .await
            .expect_err("wrong password");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user_fails_like_wrong_password() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let err = auth
            .login("nobody", "password123")
            .await
            .expect_err("unknown user");
        assert!(matches!(err, AuthError::InvalidCredentials));

        // A username that would not even parse gets the same answer.
        let err = auth
            .login("has space", "password123")
            .await
            .expect_err("invalid username");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_fails() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("alice", "password123", Role::Regular)
            .await
            .expect("register");

        let err = auth
            .register("alice", "otherpassword", Role::Admin)
            .await
            .expect_err("duplicate username");
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_register_validates_input_before_touching_the_database() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let err = auth
            .register("", "password123", Role::Regular)
            .await
            .expect_err("empty username");
        assert!(matches!(err, AuthError::InvalidUsername(_)));

        let err = auth
            .register("alice", "short", Role::Regular)
            .await
            .expect_err("weak password");
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_get_user() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let registered = auth
            .register("alice", "password123", Role::Admin)
            .await
            .expect("register");

        let user = auth.get_user(registered.id).await.expect("get user");
        assert_eq!(user.role, Role::Admin);

        let err = auth
            .get_user(UserId::new(9999))
            .await
            .expect_err("missing user");
        assert!(matches!(err, AuthError::UserNotFound));
    }
}
