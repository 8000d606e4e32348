use async_trait::async_trait;

use super::errors::AccountError;
use super::models::AccessToken;
use super::models::Account;
use super::models::LoginCommand;
use super::models::RegisterCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError>;

    /// Exchange credentials for a signed bearer token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password as supplied
    ///
    /// # Returns
    /// Access token bound to the account identifier
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account, or wrong password
    /// * `TokenIssuance` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// Email uniqueness is enforced by the store, so concurrent inserts of the
    /// same email resolve to exactly one success.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account, including its password hash, by email.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
}
