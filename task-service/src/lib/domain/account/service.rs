use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use super::errors::AccountError;
use super::models::AccessToken;
use super::models::Account;
use super::models::AccountId;
use super::models::LoginCommand;
use super::models::RegisterCommand;
use super::ports::AccountRepository;
use super::ports::AccountServicePort;

/// Domain service implementation for registration and login.
///
/// Argon2 work runs on the blocking pool so that a burst of logins does not
/// stall the async workers.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
    // verified against when the email is unknown, to keep login timing flat
    dummy_hash: String,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    /// * `token_ttl_hours` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `TokenIssuance` - `token_ttl_hours` is not a positive, representable duration
    /// * `Hashing` - The placeholder hash could not be computed
    pub fn new(
        repository: Arc<AR>,
        authenticator: Arc<Authenticator>,
        token_ttl_hours: i64,
    ) -> Result<Self, AccountError> {
        let token_ttl = Duration::try_hours(token_ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                AccountError::TokenIssuance(format!(
                    "token lifetime out of range: {} hours",
                    token_ttl_hours
                ))
            })?;

        let dummy_hash = authenticator
            .hash_password(&AccountId::new().to_string())
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        Ok(Self {
            repository,
            authenticator,
            token_ttl,
            dummy_hash,
        })
    }

    async fn hash_password(&self, password: String) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AccountError::Unknown(e.to_string()))?
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }

    /// Any failure to verify counts as a mismatch.
    async fn password_matches(&self, password: String, stored_hash: String) -> bool {
        let authenticator = Arc::clone(&self.authenticator);

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await;

        match outcome {
            Ok(Ok(matched)) => matched,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Stored password hash could not be verified");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AccountError> {
        let password_hash = self.hash_password(command.password.into_inner()).await?;

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, "Account registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AccountError> {
        let account = self.repository.find_by_email(&command.email).await?;

        let stored_hash = account
            .as_ref()
            .map_or_else(|| self.dummy_hash.clone(), |a| a.password_hash.clone());
        let matched = self.password_matches(command.password, stored_hash).await;

        let account = match account {
            Some(account) if matched => account,
            _ => {
                tracing::debug!("Login rejected");
                return Err(AccountError::InvalidCredentials);
            }
        };

        let token = self
            .authenticator
            .issue_token(account.id, self.token_ttl)
            .map_err(|e| AccountError::TokenIssuance(e.to_string()))?;
        tracing::info!(account_id = %account.id, "Login succeeded");

        Ok(AccessToken::new(token))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Password;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET).unwrap())
    }

    fn service(repository: MockTestAccountRepository) -> AccountService<MockTestAccountRepository> {
        AccountService::new(Arc::new(repository), authenticator(), 24).unwrap()
    }

    fn stored_account(email: &str, password: &str) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: authenticator().hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn register_command(email: &str, password: &str) -> RegisterCommand {
        RegisterCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    #[test]
    fn test_new_rejects_unrepresentable_token_ttl() {
        for hours in [0, -1, i64::MAX] {
            let result =
                AccountService::new(Arc::new(MockTestAccountRepository::new()), authenticator(), hours);
            assert!(matches!(result, Err(AccountError::TokenIssuance(_))), "{hours}");
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "a@x.com"
                    && account.password_hash.starts_with("$argon2")
                    && account.password_hash != "longenough1"
            })
            .times(1)
            .returning(|account| Ok(account));

        let service = service(repository);

        let account = service
            .register(register_command("a@x.com", "longenough1"))
            .await
            .expect("Registration failed");

        assert_eq!(account.email.as_str(), "a@x.com");
        assert!(authenticator()
            .verify_password("longenough1", &account.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_create().times(1).returning(|account| {
            Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ))
        });

        let service = service(repository);

        let result = service
            .register(register_command("a@x.com", "longenough1"))
            .await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_database_error() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("connection reset".to_string())));

        let service = service(repository);

        let result = service
            .register(register_command("a@x.com", "longenough1"))
            .await;
        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestAccountRepository::new();
        let account = stored_account("a@x.com", "longenough1");
        let account_id = account.id;

        repository
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = service(repository);

        let token = service
            .login(LoginCommand::new(
                "a@x.com".to_string(),
                "longenough1".to_string(),
            ))
            .await
            .expect("Login failed");

        let claims = authenticator().validate_token(token.as_str()).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_are_identical() {
        let mut unknown_repository = MockTestAccountRepository::new();
        unknown_repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let mut known_repository = MockTestAccountRepository::new();
        let account = stored_account("a@x.com", "longenough1");
        known_repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let unknown = service(unknown_repository)
            .login(LoginCommand::new(
                "nobody@x.com".to_string(),
                "longenough1".to_string(),
            ))
            .await
            .unwrap_err();
        let wrong = service(known_repository)
            .login(LoginCommand::new(
                "a@x.com".to_string(),
                "wrongpassword".to_string(),
            ))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AccountError::InvalidCredentials));
        assert!(matches!(wrong, AccountError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_malformed_stored_hash() {
        let mut repository = MockTestAccountRepository::new();
        let mut account = stored_account("a@x.com", "longenough1");
        account.password_hash = "not-a-phc-string".to_string();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let result = service(repository)
            .login(LoginCommand::new(
                "a@x.com".to_string(),
                "longenough1".to_string(),
            ))
            .await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_database_error() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(AccountError::DatabaseError("timeout".to_string())));

        let result = service(repository)
            .login(LoginCommand::new(
                "a@x.com".to_string(),
                "longenough1".to_string(),
            ))
            .await;
        assert!(matches!(result, Err(AccountError::DatabaseError(_))));
    }
}
