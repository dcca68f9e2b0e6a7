//! In-process `UserRepository` used when no database is configured.
//!
//! Accounts live in a mutex-guarded vector kept in insertion order, which is
//! also the listing order. Nothing survives a restart.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, UserProfileUpdate};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_hash: PasswordHash,
}

/// Volatile user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Account>>, UserPersistenceError> {
        self.accounts
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store is poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.user.id() == id)
            .map(|account| account.user.clone()))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts.iter().map(|account| account.user.clone()).collect())
    }

    async fn update_profile(
        &self,
        update: &UserProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut accounts = self.lock()?;
        let Some(account) = accounts.iter_mut().find(|account| {
            account.user.id() == &update.id && update.matches_email(account.user.email().as_ref())
        }) else {
            return Ok(None);
        };
        account.user = account.user.clone().with_profile(update.profile.clone());
        Ok(Some(account.user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| account.user.email().as_ref() == email)
            .map(|account| StoredCredentials {
                user_id: *account.user.id(),
                password_hash: account.password_hash.clone(),
            }))
    }

    async fn insert_if_absent(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.lock()?;
        let taken = accounts
            .iter()
            .any(|account| account.user.email() == user.email() || account.user.id() == user.id());
        if taken {
            return Ok(false);
        }
        accounts.push(Account {
            user: user.clone(),
            password_hash: password_hash.clone(),
        });
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, Role, UserProfile};
    use rstest::{fixture, rstest};

    fn account(email: &str) -> User {
        User::new(
            UserId::random(),
            EmailAddress::new(email).expect("email"),
            UserProfile {
                first_name: "First".to_owned(),
                last_name: "Last".to_owned(),
                about: String::new(),
            },
            [Role::User],
        )
    }

    #[fixture]
    fn hash() -> PasswordHash {
        PasswordHash::from_stored("$2b$04$placeholderplaceholderplaceholderplacehold")
    }

    #[rstest]
    #[tokio::test]
    async fn lists_in_insertion_order(hash: PasswordHash) {
        let repo = InMemoryUserRepository::new();
        let first = account("zed@example.com");
        let second = account("amy@example.com");
        assert!(repo.insert_if_absent(&first, &hash).await.expect("insert"));
        assert!(repo.insert_if_absent(&second, &hash).await.expect("insert"));

        let users = repo.list_all().await.expect("list");
        assert_eq!(users, vec![first, second]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_skips_taken_email(hash: PasswordHash) {
        let repo = InMemoryUserRepository::new();
        let original = account("ada@example.com");
        repo.insert_if_absent(&original, &hash).await.expect("insert");

        let duplicate = account("ada@example.com");
        assert!(!repo.insert_if_absent(&duplicate, &hash).await.expect("insert"));
        assert_eq!(repo.list_all().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_matches_id_and_email_ignoring_case(hash: PasswordHash) {
        let repo = InMemoryUserRepository::new();
        let user = account("ada@example.com");
        repo.insert_if_absent(&user, &hash).await.expect("insert");
        let profile = UserProfile {
            first_name: "Augusta".to_owned(),
            last_name: "King".to_owned(),
            about: "Countess".to_owned(),
        };

        let wrong_email = UserProfileUpdate {
            id: *user.id(),
            email: "other@example.com".to_owned(),
            profile: profile.clone(),
        };
        assert_eq!(repo.update_profile(&wrong_email).await.expect("update"), None);

        let matching = UserProfileUpdate {
            id: *user.id(),
            email: "ADA@Example.com".to_owned(),
            profile: profile.clone(),
        };
        let updated = repo
            .update_profile(&matching)
            .await
            .expect("update")
            .expect("row matched");
        assert_eq!(updated.profile(), &profile);
        let stored = repo
            .find_by_id(user.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.profile(), &profile);
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_are_found_by_email(hash: PasswordHash) {
        let repo = InMemoryUserRepository::new();
        let user = account("ada@example.com");
        repo.insert_if_absent(&user, &hash).await.expect("insert");

        let stored = repo
            .find_credentials("ada@example.com")
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.user_id, *user.id());
        assert!(repo
            .find_credentials("nobody@example.com")
            .await
            .expect("lookup")
            .is_none());
    }
}
