//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordHash, Role, User, UserId, UserProfile, UserProfileUpdate,
};

use super::models::{CredentialsRow, NewUserRow, UserProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::user_persistence_error_mapping::{map_diesel_error, map_pool_error};

// PostgreSQL `lower(text)`.
define_sql_function! {
    fn lower(value: Text) -> Text;
}

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain user.
///
/// Unknown role labels are dropped with a warning.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let UserRow {
        id,
        email,
        first_name,
        last_name,
        about,
        roles,
    } = row;
    let email = EmailAddress::new(&email).map_err(|err| {
        UserPersistenceError::query(format!("stored email for {id} is invalid: {err}"))
    })?;
    let roles: Vec<Role> = roles
        .iter()
        .filter_map(|label| match label.parse::<Role>() {
            Ok(role) => Some(role),
            Err(_) => {
                warn!(user_id = %id, label = %label, "ignoring unknown role label");
                None
            }
        })
        .collect();
    Ok(User::new(
        UserId::from_uuid(id),
        email,
        UserProfile {
            first_name,
            last_name,
            about,
        },
        roles,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::email.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn update_profile(
        &self,
        update: &UserProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserProfileChangeset {
            first_name: &update.profile.first_name,
            last_name: &update.profile.last_name,
            about: &update.profile.about,
            updated_at: Utc::now(),
        };
        let row = diesel::update(
            users::table
                .filter(users::id.eq(update.id.as_uuid()))
                .filter(lower(users::email).eq(lower(update.email.as_str()))),
        )
        .set(&changes)
        .returning(UserRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::email.eq(email))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(|row| StoredCredentials {
            user_id: UserId::from_uuid(row.id),
            password_hash: PasswordHash::from_stored(row.password_hash),
        }))
    }

    async fn insert_if_absent(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let profile = user.profile();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            first_name: &profile.first_name,
            last_name: &profile.last_name,
            about: &profile.about,
            roles: user.roles().iter().map(|role| role.as_str().to_owned()).collect(),
            password_hash: password_hash.as_str(),
        };
        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::email)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(inserted == 1)
    }
}
