//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Identifiers come from the `BIGSERIAL` sequence on insert. `save` is an
//! id-keyed upsert so it overwrites every column of an existing row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    debug!(%error, "user repository pool checkout failed");
    UserPersistenceError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand,
            _,
        ) => UserPersistenceError::connection(error.to_string()),
        other => UserPersistenceError::query(other.to_string()),
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(User::from))
    }

    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(UserRow::from(user))
            .on_conflict(users::id)
            .do_update()
            .set((
                users::name.eq(excluded(users::name)),
                users::email.eq(excluded(users::email)),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for error mapping and row conversion; queries run
    //! against a live database in deployment only.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out waiting for connection"));
        assert_eq!(
            error,
            UserPersistenceError::connection("timed out waiting for connection")
        );
    }

    #[rstest]
    #[case(DatabaseErrorKind::ClosedConnection, "connection")]
    #[case(DatabaseErrorKind::UnableToSendCommand, "connection")]
    #[case(DatabaseErrorKind::UniqueViolation, "query")]
    fn database_errors_map_by_kind(#[case] kind: DatabaseErrorKind, #[case] expected: &str) {
        let error = map_diesel_error(DieselError::DatabaseError(
            kind,
            Box::new("server closed the connection".to_owned()),
        ));
        assert_eq!(error.kind(), expected);
        assert!(error.to_string().contains("server closed the connection"));
    }

    #[rstest]
    fn other_diesel_errors_map_to_query_errors() {
        let error = map_diesel_error(DieselError::NotFound);
        assert_eq!(error.kind(), "query");
    }

    #[rstest]
    fn rows_convert_to_users_and_back() {
        let row = UserRow {
            id: 9,
            name: "Alice123".to_owned(),
            email: "a@b.co".to_owned(),
        };
        let user = User::from(row.clone());
        assert_eq!(user, User::new(UserId::new(9), "Alice123", "a@b.co"));
        assert_eq!(UserRow::from(&user), row);
    }

    #[rstest]
    fn new_rows_borrow_user_fields() {
        let new_user = NewUser::new("Alice123", "a@b.co");
        let row = NewUserRow::from(&new_user);
        assert_eq!((row.name, row.email), ("Alice123", "a@b.co"));
    }
}
