use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PublicId;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserRepositoryError;

const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    public_id: String,
    email: String,
    name: String,
    password_hash: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserRepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |e: String| UserRepositoryError::Database(format!("user {}: {}", id, e));
        Ok(User {
            id,
            public_id: PublicId::from_string(&row.public_id).map_err(|e| corrupt(e.to_string()))?,
            email: EmailAddress::new(row.email).map_err(|e| corrupt(e.to_string()))?,
            name: DisplayName::new(row.name).map_err(|e| corrupt(e.to_string()))?,
            password_hash: row.password_hash,
            avatar_url: AvatarUrl::parse_optional(row.avatar_url)
                .map_err(|e| corrupt(e.to_string()))?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn storage_error(err: sqlx::Error) -> UserRepositoryError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => UserRepositoryError::Unavailable(err.to_string()),
        other => UserRepositoryError::Database(other.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (public_id, email, name, password_hash, avatar_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, public_id, email, name, password_hash, avatar_url, created_at, updated_at
            "#,
        )
        .bind(user.public_id.as_str())
        .bind(user.email.as_str())
        .bind(user.name.as_str())
        .bind(&user.password_hash)
        .bind(user.avatar_url.as_ref().map(AvatarUrl::as_str))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_CONSTRAINT) {
                    return UserRepositoryError::DuplicateEmail(user.email.as_str().to_string());
                }
            }
            storage_error(e)
        })?;

        row.try_into()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, public_id, email, name, password_hash, avatar_url, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> Result<Option<User>, UserRepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, public_id, email, name, password_hash, avatar_url, created_at, updated_at
            FROM users
            WHERE public_id = $1
            "#,
        )
        .bind(public_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(User::try_from).transpose()
    }
}
