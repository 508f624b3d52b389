use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::session::errors::StoreError;
use crate::session::models::EmailAddress;
use crate::session::models::UserId;
use crate::session::models::UserRecord;
use crate::session::ports::UserDirectory;

/// Read-only view over the host application's `users` table.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Column names follow the host application's users schema.
const FIND_BY_EMAIL: &str = r#"
    SELECT id, email, password_hash, created_at, updated_at
    FROM users
    WHERE email = $1
"#;

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)
                .map_err(|e| StoreError::CorruptRecord(e.to_string()))?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(FIND_BY_EMAIL)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        row.map(UserRecord::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str) -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_query_selects_every_row_column() {
        for column in ["id", "email", "password_hash", "created_at", "updated_at"] {
            assert!(FIND_BY_EMAIL.contains(column), "missing column {}", column);
        }
        assert!(!FIND_BY_EMAIL.contains("hashed_password"));
    }

    #[test]
    fn test_row_maps_to_user_record() {
        let row = row("walt@breakingbad.com");
        let id = row.id;

        let user = UserRecord::try_from(row).unwrap();

        assert_eq!(user.id, UserId(id));
        assert_eq!(user.email.as_str(), "walt@breakingbad.com");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_row_with_invalid_email_is_corrupt() {
        assert!(matches!(
            UserRecord::try_from(row("not-an-email")),
            Err(StoreError::CorruptRecord(_))
        ));
    }
}
