use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use store::{
    NewNote, NewUser, Note, NoteChanges, NoteStore, Role, StoreError, StoreResult, User,
    UserStore,
};
use uuid::Uuid;

/// Postgres-backed [`NoteStore`] and [`UserStore`].
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Full note row from the `notes` table.
#[derive(Debug, Clone, FromRow)]
struct NoteRow {
    id: Uuid,
    slug: String,
    title: String,
    content: String,
    password: Option<String>,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            slug: row.slug,
            title: row.title,
            content: row.content,
            password_hash: row.password,
            owner_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    role: String,
    login_method: String,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row.role.parse().map_err(StoreError::Backend)?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            login_method: row.login_method.into(),
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Map a sqlx error onto the store taxonomy. `entity` names what a missing
/// row is, `unique` what a unique violation collided on.
fn store_error(err: sqlx::Error, entity: &'static str, unique: &'static str) -> StoreError {
    match &err {
        sqlx::Error::RowNotFound => StoreError::NotFound(entity),
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(unique),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            tracing::error!(error = %err, "database unavailable");
            StoreError::Unavailable(err.to_string())
        }
        _ => {
            tracing::error!(error = %err, "database error");
            StoreError::Backend(err.to_string())
        }
    }
}

fn note_error(err: sqlx::Error) -> StoreError {
    store_error(err, "note", "slug")
}

fn user_error(err: sqlx::Error) -> StoreError {
    store_error(err, "user", "user")
}

impl NoteStore for PgStore {
    async fn insert(&self, note: NewNote) -> StoreResult<Note> {
        // A concurrent insert of the same slug fails on notes_slug_key here.
        let row: NoteRow = sqlx::query_as(
            r#"
            INSERT INTO notes (id, slug, title, content, password, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(note.slug.as_str())
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.password_hash)
        .bind(note.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(note_error)?;

        Ok(row.into())
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Note> {
        let row: NoteRow = sqlx::query_as("SELECT * FROM notes WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(note_error)?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Note> {
        let row: NoteRow = sqlx::query_as("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(note_error)?;
        Ok(row.into())
    }

    async fn update(&self, id: Uuid, changes: NoteChanges) -> StoreResult<Note> {
        // $4 says whether the password column is touched at all; $5 is the new
        // value, NULL when clearing.
        let password = changes.password_hash.into_update();
        let row: NoteRow = sqlx::query_as(
            r#"
            UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                password = CASE WHEN $4 THEN $5 ELSE password END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(password.is_some())
        .bind(password.flatten())
        .fetch_one(&self.pool)
        .await
        .map_err(note_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(note_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("note"));
        }
        Ok(())
    }

    async fn exists_by_slug(&self, slug: &str) -> StoreResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM notes WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .map_err(note_error)?;
        Ok(exists.0)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Note>> {
        let rows: Vec<NoteRow> = sqlx::query_as(
            "SELECT * FROM notes WHERE user_id = $1 ORDER BY updated_at DESC, id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(note_error)?;

        Ok(rows.into_iter().map(Note::from).collect())
    }
}

impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, role, login_method, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(user.login_method.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(user_error)?;

        row.try_into()
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(user_error)?;
        row.try_into()
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(user_error)?;
        row.try_into()
    }
}
