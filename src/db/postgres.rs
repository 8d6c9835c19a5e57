use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    types::Json,
    PgPool,
};

use super::{ChatMessage, Database, Session, User};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let mut options =
            PgConnectOptions::from_str(&config.database_url).context("parse DATABASE_URL")?;
        if let Some(name) = &config.database_name {
            options = options.database(name);
        }
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Database for PgDatabase {
    async fn find_user_by_id(&self, id: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, picture, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, picture, is_admin, created_at
            FROM users
            WHERE email = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_user(&self, user: &User) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO users (id, email, name, picture, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.picture)
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .context("insert user")?;
        Ok(res.rows_affected() == 1)
    }

    async fn set_admin(&self, id: &str) -> anyhow::Result<bool> {
        // rows_affected counts matched rows here, so an existing admin still reports 1
        let res = sqlx::query(r#"UPDATE users SET is_admin = TRUE WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("set admin")?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_session(&self, session: &Session) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_token, user_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (session_token) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                expires_at = EXCLUDED.expires_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(&session.session_token)
        .bind(&session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .context("insert session")?;
        Ok(())
    }

    async fn find_session(&self, token: &str) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT session_token, user_id, expires_at, created_at
            FROM sessions
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    async fn delete_session(&self, token: &str) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM sessions WHERE session_token = $1"#)
            .bind(token)
            .execute(&self.pool)
            .await
            .context("delete session")?;
        Ok(())
    }

    async fn insert_chat_message(&self, message: &ChatMessage) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_history (id, user_id, query, response, "timestamp")
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&message.id)
        .bind(&message.user_id)
        .bind(&message.query)
        .bind(&message.response)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await
        .context("insert chat message")?;
        Ok(())
    }

    async fn list_chat_messages(
        &self,
        user_id: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<ChatMessage>> {
        let rows = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, user_id, query, response, "timestamp"
            FROM chat_history
            WHERE ($1::text IS NULL OR user_id = $1)
            ORDER BY "timestamp" DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_chat_message(&self, id: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM chat_history WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete chat message")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_documents(
        &self,
        collection: &str,
        filter: Option<(&str, &str)>,
        limit: i64,
    ) -> anyhow::Result<Vec<Value>> {
        let (field, value) = filter.unzip();
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT doc
            FROM documents
            WHERE collection = $1
              AND ($2::text IS NULL OR doc ->> $2 = $3)
            ORDER BY seq ASC
            LIMIT $4
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_document(&self, collection: &str, id: &str) -> anyhow::Result<Option<Value>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            r#"SELECT doc FROM documents WHERE collection = $1 AND id = $2"#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|Json(doc)| doc))
    }

    async fn insert_document(
        &self,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> anyhow::Result<()> {
        sqlx::query(r#"INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)"#)
            .bind(collection)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await
            .with_context(|| format!("insert into {collection}"))?;
        Ok(())
    }

    async fn replace_document(
        &self,
        collection: &str,
        id: &str,
        doc: &Value,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"UPDATE documents SET doc = $3 WHERE collection = $1 AND id = $2"#)
            .bind(collection)
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await
            .with_context(|| format!("update {collection}/{id}"))?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> anyhow::Result<bool> {
        let res = sqlx::query(r#"DELETE FROM documents WHERE collection = $1 AND id = $2"#)
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("delete {collection}/{id}"))?;
        Ok(res.rows_affected() > 0)
    }
}
