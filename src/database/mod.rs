// region:    --- Imports
use crate::config::DatabaseSettings;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use tracing::info;
// endregion: --- Imports

/// 스키마 초기화 시 여러 인스턴스가 동시에 DDL 을 실행하지 않도록 잡는 advisory lock 키
const SCHEMA_LOCK_KEY: i64 = 0x6e61_6e75_6d69;

pub struct DatabaseManager {
    pub pool: Arc<PgPool>,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    pub async fn new(settings: &DatabaseSettings) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// 데이터베이스 초기화 (멱등)
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT pg_advisory_lock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        let result = async {
            // 00-create-schema.sql 실행
            let create_schema_sql = include_str!("../../sql/00-create-schema.sql");
            Self::execute_multi_query(&mut *conn, create_schema_sql).await?;

            // 01-seed-data.sql 실행
            let seed_sql = include_str!("../../sql/01-seed-data.sql");
            Self::execute_multi_query(&mut *conn, seed_sql).await
        }
        .await;

        sqlx::query("SELECT pg_advisory_unlock($1)")
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *conn)
            .await?;

        info!("{:<12} --> 스키마 초기화 완료", "Database");
        result
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(
        conn: &mut sqlx::PgConnection,
        sql: &str,
    ) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = query.trim();
            if !query.is_empty() {
                sqlx::query(query).execute(&mut *conn).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
