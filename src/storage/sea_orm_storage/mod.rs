//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod branches;
mod campaigns;
mod classes;
mod dashboard;
mod enrollments;
mod exams;
mod fee_structures;
mod invoices;
mod marks;
mod messages;
mod payments;
mod sections;
mod students;
mod subjects;
mod teachers;
mod tenants;
mod timetables;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::models::{ListQuery, PaginatedResponse};
use crate::storage::SystemStorage;
use async_trait::async_trait;
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, Order, PaginatorTrait, QueryOrder, Select,
};
use std::time::Duration;
use tracing::info;
use ts_rs::TS;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 使用已建立的连接并执行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("Migration failed: {e}")))?;
        Ok(Self { db })
    }

    /// 单连接内存数据库
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite connect failed: {e}")))?;
        Self::from_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite connect failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("Cannot connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite::memory:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

#[async_trait]
impl SystemStorage for SeaOrmStorage {
    async fn ping(&self) -> bool {
        self.db.ping().await.is_ok()
    }
}

/// 当前秒级时间戳
pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

/// 数据库错误附带上下文
///
/// 唯一约束与外键冲突保留为 Conflict，其余归为数据库操作错误。
pub(crate) fn db_error(context: &'static str) -> impl Fn(DbErr) -> SchoolError {
    move |err| match SchoolError::from(err) {
        SchoolError::Conflict(msg) => SchoolError::Conflict(msg),
        other => SchoolError::database_operation(format!("{context}: {}", other.message())),
    }
}

/// 按列表参数排序；未知字段回退为 created_at、id 降序
pub(crate) fn apply_sort<E>(
    select: Select<E>,
    list: &ListQuery,
    resolve: impl Fn(&str) -> Option<E::Column>,
    id: E::Column,
    created_at: E::Column,
) -> Select<E>
where
    E: EntityTrait,
{
    match list.sort_field().and_then(resolve) {
        Some(column) => {
            let order = if list.is_ascending() {
                Order::Asc
            } else {
                Order::Desc
            };
            select.order_by(column, order.clone()).order_by(id, order)
        }
        None => select.order_by_desc(created_at).order_by_desc(id),
    }
}

/// 分页查询，返回当前页模型以及 (page, size, total)
pub(crate) async fn fetch_page<'db, C, E, M>(
    db: &'db C,
    select: Select<E>,
    list: &ListQuery,
    context: &'static str,
) -> Result<(Vec<M>, u64, u64, u64)>
where
    C: ConnectionTrait,
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'db,
{
    let size = list.page_size();
    let page = list.page_for(size);

    let paginator = select.paginate(db, size);
    let total = paginator.num_items().await.map_err(db_error(context))?;
    let models = paginator
        .fetch_page(page - 1)
        .await
        .map_err(db_error(context))?;

    Ok((models, page, size, total))
}

/// 分页查询并转换为业务实体
pub(crate) async fn paginate<'db, C, E, M, T>(
    db: &'db C,
    select: Select<E>,
    list: &ListQuery,
    context: &'static str,
    convert: impl Fn(M) -> T,
) -> Result<PaginatedResponse<T>>
where
    C: ConnectionTrait,
    E: EntityTrait<Model = M>,
    M: FromQueryResult + Sized + Send + Sync + 'db,
    T: TS,
{
    let (models, page, size, total) = fetch_page(db, select, list, context).await?;

    Ok(PaginatedResponse::new(
        models.into_iter().map(convert).collect(),
        page,
        size,
        total,
    ))
}

#[cfg(test)]
mod helper_tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_db_error_keeps_context() {
        let err = db_error("Failed to load student")(DbErr::Custom("boom".into()));
        assert!(matches!(err, SchoolError::DatabaseOperation(_)));
        assert!(err.message().starts_with("Failed to load student"));
    }
}
