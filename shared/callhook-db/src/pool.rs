//! Connection pool for the call event database

use std::fmt;
use std::time::Instant;

use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, PoolError, RecyclingMethod};
use tokio_postgres::NoTls;
use tracing::{debug, info};

use crate::{DbError, Result};

/// Pool configuration
///
/// `url` wins when set; otherwise the connection is assembled from the
/// individual parts through the driver's config builder, so passwords may
/// contain URL-reserved characters.
#[derive(Clone)]
pub struct PoolConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: Option<String>,
    pub max_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            dbname: "calls".to_string(),
            user: "callhook".to_string(),
            password: None,
            max_size: 16,
        }
    }
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_size", &self.max_size)
            .finish()
    }
}

impl PoolConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "DB_PORT")?.unwrap_or(defaults.port),
            dbname: lookup("DB_NAME").unwrap_or(defaults.dbname),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD"),
            max_size: parse_var(&lookup, "DB_POOL_SIZE")?.unwrap_or(defaults.max_size),
        })
    }

    /// Driver-level connection settings.
    pub fn pg_config(&self) -> Result<tokio_postgres::Config> {
        if let Some(url) = &self.url {
            return url
                .parse()
                .map_err(|e| DbError::Configuration(format!("Invalid DATABASE_URL: {}", e)));
        }

        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.dbname)
            .user(&self.user)
            .application_name("callhook");
        if let Some(password) = &self.password {
            config.password(password);
        }
        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| DbError::Configuration(format!("Invalid {}: {}", key, e)))
        })
        .transpose()
}

/// Process-wide connection pool
///
/// Building the pool does not connect; connections are opened on first
/// checkout, so an unreachable database surfaces per operation.
#[derive(Clone)]
pub struct DbPool {
    pool: Pool,
}

impl DbPool {
    /// Create a new connection pool
    pub fn new(config: &PoolConfig) -> Result<Self> {
        info!(
            max_size = config.max_size,
            host = %config.host,
            dbname = %config.dbname,
            from_url = config.url.is_some(),
            "Creating database connection pool"
        );

        let pg_config = config.pg_config()?;

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(pg_config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(config.max_size)
            .build()
            .map_err(|e| DbError::Pool(e.to_string()))?;

        debug!("Database pool created successfully");

        Ok(Self { pool })
    }

    /// Check out a connection; it returns to the pool when dropped.
    pub async fn get(&self) -> Result<Object> {
        self.pool.get().await.map_err(|e| match e {
            PoolError::Backend(err) => DbError::Connection(err),
            other => DbError::Pool(other.to_string()),
        })
    }

    /// Round-trip a trivial query, returning the latency on success.
    pub async fn ping(&self) -> Result<u64> {
        let started = Instant::now();
        let conn = self.get().await?;
        conn.simple_query("SELECT 1").await.map_err(DbError::Query)?;
        Ok(started.elapsed().as_millis() as u64)
    }
}
