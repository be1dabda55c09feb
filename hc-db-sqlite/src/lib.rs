#[macro_use]
extern crate diesel;

use anyhow::Result as Fallible;
use diesel::{r2d2, result::Error as DieselError, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use hc_core::{repositories as repo, usecases as uc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{cell::RefCell, sync::Arc};

mod models;
mod repo_impl;
mod schema;
mod util;

#[cfg(test)]
mod tests;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

/// How often a transaction is attempted if the database is busy.
const MAX_TRANSACTION_ATTEMPTS: usize = 2;

pub struct DbReadOnly<'a> {
    _locked_pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

impl<'a> DbReadOnly<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.read();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read-only access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }

    /// Runs read-only use cases on a consistent snapshot.
    pub fn transaction<T, F, E>(&self, f: F) -> Result<T, uc::Error>
    where
        F: FnMut(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        run_transaction(&mut self.conn.borrow_mut(), f)
    }
}

pub struct DbReadWrite<'a> {
    _locked_pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

impl<'a> DbReadWrite<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.write();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read/write access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }

    /// Runs `f` within a single transaction.
    ///
    /// If SQLite reports that the database is busy the whole
    /// transaction is rolled back and executed once more.
    pub fn transaction<T, F, E>(&mut self, f: F) -> Result<T, uc::Error>
    where
        F: FnMut(&DbConnection) -> Result<T, E>,
        E: Into<uc::Error>,
    {
        run_transaction(&mut self.conn.borrow_mut(), f)
    }
}

/// A connection within a transaction.
///
/// All repositories are implemented for this type.
pub struct DbConnection<'a> {
    conn: RefCell<&'a mut SqliteConnection>,
}

impl<'a> DbConnection<'a> {
    fn new(conn: &'a mut SqliteConnection) -> Self {
        Self {
            conn: RefCell::new(conn),
        }
    }
}

fn run_transaction<T, F, E>(conn: &mut SqliteConnection, mut f: F) -> Result<T, uc::Error>
where
    F: FnMut(&DbConnection) -> Result<T, E>,
    E: Into<uc::Error>,
{
    let mut attempt = 1;
    loop {
        match try_transaction(conn, &mut f) {
            Err(err) if attempt < MAX_TRANSACTION_ATTEMPTS && is_busy(&err) => {
                log::warn!("Database is busy, retrying transaction: {err}");
                attempt += 1;
            }
            res => return res,
        }
    }
}

fn try_transaction<T, F, E>(conn: &mut SqliteConnection, f: &mut F) -> Result<T, uc::Error>
where
    F: FnMut(&DbConnection) -> Result<T, E>,
    E: Into<uc::Error>,
{
    use diesel::Connection as _;
    let mut usecase_error = None;
    // The use case error is stored outside of the
    // transaction closure, because diesel only
    // accepts its own error type for a rollback.
    conn.transaction(|conn| {
        f(&DbConnection::new(conn))
            .map_err(Into::into)
            .map_err(|err| {
                usecase_error = Some(err);
                DieselError::RollbackTransaction
            })
    })
    .map_err(|err| {
        if let Some(usecase_error) = usecase_error {
            debug_assert!(matches!(err, DieselError::RollbackTransaction));
            usecase_error
        } else {
            uc::Error::Repo(repo_impl::from_diesel_err(err))
        }
    })
}

fn is_busy(err: &uc::Error) -> bool {
    let uc::Error::Repo(repo::Error::Other(err)) = err else {
        return false;
    };
    match err.downcast_ref::<DieselError>() {
        Some(DieselError::DatabaseError(_, info)) => {
            let message = info.message();
            message.contains("database is locked") || message.contains("busy")
        }
        _ => false,
    }
}

#[derive(Clone)]
pub struct Connections {
    // Only a single connection with write access will be
    // handed out at a time from the pool. Multiple read
    // connections can be accessed concurrently.
    pool: SharedConnectionPool,
}

/// Configure the database engine
///
/// Cascading deletes of owned entities rely on enabled
/// foreign key constraints.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    use diesel::connection::SimpleConnection as _;
    connection.batch_execute(r#"
PRAGMA journal_mode = WAL;        -- better write-concurrency
PRAGMA synchronous = NORMAL;      -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA wal_autocheckpoint = 1000; -- write WAL changes back every 1000 pages
PRAGMA busy_timeout = 5000;       -- wait for locks held by other processes
PRAGMA secure_delete = 0;         -- avoid some disk I/O
PRAGMA foreign_keys = 1;          -- check foreign key constraints
PRAGMA defer_foreign_keys = 1;    -- delay enforcement of foreign key constraints until commit
PRAGMA recursive_triggers = 1;    -- for recursive ON CASCADE DELETE actions
PRAGMA encoding = 'UTF-8';
"#)?;
    Ok(())
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        initialize_database(conn).map_err(|err| {
            log::error!("Failed to initialize database connection: {err}");
            r2d2::Error::QueryError(DieselError::QueryBuilderError(err.into()))
        })
    }
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // Establish a test connection before creating the connection pool to fail early.
        use diesel::Connection as _;
        let _ = diesel::SqliteConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let pool = ConnectionPool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer))
            .build(manager)?;
        Ok(Self::new(pool))
    }

    fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn shared(&self) -> Fallible<DbReadOnly> {
        DbReadOnly::try_new(&self.pool)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite> {
        DbReadWrite::try_new(&self.pool)
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    conn.conn
        .borrow_mut()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to run database migrations: {err}"))?;
    Ok(())
}
