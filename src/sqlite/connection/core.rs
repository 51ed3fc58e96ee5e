use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::SqlCrudError;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// Single `SQLite` session. Blocking rusqlite calls run on the blocking pool.
pub struct SqliteConnection {
    pub(crate) conn: SharedSqliteConnection,
    pub(crate) in_transaction: bool,
}

impl SqliteConnection {
    /// Open (or create) the database at `db_path`.
    ///
    /// # Errors
    /// Returns `SqlCrudError::ConnectionFail` if rusqlite cannot open the file.
    pub async fn open(db_path: String) -> Result<Self, SqlCrudError> {
        let conn = tokio::task::spawn_blocking(move || rusqlite::Connection::open(&db_path))
            .await
            .map_err(|e| {
                SqlCrudError::ConnectionFail(format!("sqlite spawn_blocking join error: {e}"))
            })?
            .map_err(|e| SqlCrudError::ConnectionFail(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            in_transaction: false,
        })
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    pub(crate) fn conn_handle(&self) -> SharedSqliteConnection {
        Arc::clone(&self.conn)
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("in_transaction", &self.in_transaction)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, SqlCrudError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, SqlCrudError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| SqlCrudError::SqlError(format!("sqlite spawn_blocking join error: {e}")))?
}
