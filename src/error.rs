use thiserror::Error;

/// The fixed set of failure kinds a caller can observe.
///
/// Each kind maps to a stable numeric code, see [`ErrorKind::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConnectionFail,
    SqlError,
    BeginError,
    CommitError,
    RollbackError,
}

impl ErrorKind {
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            ErrorKind::ConnectionFail => 500,
            ErrorKind::SqlError => 501,
            ErrorKind::BeginError => 502,
            ErrorKind::CommitError => 503,
            ErrorKind::RollbackError => 504,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::ConnectionFail => "failed to connect to database",
            ErrorKind::SqlError => "SQL execution failed",
            ErrorKind::BeginError => "failed to begin transaction",
            ErrorKind::CommitError => "failed to commit transaction",
            ErrorKind::RollbackError => "failed to roll back transaction",
        }
    }
}

#[derive(Debug, Error)]
pub enum SqlCrudError {
    #[error("failed to connect to database: {0}")]
    ConnectionFail(String),

    #[error("SQL execution failed: {0}")]
    SqlError(String),

    #[error("failed to begin transaction: {0}")]
    BeginError(String),

    #[error("failed to commit transaction: {0}")]
    CommitError(String),

    #[error("failed to roll back transaction: {0}")]
    RollbackError(String),
}

impl SqlCrudError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlCrudError::ConnectionFail(_) => ErrorKind::ConnectionFail,
            SqlCrudError::SqlError(_) => ErrorKind::SqlError,
            SqlCrudError::BeginError(_) => ErrorKind::BeginError,
            SqlCrudError::CommitError(_) => ErrorKind::CommitError,
            SqlCrudError::RollbackError(_) => ErrorKind::RollbackError,
        }
    }

    /// Numeric code (500-504) for this failure.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.kind().code()
    }

    /// Fixed, detail-free message for this failure's kind.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind().message()
    }

    /// The backend-supplied detail, without the kind prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            SqlCrudError::ConnectionFail(d)
            | SqlCrudError::SqlError(d)
            | SqlCrudError::BeginError(d)
            | SqlCrudError::CommitError(d)
            | SqlCrudError::RollbackError(d) => d,
        }
    }

    pub(crate) fn invalid_input(detail: &str) -> Self {
        SqlCrudError::SqlError(detail.to_string())
    }

    /// Re-tag an error under another kind, keeping its detail.
    pub(crate) fn retag(self, kind: ErrorKind) -> Self {
        let detail = match self {
            SqlCrudError::ConnectionFail(d)
            | SqlCrudError::SqlError(d)
            | SqlCrudError::BeginError(d)
            | SqlCrudError::CommitError(d)
            | SqlCrudError::RollbackError(d) => d,
        };
        match kind {
            ErrorKind::ConnectionFail => SqlCrudError::ConnectionFail(detail),
            ErrorKind::SqlError => SqlCrudError::SqlError(detail),
            ErrorKind::BeginError => SqlCrudError::BeginError(detail),
            ErrorKind::CommitError => SqlCrudError::CommitError(detail),
            ErrorKind::RollbackError => SqlCrudError::RollbackError(detail),
        }
    }
}

#[cfg(feature = "mysql")]
impl From<mysql_async::Error> for SqlCrudError {
    fn from(err: mysql_async::Error) -> Self {
        SqlCrudError::SqlError(err.to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for SqlCrudError {
    fn from(err: rusqlite::Error) -> Self {
        SqlCrudError::SqlError(err.to_string())
    }
}
