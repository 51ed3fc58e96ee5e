use mysql_async::{Conn, OptsBuilder};
use serde::Deserialize;

use crate::connection::CrudConnection;
use crate::error::{ErrorKind, SqlCrudError};

use super::connection::MysqlConnection;

pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_CHARSET: &str = "utf8mb4";

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

/// Options for opening a `MySQL` session.
#[derive(Clone, Deserialize)]
pub struct MysqlOptions {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl MysqlOptions {
    #[must_use]
    pub fn new(host: String, user: String, password: String, database: String) -> Self {
        Self {
            host,
            user,
            password,
            database,
            port: DEFAULT_PORT,
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}

// Hand-written so the password never reaches logs.
impl std::fmt::Debug for MysqlOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MysqlOptions")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .field("charset", &self.charset)
            .finish()
    }
}

/// Fluent builder for `MySQL` options.
#[derive(Debug, Clone)]
pub struct MysqlOptionsBuilder {
    opts: MysqlOptions,
}

impl MysqlOptionsBuilder {
    #[must_use]
    pub fn new(host: String, user: String, password: String, database: String) -> Self {
        Self {
            opts: MysqlOptions::new(host, user, password, database),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = port;
        self
    }

    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.opts.charset = charset.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> MysqlOptions {
        self.opts
    }

    /// Open the session and wrap it in a `CrudConnection`.
    ///
    /// # Errors
    ///
    /// Returns `SqlCrudError::ConnectionFail` if the server is unreachable, rejects the
    /// credentials, or the charset cannot be applied.
    pub async fn connect(self) -> Result<CrudConnection, SqlCrudError> {
        CrudConnection::new_mysql(self.finish()).await
    }
}

/// Charset names go into `SET NAMES` unquoted.
fn validate_charset(charset: &str) -> Result<(), SqlCrudError> {
    if !charset.is_empty()
        && charset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(SqlCrudError::ConnectionFail(format!(
            "invalid charset name: {charset:?}"
        )))
    }
}

impl CrudConnection {
    #[must_use]
    pub fn mysql_builder(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> MysqlOptionsBuilder {
        MysqlOptionsBuilder::new(host.into(), user.into(), password.into(), database.into())
    }

    /// Open a `MySQL` session and apply the charset.
    ///
    /// # Errors
    /// Returns `SqlCrudError::ConnectionFail` if connecting or `SET NAMES` fails.
    pub async fn new_mysql(opts: MysqlOptions) -> Result<Self, SqlCrudError> {
        validate_charset(&opts.charset)?;
        tracing::debug!(
            backend = "mysql",
            host = %opts.host,
            port = opts.port,
            database = %opts.database,
            user = %opts.user,
            "opening connection"
        );

        let builder = OptsBuilder::default()
            .ip_or_hostname(opts.host)
            .tcp_port(opts.port)
            .user(Some(opts.user))
            .pass(Some(opts.password))
            .db_name(Some(opts.database));

        let conn = Conn::new(builder)
            .await
            .map_err(|e| SqlCrudError::ConnectionFail(e.to_string()))?;
        let mut conn = MysqlConnection::new(conn);
        conn.set_names(&opts.charset)
            .await
            .map_err(|e| e.retag(ErrorKind::ConnectionFail))?;
        Ok(CrudConnection::Mysql(conn))
    }
}
