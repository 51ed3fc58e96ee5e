use std::fmt::Write;

use crate::types::RowValues;

/// String-literal escaping convention of the target engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Backslash escapes, as `mysql_real_escape_string` produces.
    Mysql,
    /// Standard SQL: quotes are doubled, backslash is an ordinary character.
    Sqlite,
}

impl Dialect {
    /// Escape `value` so it can sit between single quotes.
    #[must_use]
    pub fn escape_string(self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        match self {
            Dialect::Mysql => {
                for ch in value.chars() {
                    match ch {
                        '\0' => out.push_str("\\0"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '"' => out.push_str("\\\""),
                        '\x1a' => out.push_str("\\Z"),
                        _ => out.push(ch),
                    }
                }
            }
            Dialect::Sqlite => {
                for ch in value.chars() {
                    if ch == '\'' {
                        out.push('\'');
                    }
                    out.push(ch);
                }
            }
        }
        out
    }

    /// Render a value as a SQL literal.
    #[must_use]
    pub fn literal(self, value: &RowValues) -> String {
        match value {
            RowValues::Int(i) => i.to_string(),
            RowValues::Float(f) => f.to_string(),
            RowValues::Bool(b) => String::from(if *b { "1" } else { "0" }),
            RowValues::Null => "NULL".to_string(),
            RowValues::Text(s) => self.quote(s),
            RowValues::Timestamp(dt) => self.quote(&dt.format("%F %T%.f").to_string()),
            RowValues::JSON(v) => self.quote(&v.to_string()),
            RowValues::Blob(bytes) => {
                let mut out = String::with_capacity(bytes.len() * 2 + 3);
                out.push_str("X'");
                for b in bytes {
                    let _ = write!(out, "{b:02X}");
                }
                out.push('\'');
                out
            }
        }
    }

    fn quote(self, value: &str) -> String {
        format!("'{}'", self.escape_string(value))
    }
}

/// Backtick-quote an identifier, doubling any embedded backtick.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_escapes_like_real_escape_string() {
        let raw = "a'b\"c\\d\ne\rf\0g\x1ah";
        assert_eq!(
            Dialect::Mysql.escape_string(raw),
            "a\\'b\\\"c\\\\d\\ne\\rf\\0g\\Zh"
        );
    }

    #[test]
    fn sqlite_doubles_quotes_only() {
        assert_eq!(Dialect::Sqlite.escape_string("O'Brien \\"), "O''Brien \\");
    }

    #[test]
    fn quote_never_breaks_out() {
        let hostile = "x' OR '1'='1";
        assert_eq!(
            Dialect::Mysql.literal(&RowValues::Text(hostile.into())),
            "'x\\' OR \\'1\\'=\\'1'"
        );
        assert_eq!(
            Dialect::Sqlite.literal(&RowValues::Text(hostile.into())),
            "'x'' OR ''1''=''1'"
        );
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(Dialect::Mysql.literal(&RowValues::Int(-3)), "-3");
        assert_eq!(Dialect::Mysql.literal(&RowValues::Float(2.5)), "2.5");
        assert_eq!(Dialect::Mysql.literal(&RowValues::Bool(true)), "1");
        assert_eq!(Dialect::Mysql.literal(&RowValues::Null), "NULL");
        assert_eq!(Dialect::Sqlite.literal(&RowValues::Blob(vec![0xde, 0x01])), "X'DE01'");
    }

    #[test]
    fn identifiers_are_backticked() {
        assert_eq!(quote_ident("name"), "`name`");
        assert_eq!(quote_ident("we`ird"), "`we``ird`");
    }
}
