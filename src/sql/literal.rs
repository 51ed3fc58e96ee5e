use super::escape::Dialect;
use crate::types::RowValues;

#[derive(Clone, Copy)]
enum State {
    Normal,
    Backtick,
    SingleQuoted,
    DoubleQuoted,
}

/// Replace each `?` outside quoted regions with the next parameter's literal.
///
/// Placeholders beyond the supplied parameters are left as `?`.
pub(super) fn inline_params(sql: &str, params: &[RowValues], dialect: Dialect) -> String {
    let mut out = String::with_capacity(sql.len() + params.len() * 8);
    let mut state = State::Normal;
    let mut next = params.iter();

    for ch in sql.chars() {
        match state {
            State::Normal => match ch {
                '`' => state = State::Backtick,
                '\'' => state = State::SingleQuoted,
                '"' => state = State::DoubleQuoted,
                '?' => {
                    if let Some(value) = next.next() {
                        out.push_str(&dialect.literal(value));
                        continue;
                    }
                }
                _ => {}
            },
            // A doubled quote closes and immediately reopens, which lands in the same state.
            State::Backtick => {
                if ch == '`' {
                    state = State::Normal;
                }
            }
            State::SingleQuoted => {
                if ch == '\'' {
                    state = State::Normal;
                }
            }
            State::DoubleQuoted => {
                if ch == '"' {
                    state = State::Normal;
                }
            }
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_placeholders_in_identifiers_and_literals() {
        let sql = "SELECT `a?` FROM t WHERE b = '?' AND c = ? AND d = ?";
        let params = [RowValues::Int(1), RowValues::Text("x".into())];
        assert_eq!(
            inline_params(sql, &params, Dialect::Mysql),
            "SELECT `a?` FROM t WHERE b = '?' AND c = 1 AND d = 'x'"
        );
    }

    #[test]
    fn missing_params_stay_as_placeholders() {
        assert_eq!(
            inline_params("a = ? AND b = ?", &[RowValues::Int(5)], Dialect::Sqlite),
            "a = 5 AND b = ?"
        );
    }
}
