use super::clause::{Columns, OrderBy, build_columns, build_order_by, join_idents};
use super::data::RowData;
use super::escape::quote_ident;
use super::filter::{Filter, build_where};
use super::{Statement, join_clauses};

/// `LIMIT offset,count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: u64,
    pub count: u64,
}

impl Limit {
    /// 1-based page number to offset. `None` unless both `page` and `page_size` are positive.
    #[must_use]
    pub fn from_page(page: u64, page_size: u64) -> Option<Self> {
        if page == 0 || page_size == 0 {
            return None;
        }
        Some(Self {
            offset: (page - 1).saturating_mul(page_size),
            count: page_size,
        })
    }

    fn render(self) -> String {
        format!("LIMIT {},{}", self.offset, self.count)
    }
}

/// `SELECT <cols> FROM t [WHERE ..] [ORDER BY ..] [LIMIT o,n]`
#[must_use]
pub fn build_select(
    table: &str,
    filter: &Filter,
    limit: Option<Limit>,
    columns: &Columns,
    order: &OrderBy,
) -> Statement {
    let head = format!("SELECT {} FROM {}", build_columns(columns), quote_ident(table));
    let where_clause = build_where(filter);
    let order_clause = build_order_by(order);
    let limit_clause = limit.map(Limit::render).unwrap_or_default();
    Statement::new(
        join_clauses([
            head.as_str(),
            where_clause.sql.as_str(),
            order_clause.as_str(),
            limit_clause.as_str(),
        ]),
        where_clause.params,
    )
}

/// ``SELECT count(*) AS `count` FROM t [WHERE ..]``
#[must_use]
pub fn build_count(table: &str, filter: &Filter) -> Statement {
    let head = format!("SELECT count(*) AS `count` FROM {}", quote_ident(table));
    let where_clause = build_where(filter);
    Statement::new(
        join_clauses([head.as_str(), where_clause.sql.as_str()]),
        where_clause.params,
    )
}

/// `INSERT INTO t (cols) VALUES (?,..)`
#[must_use]
pub fn build_insert(table: &str, data: &RowData) -> Statement {
    let columns = join_idents(&data.field_names());
    let marks = vec!["?"; data.len()].join(",");
    Statement::new(
        format!(
            "INSERT INTO {} ({columns}) VALUES ({marks})",
            quote_ident(table)
        ),
        data.values(),
    )
}

/// `UPDATE t SET a = ?,b = ? [WHERE ..]`; SET values bind before WHERE values.
#[must_use]
pub fn build_update(table: &str, filter: &Filter, data: &RowData) -> Statement {
    let assignments: Vec<String> = data
        .iter()
        .map(|(field, _)| format!("{} = ?", quote_ident(field)))
        .collect();
    let head = format!("UPDATE {} SET {}", quote_ident(table), assignments.join(","));
    let where_clause = build_where(filter);

    let mut params = data.values();
    params.extend(where_clause.params);
    Statement::new(
        join_clauses([head.as_str(), where_clause.sql.as_str()]),
        params,
    )
}

/// `DELETE FROM t [WHERE ..]`
#[must_use]
pub fn build_delete(table: &str, filter: &Filter) -> Statement {
    let head = format!("DELETE FROM {}", quote_ident(table));
    let where_clause = build_where(filter);
    Statement::new(
        join_clauses([head.as_str(), where_clause.sql.as_str()]),
        where_clause.params,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Dialect;
    use crate::types::RowValues;

    #[test]
    fn pagination() {
        assert_eq!(Limit::from_page(0, 10), None);
        assert_eq!(Limit::from_page(3, 0), None);
        assert_eq!(
            Limit::from_page(3, 10),
            Some(Limit {
                offset: 20,
                count: 10
            })
        );
        assert_eq!(Limit::from_page(1, 1).unwrap().offset, 0);
    }

    #[test]
    fn select_with_everything() {
        let stmt = build_select(
            "users",
            &Filter::new().eq("active", true).gte("age", 18),
            Limit::from_page(2, 25),
            &Columns::list(["id", "name"]),
            &OrderBy::new().desc("id"),
        );
        assert_eq!(
            stmt.sql,
            "SELECT `id`,`name` FROM `users` WHERE `active` = ? AND `age` >= ? ORDER BY `id` DESC LIMIT 25,25"
        );
        assert_eq!(stmt.params, vec![RowValues::Bool(true), RowValues::Int(18)]);
    }

    #[test]
    fn bare_select_has_no_trailing_space() {
        let stmt = build_select("t", &Filter::new(), None, &Columns::All, &OrderBy::new());
        assert_eq!(stmt.sql, "SELECT * FROM `t`");
        assert!(stmt.params.is_empty());
    }

    #[test]
    fn count_statement() {
        let stmt = build_count("t", &Filter::new().eq("k", "v"));
        assert_eq!(stmt.sql, "SELECT count(*) AS `count` FROM `t` WHERE `k` = ?");
    }

    #[test]
    fn insert_statement() {
        let data = RowData::new().set("name", "O'Brien").set("age", 40).set("note", None::<String>);
        let stmt = build_insert("people", &data);
        assert_eq!(
            stmt.sql,
            "INSERT INTO `people` (`name`,`age`,`note`) VALUES (?,?,?)"
        );
        assert_eq!(
            stmt.to_literal_sql(Dialect::Mysql),
            "INSERT INTO `people` (`name`,`age`,`note`) VALUES ('O\\'Brien',40,NULL)"
        );
    }

    #[test]
    fn update_binds_set_before_where() {
        let stmt = build_update(
            "people",
            &Filter::new().eq("id", 9),
            &RowData::new().set("name", "z").set("age", 1),
        );
        assert_eq!(
            stmt.sql,
            "UPDATE `people` SET `name` = ?,`age` = ? WHERE `id` = ?"
        );
        assert_eq!(
            stmt.params,
            vec![
                RowValues::Text("z".into()),
                RowValues::Int(1),
                RowValues::Int(9)
            ]
        );
    }

    #[test]
    fn delete_statement() {
        let stmt = build_delete("people", &Filter::new().in_list("id", [1, 2, 3]));
        assert_eq!(
            stmt.to_literal_sql(Dialect::Sqlite),
            "DELETE FROM `people` WHERE `id` IN (1,2,3)"
        );
    }
}
