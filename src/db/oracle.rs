//! Oracle statement executor.
//!
//! Concrete [`StatementExecutor`] over an open Oracle connection. Queries are
//! fetched as display strings and capped at [`formatter::MAX_ROWS`]; DML
//! reports the affected row count; DDL and anonymous blocks report plain
//! completion. Statements are executed verbatim: this is a CLI client in the
//! mold of sqlplus, and authorization is the database's job.

use crate::core::executor::{RowSet, StatementExecutor, StatementOutcome};
use crate::db::connection::ConnInfo;
use crate::db::formatter;
use crate::Result;
use oracle::sql_type::ToSql;
use oracle::Connection;

pub struct OracleExecutor {
    conn: Connection,
}

impl OracleExecutor {
    /// Open a connection. Autocommit is on: each statement of a script is
    /// independent, with no cross-statement transaction.
    pub fn connect(info: &ConnInfo) -> Result<Self> {
        tracing::info!("Connecting to {} as {}", info.url, info.user);
        let mut conn = Connection::connect(&info.user, &info.password, &info.url)?;
        conn.set_autocommit(true);
        Ok(Self { conn })
    }

    /// Execute a single statement with positional bind values (`:1`, `:2`, ...).
    pub fn execute_with_params(
        &mut self,
        sql: &str,
        params: &[String],
    ) -> Result<StatementOutcome> {
        let binds: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();
        self.run(sql, &binds)
    }

    /// Shared access to the underlying connection for procedure calls.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn run(&mut self, sql: &str, binds: &[&dyn ToSql]) -> Result<StatementOutcome> {
        if is_query(sql) {
            return self.fetch_rows(sql, binds);
        }

        let stmt = self.conn.execute(sql, binds)?;
        if reports_row_count(sql) {
            Ok(StatementOutcome::RowsAffected(stmt.row_count()?))
        } else {
            Ok(StatementOutcome::Done)
        }
    }

    fn fetch_rows(&mut self, sql: &str, binds: &[&dyn ToSql]) -> Result<StatementOutcome> {
        let mut stmt = self.conn.statement(sql).build()?;
        let result_set = stmt.query(binds)?;

        let columns: Vec<String> = result_set
            .column_info()
            .iter()
            .map(|col| col.name().to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut truncated = false;

        for row_result in result_set {
            if rows.len() == formatter::MAX_ROWS {
                truncated = true;
                break;
            }
            let row = row_result?;
            let mut row_data = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                let value: Option<String> = row.get(i).unwrap_or(None);
                row_data.push(value.unwrap_or_else(|| "null".to_string()));
            }
            rows.push(row_data);
        }

        Ok(StatementOutcome::Rows(RowSet {
            columns,
            rows,
            truncated,
        }))
    }
}

impl StatementExecutor for OracleExecutor {
    fn execute(&mut self, statement: &str) -> Result<StatementOutcome> {
        self.run(statement, &[])
    }
}

fn leading_keyword(sql: &str) -> String {
    sql.split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase()
}

fn is_query(sql: &str) -> bool {
    matches!(leading_keyword(sql).as_str(), "SELECT" | "WITH")
}

/// DML carries a meaningful row count; DDL and PL/SQL blocks do not.
fn reports_row_count(sql: &str) -> bool {
    matches!(
        leading_keyword(sql).as_str(),
        "INSERT" | "UPDATE" | "DELETE" | "MERGE"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_classification() {
        assert!(is_query("SELECT * FROM t"));
        assert!(is_query("  select 1 from dual"));
        assert!(is_query("WITH x AS (SELECT 1 FROM dual) SELECT * FROM x"));
        assert!(!is_query("INSERT INTO t VALUES (1)"));
        assert!(!is_query("BEGIN NULL; END;"));
    }

    #[test]
    fn test_row_count_classification() {
        assert!(reports_row_count("UPDATE t SET x = 1"));
        assert!(reports_row_count("merge INTO t USING d ON (1=1)"));
        assert!(!reports_row_count("CREATE TABLE t (id NUMBER)"));
        assert!(!reports_row_count("DECLARE v NUMBER; BEGIN NULL; END;"));
    }
}
