//! Scripted database adapter for driving the auditor without a server.

#![allow(dead_code)]

use async_trait::async_trait;
use rowid_audit_core::audit::statements::{max_row_id_sql, next_row_id_sql};
use rowid_audit_core::{DatabaseAdapter, QueryResult, Result, RowIdAuditError, TableRef};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Scripted response to a query.
#[derive(Debug, Clone)]
pub enum Reply {
    Rows(QueryResult),
    UnknownColumn,
    Fail(String),
}

/// Adapter answering from a script and recording every call.
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    schemas: HashMap<String, std::result::Result<Vec<String>, String>>,
    replies: HashMap<String, Reply>,
    failing_statements: HashSet<String>,
    queries: Mutex<Vec<String>>,
    statements: Mutex<Vec<String>>,
    listed: Mutex<Vec<String>>,
}

fn failure(message: &str) -> RowIdAuditError {
    RowIdAuditError::query_failed(message.to_string(), std::io::Error::other(message.to_string()))
}

impl ScriptedAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: &str, tables: &[&str]) -> Self {
        self.schemas.insert(
            schema.to_string(),
            Ok(tables.iter().map(|t| (*t).to_string()).collect()),
        );
        self
    }

    pub fn with_failing_schema(mut self, schema: &str) -> Self {
        self.schemas
            .insert(schema.to_string(), Err(format!("Unknown database '{schema}'")));
        self
    }

    /// Scripts the max-row-id query; `None` yields a NULL cell.
    pub fn with_max_row_id(mut self, schema: &str, table: &str, value: Option<i64>) -> Self {
        let sql = max_row_id_sql(&TableRef::new(schema, table));
        let result = QueryResult::new(
            vec!["COALESCE(MAX(_tidb_rowid), 0)".to_string()],
            vec![vec![value.map(|v| v.to_string())]],
        );
        self.replies.insert(sql, Reply::Rows(result));
        self
    }

    pub fn with_max_row_id_reply(mut self, schema: &str, table: &str, reply: Reply) -> Self {
        let sql = max_row_id_sql(&TableRef::new(schema, table));
        self.replies.insert(sql, reply);
        self
    }

    /// Scripts `SHOW TABLE ... NEXT_ROW_ID` with `(ID_TYPE, NEXT_GLOBAL_ROW_ID)` rows.
    pub fn with_next_row_id(mut self, schema: &str, table: &str, rows: &[(&str, i64)]) -> Self {
        let sql = next_row_id_sql(&TableRef::new(schema, table));
        let result = QueryResult::new(
            vec![
                "DB_NAME".to_string(),
                "TABLE_NAME".to_string(),
                "COLUMN_NAME".to_string(),
                "NEXT_GLOBAL_ROW_ID".to_string(),
                "ID_TYPE".to_string(),
            ],
            rows.iter()
                .map(|(id_type, next)| {
                    vec![
                        Some(schema.to_string()),
                        Some(table.to_string()),
                        Some("_tidb_rowid".to_string()),
                        Some(next.to_string()),
                        Some((*id_type).to_string()),
                    ]
                })
                .collect(),
        );
        self.replies.insert(sql, Reply::Rows(result));
        self
    }

    pub fn with_next_row_id_reply(mut self, schema: &str, table: &str, reply: Reply) -> Self {
        let sql = next_row_id_sql(&TableRef::new(schema, table));
        self.replies.insert(sql, reply);
        self
    }

    pub fn with_failing_statement(mut self, sql: &str) -> Self {
        self.failing_statements.insert(sql.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn listed_schemas(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatabaseAdapter for ScriptedAdapter {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn list_tables(&self, schema: &str) -> Result<Vec<String>> {
        self.listed.lock().unwrap().push(schema.to_string());
        match self.schemas.get(schema) {
            Some(Ok(tables)) => Ok(tables.clone()),
            Some(Err(message)) => Err(failure(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn run_query(&self, sql: &str, table: Option<&TableRef>) -> Result<QueryResult> {
        self.queries.lock().unwrap().push(sql.to_string());
        match self.replies.get(sql) {
            Some(Reply::Rows(result)) => Ok(result.clone()),
            Some(Reply::UnknownColumn) => match table {
                Some(table) => Err(RowIdAuditError::UnsupportedRowIdColumn {
                    table: table.clone(),
                }),
                None => Err(failure("Unknown column '_tidb_rowid' in 'field list'")),
            },
            Some(Reply::Fail(message)) => Err(failure(message)),
            None => Err(failure(&format!("unscripted query: {sql}"))),
        }
    }

    async fn run_statement(&self, sql: &str) -> Result<()> {
        self.statements.lock().unwrap().push(sql.to_string());
        if self.failing_statements.contains(sql) {
            return Err(failure("statement rejected"));
        }
        Ok(())
    }
}
