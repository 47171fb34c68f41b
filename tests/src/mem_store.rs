mod table;

use table::{store_error, Table};

use cqlmap_core::{
    async_trait,
    driver::{Driver, ExecOptions, Operation, Query, Response, Row},
    schema::TableMetadata,
    stmt::{Insert, Statement, TableRef},
    Error, Result,
};
use std::{
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

/// An in-memory wide-column store.
///
/// Executes the structured statement carried by each query, with primary
/// key ordering, static columns, collection operations, conditional writes
/// and paging. Keyspaces are ignored and TTLs are accepted but never expire.
#[derive(Debug, Default)]
pub struct MemStore {
    tables: Mutex<HashMap<String, Table>>,

    metadata_fetches: AtomicUsize,

    /// Simulated latency of metadata fetches
    metadata_delay: Mutex<Option<Duration>>,

    /// Error returned by the next `exec`
    fail_next: Mutex<Option<String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&self, metadata: TableMetadata) {
        self.tables
            .lock()
            .unwrap()
            .insert(metadata.name.clone(), Table::new(metadata));
    }

    /// All rows of a table in storage order.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        let tables = self.tables.lock().unwrap();

        match tables.get(table) {
            Some(table) => table
                .rows()
                .into_iter()
                .map(|columns| columns.into_iter().collect())
                .collect(),
            None => vec![],
        }
    }

    /// Writes a row directly, e.g. to populate a materialized view.
    pub fn seed(&self, table: &str, row: Row) -> Result<()> {
        let (columns, values) = row
            .iter()
            .map(|(column, value)| (column.to_string(), value.clone()))
            .unzip();

        let insert = Insert {
            table: TableRef::new(None, table),
            columns,
            values,
            if_not_exists: false,
            ttl: None,
        };

        let mut tables = self.tables.lock().unwrap();
        match tables.get_mut(table) {
            Some(table) => table.insert(&insert).map(drop),
            None => Err(store_error(format!("unconfigured table {table}"))),
        }
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.rows(table).len()
    }

    pub fn metadata_fetches(&self) -> usize {
        self.metadata_fetches.load(Ordering::SeqCst)
    }

    pub fn set_metadata_delay(&self, delay: Duration) {
        *self.metadata_delay.lock().unwrap() = Some(delay);
    }

    /// Makes the next `exec` call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some(message.into());
    }

    fn exec_query(tables: &mut HashMap<String, Table>, query: &Query, options: &ExecOptions) -> Result<Response> {
        let name = &query.stmt.table().name;
        let Some(table) = tables.get_mut(name) else {
            return Err(store_error(format!("unconfigured table {name}")));
        };

        match &query.stmt {
            Statement::Select(stmt) => table.select(stmt, options),
            Statement::Insert(stmt) => table.insert(stmt),
            Statement::Update(stmt) => table.update(stmt),
            Statement::Delete(stmt) => table.delete(stmt),
        }
    }

    /// Applies every statement or none of them.
    fn exec_batch(tables: &mut HashMap<String, Table>, queries: &[Query], options: &ExecOptions) -> Result<Response> {
        if queries.iter().any(|q| q.stmt.is_select()) {
            return Err(store_error("Only INSERT, UPDATE and DELETE are allowed in a batch"));
        }

        let conditional: Vec<_> = queries.iter().filter(|q| q.stmt.is_conditional()).collect();

        if let Some(first) = conditional.first() {
            if conditional.iter().any(|q| q.stmt.table() != first.stmt.table()) {
                return Err(store_error("Batch with conditions cannot span multiple tables"));
            }
        }

        let mut staged = tables.clone();

        for query in queries {
            let response = Self::exec_query(&mut staged, query, options)?;

            if response.rows.first().and_then(Row::applied) == Some(false) {
                return Ok(response);
            }
        }

        *tables = staged;

        if conditional.is_empty() {
            Ok(Response::empty())
        } else {
            Ok(Response::from_rows(vec![Row::new().with(Row::APPLIED, true)]))
        }
    }
}

#[async_trait]
impl Driver for MemStore {
    async fn exec(&self, op: Operation, options: &ExecOptions) -> Result<Response> {
        if let Some(message) = self.fail_next.lock().unwrap().take() {
            return Err(Error::driver(io::Error::new(io::ErrorKind::Other, message)));
        }

        let mut tables = self.tables.lock().unwrap();

        match &op {
            Operation::Query(query) => Self::exec_query(&mut tables, query, options),
            Operation::Batch(queries) => Self::exec_batch(&mut tables, queries, options),
        }
    }

    async fn table_metadata(&self, keyspace: Option<&str>, table: &str) -> Result<TableMetadata> {
        self.metadata_fetches.fetch_add(1, Ordering::SeqCst);

        let delay = *self.metadata_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|table| table.metadata.clone())
            .ok_or_else(|| {
                Error::driver(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("table {}.{table} does not exist", keyspace.unwrap_or("<none>")),
                ))
            })
    }
}
