use super::{Engine, WritePlan};
use crate::result::ResultSet;

use cqlmap_core::{
    driver::{ExecOptions, Operation},
    schema::TableMapping,
    stmt::{Select, Statement},
    Result,
};
use std::sync::Arc;
use tracing::debug;

impl Engine {
    /// Submits a planned write.
    ///
    /// One statement is sent as is; several are sent as one atomic batch.
    /// Store failures are returned untouched: no retry, no compensation.
    pub(crate) async fn exec_write(
        &self,
        plan: WritePlan,
        options: &ExecOptions,
    ) -> Result<ResultSet> {
        let WritePlan { mut queries, tables } = plan;

        // Rows coming back (conditional write state) can only be mapped to
        // fields when every statement hit the same table.
        let table = match tables.first() {
            Some(first) if tables.iter().all(|t| Arc::ptr_eq(t, first)) => Some(first.clone()),
            _ => None,
        };

        let op = match queries.len() {
            0 => {
                debug!("write matched no table; nothing to execute");
                return Ok(ResultSet::empty());
            }
            1 => Operation::Query(queries.remove(0)),
            n => {
                debug!(statements = n, "submitting batch");
                Operation::Batch(queries)
            }
        };

        let response = self
            .driver
            .exec(op, options)
            .await
            .inspect_err(|err| debug!(error = %err, "store rejected write"))?;

        Ok(ResultSet::from_write(response, table))
    }

    pub(super) async fn exec_select(
        &self,
        table: Arc<TableMapping>,
        stmt: Select,
        options: &ExecOptions,
    ) -> Result<ResultSet> {
        let query = self.compile(Statement::Select(stmt));

        let response = self
            .driver
            .exec(Operation::Query(query), options)
            .await
            .inspect_err(|err| debug!(error = %err, table = table.name(), "store rejected read"))?;

        Ok(ResultSet::from_rows(response, table))
    }
}
