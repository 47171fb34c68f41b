mod operation;
pub use operation::{Operation, Query};

mod options;
pub use options::{Consistency, ExecOptions};

mod response;
pub use response::{PageState, Response, Row};

use crate::{async_trait, schema::TableMetadata, Result};

use std::fmt::Debug;

/// The store executor consumed by the mapper.
///
/// Implementations own the wire protocol and connection management. Any
/// failure they return reaches the caller unchanged.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Executes a single statement or an atomic batch.
    async fn exec(&self, op: Operation, options: &ExecOptions) -> Result<Response>;

    /// Fetches column and key metadata for a table.
    async fn table_metadata(&self, keyspace: Option<&str>, table: &str) -> Result<TableMetadata>;
}
