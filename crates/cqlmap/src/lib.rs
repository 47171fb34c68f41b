mod batch;
pub use batch::{BatchItem, ModelBatchMapper};

mod engine;

pub mod mapper;
pub use mapper::{Mapper, ModelOptions, TableOptions};

mod model;
pub use model::ModelMapper;

mod options;
pub use options::MappingOptions;

mod result;
pub use result::ResultSet;

pub use cqlmap_core::{
    doc,
    driver::{self, Driver, ExecOptions, PageState},
    schema::{self, Mappings},
    stmt::{Direction, Document, Expr, Operator, Value},
    Error, Result,
};

/// Query operator constructors, e.g. `q::gt(10)` or `q::append(list)`.
pub mod q {
    pub use cqlmap_core::stmt::{
        add, and, append, eq, gt, gte, in_, lt, lte, not_eq, prepend, remove, set_value, subtract,
    };
}
