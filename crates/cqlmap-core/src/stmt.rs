mod assignment;
pub use assignment::{AssignOp, Assignment};

mod condition;
pub use condition::Condition;

mod delete;
pub use delete::Delete;

mod document;
pub use document::Document;

mod expr;
pub use expr::Expr;

mod insert;
pub use insert::Insert;

mod operator;
pub use operator::*;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod predicate;
pub use predicate::{BinaryOp, Predicate};

mod select;
pub use select::Select;

mod statement;
pub use statement::Statement;

mod table_ref;
pub use table_ref::TableRef;

mod update;
pub use update::Update;

mod value;
pub use value::Value;
