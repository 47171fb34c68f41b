use super::{Delimited, Formatter, Ident, Param, Params, Period, ToCql};

use cqlmap_core::stmt::{self, AssignOp, BinaryOp};

impl ToCql for &stmt::TableRef {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match &self.keyspace {
            Some(keyspace) => fmt!(f, Period([Ident(keyspace), Ident(&self.name)])),
            None => fmt!(f, Ident(&self.name)),
        }
    }
}

impl ToCql for BinaryOp {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push_str(match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::In => "IN",
        })
    }
}

impl ToCql for &stmt::Predicate {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.column) " " self.op " " Param(&self.value));
    }
}

impl ToCql for &stmt::Assignment {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = Ident(&self.column);
        match self.op {
            AssignOp::Set => fmt!(f, column " = " Param(&self.value)),
            AssignOp::Append => fmt!(f, column " = " Ident(&self.column) " + " Param(&self.value)),
            AssignOp::Prepend => fmt!(f, column " = " Param(&self.value) " + " Ident(&self.column)),
            AssignOp::Remove => fmt!(f, column " = " Ident(&self.column) " - " Param(&self.value)),
        }
    }
}

impl ToCql for &stmt::OrderBy {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            stmt::Direction::Asc => " ASC",
            stmt::Direction::Desc => " DESC",
        };
        fmt!(f, Ident(&self.column) direction);
    }
}

impl ToCql for &stmt::Condition {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Condition::None => {}
            stmt::Condition::IfExists => fmt!(f, " IF EXISTS"),
            stmt::Condition::If(predicates) => {
                fmt!(f, " IF " Delimited(predicates, " AND "))
            }
        }
    }
}
