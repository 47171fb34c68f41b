use super::{Formatter, ToCql};

use cqlmap_core::stmt::Value;

pub trait Params {
    fn push(&mut self, param: &Value) -> Placeholder;
}

/// Position of a bound parameter, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

/// A value to be bound rather than inlined.
pub(super) struct Param<'a>(pub(super) &'a Value);

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToCql for Placeholder {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('?');
    }
}

impl ToCql for Param<'_> {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self.0);
        placeholder.to_cql(f);
    }
}
