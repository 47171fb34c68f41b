#[macro_use]
mod fmt;
use fmt::ToCql;

mod delim;
use delim::{Comma, Delimited, Period};

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};
use params::Param;

// Fragment serializers
mod predicate;
mod statement;

use cqlmap_core::{
    driver::Query,
    stmt::{Statement, Value},
};

/// Serialize a structured statement to CQL text with `?` placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized CQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_cql(&mut fmt);

        ret
    }

    /// Serializes `stmt` and bundles it with its bind parameters.
    pub fn query(&self, stmt: Statement) -> Query {
        let mut params: Vec<Value> = vec![];
        let cql = self.serialize(&stmt, &mut params);
        Query { cql, params, stmt }
    }
}
