use super::{Comma, Delimited, Formatter, Ident, Param, Params, ToCql};

use cqlmap_core::stmt::{self, Value};

impl ToCql for &stmt::Statement {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Statement::Select(stmt) => stmt.to_cql(f),
            stmt::Statement::Insert(stmt) => stmt.to_cql(f),
            stmt::Statement::Update(stmt) => stmt.to_cql(f),
            stmt::Statement::Delete(stmt) => stmt.to_cql(f),
        }
    }
}

struct Where<'a>(&'a [stmt::Predicate]);

impl ToCql for Where<'_> {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if !self.0.is_empty() {
            fmt!(f, " WHERE " Delimited(self.0, " AND "));
        }
    }
}

struct UsingTtl(Option<i32>);

impl ToCql for UsingTtl {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if let Some(ttl) = self.0 {
            let ttl = Value::I32(ttl);
            fmt!(f, " USING TTL " Param(&ttl));
        }
    }
}

impl ToCql for &stmt::Select {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let columns = Comma(self.columns.iter().map(Ident));
        let table = &self.table;

        fmt!(f, "SELECT " columns " FROM " table Where(&self.filter));

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        if let Some(limit) = self.limit {
            let limit = Value::I32(limit);
            fmt!(f, " LIMIT " Param(&limit));
        }
    }
}

impl ToCql for &stmt::Insert {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        assert_eq!(
            self.columns.len(),
            self.values.len(),
            "INSERT column and value counts differ"
        );

        let columns = Comma(self.columns.iter().map(Ident));
        let values = Comma(self.values.iter().map(Param));
        let table = &self.table;
        let if_not_exists = if self.if_not_exists {
            " IF NOT EXISTS"
        } else {
            ""
        };

        fmt!(
            f, "INSERT INTO " table " (" columns ") VALUES (" values ")" if_not_exists UsingTtl(self.ttl)
        );
    }
}

impl ToCql for &stmt::Update {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = &self.table;
        let condition = &self.condition;

        fmt!(
            f, "UPDATE " table UsingTtl(self.ttl) " SET " Comma(&self.assignments) Where(&self.filter) condition
        );
    }
}

impl ToCql for &stmt::Delete {
    fn to_cql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "DELETE ");

        if !self.columns.is_empty() {
            fmt!(f, Comma(self.columns.iter().map(Ident)) " ");
        }

        let table = &self.table;
        let condition = &self.condition;

        fmt!(f, "FROM " table Where(&self.filter) condition);
    }
}
