//! Compiles a document against one table into a structured statement.
//!
//! Callers have already selected the table, so every key field the statement
//! needs is present in the document.

use crate::MappingOptions;

use cqlmap_core::{
    schema::TableMapping,
    stmt::{
        AssignOp, Assignment, BinaryOp, Condition, Delete, Document, Expr, Insert, Operator,
        OrderBy, Predicate, Select, Update, Value,
    },
    Error, Result,
};

pub(super) fn select(
    table: &TableMapping,
    doc: &Document,
    options: &MappingOptions,
    limit: Option<u32>,
) -> Result<Select> {
    let columns = match &options.fields {
        Some(fields) => fields
            .iter()
            .filter_map(|field| table.column(field))
            .map(str::to_string)
            .collect(),
        None => table.columns().map(str::to_string).collect(),
    };

    let mut filter = vec![];

    // Partition key first, then the clustering key in declaration order.
    for field in table.primary_key() {
        let (Some(column), Some(expr)) = (table.column(field), doc.get(field)) else {
            continue;
        };

        match expr {
            Expr::Value(value) => filter.push(Predicate::eq(column, value.clone())),
            Expr::Operator(op) => {
                let Some(comparisons) = op.comparisons() else {
                    return Err(not_allowed(op, field, "a read"));
                };

                filter.extend(comparisons.into_iter().map(|(op, value)| Predicate {
                    column: column.to_string(),
                    op,
                    value,
                }));
            }
        }
    }

    let order_by = options
        .order_by
        .iter()
        .filter_map(|(field, direction)| {
            Some(OrderBy {
                column: table.column(field)?.to_string(),
                direction: *direction,
            })
        })
        .collect();

    Ok(Select {
        table: table.table_ref().clone(),
        columns,
        filter,
        order_by,
        limit: cql_int("limit", limit)?,
    })
}

/// Rejects mutation operators anywhere in a read document. Runs before table
/// selection, so a misplaced operator fails even when no table matches.
pub(super) fn check_read(doc: &Document) -> Result<()> {
    for (field, expr) in doc.iter() {
        if let Expr::Operator(op) = expr {
            if op.comparisons().is_none() {
                return Err(not_allowed(op, field, "a read"));
            }
        }
    }

    Ok(())
}

pub(super) fn insert(table: &TableMapping, doc: &Document, options: &MappingOptions) -> Result<Insert> {
    let full_key = has_full_key(table, doc);

    let mut columns = vec![];
    let mut values = vec![];

    for (field, expr) in doc.iter() {
        let Some(column) = table.column(field) else {
            continue;
        };

        // A partial clustering key cannot be written alongside static columns.
        if !full_key && table.is_clustering_key(field) {
            continue;
        }

        let value = match expr {
            Expr::Value(value) | Expr::Operator(Operator::Eq(value)) => value,
            Expr::Operator(op) => return Err(not_allowed(op, field, "an insert")),
        };

        columns.push(column.to_string());
        values.push(value.clone());
    }

    Ok(Insert {
        table: table.table_ref().clone(),
        columns,
        values,
        if_not_exists: options.if_not_exists,
        ttl: cql_int("ttl", options.ttl)?,
    })
}

pub(super) fn update(table: &TableMapping, doc: &Document, options: &MappingOptions) -> Result<Update> {
    let filter = if has_full_key(table, doc) {
        key_filter(table, doc, table.primary_key())?
    } else {
        key_filter(table, doc, table.partition_key())?
    };

    let mut assignments = vec![];

    for (field, expr) in doc.iter() {
        if table.is_key(field) {
            continue;
        }

        let Some(column) = table.column(field) else {
            continue;
        };

        let (op, value) = match expr {
            Expr::Value(value) | Expr::Operator(Operator::SetValue(value)) => (AssignOp::Set, value),
            Expr::Operator(Operator::Append(value) | Operator::Add(value)) => (AssignOp::Append, value),
            Expr::Operator(Operator::Prepend(value)) => (AssignOp::Prepend, value),
            Expr::Operator(Operator::Remove(value) | Operator::Subtract(value)) => {
                (AssignOp::Remove, value)
            }
            Expr::Operator(op) => return Err(not_allowed(op, field, "an update")),
        };

        assignments.push(Assignment {
            column: column.to_string(),
            op,
            value: value.clone(),
        });
    }

    Ok(Update {
        table: table.table_ref().clone(),
        assignments,
        filter,
        condition: condition(table, options)?,
        ttl: cql_int("ttl", options.ttl)?,
    })
}

pub(super) fn delete(table: &TableMapping, doc: &Document, options: &MappingOptions) -> Result<Delete> {
    let filter = key_filter(table, doc, table.primary_key())?;

    let columns = if options.delete_only_columns {
        options
            .fields
            .iter()
            .flatten()
            .filter_map(|field| table.column(field))
            .map(str::to_string)
            .collect()
    } else {
        vec![]
    };

    Ok(Delete {
        table: table.table_ref().clone(),
        columns,
        filter,
        condition: condition(table, options)?,
    })
}

fn has_full_key(table: &TableMapping, doc: &Document) -> bool {
    table.primary_key().all(|field| doc.contains(field))
}

/// Restricts a write to the given key fields. Only equality and `IN` can
/// address rows to write.
fn key_filter<'a>(
    table: &TableMapping,
    doc: &Document,
    fields: impl Iterator<Item = &'a str>,
) -> Result<Vec<Predicate>> {
    let mut filter = vec![];

    for field in fields {
        let (Some(column), Some(expr)) = (table.column(field), doc.get(field)) else {
            continue;
        };

        let (op, value) = match expr {
            Expr::Value(value) | Expr::Operator(Operator::Eq(value)) => (BinaryOp::Eq, value.clone()),
            Expr::Operator(Operator::In(items)) => (BinaryOp::In, Value::List(items.clone())),
            Expr::Operator(op) => {
                return Err(Error::invalid_document(format!(
                    "key field `{field}` must be a value or an equality, got `{}`",
                    op.name()
                )))
            }
        };

        filter.push(Predicate {
            column: column.to_string(),
            op,
            value,
        });
    }

    Ok(filter)
}

fn condition(table: &TableMapping, options: &MappingOptions) -> Result<Condition> {
    if options.if_exists {
        return Ok(Condition::IfExists);
    }

    if options.when.is_empty() {
        return Ok(Condition::None);
    }

    let mut predicates = vec![];

    for (field, expr) in options.when.iter() {
        let Some(column) = table.column(field) else {
            return Err(Error::invalid_options(format!(
                "`when` field `{field}` is not a column of table `{}`",
                table.name()
            )));
        };

        match expr {
            Expr::Value(value) => predicates.push(Predicate::eq(column, value.clone())),
            Expr::Operator(op) => {
                let Some(comparisons) = op.comparisons() else {
                    return Err(not_allowed(op, field, "a condition"));
                };

                predicates.extend(comparisons.into_iter().map(|(op, value)| Predicate {
                    column: column.to_string(),
                    op,
                    value,
                }));
            }
        }
    }

    Ok(Condition::If(predicates))
}

/// LIMIT and USING TTL bind as a CQL `int`.
fn cql_int(option: &str, value: Option<u32>) -> Result<Option<i32>> {
    value
        .map(|value| {
            i32::try_from(value).map_err(|_| {
                Error::invalid_options(format!("{option} {value} exceeds the CQL int range"))
            })
        })
        .transpose()
}

fn not_allowed(op: &Operator, field: &str, context: &str) -> Error {
    Error::invalid_document(format!(
        "operator `{}` on field `{field}` is not allowed in {context}",
        op.name()
    ))
}
