use super::key::{compare, equals, Key};

use cqlmap_core::{
    driver::{ExecOptions, PageState, Response, Row},
    schema::TableMetadata,
    stmt::{
        AssignOp, Assignment, BinaryOp, Condition, Delete, Direction, Insert, Predicate, Select,
        Update, Value,
    },
    Error, Result,
};
use indexmap::IndexMap;
use std::{cmp::Ordering, collections::BTreeMap, io};

type Columns = IndexMap<String, Value>;

#[derive(Debug, Clone)]
pub(super) struct Table {
    pub(super) metadata: TableMetadata,

    rows: BTreeMap<Key, Columns>,

    /// Static columns, by partition key
    statics: BTreeMap<Key, Columns>,
}

impl Table {
    pub(super) fn new(metadata: TableMetadata) -> Self {
        Self {
            metadata,
            rows: BTreeMap::new(),
            statics: BTreeMap::new(),
        }
    }

    /// Every row in storage order with the partition's static columns merged
    /// in.
    pub(super) fn rows(&self) -> Vec<Columns> {
        self.rows
            .iter()
            .map(|(key, columns)| self.merged(key, columns))
            .collect()
    }

    pub(super) fn select(&self, select: &Select, options: &ExecOptions) -> Result<Response> {
        let mut rows: Vec<Columns> = self
            .rows()
            .into_iter()
            .filter(|row| select.filter.iter().all(|predicate| matches(row, predicate)))
            .collect();

        let reversed = match (select.order_by.first(), self.metadata.clustering_key.first()) {
            (Some(order_by), Some(clustering)) => {
                order_by.column == clustering.name && order_by.direction != clustering.order
            }
            _ => false,
        };

        if reversed {
            rows.reverse();
        }

        if let Some(limit) = select.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(0));
        }

        let offset = match &options.page_state {
            Some(page_state) => decode_page_state(page_state)?,
            None => 0,
        };

        let end = match options.fetch_size {
            Some(fetch_size) => rows.len().min(offset + fetch_size as usize),
            None => rows.len(),
        };

        let page_state = (end < rows.len()).then(|| encode_page_state(end));

        let rows = rows
            .get(offset.min(end)..end)
            .unwrap_or_default()
            .iter()
            .map(|row| {
                select
                    .columns
                    .iter()
                    .map(|column| (column.clone(), row.get(column).cloned().unwrap_or_default()))
                    .collect::<Row>()
            })
            .collect();

        Ok(Response { rows, page_state })
    }

    pub(super) fn insert(&mut self, insert: &Insert) -> Result<Response> {
        let values: Columns = insert
            .columns
            .iter()
            .cloned()
            .zip(insert.values.iter().cloned())
            .collect();

        let partition = self.partition_key(|column| values.get(column).map(Restriction::Eq))?;

        let Some(key) = self.clustering_key(&partition, |column| values.get(column).map(Restriction::Eq))? else {
            // Partition key only: static columns
            let statics = self.statics.entry(partition).or_default();
            for (column, value) in values {
                if !self.metadata.is_key(&column) {
                    set(statics, column, value);
                }
            }
            return Ok(conditional(insert.if_not_exists, true, None));
        };

        if insert.if_not_exists {
            if let Some(existing) = self.rows.get(&key) {
                let current = self.merged(&key, existing);
                return Ok(conditional(true, false, Some(current)));
            }
        }

        let static_columns = self.static_columns();
        let partition = key.prefix(self.metadata.partition_key.len());
        let row = self.rows.entry(key.clone()).or_default();

        for (column, value) in values {
            if static_columns.contains(&column) {
                set(self.statics.entry(partition.clone()).or_default(), column, value);
            } else {
                set(row, column, value);
            }
        }

        Ok(conditional(insert.if_not_exists, true, None))
    }

    pub(super) fn update(&mut self, update: &Update) -> Result<Response> {
        let keys = self.keys(&update.filter)?;
        let is_conditional = !update.condition.is_none();

        for key in &keys {
            if let Some(rejected) = self.check(key, &update.condition) {
                return Ok(rejected);
            }
        }

        let static_columns = self.static_columns();
        let partition_len = self.metadata.partition_key.len();
        let key_len = partition_len + self.metadata.clustering_key.len();

        for key in keys {
            let partition = key.prefix(partition_len);

            if key.0.len() == key_len {
                // The row exists once written, even when only keys are set.
                let key_columns = self.key_columns(&key);
                let row = self.rows.entry(key.clone()).or_default();
                for (column, value) in key_columns {
                    row.entry(column).or_insert(value);
                }
            }

            for assignment in &update.assignments {
                let columns = if static_columns.contains(&assignment.column) {
                    self.statics.entry(partition.clone()).or_default()
                } else {
                    match self.rows.get_mut(&key) {
                        Some(row) => row,
                        None => continue,
                    }
                };

                assign(columns, assignment)?;
            }
        }

        Ok(conditional(is_conditional, true, None))
    }

    pub(super) fn delete(&mut self, delete: &Delete) -> Result<Response> {
        let keys = self.keys(&delete.filter)?;
        let is_conditional = !delete.condition.is_none();

        for key in &keys {
            if let Some(rejected) = self.check(key, &delete.condition) {
                return Ok(rejected);
            }
        }

        let static_columns = self.static_columns();
        let partition_len = self.metadata.partition_key.len();

        for key in keys {
            if delete.columns.is_empty() {
                if key.0.len() == partition_len {
                    self.rows.retain(|row, _| row.prefix(partition_len) != key);
                    self.statics.remove(&key);
                } else {
                    self.rows.remove(&key);
                }
                continue;
            }

            for column in &delete.columns {
                if static_columns.contains(column) {
                    if let Some(statics) = self.statics.get_mut(&key.prefix(partition_len)) {
                        statics.shift_remove(column);
                    }
                } else if let Some(row) = self.rows.get_mut(&key) {
                    row.shift_remove(column);
                }
            }
        }

        Ok(conditional(is_conditional, true, None))
    }

    /// Evaluates a write condition against the current row. Returns the
    /// response of a rejected write.
    fn check(&self, key: &Key, condition: &Condition) -> Option<Response> {
        let current = self.rows.get(key).map(|row| self.merged(key, row));

        match condition {
            Condition::None => None,
            Condition::IfExists => match current {
                Some(_) => None,
                None => Some(conditional(true, false, None)),
            },
            Condition::If(predicates) => {
                let row = current.unwrap_or_default();

                if predicates.iter().all(|predicate| matches(&row, predicate)) {
                    return None;
                }

                let state = (!row.is_empty()).then(|| {
                    predicates
                        .iter()
                        .map(|p| (p.column.clone(), row.get(&p.column).cloned().unwrap_or_default()))
                        .collect()
                });

                Some(conditional(true, false, state))
            }
        }
    }

    /// All keys addressed by a write's WHERE clause. A key without clustering
    /// parts addresses a whole partition.
    fn keys(&self, filter: &[Predicate]) -> Result<Vec<Key>> {
        let lookup = |column: &str| restriction(filter, column);

        let partitions = self.expand(&self.metadata.partition_key, &lookup, true)?;

        let clustering: Vec<String> = self
            .metadata
            .clustering_key
            .iter()
            .map(|c| c.name.clone())
            .collect();

        let mut keys = vec![];

        for partition in partitions {
            if clustering.iter().all(|c| lookup(c).is_none()) {
                keys.push(partition);
                continue;
            }

            for suffix in self.expand(&clustering, &lookup, false)? {
                let mut key = partition.clone();
                key.0.extend(suffix.0);
                keys.push(key);
            }
        }

        Ok(keys)
    }

    fn expand<'a>(
        &self,
        columns: &[String],
        lookup: &impl Fn(&str) -> Option<Restriction<'a>>,
        is_partition: bool,
    ) -> Result<Vec<Key>> {
        let mut keys = vec![Key(vec![])];

        for column in columns {
            let Some(restriction) = lookup(column) else {
                return Err(store_error(format!(
                    "Some {} key parts are missing: {column}",
                    if is_partition { "partition" } else { "clustering" }
                )));
            };

            let direction = self.direction(column);
            let values = match restriction {
                Restriction::Eq(value) => vec![value.clone()],
                Restriction::In(values) => values,
            };

            keys = keys
                .into_iter()
                .flat_map(|key| {
                    values.iter().map(move |value| {
                        let mut key = key.clone();
                        key.0.push((value.clone(), direction));
                        key
                    })
                })
                .collect();
        }

        Ok(keys)
    }

    fn partition_key<'a>(&self, lookup: impl Fn(&str) -> Option<Restriction<'a>>) -> Result<Key> {
        let mut keys = self.expand(&self.metadata.partition_key, &lookup, true)?;
        Ok(keys.remove(0))
    }

    /// Full primary key, or `None` when no clustering part is given.
    fn clustering_key<'a>(
        &self,
        partition: &Key,
        lookup: impl Fn(&str) -> Option<Restriction<'a>>,
    ) -> Result<Option<Key>> {
        let clustering: Vec<String> = self
            .metadata
            .clustering_key
            .iter()
            .map(|c| c.name.clone())
            .collect();

        if clustering.is_empty() {
            return Ok(Some(partition.clone()));
        }

        if clustering.iter().all(|c| lookup(c).is_none()) {
            return Ok(None);
        }

        let mut suffix = self.expand(&clustering, &lookup, false)?;
        let mut key = partition.clone();
        key.0.extend(suffix.remove(0).0);
        Ok(Some(key))
    }

    fn direction(&self, column: &str) -> Direction {
        self.metadata
            .clustering_key
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.order)
            .unwrap_or(Direction::Asc)
    }

    fn key_columns(&self, key: &Key) -> Columns {
        self.metadata
            .partition_key
            .iter()
            .chain(self.metadata.clustering_key.iter().map(|c| &c.name))
            .cloned()
            .zip(key.0.iter().map(|(value, _)| value.clone()))
            .collect()
    }

    fn static_columns(&self) -> Vec<String> {
        self.metadata
            .columns
            .iter()
            .filter(|c| c.is_static)
            .map(|c| c.name.clone())
            .collect()
    }

    fn merged(&self, key: &Key, columns: &Columns) -> Columns {
        let mut merged = self.key_columns(key);
        merged.extend(columns.iter().map(|(c, v)| (c.clone(), v.clone())));

        if let Some(statics) = self.statics.get(&key.prefix(self.metadata.partition_key.len())) {
            merged.extend(statics.iter().map(|(c, v)| (c.clone(), v.clone())));
        }

        merged
    }
}

/// Values a WHERE clause allows for one key column.
enum Restriction<'a> {
    Eq(&'a Value),
    In(Vec<Value>),
}

fn restriction<'a>(filter: &'a [Predicate], column: &str) -> Option<Restriction<'a>> {
    let predicate = filter.iter().find(|p| p.column == column)?;

    Some(match predicate.op {
        BinaryOp::In => Restriction::In(predicate.value.as_items().unwrap_or_default().to_vec()),
        _ => Restriction::Eq(&predicate.value),
    })
}

fn matches(row: &Columns, predicate: &Predicate) -> bool {
    let value = row.get(&predicate.column).unwrap_or(&Value::Null);
    let ordering = || compare(value, &predicate.value);

    match predicate.op {
        BinaryOp::Eq => ordering() == Ordering::Equal,
        BinaryOp::Ne => ordering() != Ordering::Equal,
        BinaryOp::Gt => !value.is_null() && ordering() == Ordering::Greater,
        BinaryOp::Ge => !value.is_null() && ordering() != Ordering::Less,
        BinaryOp::Lt => !value.is_null() && ordering() == Ordering::Less,
        BinaryOp::Le => !value.is_null() && ordering() != Ordering::Greater,
        BinaryOp::In => predicate
            .value
            .as_items()
            .is_some_and(|items| items.iter().any(|item| equals(value, item))),
    }
}

/// Writing null, or an empty collection, clears the column.
fn set(columns: &mut Columns, column: String, value: Value) {
    let is_empty = match &value {
        Value::Null => true,
        Value::List(items) | Value::Set(items) => items.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        _ => false,
    };

    if is_empty {
        columns.shift_remove(&column);
    } else {
        columns.insert(column, value);
    }
}

fn assign(columns: &mut Columns, assignment: &Assignment) -> Result<()> {
    let current = columns.get(&assignment.column).cloned().unwrap_or_default();
    let operand = assignment.value.clone();

    let value = match assignment.op {
        AssignOp::Set => operand,
        AssignOp::Append => match (current, operand) {
            (Value::Null, operand) => operand,
            (Value::List(mut items), Value::List(more)) => {
                items.extend(more);
                Value::List(items)
            }
            (Value::Set(mut items), Value::Set(more) | Value::List(more)) => {
                for item in more {
                    if !items.iter().any(|existing| equals(existing, &item)) {
                        items.push(item);
                    }
                }
                items.sort_by(compare);
                Value::Set(items)
            }
            (Value::Map(mut entries), Value::Map(more)) => {
                for (k, v) in more {
                    entries.retain(|(existing, _)| !equals(existing, &k));
                    entries.push((k, v));
                }
                Value::Map(entries)
            }
            (current, operand) => match (current.as_i64(), operand.as_i64()) {
                (Some(a), Some(b)) => Value::I64(a + b),
                _ => return Err(type_mismatch(assignment, &current)),
            },
        },
        AssignOp::Prepend => match (current, operand) {
            (Value::Null, operand) => operand,
            (Value::List(items), Value::List(mut front)) => {
                front.extend(items);
                Value::List(front)
            }
            (current, _) => return Err(type_mismatch(assignment, &current)),
        },
        AssignOp::Remove => match (current, operand) {
            (Value::Null, _) => Value::Null,
            (Value::List(items), Value::List(gone) | Value::Set(gone)) => {
                Value::List(without(items, &gone))
            }
            (Value::Set(items), Value::Set(gone) | Value::List(gone)) => {
                Value::Set(without(items, &gone))
            }
            (Value::Map(entries), Value::Set(gone) | Value::List(gone)) => Value::Map(
                entries
                    .into_iter()
                    .filter(|(k, _)| !gone.iter().any(|g| equals(g, k)))
                    .collect(),
            ),
            (current, operand) => match (current.as_i64(), operand.as_i64()) {
                (Some(a), Some(b)) => Value::I64(a - b),
                _ => return Err(type_mismatch(assignment, &current)),
            },
        },
    };

    set(columns, assignment.column.clone(), value);
    Ok(())
}

fn without(items: Vec<Value>, gone: &[Value]) -> Vec<Value> {
    items
        .into_iter()
        .filter(|item| !gone.iter().any(|g| equals(g, item)))
        .collect()
}

fn type_mismatch(assignment: &Assignment, current: &Value) -> Error {
    store_error(format!(
        "Invalid operation ({:?}) for column {} of type {}",
        assignment.op,
        assignment.column,
        current.kind_name()
    ))
}

/// The `[applied]` response of a write. Unconditional writes return nothing.
fn conditional(is_conditional: bool, applied: bool, current: Option<Columns>) -> Response {
    if !is_conditional {
        return Response::empty();
    }

    let mut row = Row::new().with(Row::APPLIED, applied);
    for (column, value) in current.into_iter().flatten() {
        row.insert(column, value);
    }

    Response::from_rows(vec![row])
}

fn encode_page_state(offset: usize) -> PageState {
    PageState::from_bytes((offset as u64).to_be_bytes())
}

fn decode_page_state(page_state: &PageState) -> Result<usize> {
    let bytes: [u8; 8] = page_state
        .as_bytes()
        .try_into()
        .map_err(|_| store_error("Invalid value for the paging state"))?;
    Ok(u64::from_be_bytes(bytes) as usize)
}

pub(super) fn store_error(message: impl Into<String>) -> Error {
    Error::driver(io::Error::new(io::ErrorKind::InvalidInput, message.into()))
}
