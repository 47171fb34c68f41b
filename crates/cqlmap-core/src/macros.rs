/// Builds a [`Document`](crate::stmt::Document) from `field => value` pairs.
///
/// Values may be anything convertible into [`Expr`](crate::stmt::Expr):
/// plain scalars, [`Value`](crate::stmt::Value)s or query operators.
///
/// ```
/// use cqlmap_core::{doc, stmt::gt};
///
/// let doc = doc! { "userId" => "u1", "addedDate" => gt(10_i64) };
/// assert_eq!(doc.len(), 2);
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::stmt::Document::new()
    };
    (
        $( $field:expr => $value:expr ),+ $(,)?
    ) => {{
        let mut doc = $crate::stmt::Document::new();
        $( doc.insert($field, $value); )+
        doc
    }};
}
