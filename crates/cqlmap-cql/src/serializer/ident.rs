use super::{Formatter, Params, ToCql};

/// A double-quoted, case-preserving CQL identifier.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToCql for Ident<S> {
    fn to_cql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let name = self.0.as_ref();
        f.dst.push('"');
        for c in name.chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}
