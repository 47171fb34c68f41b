use super::{Formatter, Params};

macro_rules! fmt {
    ($f:expr, $( $fragments:expr )*) => {{
        $(
            $fragments.to_cql($f);
        )*
    }};
}

pub(super) trait ToCql {
    fn to_cql<T: Params>(self, f: &mut Formatter<'_, T>);
}

impl ToCql for &str {
    fn to_cql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self);
    }
}

impl ToCql for &String {
    fn to_cql<T: Params>(self, f: &mut Formatter<'_, T>) {
        f.dst.push_str(self);
    }
}
