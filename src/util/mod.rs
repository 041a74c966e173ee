pub mod timefmt;

pub(crate) mod diagnostics;
pub(crate) mod url;
