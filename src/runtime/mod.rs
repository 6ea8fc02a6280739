pub mod float_parse;
pub mod splitter;

pub(crate) use float_parse::strtod;
pub(crate) use splitter::{column_names, count_fields, find_column, get_field, LineReader};
