//! Spreadsheet reading and header reconciliation

pub mod coverage;
pub mod normalize;
pub mod parser;

pub use coverage::{CoverageReport, FieldMatch, MissingField, check_coverage};
pub use normalize::{FOLD_TABLE, HeaderToken, normalize, tokenize_headers};
pub use parser::{ExcelError, PreviewRow, SheetData, read_sheet};
