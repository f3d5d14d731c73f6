// Query language and engine
//
// A query string is tokenized and parsed into a `QueryNode` tree of bare
// words and `field:value` terms joined by OR, AND and NOT. `QueryEngine`
// combines morphological analysis with evaluation of that tree and renders
// the matching entries as `EntryView`s.

pub mod ast;
pub mod engine;
pub mod operators;
pub mod parser;
pub mod view;

pub use ast::{QueryNode, WordTerm};
pub use engine::{QueryEngine, fix_analysis_parts};
pub use operators::{FieldOperator, FieldTerm, OperatorTable};
pub use parser::{normalize_query, parse_query, tokenize};
pub use view::{EntryView, sort_for_book};
