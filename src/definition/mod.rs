// Definition structuring and the English→Klingon reverse index
//
// A free-text definition is split into parts by `parser`, driven by the rule
// tables in `rules`; `ek_index` expands the parts into sortable rotations.

pub mod rules;
pub mod parser;
pub mod ek_index;

pub use rules::{DefinitionRules, SortKeywordOverride};
pub use parser::{
    BE_VERB_SUBTYPE, DefinitionPart, ParsedDefinition, parse_definition, parse_definition_with,
};
pub use ek_index::{
    EkEntry, EkIndex, FORMAT_VERSION, generate_ek_entries, generate_ek_entries_with, sort_key,
};
