// Core lexicon data structures
//
// This module holds the entry model, the cross-reference token format that
// links entries together, and the immutable store with its derived-word index.

pub mod entry;
pub mod cross_ref;
pub mod derived_index;
pub mod lexicon;

pub use entry::{Entry, EntryId, LocalizedText, ENGLISH};
pub use cross_ref::{CrossRef, Segment, entry_id, link_ids, link_style, segments};
pub use derived_index::DerivedIndex;
pub use lexicon::{Lexicon, LexiconInfo};
