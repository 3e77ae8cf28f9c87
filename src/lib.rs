//! Human-friendly differences between two sequences of hashable elements.
//!
//! The flagship type is [`matcher::SequenceMatcher`], a Ratcliff/Obershelp-style
//! longest-contiguous-match engine. Everything else (opcode derivation,
//! similarity ratios, close-match queries, the fancy line differ, and the
//! unified/context renderers) is a consumer of the matching blocks it
//! produces.
//!
//! No file I/O lives here: every function takes already-tokenized sequences
//! (lines, characters, or any `Eq + Hash + Clone` element) and returns
//! in-memory results.

pub mod close_matches;
pub mod context;
pub mod differ;
pub mod error;
pub mod matcher;
pub mod ndiff;
pub mod opcode;
pub mod select;
pub mod unified;
pub mod util;

pub use close_matches::get_close_matches;
pub use context::{context_diff, ContextDiffOptions};
pub use differ::Differ;
pub use error::DifflibError;
pub use matcher::SequenceMatcher;
pub use ndiff::{is_character_junk, is_line_junk, ndiff, restore};
pub use opcode::{OpCode, Tag};
pub use unified::{unified_diff, UnifiedDiffOptions};
