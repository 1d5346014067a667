/*!
 * Statement-level conversion engine.
 *
 * This module turns one source document into a converted output document.
 * It is split into several submodules:
 *
 * - `context`: per-file mutable conversion state
 * - `rules`: the ordered statement rule table, first-match-wins
 * - `translator`: line collapsing, method tracking, and rule dispatch
 * - `assembler`: import handling, brace balancing, and document assembly
 */

// Re-export main types for easier usage
pub use self::assembler::CodeAssembler;
pub use self::context::ConversionContext;
pub use self::rules::{TranslationRule, convert_duration, rules};
pub use self::translator::{SkippedLine, StatementTranslator, TranslationOutcome};

// Submodules
pub mod assembler;
pub mod context;
pub mod rules;
pub mod translator;
