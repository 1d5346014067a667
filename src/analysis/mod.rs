/*!
 * Cross-file source analysis.
 *
 * This module builds the project-wide symbol table used to inform per-file
 * conversion decisions. It is split into two submodules:
 *
 * - `model`: ClassInfo records and the immutable ProjectContext
 * - `classifier`: the heuristic source scanner and role classifiers
 *
 * Analysis runs as a strict first phase: the ProjectContext is built from
 * every input file before any translation starts, and is never mutated
 * afterwards.
 */

// Re-export main types for easier usage
pub use self::model::{ClassInfo, FieldInfo, MethodInfo, ParameterInfo, ProjectContext, RoleFlags};
pub use self::classifier::ProjectAnalyzer;

// Submodules
pub mod classifier;
pub mod model;
