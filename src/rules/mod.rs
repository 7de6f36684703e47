pub mod builtin;
mod engine;
mod types;

pub use engine::{PatternEngine, RuleSet};
pub use types::{Category, CompiledPattern, Issue, Rule, RuleSpec, Severity};
