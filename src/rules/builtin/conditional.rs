use crate::rules::types::{Category, RuleSpec};

/// Preprocessor checks that gate code on an x86 architecture. The
/// `defined(...)` forms catch `#if`/`#elif` chains that the plain
/// `#ifdef` expressions miss.
pub(super) fn spec() -> RuleSpec {
    RuleSpec::new(
        Category::ArchitectureConditional,
        [
            r"#ifdef\s+_M_X64",
            r"#ifdef\s+__x86_64__",
            r"#ifdef\s+_M_IX86",
            r"#ifdef\s+__i386__",
            r"defined\s*\(\s*(__x86_64__|_M_X64)\s*\)",
            r"defined\s*\(\s*(__i386__|_M_IX86)\s*\)",
        ],
    )
}
