use crate::rules::types::{Category, RuleSpec};

/// MSVC-only constructs. These compile nowhere else, so they block any
/// port that changes toolchain along with architecture.
pub(super) fn spec() -> RuleSpec {
    RuleSpec::new(
        Category::CompilerDirective,
        [
            r"__declspec\s*\(\s*align",
            r"__forceinline",
            r"#ifdef\s+_MSC_VER",
        ],
    )
}
