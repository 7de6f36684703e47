use crate::rules::types::{Category, RuleSpec};

pub(super) fn spec() -> RuleSpec {
    RuleSpec::new(
        Category::InlineAssembly,
        [r"__asm__\s*\(", r"asm\s*\(", r"_asm\s*\{"],
    )
}
