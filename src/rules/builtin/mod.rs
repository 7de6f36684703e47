mod assembly;
mod compiler;
mod conditional;
mod intrinsics;
mod platform;

use crate::rules::types::RuleSpec;

/// Builtin rule table in category registration order. Issue ordering within
/// a line follows this order.
pub fn all_specs() -> Vec<RuleSpec> {
    vec![
        assembly::spec(),
        intrinsics::spec(),
        conditional::spec(),
        platform::spec(),
        compiler::spec(),
    ]
}
