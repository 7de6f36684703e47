use crate::rules::types::{Category, RuleSpec};

/// Win32 system-information APIs whose results are architecture-shaped.
pub(super) fn spec() -> RuleSpec {
    RuleSpec::new(
        Category::PlatformApi,
        [r"GetSystemInfo", r"IsWow64Process", r"SYSTEM_INFO"],
    )
}
