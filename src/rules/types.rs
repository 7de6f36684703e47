use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed taxonomy of architecture-specific code patterns. Each category's
/// expression list is open for extension; the set of categories is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    InlineAssembly,
    ArchitectureIntrinsic,
    ArchitectureConditional,
    PlatformApi,
    CompilerDirective,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::InlineAssembly => "inline_assembly",
            Category::ArchitectureIntrinsic => "architecture_intrinsic",
            Category::ArchitectureConditional => "architecture_conditional",
            Category::PlatformApi => "platform_api",
            Category::CompilerDirective => "compiler_directive",
        }
    }

    /// Severity is a total function of category. Categories without an
    /// explicit ranking land in the Low arm.
    pub fn severity(self) -> Severity {
        match self {
            Category::InlineAssembly | Category::ArchitectureIntrinsic => Severity::High,
            Category::ArchitectureConditional | Category::PlatformApi => Severity::Medium,
            Category::CompilerDirective => Severity::Low,
        }
    }

    /// Remediation text is a total function of category. Categories without
    /// dedicated guidance get the generic portability-review message.
    pub fn remediation(self) -> &'static str {
        match self {
            Category::InlineAssembly => {
                "Replace inline assembly with portable code or per-architecture intrinsics"
            }
            Category::ArchitectureIntrinsic => {
                "Replace SIMD intrinsics with portable equivalents for the target architecture"
            }
            Category::ArchitectureConditional => {
                "Extend conditional compilation to cover the target architecture or use runtime detection"
            }
            Category::PlatformApi => {
                "Use cross-platform alternatives or add target-specific implementations"
            }
            Category::CompilerDirective => "Review for architecture portability",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One detected occurrence of a category's pattern at a file/line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Path relative to the scan root.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    pub category: Category,
    /// The expression that fired.
    pub pattern: String,
    pub matched_text: String,
    pub severity: Severity,
    pub remediation: String,
}

/// An uncompiled rule: one category with an ordered list of expression
/// sources. Compiled into a [`Rule`] by [`crate::rules::RuleSet::compile`],
/// which discards malformed expressions with a warning.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub category: Category,
    pub patterns: Vec<String>,
}

impl RuleSpec {
    pub fn new(category: Category, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            category,
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }
}

/// A compiled expression, keeping its source text for issue reporting.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub source: String,
    pub regex: Regex,
}

/// A validated rule. Immutable and shared read-only across scans.
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: Category,
    pub patterns: Vec<CompiledPattern>,
}
