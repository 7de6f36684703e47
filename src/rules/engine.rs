use crate::error::{Result, ScanError};
use crate::rules::builtin;
use crate::rules::types::{CompiledPattern, Issue, Rule, RuleSpec};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{trace, warn};

static BUILTIN_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet::compile(builtin::all_specs()));

/// An immutable, validated rule table. Compilation happens once; malformed
/// expressions never reach per-line evaluation.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The builtin table, compiled once and shared.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN_RULES
    }

    /// Compile rule specs, discarding malformed expressions with a warning.
    /// A rule whose expressions all fail to compile is dropped entirely.
    pub fn compile(specs: impl IntoIterator<Item = RuleSpec>) -> RuleSet {
        let mut rules = Vec::new();

        for spec in specs {
            let mut patterns = Vec::with_capacity(spec.patterns.len());
            for source in spec.patterns {
                match Regex::new(&source) {
                    Ok(regex) => patterns.push(CompiledPattern { source, regex }),
                    Err(e) => {
                        warn!(
                            category = spec.category.as_str(),
                            pattern = %source,
                            error = %e,
                            "Discarding invalid rule expression"
                        );
                    }
                }
            }

            if patterns.is_empty() {
                warn!(
                    category = spec.category.as_str(),
                    "Discarding rule with no valid expressions"
                );
                continue;
            }

            rules.push(Rule {
                category: spec.category,
                patterns,
            });
        }

        RuleSet { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }
}

/// Applies the rule table to file content, line by line.
///
/// Per line, each category is evaluated independently and reports at most
/// one issue: the first expression within a category that matches wins, and
/// the category's remaining expressions are not tried for that line. This
/// bounds issue counts and keeps reports comparable across runs.
#[derive(Debug, Clone)]
pub struct PatternEngine {
    rules: RuleSet,
}

impl PatternEngine {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::builtin().clone(),
        }
    }

    /// Register additional rules after the builtin table. Extension
    /// expressions are validated the same way as builtins.
    pub fn with_rules(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.rules.extend(RuleSet::compile(specs));
        self
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    /// Check content against all rules. `file` is recorded verbatim in
    /// each issue.
    pub fn check_content(&self, content: &str, file: &str) -> Vec<Issue> {
        trace!(
            file,
            rules = self.rules.rules().len(),
            "Checking content against rules"
        );

        let mut issues = Vec::new();
        // Categories that already reported on the current line. The
        // taxonomy is small, so a linear scan beats hashing here.
        let mut fired = Vec::new();

        for (idx, line) in content.lines().enumerate() {
            fired.clear();

            for rule in self.rules.rules() {
                if fired.contains(&rule.category) {
                    continue;
                }

                if let Some(issue) = Self::check_line(rule, line, file, idx + 1) {
                    fired.push(rule.category);
                    issues.push(issue);
                }
            }
        }

        issues
    }

    /// Scan one file on disk, reporting paths relative to `root`. Bytes are
    /// decoded lossily so stray non-UTF-8 sequences do not fail the file.
    pub fn scan_file(&self, path: &Path, root: &Path) -> Result<Vec<Issue>> {
        let bytes = fs::read(path).map_err(|e| ScanError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let relative = path.strip_prefix(root).unwrap_or(path);
        Ok(self.check_content(&content, &relative.display().to_string()))
    }

    fn check_line(rule: &Rule, line: &str, file: &str, line_num: usize) -> Option<Issue> {
        for pattern in &rule.patterns {
            if let Some(m) = pattern.regex.find(line) {
                return Some(Issue {
                    file: file.to_string(),
                    line: line_num,
                    category: rule.category,
                    pattern: pattern.source.clone(),
                    matched_text: m.as_str().to_string(),
                    severity: rule.category.severity(),
                    remediation: rule.category.remediation().to_string(),
                });
            }
        }
        None
    }
}

impl Default for PatternEngine {
    fn default() -> Self {
        Self::new()
    }
}
