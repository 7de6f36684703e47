//! Scan report assembly and recommendation derivation.

use crate::buildsys::{BuildSystem, BuildSystemDescriptor};
use crate::deps::Dependency;
use crate::rules::{Issue, Severity};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl Summary {
    pub fn from_issues(issues: &[Issue]) -> Self {
        issues.iter().fold(Self::default(), |mut acc, issue| {
            match issue.severity {
                Severity::High => acc.high += 1,
                Severity::Medium => acc.medium += 1,
                Severity::Low => acc.low += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// The immutable aggregate result of one scan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub version: String,
    pub total_files: usize,
    pub scanned_files: usize,
    pub issues: Vec<Issue>,
    pub dependencies: Vec<Dependency>,
    pub build_systems: Vec<BuildSystemDescriptor>,
    pub summary: Summary,
    pub recommendations: Vec<String>,
    /// RFC 3339 timestamp taken when the report was built.
    pub scanned_at: String,
}

/// Assembles a [`ScanReport`] from the component outputs. Recommendation
/// text is a pure function of the assembled data; `build` only adds the
/// timestamp on top.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    total_files: usize,
    scanned_files: usize,
    issues: Vec<Issue>,
    dependencies: Vec<Dependency>,
    build_systems: Vec<BuildSystemDescriptor>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_total_files(mut self, count: usize) -> Self {
        self.total_files = count;
        self
    }

    pub fn with_scanned_files(mut self, count: usize) -> Self {
        self.scanned_files = count;
        self
    }

    pub fn with_issues(mut self, issues: Vec<Issue>) -> Self {
        self.issues = issues;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_build_systems(mut self, build_systems: Vec<BuildSystemDescriptor>) -> Self {
        self.build_systems = build_systems;
        self
    }

    pub fn build(self) -> ScanReport {
        let summary = Summary::from_issues(&self.issues);
        let recommendations = derive_recommendations(
            &summary,
            &self.build_systems,
            self.dependencies.len(),
        );

        ScanReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            total_files: self.total_files,
            scanned_files: self.scanned_files,
            issues: self.issues,
            dependencies: self.dependencies,
            build_systems: self.build_systems,
            summary,
            recommendations,
            scanned_at: Utc::now().to_rfc3339(),
        }
    }
}

fn derive_recommendations(
    summary: &Summary,
    build_systems: &[BuildSystemDescriptor],
    dependency_count: usize,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.total() == 0 {
        recommendations.push("No obvious architecture-specific code detected".to_string());
    } else {
        recommendations.push(format!(
            "Found {} potential compatibility issues",
            summary.total()
        ));
        if summary.high > 0 {
            recommendations.push(format!(
                "{} high-severity issues require immediate attention",
                summary.high
            ));
        }
    }

    // One message per distinct system; BTreeSet gives a stable order.
    let distinct: BTreeSet<BuildSystem> = build_systems.iter().map(|d| d.system).collect();
    for system in distinct {
        recommendations.push(format!(
            "{} detected - review build configuration for architecture-specific settings",
            system.display_name()
        ));
    }

    if dependency_count > 0 {
        recommendations.push(format!(
            "{} dependencies found - verify architecture compatibility",
            dependency_count
        ));
    }

    recommendations
}
