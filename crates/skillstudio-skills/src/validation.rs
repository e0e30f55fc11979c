//! Validation report over the catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SkillCatalog;
use crate::models::{SkillIssue, SkillIssueCode, SkillSnapshot};

/// Per-entry line of a validation report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillValidationItem {
    pub name: Option<String>,
    pub location: String,
    pub relative_location: String,
    pub is_loadable: bool,
    pub issues: Vec<SkillIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no issue was found
    pub ok: bool,
    pub scanned_at: DateTime<Utc>,
    pub skills: Vec<SkillValidationItem>,
    /// Every issue of the reported skills, flattened
    pub issues: Vec<SkillIssue>,
}

/// Validate the (possibly cached) catalog, optionally restricted to one skill name
pub fn validate_skills(catalog: &SkillCatalog, target: Option<&str>) -> ValidationReport {
    validate_snapshot(&catalog.snapshot(false), target)
}

/// Build a report from a snapshot
///
/// An unknown `target` yields a report with a single `not_found` issue.
pub fn validate_snapshot(snapshot: &SkillSnapshot, target: Option<&str>) -> ValidationReport {
    let target = target.map(str::trim).filter(|t| !t.is_empty());
    let skills: Vec<SkillValidationItem> = snapshot
        .entries
        .iter()
        .filter(|entry| target.map_or(true, |t| entry.name.as_deref() == Some(t)))
        .map(|entry| SkillValidationItem {
            name: entry.name.clone(),
            location: entry.location.clone(),
            relative_location: entry.relative_location.clone(),
            is_loadable: entry.is_loadable,
            issues: entry.issues.clone(),
        })
        .collect();

    let mut issues: Vec<SkillIssue> = skills.iter().flat_map(|item| item.issues.clone()).collect();
    if let Some(target) = target {
        if skills.is_empty() {
            issues.push(
                SkillIssue::new(
                    SkillIssueCode::NotFound,
                    format!("Skill not found: {}", target),
                    "",
                )
                .with_name(Some(target)),
            );
        }
    }

    ValidationReport {
        ok: issues.is_empty(),
        scanned_at: snapshot.scanned_at,
        skills,
        issues,
    }
}
