//! Skill descriptor validation
//!
//! Narrows an untyped header into a [`SkillEntry`]. Every rule runs; issues accumulate and
//! nothing is auto-corrected.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::models::{SkillEntry, SkillIssue, SkillIssueCode, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::parser::ParsedDocument;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid skill name pattern"));

/// Where a descriptor came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSource {
    pub location: String,
    pub relative_location: String,
    pub base_dir: String,
}

impl SkillSource {
    pub fn new(
        location: impl Into<String>,
        relative_location: impl Into<String>,
        base_dir: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            relative_location: relative_location.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Final segment of the base directory
    pub fn dir_name(&self) -> &str {
        self.base_dir
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
    }
}

/// Whether `name` is a syntactically valid skill name
pub fn is_valid_name(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LEN && NAME_PATTERN.is_match(name)
}

fn header_field<'a>(header: Option<&'a Mapping>, key: &str) -> Option<&'a Value> {
    header.and_then(|mapping| mapping.get(key))
}

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_metadata(value: Option<&Value>) -> Option<BTreeMap<String, String>> {
    let Value::Mapping(mapping) = value? else {
        return None;
    };
    let pairs: BTreeMap<String, String> = mapping
        .iter()
        .filter_map(|(key, value)| Some((key.as_str()?.to_string(), value.as_str()?.to_string())))
        .collect();
    (!pairs.is_empty()).then_some(pairs)
}

/// Build an entry from a parsed document, collecting every issue
pub fn validate_document(parsed: ParsedDocument, source: SkillSource) -> SkillEntry {
    let header = parsed.header.as_ref();
    let location = source.location.as_str();
    let mut issues = parsed.issues.clone();

    let name = non_blank_string(header_field(header, "name"));
    let description_value = header_field(header, "description");
    let description = non_blank_string(description_value);
    let dir_name = source.dir_name();

    match name.as_deref() {
        None => issues.push(SkillIssue::new(
            SkillIssueCode::NameMissing,
            "Header has no name",
            location,
        )),
        Some(name) => {
            if !is_valid_name(name) {
                issues.push(
                    SkillIssue::new(
                        SkillIssueCode::NameInvalid,
                        format!(
                            "name must match ^[a-z0-9]+(-[a-z0-9]+)*$ and be 1-{} characters",
                            MAX_NAME_LEN
                        ),
                        location,
                    )
                    .with_name(Some(name)),
                );
            }
            if name != dir_name {
                issues.push(
                    SkillIssue::new(
                        SkillIssueCode::NameDirMismatch,
                        format!(
                            "name does not match its directory (name={}, dir={})",
                            name, dir_name
                        ),
                        location,
                    )
                    .with_name(Some(name)),
                );
            }
        }
    }

    if description.is_none() {
        issues.push(
            SkillIssue::new(
                SkillIssueCode::DescriptionMissing,
                "Header has no description",
                location,
            )
            .with_name(name.as_deref()),
        );
    }
    if description_value.is_some_and(|value| !value.is_string()) {
        issues.push(
            SkillIssue::new(
                SkillIssueCode::DescriptionInvalid,
                "description must be a string",
                location,
            )
            .with_name(name.as_deref()),
        );
    }
    if description
        .as_deref()
        .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
    {
        issues.push(
            SkillIssue::new(
                SkillIssueCode::DescriptionTooLong,
                format!("description must not exceed {} characters", MAX_DESCRIPTION_LEN),
                location,
            )
            .with_name(name.as_deref()),
        );
    }

    let license = header_field(header, "license")
        .and_then(Value::as_str)
        .map(str::to_string);
    let compatibility = header_field(header, "compatibility")
        .and_then(Value::as_str)
        .map(str::to_string);
    let metadata = string_metadata(header_field(header, "metadata"));

    let is_loadable = issues.is_empty() && name.is_some() && description.is_some();

    SkillEntry {
        name,
        description,
        license,
        compatibility,
        metadata,
        location: source.location,
        relative_location: source.relative_location,
        base_dir: source.base_dir,
        body: parsed.body,
        issues,
        is_loadable,
    }
}
