//! Skill document parser
//!
//! A skill document is a YAML header between two `---` lines followed by a Markdown body:
//!
//! ```text
//! ---
//! name: pdf-tools
//! description: Work with PDF files
//! ---
//! # PDF tools
//! ```
//!
//! Parsing never fails. Problems are reported as issues and the body is always returned.

use serde_yaml::{Mapping, Value};

use crate::models::{SkillIssue, SkillIssueCode};

const DELIMITER: &str = "---";

/// Header and body split out of a skill document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// Header mapping, present only when it parsed to a YAML mapping
    pub header: Option<Mapping>,
    pub body: String,
    pub issues: Vec<SkillIssue>,
}

impl ParsedDocument {
    fn failed(body: &str, issue: SkillIssue) -> Self {
        Self {
            header: None,
            body: body.trim().to_string(),
            issues: vec![issue],
        }
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Split a raw document into header and body
pub fn parse_document(raw: &str, location: &str) -> ParsedDocument {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with(DELIMITER) {
        return ParsedDocument::failed(
            raw,
            SkillIssue::new(
                SkillIssueCode::HeaderMissing,
                "Missing YAML header (the document must start with ---)",
                location,
            ),
        );
    }

    let mut lines = trimmed.split_inclusive('\n');
    let opening = lines.next().unwrap_or_default();
    let header_start = opening.len();

    let mut offset = header_start;
    let mut closing = None;
    if is_delimiter(opening) {
        for line in lines {
            if is_delimiter(line) {
                closing = Some((offset, offset + line.len()));
                break;
            }
            offset += line.len();
        }
    }

    let Some((header_end, body_start)) = closing else {
        return ParsedDocument::failed(
            raw,
            SkillIssue::new(
                SkillIssueCode::HeaderParseError,
                "Failed to parse header: closing --- not found",
                location,
            ),
        );
    };

    let header_text = &trimmed[header_start..header_end];
    let body = trimmed[body_start..].trim().to_string();

    match serde_yaml::from_str::<Value>(header_text) {
        Ok(Value::Mapping(mapping)) => ParsedDocument {
            header: Some(mapping),
            body,
            issues: Vec::new(),
        },
        Ok(_) => ParsedDocument {
            header: None,
            body,
            issues: vec![SkillIssue::new(
                SkillIssueCode::HeaderNotObject,
                "Header must be a YAML mapping",
                location,
            )],
        },
        Err(err) => ParsedDocument {
            header: None,
            body,
            issues: vec![SkillIssue::new(
                SkillIssueCode::HeaderParseError,
                format!("Failed to parse header YAML: {}", err),
                location,
            )],
        },
    }
}
