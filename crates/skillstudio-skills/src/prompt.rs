//! Prompt fragments handed to the model

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::models::{RuntimeSkill, SKILL_FILE_NAME};

/// Default number of files listed in a skill content block
pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// `<available_skills>` catalog block; empty when there are no skills
pub fn build_catalog_prompt(skills: &[RuntimeSkill]) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        "Skills catalog for this project:".to_string(),
        "When the task matches a skill below, first call skill_load with the exact skill name."
            .to_string(),
        "Load only the skills needed for the current task.".to_string(),
        "<available_skills>".to_string(),
    ];
    for skill in skills {
        lines.push("  <skill>".to_string());
        lines.push(format!("    <name>{}</name>", skill.name));
        lines.push(format!("    <description>{}</description>", skill.description));
        lines.push(format!("    <location>{}</location>", skill.relative_location));
        lines.push("  </skill>".to_string());
    }
    lines.push("</available_skills>".to_string());
    lines.join("\n")
}

/// `<skill_content>` block with the skill body and a sample of its files
pub fn build_skill_content_block(skill: &RuntimeSkill, sampled_files: &[String]) -> String {
    let file_lines: Vec<String> = sampled_files
        .iter()
        .map(|file| format!("<file>{}</file>", file))
        .collect();

    [
        format!("<skill_content name=\"{}\">", skill.name),
        format!("# Skill: {}", skill.name),
        String::new(),
        skill.body.trim().to_string(),
        String::new(),
        format!("Base directory for this skill: {}", skill.base_dir),
        "Relative paths mentioned in this skill are relative to this base directory.".to_string(),
        "Note: the file list below is sampled.".to_string(),
        "<skill_files>".to_string(),
        file_lines.join("\n"),
        "</skill_files>".to_string(),
        "</skill_content>".to_string(),
    ]
    .join("\n")
}

/// Up to `limit` files under the skill's base directory, excluding descriptors, sorted
///
/// Unreadable or missing directories yield fewer (or no) files.
pub fn sample_skill_files(skill: &RuntimeSkill, limit: usize) -> Vec<String> {
    let base = Path::new(&skill.base_dir);
    if limit == 0 || !base.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(base)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file() && entry.file_name() != SKILL_FILE_NAME)
        .take(limit)
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files.into_iter().map(|path| path.display().to_string()).collect()
}
