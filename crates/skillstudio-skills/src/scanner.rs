//! Filesystem skill scanner
//!
//! Walks the skills root for files named `SKILL.md`, parses and validates each one
//! independently, then assembles a [`SkillSnapshot`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use skillstudio_config::SkillsSettings;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::assemble::assemble;
use crate::models::{SkillEntry, SkillIssue, SkillIssueCode, SkillSnapshot, SKILL_FILE_NAME};
use crate::parser::parse_document;
use crate::validator::{validate_document, SkillSource};

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Scans one skills root directory
#[derive(Debug, Clone)]
pub struct SkillScanner {
    root_dir: PathBuf,
    working_dir: PathBuf,
}

impl SkillScanner {
    /// Create a scanner; relative paths are resolved against the process working directory
    pub fn new(root_dir: impl AsRef<Path>, working_dir: impl AsRef<Path>) -> Self {
        Self {
            root_dir: absolutize(root_dir.as_ref()),
            working_dir: absolutize(working_dir.as_ref()),
        }
    }

    pub fn from_settings(settings: &SkillsSettings) -> Self {
        Self::new(&settings.root_dir, &settings.working_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Scan now
    pub fn scan(&self) -> SkillSnapshot {
        self.scan_at(Utc::now())
    }

    /// Scan and stamp the snapshot with `scanned_at`
    pub fn scan_at(&self, scanned_at: DateTime<Utc>) -> SkillSnapshot {
        if !self.root_dir.is_dir() {
            debug!(root = %self.root_dir.display(), "Skills root does not exist");
            return SkillSnapshot::empty(&self.root_dir, scanned_at);
        }

        let files = self.skill_files();
        debug!(root = %self.root_dir.display(), count = files.len(), "Scanning skill descriptors");

        let entries: Vec<SkillEntry> = files.iter().map(|path| self.load_entry(path)).collect();
        let assembled = assemble(entries);

        SkillSnapshot {
            scanned_at,
            root_dir: self.root_dir.clone(),
            entries: assembled.entries,
            skills: assembled.skills,
            duplicate_names: assembled.duplicate_names,
        }
    }

    /// Every `SKILL.md` below the root, in ascending path order
    fn skill_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root_dir)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable path while scanning skills: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == SKILL_FILE_NAME)
            .map(|entry| entry.into_path())
            .collect();
        files.sort_by_key(|path| path.display().to_string());
        files
    }

    /// Path relative to the working directory, or the absolute path when outside it
    pub fn relative_location(&self, path: &Path) -> String {
        match path.strip_prefix(&self.working_dir) {
            Ok(relative) => relative.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }

    fn load_entry(&self, path: &Path) -> SkillEntry {
        let location = path.display().to_string();
        let base_dir = path
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        let source = SkillSource::new(&location, self.relative_location(path), base_dir);

        match std::fs::read_to_string(path) {
            Ok(raw) => validate_document(parse_document(&raw, &location), source),
            Err(err) => {
                warn!(location = %location, "Failed to read skill descriptor: {}", err);
                SkillEntry {
                    name: None,
                    description: None,
                    license: None,
                    compatibility: None,
                    metadata: None,
                    location: source.location.clone(),
                    relative_location: source.relative_location,
                    base_dir: source.base_dir,
                    body: String::new(),
                    issues: vec![SkillIssue::new(
                        SkillIssueCode::HeaderParseError,
                        format!("Failed to read descriptor: {}", err),
                        source.location,
                    )],
                    is_loadable: false,
                }
            }
        }
    }
}
