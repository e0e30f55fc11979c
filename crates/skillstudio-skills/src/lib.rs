//! Skills for SkillStudio
//!
//! Skills are reusable instruction documents (`SKILL.md`: YAML header plus Markdown body)
//! that an agent loads on demand. This crate discovers them on disk and inside project
//! file trees, validates them into a precise issue taxonomy, caches the global catalog and
//! renders the prompt fragments and `skill_load` tool the agent sees.
//!
//! ```ignore
//! use skillstudio_config::SkillsSettings;
//! use skillstudio_skills::{SkillCatalog, validate_skills};
//!
//! let catalog = SkillCatalog::from_settings(&SkillsSettings::default());
//! for skill in catalog.runtime_skills() {
//!     println!("{}: {}", skill.name, skill.description);
//! }
//! let report = validate_skills(&catalog, None);
//! ```

mod assemble;

pub mod authoring;
pub mod catalog;
pub mod collector;
pub mod error;
pub mod merge;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod scanner;
pub mod tool;
pub mod validation;
pub mod validator;

pub use authoring::{build_skill_markdown, create_skill, CreateSkillInput, CreatedSkill};
pub use catalog::{Clock, ManualClock, SkillCatalog, SystemClock};
pub use collector::{
    collect_project_skills, is_skill_path, DEFAULT_LOCATION_PREFIX, DEFAULT_SKILLS_ROOT,
};
pub use error::{SkillError, SkillResult};
pub use merge::{merge_catalogs, MergedCatalog};
pub use models::{
    ProjectSkills, RuntimeSkill, SkillEntry, SkillIssue, SkillIssueCode, SkillLookup,
    SkillSnapshot, SKILL_FILE_NAME,
};
pub use parser::{parse_document, ParsedDocument};
pub use prompt::{build_catalog_prompt, build_skill_content_block, sample_skill_files};
pub use scanner::SkillScanner;
pub use tool::{SkillLoadTool, ToolDefinition, SKILL_LOAD_TOOL};
pub use validation::{validate_skills, validate_snapshot, SkillValidationItem, ValidationReport};
pub use validator::{is_valid_name, validate_document, SkillSource};
