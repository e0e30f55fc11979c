//! Skills defined inside a project's virtual file tree
//!
//! Any file at `<root>/<dir...>/SKILL.md` (case-insensitive) in the project is a
//! descriptor. The root is the workspace root, `/skills` by default. Locations are `<prefix>:<virtual path>` so they never collide with
//! filesystem locations.

use skillstudio_storage::{path, ProjectFileSet};

use crate::assemble::assemble;
use crate::models::{ProjectSkills, SKILL_FILE_NAME};
use crate::parser::parse_document;
use crate::validator::{validate_document, SkillSource};

/// Default location prefix for project skills
pub const DEFAULT_LOCATION_PREFIX: &str = "project";

/// Default virtual directory holding project skills
pub const DEFAULT_SKILLS_ROOT: &str = "/skills";

/// Whether a virtual path names a skill descriptor at least one directory below `root`
///
/// Both arguments are normalized virtual paths; the comparison ignores ASCII case.
pub fn is_skill_path(file_path: &str, root: &str) -> bool {
    let file_path = file_path.to_ascii_lowercase();
    let root = root.to_ascii_lowercase();
    let parent = path::parent_of(&file_path);
    path::file_name(&file_path).eq_ignore_ascii_case(SKILL_FILE_NAME)
        && parent != root
        && path::is_within(&parent, &root)
}

/// Parse, validate and assemble every skill descriptor under `root` in `files`
pub fn collect_project_skills(
    files: &ProjectFileSet,
    root: &str,
    location_prefix: &str,
) -> ProjectSkills {
    let entries = files
        .iter()
        .filter(|(file_path, _)| is_skill_path(file_path, root))
        .map(|(file_path, content)| {
            let location = format!("{}:{}", location_prefix, file_path);
            let source = SkillSource::new(&location, file_path, path::parent_of(file_path));
            validate_document(parse_document(content, &location), source)
        })
        .collect();

    let assembled = assemble(entries);
    ProjectSkills {
        entries: assembled.entries,
        skills: assembled.skills,
        duplicate_names: assembled.duplicate_names,
    }
}
