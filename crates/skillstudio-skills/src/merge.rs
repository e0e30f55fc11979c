//! Merge the global catalog with one project's skills

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ProjectSkills, RuntimeSkill, SkillEntry, SkillSnapshot};

/// Global and project skills combined; project skills override global ones by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedCatalog {
    /// Entries keyed by location, in ascending location order
    pub entries: Vec<SkillEntry>,
    /// One skill per name, sorted by name
    pub skills: Vec<RuntimeSkill>,
    pub duplicate_names: BTreeMap<String, Vec<String>>,
}

impl MergedCatalog {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn loadable(&self) -> usize {
        self.skills.len()
    }
}

pub fn merge_catalogs(global: &SkillSnapshot, project: &ProjectSkills) -> MergedCatalog {
    let mut entries: BTreeMap<String, SkillEntry> = BTreeMap::new();
    for entry in global.entries.iter().chain(&project.entries) {
        entries.insert(entry.location.clone(), entry.clone());
    }

    let mut skills: BTreeMap<String, RuntimeSkill> = BTreeMap::new();
    for skill in global.skills.iter().chain(&project.skills) {
        skills.insert(skill.name.clone(), skill.clone());
    }

    let mut duplicate_names = global.duplicate_names.clone();
    duplicate_names.extend(project.duplicate_names.clone());

    MergedCatalog {
        entries: entries.into_values().collect(),
        skills: skills.into_values().collect(),
        duplicate_names,
    }
}
