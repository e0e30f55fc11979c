//! Catalog assembly shared by the global scanner and the project collector

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::{RuntimeSkill, SkillEntry, SkillIssue, SkillIssueCode};

/// Entries plus the derived runtime skills and duplicate index
#[derive(Debug, Clone, Default)]
pub(crate) struct Assembled {
    pub entries: Vec<SkillEntry>,
    pub skills: Vec<RuntimeSkill>,
    pub duplicate_names: BTreeMap<String, Vec<String>>,
}

/// Resolve loadable entries into one skill per name
///
/// When several loadable entries share a name, the one whose location sorts last wins and
/// every colliding entry gets a `duplicate_name` issue. That issue is appended after the
/// loadability verdict and leaves `is_loadable` unchanged.
pub(crate) fn assemble(mut entries: Vec<SkillEntry>) -> Assembled {
    let mut by_name: BTreeMap<String, RuntimeSkill> = BTreeMap::new();
    let mut locations: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for skill in entries.iter().filter_map(SkillEntry::runtime_skill) {
        locations
            .entry(skill.name.clone())
            .or_default()
            .push(skill.location.clone());
        match by_name.get(&skill.name) {
            Some(existing) if existing.location > skill.location => {}
            _ => {
                by_name.insert(skill.name.clone(), skill);
            }
        }
    }

    let duplicate_names: BTreeMap<String, Vec<String>> = locations
        .into_iter()
        .filter(|(_, locations)| locations.len() > 1)
        .map(|(name, mut locations)| {
            locations.sort();
            (name, locations)
        })
        .collect();

    for (name, colliding) in &duplicate_names {
        warn!(
            name = %name,
            locations = ?colliding,
            "Duplicate skill name, using the last location"
        );
        for entry in entries
            .iter_mut()
            .filter(|entry| colliding.contains(&entry.location))
        {
            entry.issues.push(
                SkillIssue::new(
                    SkillIssueCode::DuplicateName,
                    format!(
                        "Skill name \"{}\" is defined more than once; the last location is used",
                        name
                    ),
                    entry.location.clone(),
                )
                .with_name(Some(name)),
            );
        }
    }

    Assembled {
        entries,
        skills: by_name.into_values().collect(),
        duplicate_names,
    }
}
