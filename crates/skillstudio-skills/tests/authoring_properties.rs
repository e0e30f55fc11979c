//! Property tests for skill authoring: whatever description `create_skill` accepts must load
//! back unchanged

use std::time::Duration;

use proptest::prelude::*;
use skillstudio_skills::{create_skill, CreateSkillInput, SkillCatalog, SkillScanner};
use tempfile::TempDir;

fn description_strategy() -> impl Strategy<Value = String> {
    r"[ -~\t\r\néü日本]{1,120}".prop_filter("blank", |s| !s.trim().is_empty())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_created_description_loads_unchanged(
        description in description_strategy(),
        license in proptest::option::of(r"[ -~\t]{1,20}"),
    ) {
        let temp = TempDir::new().unwrap();
        let catalog = SkillCatalog::new(
            SkillScanner::new(temp.path(), temp.path()),
            Duration::from_secs(60),
        );

        create_skill(
            &catalog,
            CreateSkillInput {
                name: "round-trip".to_string(),
                description: description.clone(),
                license: license.clone(),
                ..CreateSkillInput::default()
            },
        )
        .unwrap();

        let snapshot = catalog.snapshot(false);
        prop_assert_eq!(snapshot.entries.len(), 1);
        prop_assert!(snapshot.entries[0].issues.is_empty(), "{:?}", snapshot.entries[0].issues);
        let skill = catalog.get_by_name("round-trip").skill.unwrap();
        prop_assert_eq!(skill.description, description.trim());
        let expected_license = license
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        prop_assert_eq!(skill.license, expected_license);
    }
}
