//! Property tests for the skill document parser and validator

use proptest::prelude::*;
use skillstudio_skills::{parse_document, validate_document, SkillIssueCode, SkillSource};

fn skill_name_strategy() -> impl Strategy<Value = String> {
    r"[a-z][a-z0-9]{0,7}(-[a-z0-9]{1,8}){0,3}"
        .prop_filter("YAML keywords", |s| !matches!(s.as_str(), "true" | "false" | "null"))
}

fn description_strategy() -> impl Strategy<Value = String> {
    r"[a-zA-Z][a-zA-Z0-9 ,.]{0,80}"
        .prop_map(|s| s.trim().to_string())
        .prop_filter("YAML keywords", |s| {
            !matches!(s.to_ascii_lowercase().as_str(), "true" | "false" | "null")
        })
}

proptest! {
    #[test]
    fn prop_well_formed_skill_is_loadable(
        name in skill_name_strategy(),
        description in description_strategy(),
        body in r"[a-zA-Z0-9 #\n]{0,60}",
    ) {
        let raw = format!("---\nname: {}\ndescription: {}\n---\n{}", name, description, body);
        let base_dir = format!("/skills/{}", name);
        let location = format!("{}/SKILL.md", base_dir);
        let entry = validate_document(
            parse_document(&raw, &location),
            SkillSource::new(&location, &location, &base_dir),
        );
        prop_assert!(entry.is_loadable, "issues: {:?}", entry.issues);
        prop_assert_eq!(entry.body, body.trim());
    }

    #[test]
    fn prop_headerless_document_never_loads(body in r"[a-zA-Z0-9 #\n]{0,80}") {
        let entry = validate_document(
            parse_document(&body, "loc"),
            SkillSource::new("loc", "loc", "/skills/x"),
        );
        prop_assert!(!entry.is_loadable);
        prop_assert_eq!(entry.issues[0].code, SkillIssueCode::HeaderMissing);
        prop_assert_eq!(entry.body, body.trim());
    }
}
