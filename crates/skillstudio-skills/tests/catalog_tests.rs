//! Catalog scanning scenarios over real directories

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use skillstudio_skills::{
    validate_skills, ManualClock, SkillCatalog, SkillIssueCode, SkillScanner, SKILL_FILE_NAME,
};
use tempfile::TempDir;

fn write(root: &Path, dir: &str, content: &str) {
    let path = root.join(dir);
    fs::create_dir_all(&path).unwrap();
    fs::write(path.join(SKILL_FILE_NAME), content).unwrap();
}

fn catalog(root: &Path, clock: Arc<ManualClock>) -> SkillCatalog {
    SkillCatalog::with_clock(SkillScanner::new(root, root), Duration::from_secs(60), clock)
}

#[test]
fn test_duplicate_names_resolve_to_last_location() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "team-a/foo", "---\nname: foo\ndescription: from a\n---\n");
    write(temp.path(), "team-b/foo", "---\nname: foo\ndescription: from b\n---\n");

    let snapshot = catalog(temp.path(), Arc::new(ManualClock::default())).snapshot(false);
    let locations = snapshot.duplicate_names.get("foo").unwrap();
    assert_eq!(locations.len(), 2);
    assert!(locations[0] < locations[1]);
    assert!(locations[0].contains("team-a"));

    assert_eq!(snapshot.skills.len(), 1);
    assert_eq!(snapshot.skills[0].description, "from b");
    for entry in &snapshot.entries {
        assert!(entry.has_issue(SkillIssueCode::DuplicateName));
        assert!(entry.is_loadable);
    }
}

#[test]
fn test_headerless_descriptor_reported() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "plain", "# Just text\n");
    write(temp.path(), "good", "---\nname: good\ndescription: ok\n---\n");

    let catalog = catalog(temp.path(), Arc::new(ManualClock::default()));
    let snapshot = catalog.snapshot(false);
    let plain = snapshot
        .entries
        .iter()
        .find(|e| e.location.contains("plain"))
        .unwrap();
    assert!(!plain.is_loadable);
    assert!(plain.has_issue(SkillIssueCode::HeaderMissing));
    assert_eq!(snapshot.skill_names(), vec!["good"]);

    let report = validate_skills(&catalog, None);
    assert!(!report.ok);
    assert_eq!(report.skills.len(), 2);
}

#[test]
fn test_entries_are_sorted_by_location() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a", "---\nname: a\ndescription: x\n---\n");
    write(temp.path(), "a-b", "---\nname: a-b\ndescription: x\n---\n");
    write(temp.path(), "b", "---\nname: b\ndescription: x\n---\n");

    let snapshot = catalog(temp.path(), Arc::new(ManualClock::default())).snapshot(false);
    let locations: Vec<_> = snapshot.entries.iter().map(|e| e.location.clone()).collect();
    let mut sorted = locations.clone();
    sorted.sort();
    assert_eq!(locations, sorted);
}

#[test]
fn test_snapshot_expiry_picks_up_changes() {
    let temp = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::default());
    let catalog = catalog(temp.path(), clock.clone());

    assert!(catalog.runtime_skills().is_empty());
    write(temp.path(), "late", "---\nname: late\ndescription: x\n---\n");
    assert!(catalog.runtime_skills().is_empty());

    clock.advance(Duration::from_secs(61));
    assert_eq!(catalog.snapshot(false).skill_names(), vec!["late"]);
}

#[test]
fn test_unreadable_descriptor_does_not_abort_scan() {
    let temp = TempDir::new().unwrap();
    let broken = temp.path().join("binary");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join(SKILL_FILE_NAME), [0xff, 0xfe]).unwrap();
    write(temp.path(), "good", "---\nname: good\ndescription: ok\n---\n");

    let catalog = catalog(temp.path(), Arc::new(ManualClock::default()));
    let snapshot = catalog.snapshot(false);
    assert_eq!(snapshot.entries.len(), 2);

    let bad = snapshot
        .entries
        .iter()
        .find(|e| e.location.contains("binary"))
        .unwrap();
    assert!(!bad.is_loadable);
    assert_eq!(bad.issues.len(), 1);
    assert_eq!(bad.issues[0].code, SkillIssueCode::HeaderParseError);

    assert!(catalog.get_by_name("good").skill.is_some());
    assert_eq!(snapshot.skills.len(), 1);
}
