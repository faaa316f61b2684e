use std::collections::BTreeSet;

use phosphor_uikit::diff::diff;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn identical_sets_have_no_changes() {
    let d = diff(&set(&["a", "b"]), &set(&["a", "b"]));
    assert!(!d.has_changes());
    assert_eq!(d.summary(), "0 to create, 0 to delete");
}

#[test]
fn empty_existing_creates_everything() {
    let d = diff(&set(&["b", "a"]), &BTreeSet::new());
    assert_eq!(d.to_create, set(&["a", "b"]));
    assert!(d.to_delete.is_empty());
}

#[test]
fn empty_expected_deletes_everything() {
    let d = diff(&BTreeSet::new(), &set(&["x", "y"]));
    assert!(d.to_create.is_empty());
    assert_eq!(d.to_delete, set(&["x", "y"]));
}

#[test]
fn overlapping_sets() {
    let d = diff(&set(&["a", "b", "c"]), &set(&["b", "c", "d"]));
    assert_eq!(d.to_create, set(&["a"]));
    assert_eq!(d.to_delete, set(&["d"]));
    assert!(d.has_changes());
    assert_eq!(d.summary(), "1 to create, 1 to delete");
}

#[test]
fn changed_identity_is_delete_plus_create() {
    let d = diff(
        &set(&["person.44.bold.imageset"]),
        &set(&["person.44.regular.imageset"]),
    );
    assert_eq!(d.to_create, set(&["person.44.bold.imageset"]));
    assert_eq!(d.to_delete, set(&["person.44.regular.imageset"]));
}

#[test]
fn results_iterate_sorted() {
    let d = diff(&set(&["zeta", "alpha", "mu"]), &set(&["omega", "beta"]));
    let created: Vec<_> = d.to_create.iter().cloned().collect();
    let deleted: Vec<_> = d.to_delete.iter().cloned().collect();
    assert_eq!(created, vec!["alpha", "mu", "zeta"]);
    assert_eq!(deleted, vec!["beta", "omega"]);
}

#[test]
fn works_for_any_ordered_key() {
    let expected = BTreeSet::from([1u32, 2, 3]);
    let existing = BTreeSet::from([3u32, 4]);
    let d = diff(&expected, &existing);
    assert_eq!(d.to_create, BTreeSet::from([1, 2]));
    assert_eq!(d.to_delete, BTreeSet::from([4]));
}
