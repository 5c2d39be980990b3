use goviz::core::{ImportFilter, SELF_TOKEN};

#[test]
fn empty_seek_path_applies_to_everything() {
    let filter = ImportFilter::new("pkg/a", "", false);
    for path in ["pkg/a", "fmt", "github.com/x/y", ""] {
        assert!(filter.applicable(path), "{path} should be applicable");
    }
}

#[test]
fn self_token_scopes_to_root() {
    let filter = ImportFilter::new("pkg/a", SELF_TOKEN, false);
    assert_eq!(filter.seek_path(), "pkg/a");
    assert!(filter.applicable("pkg/a"));
    assert!(filter.applicable("pkg/a/sub"));
    assert!(!filter.applicable("other/pkg"));
    assert!(!filter.applicable("pkg"));
}

#[test]
fn prefix_match_is_not_segment_aware() {
    let filter = ImportFilter::new("pkg/a", "pkg/fo", false);
    assert!(filter.applicable("pkg/foo"));
    assert!(filter.applicable("pkg/fo/bar"));
    assert!(!filter.applicable("pkg/f"));
}

#[test]
fn visibility_is_a_global_switch() {
    let hidden = ImportFilter::new("pkg/a", SELF_TOKEN, false);
    let shown = ImportFilter::new("pkg/a", SELF_TOKEN, true);
    for path in ["fmt", "pkg/a/sub", "C"] {
        assert!(!hidden.visible(path));
        assert!(shown.visible(path));
    }
}
