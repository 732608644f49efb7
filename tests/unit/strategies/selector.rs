//! Unit tests for the strategy selector

use signatrix::config::Config;
use signatrix::strategies::{is_valid_strategy, select_strategy, valid_names};

#[test]
fn test_recognized_names() {
    let config = Config::default();
    assert_eq!(select_strategy(Some("promax"), &config).name(), "promax");
    assert_eq!(
        select_strategy(Some("cypherpunk"), &config).name(),
        "cypherpunk"
    );
    assert_eq!(select_strategy(Some("level"), &config).name(), "level");
    assert_eq!(select_strategy(Some("default"), &config).name(), "default");
}

#[test]
fn test_case_insensitive() {
    let config = Config::default();
    assert_eq!(select_strategy(Some("ProMax"), &config).name(), "promax");
    assert_eq!(
        select_strategy(Some("CYPHERPUNK"), &config).name(),
        "cypherpunk"
    );
}

#[test]
fn test_unknown_and_absent_fall_back_to_default() {
    let config = Config::default();
    assert_eq!(select_strategy(None, &config).name(), "default");
    assert_eq!(select_strategy(Some(""), &config).name(), "default");
    assert_eq!(select_strategy(Some("quantum"), &config).name(), "default");
}

#[test]
fn test_selection_is_stable() {
    let config = Config::default();
    for _ in 0..3 {
        assert_eq!(select_strategy(Some("nonsense"), &config).name(), "default");
        assert_eq!(select_strategy(Some("promax"), &config).name(), "promax");
    }
}

#[test]
fn test_membership_predicate() {
    assert!(is_valid_strategy("default"));
    assert!(is_valid_strategy("ProMax"));
    assert!(is_valid_strategy("LEVEL"));
    assert!(!is_valid_strategy("quantum"));
    assert!(!is_valid_strategy(""));
    assert_eq!(valid_names().len(), 4);
}
