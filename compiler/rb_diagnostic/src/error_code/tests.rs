use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E0001.to_string(), "E0001");
    assert_eq!(ErrorCode::E0030.as_str(), "E0030");
}

#[test]
fn all_codes_are_distinct_and_ordered() {
    for pair in ErrorCode::ALL.windows(2) {
        assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        assert_ne!(pair[0].as_str(), pair[1].as_str());
    }
}

#[test]
fn every_code_has_a_description() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code} has no description");
    }
}
