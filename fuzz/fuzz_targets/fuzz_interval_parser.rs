#![no_main]

use block_access::parse_configuration;
use block_access::text::count_fields;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (intervals, roles) = input;

    let Ok(rules) = parse_configuration(Some(intervals), Some(roles)) else {
        return;
    };

    // A blank interval list disables enforcement.
    if intervals.trim().is_empty() {
        return;
    }

    assert_eq!(
        rules.len(),
        count_fields(intervals, ';'),
        "every interval entry must yield exactly one rule"
    );

    for rule in &rules {
        assert!(!rule.days.is_empty(), "a parsed rule must list a week day");
        assert!(
            rule.excluded_principals.iter().all(|p| !p.is_empty()),
            "empty role names must be dropped"
        );
    }
});
