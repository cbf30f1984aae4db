//! Property-based tests for fieldcheck-validation.

use fieldcheck_validation::*;
use proptest::prelude::*;

fn every_rule() -> Vec<Validator> {
    vec![
        required().into(),
        numeric().into(),
        min_length(3).into(),
        max_length(5).into(),
        min_value(0).into(),
        max_value(10).into(),
        email().into(),
        pattern("^[a-z]+$").into(),
        date().into(),
        boolean().into(),
        same_as("other").into(),
        url().into(),
        phone().into(),
    ]
}

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        (-1000.0..1000.0f64).prop_map(Scalar::Number),
        ".{0,12}".prop_map(Scalar::Text),
    ]
}

// ============================================================================
// REPORT KEYS: report.keys() == rule_map.keys()
// ============================================================================

proptest! {
    #[test]
    fn report_keys_match_rule_map(
        declared in prop::collection::vec("[a-z]{1,6}", 0..6),
        present in prop::collection::vec(("[a-z]{1,6}", scalar()), 0..6),
    ) {
        let rules: RuleMap = declared
            .iter()
            .map(|field| (field.clone(), vec![RuleEntry::from(required())]))
            .collect();
        let record: Record = present.into_iter().collect();

        let report = validate(&record, &rules);
        let report_keys: Vec<_> = report.fields().collect();
        let rule_keys: Vec<_> = rules.fields().collect();
        prop_assert_eq!(report_keys, rule_keys);
    }
}

// ============================================================================
// SKIP POLICY: absent values only trip `required`
// ============================================================================

proptest! {
    #[test]
    fn absent_values_only_fail_required(blank in "[ \t\n]{0,4}") {
        let record = Record::new().with("field", blank).with("other", "x");
        for rule in every_rule() {
            let result = rule.check(record.get("field"), &record);
            if rule.name() == "required" {
                prop_assert_eq!(result, Some(REQUIRED_MESSAGE.to_string()));
            } else {
                prop_assert_eq!(result, None);
            }
        }
    }
}

// ============================================================================
// LENGTH BOUNDARIES: n passes both, n-1 fails min, n+1 fails max
// ============================================================================

proptest! {
    #[test]
    fn length_boundaries_are_inclusive(n in 1usize..40) {
        let record = Record::new();
        let exact = Scalar::from("a".repeat(n));
        let shorter = Scalar::from("a".repeat(n - 1));
        let longer = Scalar::from("a".repeat(n + 1));

        prop_assert_eq!(min_length(n).check(&exact, &record), None);
        prop_assert_eq!(max_length(n).check(&exact, &record), None);
        prop_assert_eq!(max_length(n).check(&shorter, &record), None);
        prop_assert_eq!(min_length(n).check(&longer, &record), None);
        prop_assert_eq!(max_length(n).check(&longer, &record), Some(format!("Maximum length is {n}")));
        if n > 1 {
            prop_assert_eq!(min_length(n).check(&shorter, &record), Some(format!("Minimum length is {n}")));
        }
    }
}

// ============================================================================
// TYPE PRIORITY: value bounds report the numeric message for non-numbers
// ============================================================================

proptest! {
    #[test]
    fn value_bounds_report_type_error(text in "[a-zA-Z]{1,10}", bound in -100i32..100) {
        prop_assume!(parse_number(&text).is_none());
        let value = Scalar::from(text);
        let record = Record::new();

        prop_assert_eq!(min_value(bound).check(&value, &record), Some(NUMERIC_MESSAGE.to_string()));
        prop_assert_eq!(max_value(bound).check(&value, &record), Some(NUMERIC_MESSAGE.to_string()));
    }
}

// ============================================================================
// EQUALITY: same_as passes on equal values, names the field otherwise
// ============================================================================

proptest! {
    #[test]
    fn same_as_follows_equality(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let record = Record::new().with("password", a.clone()).with("confirm", b.clone());
        let result = same_as("password").check(record.get("confirm"), &record);

        if a == b {
            prop_assert_eq!(result, None);
        } else {
            let message = result.unwrap_or_default();
            prop_assert!(message.contains("password"));
        }
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validate_is_idempotent(values in prop::collection::vec(scalar(), 3)) {
        let record = Record::new()
            .with("field", values[0].clone())
            .with("other", values[1].clone())
            .with("spare", values[2].clone());
        let field = FieldRules::for_field("field").add(RuleEntry::Malformed("x".into()));
        let rules = RuleMap::new()
            .field(every_rule().into_iter().fold(field, |rules, rule| rules.add(rule)))
            .field(every_rule().into_iter().fold(FieldRules::for_field("spare"), |rules, rule| rules.add(rule)));

        prop_assert_eq!(validate(&record, &rules), validate(&record, &rules));
    }
}
