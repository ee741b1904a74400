//! Property-based tests for determinism guarantees

use fieldsync::sync::{build_candidate, detect_groups};
use fieldsync::template::{parse_field_name, FieldDefinition, FieldType, Page, Template};
use proptest::prelude::*;

fn field_type_strategy() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::Text),
        Just(FieldType::MultiVariableText),
        Just(FieldType::Image),
        Just(FieldType::Other("qrcode".to_string())),
    ]
}

/// Mix of grouping-eligible names (short letter prefix + digits) and names
/// that must never group (underscores, bare words).
fn field_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[a-c]{1,3}", 1u32..30).prop_map(|(prefix, n)| format!("{prefix}{n}")),
        "[a-z_]{1,8}",
    ]
}

fn page_strategy() -> impl Strategy<Value = Page> {
    proptest::collection::vec(
        (field_name_strategy(), field_type_strategy(), "[a-zA-Z ]{0,8}"),
        0..24,
    )
    .prop_map(|fields| {
        fields
            .into_iter()
            .map(|(name, field_type, content)| {
                (name, FieldDefinition::with_content(field_type, content))
            })
            .collect::<Page>()
    })
}

/// Detection over unchanged input always yields the same group sequence
#[test]
fn test_detection_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&page_strategy(), |page| {
            assert_eq!(detect_groups(&page), detect_groups(&page));
            Ok(())
        })
        .unwrap();
}

/// Every detected group satisfies the grouping invariants
#[test]
fn test_group_invariants_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&page_strategy(), |page| {
            for group in detect_groups(&page) {
                assert!(group.members.len() >= 2);
                assert!(group.members.contains(&group.canonical));
                for member in &group.members {
                    let (prefix, _) = parse_field_name(member).expect("member name parses");
                    assert_eq!(prefix, group.base_name);
                    assert!(page.get(member).unwrap().field_type.is_syncable());
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Propagating a value then re-detecting yields that value on every member
#[test]
fn test_propagate_then_redetect_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&page_strategy(), |page| {
            let template = Template::new(vec![page]);
            let groups = template
                .first_page()
                .map(detect_groups)
                .unwrap_or_default();

            for group in groups {
                let candidate = build_candidate(&template, &group, "PROPAGATED");
                let redetected = detect_groups(candidate.first_page().unwrap());
                let updated = redetected
                    .iter()
                    .find(|g| g.base_name == group.base_name)
                    .expect("group survives propagation");

                assert_eq!(updated.current_value, "PROPAGATED");
                for member in &updated.members {
                    let field = candidate.first_page().unwrap().get(member).unwrap();
                    assert_eq!(field.content.as_deref(), Some("PROPAGATED"));
                }
            }
            Ok(())
        })
        .unwrap();
}
