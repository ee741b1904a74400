//! End-to-end detection behavior over authored template JSON.

use fieldsync::sync::detect_groups;
use fieldsync::template::{FieldType, Template};

use super::test_utils::page;

#[test]
fn test_detects_groups_from_authored_json() {
    let template = Template::from_json(
        r#"{
            "schemas": [{
                "projectTitle1": {"type": "text", "content": "Old", "width": 120},
                "projectTitle2": {"type": "text", "content": "Old", "width": 80},
                "clientName1": {"type": "multiVariableText", "content": "Acme"},
                "clientName2": {"type": "multiVariableText", "content": "Acme"},
                "photo1": {"type": "image"},
                "photo2": {"type": "image"},
                "Section_1": {"type": "text", "content": "intro"}
            }],
            "basePdf": "data:application/pdf;base64,AAAA"
        }"#,
    )
    .unwrap();

    let groups = detect_groups(template.first_page().unwrap());

    let names: Vec<&str> = groups.iter().map(|g| g.base_name.as_str()).collect();
    assert_eq!(names, vec!["projectTitle", "clientName"]);
    assert_eq!(groups[0].canonical, "projectTitle1");
    assert_eq!(groups[0].current_value, "Old");
}

#[test]
fn test_grouping_only_needs_a_shared_prefix() {
    let page = page(&[
        ("title1", FieldType::Text, "A"),
        ("title2", FieldType::Text, "B"),
        ("title10", FieldType::Text, "C"),
        ("note", FieldType::Text, "n"),
    ]);

    let groups = detect_groups(&page);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec!["title1", "title2", "title10"]);
}

#[test]
fn test_canonical_prefers_suffix_one_then_first() {
    let with_one = page(&[
        ("header2", FieldType::Text, "two"),
        ("header1", FieldType::Text, "one"),
    ]);
    let groups = detect_groups(&with_one);
    assert_eq!(groups[0].canonical, "header1");
    assert_eq!(groups[0].current_value, "one");

    let without_one = page(&[
        ("header2", FieldType::Text, "two"),
        ("header3", FieldType::Text, "three"),
    ]);
    let groups = detect_groups(&without_one);
    assert_eq!(groups[0].canonical, "header2");
    assert_eq!(groups[0].current_value, "two");
}

#[test]
fn test_repeated_detection_yields_identical_groups() {
    let page = page(&[
        ("title1", FieldType::Text, "A"),
        ("title2", FieldType::Text, "B"),
        ("footer1", FieldType::Text, "f"),
        ("footer2", FieldType::Text, "f"),
    ]);

    let first = detect_groups(&page);
    let second = detect_groups(&page);
    assert_eq!(first, second);
}
