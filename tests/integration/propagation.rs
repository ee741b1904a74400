//! Propagation round-trips: build a candidate, commit it, re-detect.

use fieldsync::sync::{build_candidate, detect_groups};
use fieldsync::template::FieldType;

use super::test_utils::template;

#[test]
fn test_propagate_then_redetect_round_trip() {
    let template = template(&[
        ("title1", FieldType::Text, "Old"),
        ("title2", FieldType::Text, "Old"),
        ("note", FieldType::Text, "keep"),
    ]);
    let group = detect_groups(template.first_page().unwrap())
        .into_iter()
        .next()
        .unwrap();

    let candidate = build_candidate(&template, &group, "X");
    let redetected = detect_groups(candidate.first_page().unwrap());

    assert_eq!(redetected.len(), 1);
    assert_eq!(redetected[0].base_name, "title");
    assert_eq!(redetected[0].current_value, "X");
    for member in &redetected[0].members {
        let field = candidate.first_page().unwrap().get(member).unwrap();
        assert_eq!(field.content.as_deref(), Some("X"));
    }
}

#[test]
fn test_editing_a_group_renames_every_member() {
    let template = template(&[
        ("projectTitle1", FieldType::Text, "Old"),
        ("projectTitle2", FieldType::Text, "Old"),
    ]);
    let group = detect_groups(template.first_page().unwrap())
        .into_iter()
        .next()
        .unwrap();

    let candidate = build_candidate(&template, &group, "New Name");

    let page = candidate.first_page().unwrap();
    assert_eq!(
        page.get("projectTitle1").unwrap().content.as_deref(),
        Some("New Name")
    );
    assert_eq!(
        page.get("projectTitle2").unwrap().content.as_deref(),
        Some("New Name")
    );
}

#[test]
fn test_layout_attributes_survive_propagation() {
    let template = fieldsync::template::Template::from_json(
        r#"{"schemas":[{
            "title1": {"type": "text", "content": "Old", "position": {"x": 10, "y": 20}, "fontSize": 14},
            "title2": {"type": "text", "content": "Old", "position": {"x": 10, "y": 90}}
        }]}"#,
    )
    .unwrap();
    let group = detect_groups(template.first_page().unwrap())
        .into_iter()
        .next()
        .unwrap();

    let candidate = build_candidate(&template, &group, "New");

    let field = candidate.first_page().unwrap().get("title1").unwrap();
    assert_eq!(field.content.as_deref(), Some("New"));
    assert_eq!(field.attributes["fontSize"], 14);
    assert_eq!(field.attributes["position"]["y"], 20);
}
