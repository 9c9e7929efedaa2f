use std::path::PathBuf;

use chrono::NaiveDate;
use permit_core::render::DocumentRenderer;
use permit_core::submission::render_payload;
use permit_core::{ProjectData, RuleCatalog, TeraDocumentRenderer};
use serde_json::json;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

#[test]
fn shipped_rules_load_and_every_template_renders() {
    let catalog = RuleCatalog::load(&repo_root().join("data/permit_rules.json"))
        .expect("shipped rules are valid");
    let renderer = TeraDocumentRenderer::new(repo_root().join("templates/permits"));
    let at = NaiveDate::from_ymd_opt(2024, 3, 7)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp");

    assert_eq!(catalog.len(), 4);
    for permit in catalog.iter() {
        let mut data = ProjectData::new();
        for field in &permit.required_fields {
            data.insert(field.clone(), format!("sample {field}"));
        }
        data.insert("panelUpgrade", json!(true));

        let document = renderer
            .render(&permit.template, &render_payload(&data, at))
            .unwrap_or_else(|error| panic!("{} failed to render: {error}", permit.id));
        let html = String::from_utf8(document.bytes).expect("utf-8 output");

        assert_eq!(document.extension, "html");
        assert!(html.contains(&permit.name), "{} output should name the permit", permit.id);
        assert!(html.contains("03/07/2024"), "{} output should carry the permit date", permit.id);
        assert!(html.contains("sample ownerName"));
    }
}
