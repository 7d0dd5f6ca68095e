//! A run with two greetings, served through the plugin routes.

use crate::common::*;
use serde_json::json;
use std::sync::Arc;

fn demo_store() -> Arc<InMemoryMultiplexer> {
    let store = Arc::new(InMemoryMultiplexer::new());
    store.register_tag("demo", "greetings", "text", Vec::new());
    store.append_record("demo", "greetings", SummaryRecord::scalar(100.0, 0, "hi"));
    store.append_record("demo", "greetings", SummaryRecord::scalar(101.0, 1, "yo"));
    store
}

#[test]
fn demo_run_through_service() {
    let service = service_over(demo_store());

    service.list_tags().unwrap();
    wait_for_refreshes(&service, 1);
    let index = service.list_tags().unwrap();
    let mut expected = TagIndex::new();
    expected.insert("demo", tags(&["greetings"]));
    assert_eq!(*index, expected);

    let records = service.list_records("demo", "greetings").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].step, 0);
    assert_eq!(records[0].wall_time, 100.0);
    assert_eq!(records[0].text, "<p>hi</p>");
    assert_eq!(records[1].step, 1);
    assert_eq!(records[1].text, "<p>yo</p>");
}

#[test]
fn demo_run_through_routes() {
    let plugin = TextPlugin::new(demo_store(), TextPluginConfig::default()).unwrap();
    assert!(plugin.is_active());

    let first = plugin.handle(&Request::get("/tags"));
    assert_eq!(first.status, 200);
    assert_eq!(first.json_body().unwrap(), json!({"demo": ["greetings"]}));

    wait_for_refreshes(plugin.service(), 1);
    let tags = plugin.handle(&Request::get("/tags"));
    assert_eq!(tags.json_body().unwrap(), json!({"demo": ["greetings"]}));

    let text = plugin.handle(
        &Request::get("/text")
            .arg("run", "demo")
            .arg("tag", "greetings"),
    );
    assert_eq!(text.status, 200);
    assert_eq!(
        text.json_body().unwrap(),
        json!([
            {"wall_time": 100.0, "step": 0, "text": "<p>hi</p>"},
            {"wall_time": 101.0, "step": 1, "text": "<p>yo</p>"}
        ])
    );
}
