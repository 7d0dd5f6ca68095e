//! Tag listing contents: current-format vs legacy precedence, the cheap
//! fallback, and record listing edge cases.

use crate::common::*;
use serde_json::json;
use std::sync::Arc;
use textboard::{compute_index, current_index};

#[test]
fn current_format_tags_override_legacy_tags() {
    let store = InMemoryMultiplexer::new();
    store.register_tag("a", "x", "text", Vec::new());
    store
        .put_asset("a", "tensorboard_text", "tensors.json", br#"["y", "z"]"#.to_vec())
        .unwrap();

    let index = compute_index(&store, &TextPluginConfig::default()).unwrap();
    assert_eq!(index.tags("a").unwrap(), tags(&["x"]));
}

#[test]
fn tags_keep_store_discovery_order() {
    let store = Arc::new(InMemoryMultiplexer::new());
    store.register_tag("r", "zeta", "text", Vec::new());
    store.register_tag("r", "alpha", "text", Vec::new());
    store.register_tag("r", "mid", "text", Vec::new());
    let config = TextPluginConfig::default();

    let expected = tags(&["zeta", "alpha", "mid"]);
    let current = current_index(store.as_ref(), &config).unwrap();
    assert_eq!(current.tags("r").unwrap(), expected);
    let full = compute_index(store.as_ref(), &config).unwrap();
    assert_eq!(full.tags("r").unwrap(), expected);

    let plugin = TextPlugin::new(store, config).unwrap();
    let resp = plugin.handle(&Request::get("/tags"));
    assert_eq!(resp.json_body().unwrap(), json!({"r": ["zeta", "alpha", "mid"]}));
}

#[test]
fn every_known_run_is_listed() {
    let store = InMemoryMultiplexer::new();
    store.register_tag("current", "notes", "text", Vec::new());
    store.register_tag("scalars_only", "loss", "scalars", Vec::new());
    store
        .put_asset("legacy", "tensorboard_text", "tensors.json", br#"["old"]"#.to_vec())
        .unwrap();
    store
        .put_asset("no_index", "tensorboard_text", "something_else.txt", Vec::new())
        .unwrap();

    let index = compute_index(&store, &TextPluginConfig::default()).unwrap();
    let runs: Vec<&String> = index.runs().collect();
    assert_eq!(runs, ["current", "legacy", "no_index", "scalars_only"]);
    assert_eq!(index.tags("legacy").unwrap(), tags(&["old"]));
    assert!(index.tags("no_index").unwrap().is_empty());
    assert!(index.tags("scalars_only").unwrap().is_empty());
}

#[test]
fn malformed_legacy_file_only_empties_its_own_run() {
    let store = InMemoryMultiplexer::new();
    store
        .put_asset("broken", "tensorboard_text", "tensors.json", b"{oops".to_vec())
        .unwrap();
    store
        .put_asset("fine", "tensorboard_text", "tensors.json", br#"["t"]"#.to_vec())
        .unwrap();

    let index = compute_index(&store, &TextPluginConfig::default()).unwrap();
    assert!(index.tags("broken").unwrap().is_empty());
    assert_eq!(index.tags("fine").unwrap(), tags(&["t"]));
}

#[test]
fn empty_cache_serves_current_format_without_legacy_merge() {
    let inner = InMemoryMultiplexer::new();
    inner.register_tag("run1", "tagA", "text", b"{}".to_vec());
    inner
        .put_asset("legacy", "tensorboard_text", "tensors.json", br#"["old"]"#.to_vec())
        .unwrap();
    let store = InstrumentedStore::gated(inner);
    let service = service_over(store.clone());

    let index = service.list_tags().unwrap();
    let mut expected = TagIndex::new();
    expected.insert("run1", tags(&["tagA"]));
    assert_eq!(*index, expected);

    store.gate.open();
    wait_for_refreshes(&service, 1);
}

#[test]
fn missing_run_and_tag_give_no_records() {
    let service = service_over(Arc::new(InMemoryMultiplexer::new()));
    assert!(service
        .list_records("missingRun", "missingTag")
        .unwrap()
        .is_empty());
}

#[test]
fn record_listing_does_not_touch_the_cache() {
    let store = Arc::new(InMemoryMultiplexer::new());
    store.append_record("demo", "greetings", SummaryRecord::scalar(1.0, 0, "hi"));
    let service = service_over(store);

    service.list_records("demo", "greetings").unwrap();
    let stats = service.cache_stats();
    assert_eq!(stats.refreshes_started, 0);
    assert!(!stats.has_index);
}

#[test]
fn text_route_with_unknown_pair_is_empty_success() {
    let plugin =
        TextPlugin::new(Arc::new(InMemoryMultiplexer::new()), TextPluginConfig::default()).unwrap();
    let resp = plugin.handle(
        &Request::get("/text")
            .arg("run", "missingRun")
            .arg("tag", "missingTag"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, "application/json");
    assert_eq!(resp.json_body().unwrap(), json!([]));
}

#[test]
fn activity_needs_a_run_with_text_tags() {
    let store = Arc::new(InMemoryMultiplexer::new());
    let plugin = TextPlugin::new(store.clone(), TextPluginConfig::default()).unwrap();

    store.add_run("idle");
    store
        .put_asset("legacy", "tensorboard_text", "tensors.json", br#"["old"]"#.to_vec())
        .unwrap();
    assert!(!plugin.is_active());

    store.register_tag("live", "notes", "text", Vec::new());
    assert!(plugin.is_active());
}
