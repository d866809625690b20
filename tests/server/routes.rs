use event_publisher::RegistryConfig;
use serde_json::json;

use crate::support::start_publisher;

#[tokio::test]
async fn register_listener_returns_201() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/listener"))
        .json(&json!({ "event": "orders", "name": "billing", "address": "http://billing/hook" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    assert_eq!(resp.text().await.unwrap(), "Registered");
}

#[tokio::test]
async fn register_rejects_empty_fields() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/listener"))
        .json(&json!({ "event": "orders", "name": "", "address": "http://billing/hook" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/listener"))
        .json(&json!({ "event": "orders", "name": "billing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn register_rejects_malformed_json() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/listener"))
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn register_requires_post() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/listener")).send().await.unwrap();

    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn unregister_is_idempotent() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let resp = client
            .delete(format!("{base}/listener/billing"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "Removed");
    }
}

#[tokio::test]
async fn unregister_requires_name() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/listener/"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn unregister_requires_delete() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/listener/billing"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn publish_to_unknown_event_returns_404() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/publish/never_seen"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn publish_requires_event_name() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/publish/"))
        .body("{}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn publish_requires_post() {
    let (_registry, base) = start_publisher(RegistryConfig::default()).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/publish/orders"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn names_and_events_may_contain_slashes() {
    let (registry, base) = start_publisher(RegistryConfig::default()).await;
    let handle = registry.handle();
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/listener"))
        .json(&json!({ "event": "a/b", "name": "team/billing", "address": "http://127.0.0.1:1/hook" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{base}/publish/a/b"))
        .body("{}")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{base}/listener/team/billing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);

    let resp = client
        .get(format!("{base}/publish/a/b"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);

    let resp = client
        .delete(format!("{base}/listener/team/billing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(handle.listeners("a/b").await.unwrap(), Some(vec![]));
}

#[tokio::test]
async fn slash_in_name_does_not_touch_its_last_segment() {
    let (registry, base) = start_publisher(RegistryConfig::default()).await;
    let handle = registry.handle();
    let client = reqwest::Client::new();

    for name in ["team/billing", "billing"] {
        let resp = client
            .post(format!("{base}/listener"))
            .json(&json!({ "event": "orders", "name": name, "address": "http://127.0.0.1:1/hook" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let resp = client
        .delete(format!("{base}/listener/team/billing"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let listeners = handle.listeners("orders").await.unwrap().unwrap();
    assert_eq!(
        listeners,
        vec![("billing".to_string(), "http://127.0.0.1:1/hook".to_string())]
    );
}
