use std::sync::Arc;

use getracker_api::server::{AppState, build_router};
use getracker_api::types::{LatestPriceEntry, SnapshotEntry};
use getracker_core::item::entity::ItemRecord;
use getracker_core::item::index::MappingIndex;
use getracker_core::price::entity::{IntervalPrice, LatestPrice, Timestep, TimeseriesPoint};
use getracker_core::price::mock::MockPriceProvider;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

fn record(value: Value) -> ItemRecord {
    serde_json::from_value(value).unwrap()
}

fn sample_mapping() -> MappingIndex {
    MappingIndex::new(vec![
        record(json!({"id": 4151, "name": "Abyssal whip", "icon": "x.png", "limit": 70})),
        record(json!({"id": 11802, "name": "Armadyl godsword", "icon": "ags.png", "limit": 8, "members": true})),
        record(json!({"id": 995, "name": "Coins", "icon": "coins.png"})),
    ])
}

fn whip_price() -> LatestPrice {
    LatestPrice {
        high: Some(2000000),
        low: Some(1950000),
        high_time: Some(100),
        low_time: Some(90),
    }
}

fn point(timestamp: i64) -> TimeseriesPoint {
    TimeseriesPoint {
        timestamp,
        avg_high_price: Some(2000000),
        avg_low_price: None,
        high_price_volume: Some(5),
        low_price_volume: Some(0),
    }
}

// 帮助函数：在随机端口启动测试服务器
async fn spawn_test_server(mapping: MappingIndex, prices: Arc<MockPriceProvider>) -> String {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let state = AppState {
        mapping: Arc::new(mapping),
        prices,
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    addr
}

fn client() -> reqwest::Client {
    let _ = rustls::crypto::ring::default_provider().install_default();
    reqwest::Client::new()
}

#[tokio::test]
async fn test_root_returns_title() {
    let base = spawn_test_server(sample_mapping(), Arc::new(MockPriceProvider::new())).await;

    let res = client().get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"message": "OSRS GE Tracker API"}));
}

#[tokio::test]
async fn test_latest_one_by_name_strips_icon() {
    let prices = Arc::new(MockPriceProvider::new().with_latest(4151, whip_price()));
    let base = spawn_test_server(sample_mapping(), prices.clone()).await;

    let res = client()
        .get(format!("{}/latest/abyssal%20whip", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let text = res.text().await.unwrap();
    assert_eq!(
        text,
        r#"{"id":4151,"name":"Abyssal whip","limit":70,"price_data":{"high":2000000,"low":1950000,"highTime":100,"lowTime":90}}"#
    );
    assert_eq!(prices.call_count("latest_one"), 1);
}

#[tokio::test]
async fn test_latest_one_name_is_case_insensitive() {
    let prices = Arc::new(MockPriceProvider::new().with_latest(4151, whip_price()));
    let base = spawn_test_server(sample_mapping(), prices).await;
    let client = client();

    for ident in ["abyssal%20whip", "Abyssal%20Whip", "ABYSSAL%20WHIP", "4151"] {
        let res = client
            .get(format!("{}/latest/{}", base, ident))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "identifier: {}", ident);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["id"], json!(4151));
    }
}

#[tokio::test]
async fn test_latest_one_unresolvable_identifier_is_404() {
    let prices = Arc::new(MockPriceProvider::new().with_latest(1234, whip_price()));
    let base = spawn_test_server(sample_mapping(), prices.clone()).await;
    let client = client();

    // 未知名称
    let res = client
        .get(format!("{}/latest/dragon%20claws", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Item 'dragon claws' not found."}));

    // 数字形式但不在映射表中，即使上游有数据也不透传
    let res = client
        .get(format!("{}/latest/1234", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Item with ID '1234' not found in mapping."}));

    assert_eq!(prices.total_calls(), 0);
}

#[tokio::test]
async fn test_latest_one_without_price_data_is_404() {
    let base = spawn_test_server(sample_mapping(), Arc::new(MockPriceProvider::new())).await;

    let res = client()
        .get(format!("{}/latest/11802", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"detail": "Price data not found for item ID 11802."}));
}

#[tokio::test]
async fn test_latest_all_flattens_with_names() {
    let prices = Arc::new(
        MockPriceProvider::new()
            .with_latest(4151, whip_price())
            .with_latest(
                31337,
                LatestPrice {
                    high: Some(5),
                    low: None,
                    high_time: Some(1),
                    low_time: None,
                },
            ),
    );
    let base = spawn_test_server(sample_mapping(), prices).await;

    let res = client().get(format!("{}/latest", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let mut entries: Vec<LatestPriceEntry> = res.json().await.unwrap();
    entries.sort_by_key(|e| e.id);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, 4151);
    assert_eq!(entries[0].name, "Abyssal whip");
    assert_eq!(*entries[0].price.view(), whip_price());
    assert_eq!(entries[1].id, 31337);
    assert_eq!(entries[1].name, "Unknown");
    assert_eq!(entries[1].price.view().low, None);
}

#[tokio::test]
async fn test_latest_all_with_upstream_down_is_empty_list() {
    let base = spawn_test_server(sample_mapping(), Arc::new(MockPriceProvider::new())).await;

    let res = client().get(format!("{}/latest", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_snapshots_flatten_with_names() {
    let snapshot = IntervalPrice {
        avg_high_price: Some(1990000),
        avg_low_price: Some(1960000),
        high_price_volume: Some(12),
        low_price_volume: Some(7),
    };
    let prices = Arc::new(
        MockPriceProvider::new()
            .with_snapshot_5m(4151, snapshot)
            .with_snapshot_1h(995, IntervalPrice::default()),
    );
    let base = spawn_test_server(sample_mapping(), prices.clone()).await;
    let client = client();

    let five: Vec<SnapshotEntry> = client
        .get(format!("{}/5m?timestamp=1710000000", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(five.len(), 1);
    assert_eq!(five[0].name, "Abyssal whip");
    assert_eq!(*five[0].price.view(), snapshot);

    let hour: Value = client
        .get(format!("{}/1h", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        hour,
        json!([{"id": 995, "name": "Coins", "avgHighPrice": null, "avgLowPrice": null,
                "highPriceVolume": null, "lowPriceVolume": null}])
    );

    assert_eq!(prices.call_count("snapshot_5m"), 1);
    assert_eq!(prices.call_count("snapshot_1h"), 1);
}

#[tokio::test]
async fn test_timeseries_merges_record() {
    let prices = Arc::new(MockPriceProvider::new().with_timeseries(
        11802,
        Timestep::Hour6,
        vec![point(300), point(100)],
    ));
    let base = spawn_test_server(sample_mapping(), prices).await;

    let res = client()
        .get(format!("{}/timeseries/armadyl%20godsword?timestep=6h", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["id"], json!(11802));
    assert_eq!(body["name"], json!("Armadyl godsword"));
    assert_eq!(body["limit"], json!(8));
    assert_eq!(body["members"], json!(true));
    assert!(body.get("icon").is_none());
    assert_eq!(body["timestep"], json!("6h"));

    let stamps: Vec<i64> = body["timeseries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["timestamp"].as_i64().unwrap())
        .collect();
    assert_eq!(stamps, vec![300, 100]);
}

#[tokio::test]
async fn test_timeseries_empty_series_is_still_200() {
    let base = spawn_test_server(sample_mapping(), Arc::new(MockPriceProvider::new())).await;

    let res = client()
        .get(format!("{}/timeseries/4151?timestep=24h", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["timeseries"], json!([]));
}

#[tokio::test]
async fn test_timeseries_invalid_timestep_is_400_without_upstream_call() {
    let prices = Arc::new(MockPriceProvider::new());
    let base = spawn_test_server(sample_mapping(), prices.clone()).await;
    let client = client();

    let res = client
        .get(format!("{}/timeseries/4151?timestep=30m", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!({"detail": "Invalid timestep. Must be one of '5m', '1h', '6h', '24h'."})
    );

    // 缺省 timestep
    let res = client
        .get(format!("{}/timeseries/4151", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(prices.total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_query_is_400_with_detail_body() {
    let prices = Arc::new(MockPriceProvider::new());
    let base = spawn_test_server(sample_mapping(), prices.clone()).await;
    let client = client();

    for path in ["/5m?timestamp=abc", "/1h?timestamp=1.5", "/timeseries/4151?timestep=5m&timestep=1h"] {
        let res = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "path: {}", path);

        let content_type = res
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "content-type: {}", content_type);

        let body: Value = res.json().await.unwrap();
        assert!(body["detail"].is_string(), "body: {}", body);
    }

    assert_eq!(prices.total_calls(), 0);
}

#[tokio::test]
async fn test_timeseries_unresolvable_identifier_is_404() {
    let base = spawn_test_server(sample_mapping(), Arc::new(MockPriceProvider::new())).await;

    let res = client()
        .get(format!("{}/timeseries/nonexistent?timestep=5m", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_mapping_degrades_to_404() -> anyhow::Result<()> {
    let missing = std::env::temp_dir()
        .join(format!("getracker-missing-{}", std::process::id()))
        .join("mapping.json");
    let mapping = getracker_store::mapping::load_mapping(missing);
    assert!(mapping.is_empty());

    let prices = Arc::new(MockPriceProvider::new().with_latest(4151, whip_price()));
    let base = spawn_test_server(mapping, prices).await;

    let res = client().get(format!("{}/latest/4151", base)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // 全量接口仍可用，名称回退为 Unknown
    let entries: Vec<LatestPriceEntry> = client().get(format!("{}/latest", base)).send().await?.json().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Unknown");
    Ok(())
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let base = spawn_test_server(sample_mapping(), Arc::new(MockPriceProvider::new())).await;

    let res = client()
        .get(format!("{}/api-docs/openapi.json", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert_eq!(doc["info"]["title"], json!("OSRS GE Tracker API"));
    assert!(doc["paths"].get("/latest/{identifier}").is_some());
    assert!(doc["paths"].get("/timeseries/{identifier}").is_some());
}

