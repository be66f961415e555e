use std::sync::Arc;

use actix_web::App;
use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::web;
use async_trait::async_trait;
use kashif::api::AppState;
use kashif::api::api_routes;
use kashif::config::DiscoveryConfig;
use kashif::config::ProviderConfig;
use kashif::model::SearchCount;
use kashif::model::SearchSubject;
use kashif::provider::Providers;
use kashif::provider::make_providers;
use kashif::service::LeaderboardService;
use kashif::service::LookupService;
use kashif::service::RecentAddressDiscovery;
use kashif::storage::PopularityStore;
use kashif::storage::in_memory::InMemoryCache;
use kashif::storage::in_memory::InMemoryPopularityStore;
use pretty_assertions::assert_eq;
use serde_json::Value;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::path_regex;

fn providers(server: &MockServer) -> Providers {
    make_providers(&ProviderConfig {
        blockchair_url: format!("{}/bitcoin", server.uri()),
        esplora_url: format!("{}/api", server.uri()),
        blockcypher_url: format!("{}/v1/btc/main", server.uri()),
        ..ProviderConfig::default()
    })
    .unwrap()
}

fn state(
    server: &MockServer,
    popularity: Arc<dyn PopularityStore>,
) -> web::Data<AppState> {
    let providers = providers(server);
    web::Data::new(AppState {
        discovery:   Arc::new(RecentAddressDiscovery::new(
            Arc::new(InMemoryCache::new()),
            providers.blocks.clone(),
            providers.transactions.clone(),
            DiscoveryConfig::default(),
        )),
        lookup:      Arc::new(LookupService::new(providers.lookup.clone(), popularity.clone())),
        leaderboard: Arc::new(LeaderboardService::new(popularity)),
    })
}

async fn mount_address(
    server: &MockServer,
    address: &str,
) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/btc/main/addrs/{}", address)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "address": address,
            "final_balance": 100,
            "txrefs": []
        })))
        .mount(server)
        .await;
}

struct BrokenPopularityStore;

#[async_trait]
impl PopularityStore for BrokenPopularityStore {
    async fn increment_search_count(
        &self,
        _subject: SearchSubject,
        _key: &str,
    ) -> kashif::Result<u64> {
        Err(anyhow::anyhow!("connection reset by peer"))
    }

    async fn top(
        &self,
        _subject: SearchSubject,
        _limit: usize,
    ) -> kashif::Result<Vec<SearchCount>> {
        Err(anyhow::anyhow!("connection reset by peer"))
    }
}

#[actix_web::test]
async fn health_is_ok() {
    let server = MockServer::start().await;
    let app = test::init_service(
        App::new().app_data(state(&server, Arc::new(InMemoryPopularityStore::new()))).service(api_routes()),
    )
    .await;

    let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_web::test]
async fn lookups_feed_the_leaderboard() {
    let server = MockServer::start().await;
    for address in ["X", "Y", "a1", "a2", "a3", "a4"] {
        mount_address(&server, address).await;
    }

    let app = test::init_service(
        App::new().app_data(state(&server, Arc::new(InMemoryPopularityStore::new()))).service(api_routes()),
    )
    .await;

    for uri in ["/addresses/X", "/addresses/X", "/addresses/Y", "/addresses/a1", "/addresses/a2", "/addresses/a3", "/addresses/a4"] {
        let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
    }

    let detail: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/addresses/Y").to_request()).await;
    assert_eq!(detail["final_balance"], 100);
    assert_eq!(detail["txrefs"], json!([]));

    let top: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/top-addresses").to_request()).await;
    assert_eq!(
        top,
        json!([
            { "address": "X", "searchCount": 2 },
            { "address": "Y", "searchCount": 2 },
            { "address": "a1", "searchCount": 1 },
            { "address": "a2", "searchCount": 1 },
            { "address": "a3", "searchCount": 1 }
        ])
    );

    let transactions: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/top-transactions").to_request()).await;
    assert_eq!(transactions, json!([]));
}

#[actix_web::test]
async fn transaction_lookup_is_counted_by_hash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/btc/main/txs/ff00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hash": "ff00", "fees": 250 })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new().app_data(state(&server, Arc::new(InMemoryPopularityStore::new()))).service(api_routes()),
    )
    .await;

    let detail: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/transactions/ff00").to_request()).await;
    assert_eq!(detail, json!({ "hash": "ff00", "fees": 250 }));

    let top: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/top-transactions").to_request()).await;
    assert_eq!(top, json!([{ "txHash": "ff00", "searchCount": 1 }]));
}

#[actix_web::test]
async fn unknown_address_keeps_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/btc/main/addrs/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Address not found" })))
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryPopularityStore::new());
    let app = test::init_service(App::new().app_data(state(&server, store.clone())).service(api_routes())).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/addresses/nope").to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("404"));

    // failed lookups are not counted
    assert!(store.top(SearchSubject::Address, 5).await.unwrap().is_empty());
}

#[actix_web::test]
async fn counter_failure_is_reported_with_the_payload() {
    let server = MockServer::start().await;
    mount_address(&server, "X").await;

    let app = test::init_service(App::new().app_data(state(&server, Arc::new(BrokenPopularityStore))).service(api_routes())).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/addresses/X").to_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["address"], "X");
    assert_eq!(
        body["error"],
        "[Popularity] Failed to record search for address X: connection reset by peer"
    );
}

#[actix_web::test]
async fn leaderboard_store_failure_is_internal() {
    let server = MockServer::start().await;
    let app = test::init_service(App::new().app_data(state(&server, Arc::new(BrokenPopularityStore))).service(api_routes())).await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/top-transactions").to_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["error"], "[Popularity] Failed to read top transaction searches: connection reset by peer");
}

#[actix_web::test]
async fn recent_addresses_are_served_and_failures_are_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bitcoin/blocks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "id": 5 }] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bitcoin/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{ "hash": "t1" }] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tx/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "vin": [{ "prevout": { "scriptpubkey_address": "A" } }],
            "vout": [{ "scriptpubkey_address": "B" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test::init_service(
        App::new().app_data(state(&server, Arc::new(InMemoryPopularityStore::new()))).service(api_routes()),
    )
    .await;

    for _ in 0..3 {
        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/addresses").to_request()).await;
        assert_eq!(body, json!(["A", "B"]));
    }

    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bitcoin/blocks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let app = test::init_service(
        App::new().app_data(state(&broken, Arc::new(InMemoryPopularityStore::new()))).service(api_routes()),
    )
    .await;

    let response = test::call_service(&app, test::TestRequest::get().uri("/addresses").to_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("[Discovery] Failed to fetch transactions of the most recent block"));
}
