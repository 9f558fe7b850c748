//! Metering clients over the generic resource client.

mod support;

use baasic_domain::{BaasicError, MeteringData, MeteringStatistic};
use baasic_infra::{
    CancellationToken, FindParams, MeteringDataClient, MeteringStatisticClient, ResourceClient,
};
use serde_json::{json, Map};
use support::TestBackend;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const DATA_PATH: &str = "/api/demo/metering/data";

fn record(id: Option<&str>) -> MeteringData {
    MeteringData {
        id: id.map(str::to_owned),
        category: "Storage".into(),
        name: "files".into(),
        module_name: None,
        value: 3.0,
        date_created: None,
        extra: Map::new(),
    }
}

#[tokio::test]
async fn find_sends_every_paging_parameter_in_order() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "item": [{"id": "k1", "category": "Storage", "name": "files", "value": 1.5}],
            "page": 1,
            "recordsPerPage": 10,
            "totalRecords": 1
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let page = MeteringDataClient::new(backend.client.clone())
        .find(&FindParams::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.item[0].id.as_deref(), Some("k1"));
    assert_eq!(page.total_records, 1);

    let requests = backend.server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("searchQuery=&page=1&rpp=10&sort=&embed=&fields=")
    );
}

#[tokio::test]
async fn find_encodes_search_terms() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path(DATA_PATH))
        .and(query_param("searchQuery", "disk usage"))
        .and(query_param("page", "3"))
        .and(query_param("rpp", "25"))
        .and(query_param("sort", "dateCreated|desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": []})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let params = FindParams::new().search("disk usage").page(3).rpp(25).sort("dateCreated|desc");
    let page = MeteringDataClient::new(backend.client.clone())
        .find(&params, &CancellationToken::new())
        .await
        .unwrap();

    assert!(page.is_empty());
}

#[tokio::test]
async fn null_page_is_an_empty_collection() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&backend.server)
        .await;

    let page = MeteringStatisticClient::new(backend.client.clone())
        .find(&FindParams::new(), &CancellationToken::new())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_records, 0);
}

#[tokio::test]
async fn get_fetches_single_record_with_embed() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{DATA_PATH}/k1")))
        .and(query_param("embed", "module"))
        .and(query_param("fields", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "k1", "category": "Storage", "name": "files", "value": 2.0, "tenant": "acme"
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let found = MeteringDataClient::new(backend.client.clone())
        .get("k1", "module", "", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(found.value, 2.0);
    assert_eq!(found.extra["tenant"], "acme");
}

#[tokio::test]
async fn ids_are_escaped_in_the_path() {
    let backend = TestBackend::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{DATA_PATH}/a%20b%2Fc")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend.server)
        .await;

    let deleted = MeteringDataClient::new(backend.client.clone())
        .delete("a b/c", &CancellationToken::new())
        .await
        .unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn insert_returns_stored_record() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path(DATA_PATH))
        .and(body_json(json!({"category": "Storage", "name": "files", "value": 3.0})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "new-id", "category": "Storage", "name": "files", "value": 3.0
        })))
        .expect(1)
        .mount(&backend.server)
        .await;

    let stored = MeteringDataClient::new(backend.client.clone())
        .insert(&record(None), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(stored, record(Some("new-id")));
}

#[tokio::test]
async fn update_maps_status_to_outcome() {
    let cases = [(200, true), (201, true), (204, true), (202, false), (409, false)];
    for (status, expected) in cases {
        let backend = TestBackend::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("{DATA_PATH}/k1")))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&backend.server)
            .await;

        let updated = MeteringDataClient::new(backend.client.clone())
            .update(&record(Some("k1")), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(updated, expected, "status {status}");
    }
}

#[tokio::test]
async fn update_without_id_never_reaches_backend() {
    let backend = TestBackend::start().await;
    let client = MeteringDataClient::new(backend.client.clone());

    for missing in [None, Some("")] {
        let err = client.update(&record(missing), &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, BaasicError::InvalidInput(_)), "got {err:?}");
    }
    assert_eq!(backend.request_count().await, 0);
    assert_eq!(backend.factory.created(), 0);
}

#[tokio::test]
async fn delete_is_true_only_for_ok() {
    let backend = TestBackend::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/demo/metering/statistics/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/demo/metering/statistics/s1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend.server)
        .await;
    let statistics = MeteringStatisticClient::new(backend.client.clone());
    let cancel = CancellationToken::new();

    assert!(!statistics.delete("gone", &cancel).await.unwrap());
    assert!(statistics.delete("s1", &cancel).await.unwrap());
}

#[tokio::test]
async fn statistics_deserialize_into_their_own_model() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/demo/metering/statistics/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "s1",
            "category": "Requests",
            "value": 1024,
            "dateFrom": "2024-03-01T00:00:00Z",
            "dateTo": "2024-03-31T23:59:59Z"
        })))
        .mount(&backend.server)
        .await;

    let statistic: MeteringStatistic = MeteringStatisticClient::new(backend.client.clone())
        .get("s1", "", "", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(statistic.category, "Requests");
    assert_eq!(statistic.value, 1024.0);
    assert!(statistic.date_from.unwrap() < statistic.date_to.unwrap());
}

#[tokio::test]
async fn resource_client_works_for_any_module_path() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/api/demo/metering/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"item": [], "page": 1})))
        .mount(&backend.server)
        .await;

    let resource: ResourceClient<MeteringData> =
        ResourceClient::new(backend.client.clone(), "metering/data");
    let page = resource.find(&FindParams::new(), &CancellationToken::new()).await.unwrap();

    assert_eq!(resource.module_path(), "metering/data");
    assert_eq!(page.page, 1);
}
