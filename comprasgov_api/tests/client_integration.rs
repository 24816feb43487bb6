use comprasgov_api::types::{Arp, Page};
use comprasgov_api::{
    AdhesionQuery, ArpItemQuery, ArpQuery, Client, ClientConfig, Endpoint, Error, Query,
    QueryParams,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_arps_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("arps.json");

    Mock::given(method("GET"))
        .and(path("/modulo-arp/1_consultarARP"))
        .and(query_param("tamanhoPagina", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client
        .get_arps(&ArpQuery::default().with_page_size(1))
        .await;
    assert!(result.is_ok());

    let page = result.unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total_count, 1834);
}

#[tokio::test]
async fn get_arp_items_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("arp_items.json");

    Mock::given(method("GET"))
        .and(path("/modulo-arp/2_consultarARPItem"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let page = client
        .get_arp_items(&ArpItemQuery::default().with_page(1).with_page_size(12))
        .await
        .unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].descricao_item, "Microcomputador");
}

#[tokio::test]
async fn get_item_adhesions_sends_identifiers() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("adhesions.json");

    Mock::given(method("GET"))
        .and(path("/modulo-arp/5_consultarAdesoesItem"))
        .and(query_param("numeroAta", "00012/2024"))
        .and(query_param("unidadeGerenciadora", "250005"))
        .and(query_param("numeroItem", "00001"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let page = client
        .get_item_adhesions(&AdhesionQuery::new("00012/2024", "250005", "00001"))
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);
}

#[tokio::test]
async fn not_found_is_an_empty_page_for_every_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Nenhum registro encontrado"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());

    let arps = client.get_arps(&ArpQuery::default()).await.unwrap();
    assert_eq!(arps, Page::empty());

    let items = client.get_arp_items(&ArpItemQuery::default()).await.unwrap();
    assert!(items.results.is_empty());
    assert_eq!(items.total_count, 0);
    assert_eq!(items.total_pages, 0);
    assert_eq!(items.pages_remaining, 0);

    let adhesions = client
        .get_item_adhesions(&AdhesionQuery::new("1", "2", "3"))
        .await
        .unwrap();
    assert!(adhesions.results.is_empty());
    assert_eq!(adhesions.total_count, 0);
}

#[tokio::test]
async fn server_error_is_a_transport_error_with_status_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/modulo-arp/1_consultarARP"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.get_arps(&ArpQuery::default()).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.status(), Some(500));
    match err {
        Error::HttpStatus {
            status_text, body, ..
        } => {
            assert_eq!(status_text, "Internal Server Error");
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bad_request_is_not_treated_as_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"erro\":\"parametro\"}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.get_arp_items(&ArpItemQuery::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Request failed with status 400 Bad Request");
}

#[tokio::test]
async fn malformed_json_is_a_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.get_arps(&ArpQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed));
    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Port 9 (discard) on localhost is not served by anything in the test environment.
    let client = Client::with_base_url("http://127.0.0.1:9");
    let err = client.get_arps(&ArpQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed));
}

#[tokio::test]
async fn raw_mapping_omits_empty_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/modulo-arp/1_consultarARP"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("arps.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let params: QueryParams = [
        ("dataVigenciaInicialMin", "2024-01-01"),
        ("codigoUnidadeGerenciadora", ""),
        ("situacao", ""),
    ]
    .into_iter()
    .collect();
    let page: Page<Arp> = client.get_page(Endpoint::Arps, &params).await.unwrap();
    assert_eq!(page.results.len(), 2);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("dataVigenciaInicialMin=2024-01-01"));
}

#[tokio::test]
async fn consecutive_pages_differ_only_in_page_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/modulo-arp/2_consultarARPItem"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("arp_items.json")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let base = ArpItemQuery::default().with_page_size(12).with_item_code(450210);
    client.get_arp_items(&base.clone().with_page(3)).await.unwrap();
    client.get_arp_items(&base.with_page(4)).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let first: Vec<_> = requests[0].url.query_pairs().into_owned().collect();
    let second: Vec<_> = requests[1].url.query_pairs().into_owned().collect();
    assert_eq!(first.len(), second.len());
    let differing: Vec<_> = first
        .iter()
        .zip(second.iter())
        .filter(|(a, b)| a != b)
        .collect();
    assert_eq!(differing.len(), 1);
    assert_eq!(differing[0].0 .0, "pagina");
    assert_eq!(differing[0].0 .1, "3");
    assert_eq!(differing[0].1 .1, "4");
}

#[tokio::test]
async fn configured_timeout_is_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("arps.json"))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_config(ClientConfig {
        base_url: mock_server.uri(),
        timeout: Some(std::time::Duration::from_millis(200)),
    })
    .unwrap();
    let err = client.get_arps(&ArpQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed));
}
