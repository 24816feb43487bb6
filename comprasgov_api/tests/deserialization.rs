use chrono::NaiveDate;
use comprasgov_api::types::{Adhesion, Arp, ArpItem, Page};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_arps_full() {
    let json = load_fixture("arps.json");
    let page: Page<Arp> = serde_json::from_str(&json).unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total_count, 1834);
    assert_eq!(page.total_pages, 917);
    assert_eq!(page.pages_remaining, 916);
    assert!(page.has_more());

    let arp = &page.results[0];
    assert_eq!(arp.numero_ata_registro_preco, "00012/2024");
    assert_eq!(arp.codigo_unidade_gerenciadora, "250005");
    assert_eq!(arp.nome_modalidade_compra, "Pregão");
    assert_eq!(arp.codigo_modalidade_compra, "05");
    assert_eq!(arp.situacao, "Ativa");
    assert_eq!(arp.validity_start(), NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(arp.validity_end(), NaiveDate::from_ymd_opt(2025, 2, 28));
}

#[test]
fn deserialize_arp_numeric_codes_and_nulls() {
    let json = load_fixture("arps.json");
    let page: Page<Arp> = serde_json::from_str(&json).unwrap();

    let arp = &page.results[1];
    assert_eq!(arp.numero_ata_registro_preco, "7");
    assert_eq!(arp.codigo_unidade_gerenciadora, "150002");
    assert_eq!(arp.codigo_modalidade_compra, "6");
    assert_eq!(arp.numero_controle_pncp_ata, "");
    assert_eq!(arp.link_ata_pncp, "");
    assert_eq!(arp.validity_start(), NaiveDate::from_ymd_opt(2023, 11, 10));
}

#[test]
fn arp_in_force_window_is_inclusive() {
    let json = load_fixture("arps.json");
    let page: Page<Arp> = serde_json::from_str(&json).unwrap();
    let arp = &page.results[0];

    assert!(arp.is_in_force_on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    assert!(arp.is_in_force_on(NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()));
    assert!(!arp.is_in_force_on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
}

#[test]
fn deserialize_arp_items() {
    let json = load_fixture("arp_items.json");
    let page: Page<ArpItem> = serde_json::from_str(&json).unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total_count, 25);

    let notebook = &page.results[0];
    assert_eq!(notebook.numero_item, "00001");
    assert_eq!(notebook.codigo_item, Some(450210));
    assert_eq!(notebook.valor_unitario, Some(5432.1));
    assert_eq!(notebook.quantidade_registrada, Some(200.0));
    assert_eq!(notebook.nome_razao_social_fornecedor, "TECNOLOGIA BRASIL LTDA");
    assert_eq!(notebook.numero_ata_registro_preco, "00012/2024");
    assert!((notebook.total_value() - 1_086_420.0).abs() < 1e-6);

    let seringa = &page.results[1];
    assert_eq!(seringa.numero_item, "2");
    assert_eq!(seringa.descricao_detalhada, "");
    assert_eq!(seringa.valor_unitario, None);
    assert_eq!(seringa.total_value(), 0.0);
}

#[test]
fn deserialize_adhesions_keeps_every_field() {
    let json = load_fixture("adhesions.json");
    let page: Page<Adhesion> = serde_json::from_str(&json).unwrap();
    assert_eq!(page.results.len(), 1);

    let adhesion = &page.results[0];
    assert_eq!(adhesion.fields.len(), 6);
    assert_eq!(adhesion.get_text("situacao").as_deref(), Some("Aprovada"));
    assert_eq!(adhesion.get_text("quantidadeAprovada").as_deref(), Some("40"));
    assert_eq!(adhesion.get_text("inexistente"), None);
}

#[test]
fn deserialize_page_without_totals_defaults_to_zero() {
    let json = load_fixture("page_without_totals.json");
    let page: Page<Arp> = serde_json::from_str(&json).unwrap();
    assert_eq!(page, Page::empty());
}

#[test]
fn results_never_exceed_total_count() {
    for name in ["arps.json", "arp_items.json", "adhesions.json"] {
        let json = load_fixture(name);
        let page: Page<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert!(page.results.len() as i64 <= page.total_count, "{}", name);
    }
}

#[test]
fn deserialize_missing_required_fields_returns_error() {
    let json = r#"{"resultado": [{"nomeUnidadeGerenciadora": "X"}]}"#;
    let result = serde_json::from_str::<Page<Arp>>(json);
    assert!(result.is_err());
}

#[test]
fn deserialize_malformed_json_returns_error() {
    let bad_json = r#"{"resultado": not valid json}"#;
    let result = serde_json::from_str::<Page<ArpItem>>(bad_json);
    assert!(result.is_err());
}
