use anyhow::Result;
use atasradar_lib::genai::MarketAnswer;
use atasradar_lib::types::{Adhesion, Arp, ArpItem};
use chrono::NaiveDate;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::xml_output;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

#[derive(Tabled, Serialize)]
struct ArpRow {
    #[tabled(rename = "Ata")]
    #[serde(rename = "Ata")]
    number: String,
    #[tabled(rename = "UASG")]
    #[serde(rename = "UASG")]
    uasg: String,
    #[tabled(rename = "Managing Unit")]
    #[serde(rename = "Managing Unit")]
    unit: String,
    #[tabled(rename = "Modality")]
    #[serde(rename = "Modality")]
    modality: String,
    #[tabled(rename = "Valid From")]
    #[serde(rename = "Valid From")]
    valid_from: String,
    #[tabled(rename = "Valid To")]
    #[serde(rename = "Valid To")]
    valid_to: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct ItemRow {
    #[tabled(rename = "Ata")]
    #[serde(rename = "Ata")]
    ata: String,
    #[tabled(rename = "Item")]
    #[serde(rename = "Item")]
    item: String,
    #[tabled(rename = "Code")]
    #[serde(rename = "Code")]
    code: String,
    #[tabled(rename = "Description")]
    #[serde(rename = "Description")]
    description: String,
    #[tabled(rename = "Supplier")]
    #[serde(rename = "Supplier")]
    supplier: String,
    #[tabled(rename = "Unit Price")]
    #[serde(rename = "Unit Price")]
    unit_price: String,
    #[tabled(rename = "Quantity")]
    #[serde(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
}

#[derive(Tabled, Serialize)]
struct AdhesionRow {
    #[tabled(rename = "Ata")]
    #[serde(rename = "Ata")]
    ata: String,
    #[tabled(rename = "Item")]
    #[serde(rename = "Item")]
    item: String,
    #[tabled(rename = "Requesting Unit")]
    #[serde(rename = "Requesting Unit")]
    requester: String,
    #[tabled(rename = "Quantity")]
    #[serde(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
pub(crate) struct DashboardRow {
    #[tabled(rename = "From")]
    #[serde(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    #[serde(rename = "To")]
    to: String,
    #[tabled(rename = "Atas")]
    #[serde(rename = "Atas")]
    pub(crate) total_atas: String,
}

// -- Row builders --

fn build_arp_rows(arps: &[Arp]) -> Vec<ArpRow> {
    arps.iter()
        .map(|a| ArpRow {
            number: a.numero_ata_registro_preco.clone(),
            uasg: a.codigo_unidade_gerenciadora.clone(),
            unit: a.nome_unidade_gerenciadora.clone(),
            modality: a.nome_modalidade_compra.clone(),
            valid_from: format_date(a.validity_start(), &a.data_vigencia_inicial),
            valid_to: format_date(a.validity_end(), &a.data_vigencia_final),
            status: a.situacao.clone(),
        })
        .collect()
}

fn build_item_rows(items: &[ArpItem]) -> Vec<ItemRow> {
    items
        .iter()
        .map(|i| ItemRow {
            ata: i.numero_ata_registro_preco.clone(),
            item: i.numero_item.clone(),
            code: i.codigo_item.map(|c| c.to_string()).unwrap_or_default(),
            description: i.descricao_item.clone(),
            supplier: i.nome_razao_social_fornecedor.clone(),
            unit_price: i.valor_unitario.map(format_brl).unwrap_or_else(|| "-".to_string()),
            quantity: i
                .quantidade_registrada
                .map(format_quantity)
                .unwrap_or_else(|| "-".to_string()),
            total: format_brl(i.total_value()),
        })
        .collect()
}

fn build_adhesion_rows(adhesions: &[Adhesion]) -> Vec<AdhesionRow> {
    adhesions
        .iter()
        .map(|a| AdhesionRow {
            ata: a.get_text("numeroAta").unwrap_or_default(),
            item: a.get_text("numeroItem").unwrap_or_default(),
            requester: a.get_text("unidadeNaoParticipante").unwrap_or_default(),
            quantity: a.get_text("quantidadeAprovada").unwrap_or_default(),
            status: a.get_text("situacao").unwrap_or_default(),
        })
        .collect()
}

pub(crate) fn build_dashboard_row(today: NaiveDate, total_atas: Option<i64>) -> DashboardRow {
    let (from, to) = atasradar_lib::last_year_window(today);
    DashboardRow {
        from: from.format("%d/%m/%Y").to_string(),
        to: to.format("%d/%m/%Y").to_string(),
        total_atas: total_atas
            .map(format_thousands)
            .unwrap_or_else(|| "-".to_string()),
    }
}

// -- Dispatch --

fn print_rows<R: Tabled + Serialize>(
    rows: Vec<R>,
    format: &OutputFormat,
    xml_root: &str,
    xml_item: &str,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Xml => {
            println!("{}", xml_output::items_to_xml(xml_root, xml_item, &rows)?)
        }
    }
    Ok(())
}

/// JSON output carries the API records unchanged; the other formats show
/// display rows.
pub fn print_arps(arps: &[Arp], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&arps);
            Ok(())
        }
        OutputFormat::Xml => {
            println!("{}", xml_output::arps_to_xml(arps)?);
            Ok(())
        }
        _ => print_rows(build_arp_rows(arps), format, "atas", "ata"),
    }
}

pub fn print_items(items: &[ArpItem], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&items);
            Ok(())
        }
        OutputFormat::Xml => {
            println!("{}", xml_output::items_xml(items)?);
            Ok(())
        }
        _ => print_rows(build_item_rows(items), format, "items", "item"),
    }
}

pub fn print_adhesions(adhesions: &[Adhesion], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&adhesions);
            Ok(())
        }
        OutputFormat::Xml => {
            println!("{}", xml_output::adhesions_to_xml(adhesions)?);
            Ok(())
        }
        _ => print_rows(build_adhesion_rows(adhesions), format, "adhesions", "adhesion"),
    }
}

pub fn print_dashboard(
    today: NaiveDate,
    total_atas: Option<i64>,
    format: &OutputFormat,
) -> Result<()> {
    let row = build_dashboard_row(today, total_atas);
    print_rows(vec![row], format, "dashboard", "window")
}

pub fn print_market_answer(answer: &MarketAnswer) {
    println!("{}", answer.text.trim());
    if !answer.sources.is_empty() {
        println!();
        println!("Sources:");
        for (n, source) in answer.sources.iter().enumerate() {
            println!("  [{}] {} <{}>", n + 1, source.label(), source.uri);
        }
    }
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Formatting --

/// Brazilian currency: `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn format_thousands(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(value.unsigned_abs()))
}

fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format_thousands(value as i64)
    } else {
        format!("{}", value).replace('.', ",")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `dd/mm/yyyy` when the API date parses, the raw text otherwise.
fn format_date(date: Option<NaiveDate>, raw: &str) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}
