use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de::{null_as_empty, parse_date_prefix, string_or_number};

/// A price-registration record (Ata de Registro de Preços).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Arp {
    #[serde(deserialize_with = "string_or_number")]
    pub numero_ata_registro_preco: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub numero_controle_pncp_ata: String,

    #[serde(deserialize_with = "string_or_number")]
    pub codigo_unidade_gerenciadora: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome_unidade_gerenciadora: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub data_vigencia_inicial: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub data_vigencia_final: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub codigo_modalidade_compra: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome_modalidade_compra: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub link_ata_pncp: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub situacao: String,
}

impl Arp {
    pub fn validity_start(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.data_vigencia_inicial)
    }

    pub fn validity_end(&self) -> Option<NaiveDate> {
        parse_date_prefix(&self.data_vigencia_final)
    }

    /// True when `day` falls inside the validity window, both ends inclusive.
    /// An ata with an unparsable window is never in force.
    pub fn is_in_force_on(&self, day: NaiveDate) -> bool {
        match (self.validity_start(), self.validity_end()) {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}
