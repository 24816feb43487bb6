use serde::{Deserialize, Serialize};

use super::de::{null_as_empty, string_or_number};

/// A line item of a price-registration record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArpItem {
    #[serde(deserialize_with = "string_or_number")]
    pub numero_item: String,

    /// CATMAT/CATSER catalog code.
    #[serde(default)]
    pub codigo_item: Option<i64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub tipo_item: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub descricao_item: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub descricao_detalhada: String,

    #[serde(default)]
    pub valor_unitario: Option<f64>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub ni_fornecedor: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome_razao_social_fornecedor: String,

    #[serde(default)]
    pub quantidade_registrada: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub unidade_medida: String,

    #[serde(deserialize_with = "string_or_number")]
    pub numero_ata_registro_preco: String,

    #[serde(deserialize_with = "string_or_number")]
    pub codigo_unidade_gerenciadora: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome_unidade_gerenciadora: String,
}

impl ArpItem {
    /// Unit price times registered quantity. Missing numbers count as zero.
    pub fn total_value(&self) -> f64 {
        self.valor_unitario.unwrap_or(0.0) * self.quantidade_registrada.unwrap_or(0.0)
    }
}
