use super::{
    common::{Query, QueryCommon},
    params::QueryParams,
};

/// Query for `5_consultarAdesoesItem`: adhesions requested against one item
/// of one ata. All three identifiers are required by the API.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdhesionQuery {
    pub common: QueryCommon,
    pub ata_number: String,
    pub managing_unit: String,
    pub item_number: String,
}

impl AdhesionQuery {
    pub fn new(ata_number: &str, managing_unit: &str, item_number: &str) -> Self {
        Self {
            common: QueryCommon::default(),
            ata_number: ata_number.to_string(),
            managing_unit: managing_unit.to_string(),
            item_number: item_number.to_string(),
        }
    }
}

impl Query for AdhesionQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .set("numeroAta", self.ata_number.as_str())
            .set("unidadeGerenciadora", self.managing_unit.as_str())
            .set("numeroItem", self.item_number.as_str());
        self.common.write_paging(&mut params);
        params
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{AdhesionQuery, Query};

    #[test]
    fn test_adhesion_query() {
        let url = Url::parse("https://example.com/modulo-arp/5_consultarAdesoesItem").unwrap();

        insta::assert_snapshot!(AdhesionQuery::new("00012/2024", "250005", "3")
            .add_to_url(&url)
            .to_string(), @"https://example.com/modulo-arp/5_consultarAdesoesItem?numeroAta=00012%2F2024&unidadeGerenciadora=250005&numeroItem=3");
    }
}
