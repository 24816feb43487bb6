use super::{
    common::{Query, QueryCommon},
    params::QueryParams,
};

/// Query for `2_consultarARPItem`: line items of price-registration records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArpItemQuery {
    pub common: QueryCommon,
    /// UASG code of the managing unit.
    pub managing_unit: Option<String>,
    pub modality: Option<i64>,
    /// CATMAT/CATSER catalog code.
    pub item_code: Option<i64>,
    /// CNPJ/CPF of the supplier.
    pub supplier_tax_id: Option<String>,
}

impl Query for ArpItemQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.common.write_window(&mut params);
        params.set_opt("codigoUnidadeGerenciadora", self.managing_unit.clone());
        params.set_opt("codigoModalidadeCompra", self.modality);
        params.set_opt("codigoItem", self.item_code);
        params.set_opt("niFornecedor", self.supplier_tax_id.clone());
        self.common.write_paging(&mut params);
        params
    }
}

impl ArpItemQuery {
    pub fn with_managing_unit(mut self, uasg: &str) -> Self {
        self.managing_unit = Some(uasg.to_string());
        self
    }

    pub fn with_modality(mut self, modality: i64) -> Self {
        self.modality = Some(modality);
        self
    }

    pub fn with_item_code(mut self, code: i64) -> Self {
        self.item_code = Some(code);
        self
    }

    pub fn with_supplier_tax_id(mut self, tax_id: &str) -> Self {
        self.supplier_tax_id = Some(tax_id.to_string());
        self
    }
}
