use super::{
    common::{Query, QueryCommon},
    params::QueryParams,
};

/// Query for `1_consultarARP`: price-registration records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArpQuery {
    pub common: QueryCommon,
    /// UASG code of the managing unit.
    pub managing_unit: Option<String>,
    pub modality: Option<i64>,
}

impl Query for ArpQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.common.write_window(&mut params);
        params.set_opt("codigoUnidadeGerenciadora", self.managing_unit.clone());
        params.set_opt("codigoModalidadeCompra", self.modality);
        self.common.write_paging(&mut params);
        params
    }
}

impl ArpQuery {
    pub fn with_managing_unit(mut self, uasg: &str) -> Self {
        self.managing_unit = Some(uasg.to_string());
        self
    }

    pub fn with_modality(mut self, modality: i64) -> Self {
        self.modality = Some(modality);
        self
    }
}
