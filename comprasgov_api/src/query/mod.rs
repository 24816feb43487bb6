mod common;
pub use self::common::{Query, QueryCommon};
mod params;
pub use self::params::{ParamValue, QueryParams};

mod arp;
pub use self::arp::ArpQuery;

mod item;
pub use self::item::ArpItemQuery;

mod adhesion;
pub use self::adhesion::AdhesionQuery;
