mod de;

mod page;
pub use self::page::Page;

mod arp;
pub use self::arp::Arp;

mod item;
pub use self::item::ArpItem;

mod adhesion;
pub use self::adhesion::Adhesion;
