//! Domain model (identifiers, enqueue receipts, stream items).

mod effected;
mod ids;
mod item;

pub use self::effected::Effected;
pub use self::ids::TaskId;
pub use self::item::DrainItem;
