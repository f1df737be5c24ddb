//! Value objects - Immutable objects defined by their attributes

mod currency;
mod position;
mod quantity;

pub use currency::{CurrencyAmount, CurrencyPurse, Denomination, COPPER_PER_GOLD, COPPER_PER_SILVER};
pub use position::{GridCell, MapPosition};
pub use quantity::StackChange;
