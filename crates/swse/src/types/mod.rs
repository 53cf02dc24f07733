mod coerce;
mod dice;
mod mode;
mod sourced;
mod value;

pub use coerce::{as_arithmetic, integer_prefix, numeric_prefix, strict_number, to_boolean, to_number};
pub use dice::{DiceMatch, DiceTerm, TermAmount, decompose, find_dice, terms_size, value_size};
pub use mode::{ApplicationMode, RESOLUTION_ORDER};
pub use sourced::{AttributeChange, SourcedValue};
pub use value::{Value, format_number};
