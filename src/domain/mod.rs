// Public API
pub use errors::RivalryError;
pub use models::{MatchRecord, NewMatch, SetScore};
pub use side::{Competitor, PerSide, RivalrySides, Side};

// Internal modules
mod errors;
mod models;
mod side;
