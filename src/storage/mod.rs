pub mod repository;

pub use repository::{InMemoryMatchRepository, MatchRepository};
