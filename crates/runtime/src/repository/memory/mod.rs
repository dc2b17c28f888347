//! In-memory repository implementations for testing and development.

mod store;

pub use store::InMemoryStore;
