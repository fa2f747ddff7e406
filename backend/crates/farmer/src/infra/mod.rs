//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryFarmerRepository;
pub use postgres::PgFarmerRepository;
