//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryTrainingRepository;
pub use postgres::PgTrainingRepository;
