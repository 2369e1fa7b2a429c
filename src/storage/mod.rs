//! Schedule lookup and storage.

pub mod in_memory;
pub mod repository;

pub use in_memory::{InMemoryScheduleStore, ScheduleInformation};
pub use repository::ScheduleRepository;
