#![forbid(unsafe_code)]

pub mod dataset;
pub mod repository;
mod sample;

pub use dataset::{Dataset, DatasetRecord, Entries};
pub use repository::{InMemoryRepository, Storage, StorageError};
