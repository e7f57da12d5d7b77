#![forbid(unsafe_code)]

pub mod error;
pub mod gap;
pub mod model;
pub mod quiz;
pub mod time;

pub use error::Error;
pub use time::Clock;
