pub mod error;
pub mod memory;
pub mod snapshot;

pub use error::*;
pub use memory::InMemoryObjectStore;
pub use snapshot::{write_output, WorldSnapshot};
