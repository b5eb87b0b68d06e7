// Adapters layer: concrete record stores.

pub mod file;
pub mod memory;
pub mod table;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
