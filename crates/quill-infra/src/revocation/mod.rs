//! Session revocation list implementations.

mod memory;

pub use memory::InMemoryRevocationList;
