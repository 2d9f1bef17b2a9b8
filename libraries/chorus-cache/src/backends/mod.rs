mod memory;
mod noop;

pub use memory::MemoryCache;
pub use noop::NoopCache;
