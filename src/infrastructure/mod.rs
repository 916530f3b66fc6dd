//! Store adapters and the wall clock. Each adapter backs every collection on
//! one struct; `Clone` shares the underlying state.

pub mod clock;
pub mod in_memory;
pub mod rocksdb;
