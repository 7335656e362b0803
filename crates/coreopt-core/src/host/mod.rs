// # Host Implementations
//
// Hosts shipped with the core crate. File-backed selections live in the
// coreopt-host-file crate.

pub mod memory;

pub use memory::MemoryHost;
