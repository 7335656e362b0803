// # coreopt-core
//
// Typed option registry for cores embedded in a host application.
//
// ## Architecture Overview
//
// The host exposes a generic "key -> selected label" settings protocol.
// This library lets internal code declare typed options once and keeps them
// in sync with that protocol:
//
// - **CoreOption**: One typed option with a fixed list of labeled choices
// - **ChoiceSpec**: The ways a choice list can be declared (pairs, indexed
//   labels, identity labels, offset labels, ranges, toggles)
// - **OptionRegistry**: Collects every option; publishes the schema and
//   polls the host for changes
// - **Host**: Trait for the host's settings protocol
// - **MemoryHost**: In-memory host for embedding and tests
//
// ## Design Principles
//
// 1. **Declare once**: The wire schema is derived from the typed declaration
// 2. **Lazy resolution**: Values are re-read only when marked dirty
// 3. **Never fail at runtime**: Unknown or missing host answers fall back to
//    the first choice

pub mod config;
pub mod error;
pub mod host;
pub mod option;
pub mod registry;
pub mod traits;
pub mod wire;

// Re-export core types for convenience
pub use config::{HostConfig, PollConfig, RuntimeConfig};
pub use error::{Error, Result};
pub use host::MemoryHost;
pub use option::{Choice, ChoiceSpec, CoreOption, OptionValue};
pub use registry::OptionRegistry;
pub use traits::Host;
pub use wire::Variable;
