//! Minimal acyclic subsequential transducer: on-line builder, in-memory
//! state table, and the compiled zero-copy view used by the columnar
//! container.

pub mod builder;
pub mod state;
pub mod view;

pub use builder::MastBuilder;
pub use state::{Arc, State, StateId, UncompiledNode};
pub use view::{compile as compile_mast, CompiledFst, CompiledMast};
