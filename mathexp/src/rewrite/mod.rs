//! Rewrite engines over [`Exp`](crate::exp::Exp) trees.
//!
//! - [`equivalence`]: structural comparison, ignoring locations and types.
//! - [`substitute`]: simultaneous substitution keyed by equivalence.
//! - [`replace`]: kind-specific replacement of one sub-pattern.
//! - [`remember`]: dropping `#(...)` markers.
//!
//! Every engine leaves its inputs untouched and returns trees sharing no node with them.
mod dot;
pub mod equivalence;
pub mod remember;
pub mod replace;
pub mod substitute;

pub use equivalence::equivalent;
pub use remember::remember;
pub use replace::{Replaced, replace};
pub use substitute::{Substitution, substitute, substitute_children, substitute_names};
