//! Mathexp: expression IR and rewrite primitives for a verification-condition generator.
//!
//! The crate holds the expression trees built by the front-end of a specification-language
//! compiler (mathematical assertions as well as program expressions and proof citations), and
//! the rewriting primitives every later phase relies on.
//!
//! Layout
//!  - [`exp`]: the node kinds, validating constructors and builders, index-based child access,
//!    pretty-printing.
//!  - [`rewrite`]: structural equivalence, simultaneous substitution, targeted replacement and
//!    the removal of historical-value markers.
//!  - [`walker`]: explicit-stack traversal for read-only queries.
//!  - [`visitor`]: per-kind dispatch for external passes.
//!  - [`config`]: settings of the diagnostic outputs.
//!
//! Ownership
//!  - Trees own their children. Every rewrite borrows its inputs and returns a fresh tree, so a
//!    result can be mutated freely without affecting the tree it came from.
//!
//! Example
//! ```
//! use mathexp::prelude::*;
//!
//! // For_all x: Z, x + y = y + x   with y := 1
//! let body = equals(infix(var("x"), "+", var("y")), infix(var("y"), "+", var("x")));
//! let e = forall(vec![decl("x", "Z")], None, body);
//! let e = e.substitute_names([("x", int(0)), ("y", int(1))]);
//!
//! assert!(e.contains_var("x", false));
//! assert!(!e.contains_var("y", false));
//! assert_eq!(e.to_string(), "For_all x: Z, x + 1 = 1 + x");
//! ```

pub mod config;
pub mod error;
/// Expression tree: node kinds, constructors, child access and pretty-printing.
pub mod exp;
/// Equivalence, substitution, replacement and `remember`.
pub mod rewrite;
pub mod symbol;
/// Opaque math types attached by type inference.
pub mod types;
pub mod visitor;
/// Tree walker for read-only queries.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - Node kinds and payloads from `exp::*`
    //! - Free-function builders from `func::*`
    //! - Rewrite entry points
    //! - Pretty-printing via `PrettyExp`
    pub use crate::error::{ExpError, ExpResult, Operation};
    pub use crate::exp::{func::*, pretty::PrettyExp, *};
    pub use crate::rewrite::{
        Replaced, Substitution, equivalent, remember, replace, substitute, substitute_children,
        substitute_names,
    };
    pub use crate::symbol::{Location, PosSymbol, Symbol};
    pub use crate::types::{MathType, MathTypeKind};

    // Walker ergonomics
    pub use crate::walker::{WalkerHandle, WalkerNodeHandle, walk, walk_no_input};

    pub use crate::config::MathExpConfig;
    pub use crate::visitor::ExpVisitor;
}
