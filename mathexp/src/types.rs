//! Math types attached to expressions by the type-inference collaborator.
//!
//! The core never infers types; it only stores, copies and checks the shape of the handles it is
//! given. A [`MathType`] is immutable and reference counted, so reattaching the same type to many
//! rewritten nodes is a pointer copy.
use std::{fmt, sync::Arc};

use strum::EnumIs;

use crate::symbol::Symbol;

#[derive(Debug, PartialEq, Eq, Hash, EnumIs)]
pub enum MathTypeKind {
    /// A named type such as `B`, `Z` or `Stack`, optionally qualified by its theory.
    Named {
        qualifier: Option<Symbol>,
        name: Symbol,
    },
    /// `domain -> range`. Multi-argument functions take a [`MathTypeKind::Cartesian`] domain.
    Function { domain: MathType, range: MathType },
    Cartesian(Vec<MathType>),
    Powerset(MathType),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MathType(Arc<MathTypeKind>);

impl MathType {
    pub fn new(kind: MathTypeKind) -> Self {
        MathType(Arc::new(kind))
    }

    pub fn named(name: &str) -> Self {
        Self::new(MathTypeKind::Named {
            qualifier: None,
            name: Symbol::new(name),
        })
    }

    pub fn qualified(qualifier: &str, name: &str) -> Self {
        Self::new(MathTypeKind::Named {
            qualifier: Some(Symbol::new(qualifier)),
            name: Symbol::new(name),
        })
    }

    /// The boolean type `B`.
    pub fn boolean() -> Self {
        Self::named("B")
    }

    pub fn function(domain: MathType, range: MathType) -> Self {
        Self::new(MathTypeKind::Function { domain, range })
    }

    pub fn cartesian(fields: Vec<MathType>) -> Self {
        Self::new(MathTypeKind::Cartesian(fields))
    }

    pub fn powerset(base: MathType) -> Self {
        Self::new(MathTypeKind::Powerset(base))
    }

    #[inline]
    pub fn kind(&self) -> &MathTypeKind {
        &self.0
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        self.0.is_function()
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.kind(), MathTypeKind::Named { qualifier: None, name } if name.as_str() == "B")
    }

    /// `true` when both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &MathType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for MathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            MathTypeKind::Named {
                qualifier: Some(q),
                name,
            } => write!(f, "{}.{}", q, name),
            MathTypeKind::Named {
                qualifier: None,
                name,
            } => write!(f, "{}", name),
            MathTypeKind::Function { domain, range } => write!(f, "({} -> {})", domain, range),
            MathTypeKind::Cartesian(fields) => {
                f.write_str("(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" * ")?;
                    }
                    write!(f, "{}", field)?;
                }
                f.write_str(")")
            }
            MathTypeKind::Powerset(base) => write!(f, "P({})", base),
        }
    }
}
