//! Simultaneous substitution.
//!
//! A [`Substitution`] is an ordered list of `key ↦ value` pairs. Substituting walks the tree
//! top-down: a node equivalent to a key is replaced by a fresh copy of the value (which is not
//! visited again), any other node is rebuilt with its children substituted. All pairs apply
//! simultaneously, so `{x ↦ y, y ↦ x}` swaps `x` and `y`.
//!
//! Binders shadow: inside a lambda, quantifier, set comprehension or iterated operator, an
//! unqualified variable key naming one of the bound variables is not applied.
//!
//! Results are type-preserving: every rebuilt node keeps the type metadata of the node it was
//! built from.
use std::borrow::Cow;

use log::{debug, trace};

use crate::{
    error::{ExpError, ExpResult, Operation},
    exp::{Exp, func},
    rewrite::equivalence::equivalent,
    symbol::PosSymbol,
    walker::walk_no_input,
};

/// Ordered `key ↦ value` map over expressions, keyed by structural equivalence.
///
/// When two keys are equivalent the one inserted first wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    entries: Vec<(Exp, Exp)>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Keys must be comparable by equivalence, so a key containing a
    /// proof-citation node is refused.
    pub fn insert(&mut self, key: Exp, value: Exp) -> ExpResult<()> {
        check_key(&key)?;
        self.entries.push((key, value));
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: Exp, value: Exp) -> ExpResult<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Variable-keyed substitution `{name ↦ value, ...}`.
    pub fn from_names<'n, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'n str, Exp)>,
    {
        Substitution {
            entries: pairs
                .into_iter()
                .map(|(name, value)| (func::var(name), value))
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Exp, &Exp)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Value of the first key equivalent to `exp`.
    pub fn get(&self, exp: &Exp) -> Option<&Exp> {
        self.entries
            .iter()
            // Keys hold no citation node and stay on the left, so the comparison cannot fail.
            .find(|(key, _)| equivalent(key, exp).unwrap_or(false))
            .map(|(_, value)| value)
    }

    /// New name for an operator or function spelled like `name`: the first unqualified variable
    /// key with that spelling whose value is also a variable.
    fn operator_rename(&self, name: &PosSymbol) -> Option<&PosSymbol> {
        self.entries.iter().find_map(|(key, value)| {
            let key = key.as_var()?;
            let value = value.as_var()?;
            (key.qualifier.is_none() && key.name == *name).then_some(&value.name)
        })
    }

    /// This substitution without the unqualified variable keys naming one of `bound`.
    fn shadowed_by<'b>(&self, bound: impl Iterator<Item = &'b PosSymbol>) -> Cow<'_, Self> {
        let bound: Vec<&PosSymbol> = bound.collect();
        let is_shadowed = |key: &Exp| {
            key.as_var()
                .is_some_and(|v| v.qualifier.is_none() && bound.contains(&&v.name))
        };

        if !self.entries.iter().any(|(key, _)| is_shadowed(key)) {
            return Cow::Borrowed(self);
        }
        trace!("Binder shadows {} substitution key(s).", bound.len());
        Cow::Owned(Substitution {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| !is_shadowed(key))
                .cloned()
                .collect(),
        })
    }
}

fn check_key(key: &Exp) -> ExpResult<()> {
    let mut offending = None;
    walk_no_input(key, |node| {
        let kind = node.exp_type();
        if kind.is_citation() {
            offending = Some(kind);
            node.break_();
        } else {
            node.schedule_children(());
        }
    });
    match offending {
        Some(kind) => Err(ExpError::Unsupported {
            operation: Operation::Equivalent,
            kind,
        }),
        None => Ok(()),
    }
}

/// Apply `substitution` to `exp`, returning an independent tree.
pub fn substitute(exp: &Exp, substitution: &Substitution) -> Exp {
    debug!(
        "Substituting {} pair(s) into a `{}` tree.",
        substitution.len(),
        exp.exp_type()
    );
    substitute_node(exp, substitution)
}

fn substitute_node(exp: &Exp, substitution: &Substitution) -> Exp {
    match substitution.get(exp) {
        Some(value) => {
            trace!("Matched a `{}` substitution key.", exp.exp_type());
            value.copy()
        }
        None => substitute_children(exp, substitution),
    }
}

/// Apply `substitution` to the children of `exp` but never to `exp` itself.
pub fn substitute_children(exp: &Exp, substitution: &Substitution) -> Exp {
    let scoped = substitution.shadowed_by(exp.bound_names());
    let mut result = exp.map_children(|child| substitute_node(child, &scoped));
    if let Some(operator) = exp.operator_name() {
        if let Some(renamed) = scoped.operator_rename(operator) {
            trace!("Renaming `{}` to `{}`.", operator, renamed);
            result.rename_operator(renamed);
        }
    }
    result
}

/// Substitute variables by name.
pub fn substitute_names<'n, I>(exp: &Exp, pairs: I) -> Exp
where
    I: IntoIterator<Item = (&'n str, Exp)>,
{
    substitute(exp, &Substitution::from_names(pairs))
}

impl Exp {
    /// See [`substitute`].
    #[inline]
    pub fn substitute(&self, substitution: &Substitution) -> Exp {
        substitute(self, substitution)
    }

    /// See [`substitute_children`].
    #[inline]
    pub fn substitute_children(&self, substitution: &Substitution) -> Exp {
        substitute_children(self, substitution)
    }

    /// See [`substitute_names`].
    pub fn substitute_names<'n, I>(&self, pairs: I) -> Exp
    where
        I: IntoIterator<Item = (&'n str, Exp)>,
    {
        substitute_names(self, pairs)
    }
}
