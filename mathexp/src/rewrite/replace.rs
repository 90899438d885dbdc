//! Targeted replacement of one sub-pattern.
//!
//! `replace(tree, old, new)` rewrites the occurrences of `old` inside `tree` into copies of
//! `new`. Unlike substitution, matching is kind-specific:
//!
//! | node                    | rule                                                           |
//! |-------------------------|----------------------------------------------------------------|
//! | literals                | never replaced                                                 |
//! | `VarExp`                | `old` is a variable with the same name (qualifier ignored)     |
//! | `OldExp`                | only an `OldExp` target; the wrapper is kept when `new` is one  |
//! | `DotExp`                | segment matching, see [`dot`](super::dot)                      |
//! | `BetweenExp`            | whole node only, never inside the operands for a between target |
//! | operators and functions | also renamed when `old` and `new` are variables naming them    |
//! | binders                 | bound variables renamed when `old` and `new` are variables     |
//! | other composites        | whole node by equivalence, then each child                     |
//! | citation kinds          | [`ExpError::Unsupported`]                                      |
//!
//! Replacement nodes that carry no type take the type of the node they replace.
use log::{debug, trace};

use crate::{
    error::{ExpError, ExpResult, Operation},
    exp::{Exp, ExpKind, OldExp},
    rewrite::{dot::replace_in_dot, equivalence::equivalent},
};

/// Outcome of [`replace`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Replaced {
    /// Independent tree with the replacement applied.
    Changed(Exp),
    /// Nothing matched; the input tree is the answer.
    Unchanged,
}

impl Replaced {
    #[inline]
    pub fn is_changed(&self) -> bool {
        matches!(self, Replaced::Changed(_))
    }

    pub fn into_option(self) -> Option<Exp> {
        match self {
            Replaced::Changed(exp) => Some(exp),
            Replaced::Unchanged => None,
        }
    }

    /// The rewritten tree, or a copy of `original` if nothing matched.
    pub fn or_copy_of(self, original: &Exp) -> Exp {
        match self {
            Replaced::Changed(exp) => exp,
            Replaced::Unchanged => original.copy(),
        }
    }
}

/// Replace `old` by `new` in `exp`.
pub fn replace(exp: &Exp, old: &Exp, new: &Exp) -> ExpResult<Replaced> {
    debug!(
        "Replacing a `{}` with a `{}` in a `{}` tree.",
        old.exp_type(),
        new.exp_type(),
        exp.exp_type()
    );
    replace_typed(exp, old, new)
}

/// [`replace_in`], attaching the types of `exp` to a replacement lacking them.
pub(crate) fn replace_typed(exp: &Exp, old: &Exp, new: &Exp) -> ExpResult<Replaced> {
    Ok(match replace_in(exp, old, new)? {
        Replaced::Changed(mut result) => {
            result.inherit_missing_types(exp);
            Replaced::Changed(result)
        }
        Replaced::Unchanged => Replaced::Unchanged,
    })
}

fn replace_in(exp: &Exp, old: &Exp, new: &Exp) -> ExpResult<Replaced> {
    let kind = exp.exp_type();
    match exp.kind() {
        ExpKind::MathRef(_) | ExpKind::HypDesig(_) | ExpKind::Justification(_) => {
            Err(ExpError::Unsupported {
                operation: Operation::Replace,
                kind,
            })
        }
        ExpKind::Integer(_) | ExpKind::Double(_) | ExpKind::Char(_) | ExpKind::Str(_) => {
            Ok(Replaced::Unchanged)
        }
        ExpKind::Var(v) => Ok(match old.as_var() {
            Some(target) if target.name == v.name => Replaced::Changed(new.copy()),
            _ => Replaced::Unchanged,
        }),
        ExpKind::VariableName(v) => {
            let matches = match old.kind() {
                ExpKind::VariableName(target) => target.name == v.name,
                ExpKind::Var(target) => target.name == v.name,
                _ => false,
            };
            Ok(if matches {
                Replaced::Changed(new.copy())
            } else {
                Replaced::Unchanged
            })
        }
        ExpKind::Old(o) => replace_in_old(o, old, new),
        ExpKind::Dot(d) => replace_in_dot(exp, d, old, new),
        _ => replace_in_composite(exp, old, new),
    }
}

fn replace_in_old(exp: &OldExp, old: &Exp, new: &Exp) -> ExpResult<Replaced> {
    let Some(target) = old.as_old() else {
        return Ok(Replaced::Unchanged);
    };

    Ok(match new.as_old() {
        // #x ↦ #y: rewrite inside, keep the wrapper.
        Some(replacement) => match replace_typed(exp.exp(), target.exp(), replacement.exp())? {
            Replaced::Changed(inner) => Replaced::Changed(Exp::from(OldExp::new(inner))),
            Replaced::Unchanged => Replaced::Unchanged,
        },
        // #x ↦ e: the wrapper goes away.
        None => replace_typed(exp.exp(), target.exp(), new)?,
    })
}

fn replace_in_composite(exp: &Exp, old: &Exp, new: &Exp) -> ExpResult<Replaced> {
    if old.exp_type() == exp.exp_type() && equivalent(old, exp)? {
        trace!("Whole `{}` matched.", exp.exp_type());
        return Ok(Replaced::Changed(new.copy()));
    }
    if exp.kind().is_between() && old.kind().is_between() {
        return Ok(Replaced::Unchanged);
    }

    let mut result: Option<Exp> = None;
    for (index, child) in exp.sub_expressions().into_iter().enumerate() {
        let Replaced::Changed(replacement) = replace_typed(child, old, new)? else {
            continue;
        };
        let target = result.get_or_insert_with(|| exp.copy());
        match target.set_sub_expression(index, replacement) {
            Ok(()) => {}
            Err(err @ (ExpError::InvalidChild { .. } | ExpError::MissingOtherwise)) => {
                trace!("Kept child {} of `{}`: {}", index, exp.exp_type(), err);
            }
            Err(err) => return Err(err),
        }
    }

    if let (Some(from), Some(to)) = (old.as_var(), new.as_var()) {
        if exp.operator_name().is_some_and(|name| *name == from.name) {
            result
                .get_or_insert_with(|| exp.copy())
                .rename_operator(&to.name);
        }
        if exp.bound_names().any(|name| *name == from.name) {
            result
                .get_or_insert_with(|| exp.copy())
                .rename_bound(from.name.name(), &to.name);
        }
    }

    Ok(match result {
        // A rejected child leaves the copy identical to the input.
        Some(result) if result != *exp => Replaced::Changed(result),
        _ => Replaced::Unchanged,
    })
}

impl Exp {
    /// See [`replace`].
    #[inline]
    pub fn replace(&self, old: &Exp, new: &Exp) -> ExpResult<Replaced> {
        replace(self, old, new)
    }
}
