//! Replacement inside qualified chains.
//!
//! A [`DotExp`] `s0.s1...sn` is rewritten by the first rule that applies:
//!
//! 1. **Full chain.** `old` is a chain equivalent segment by segment: the answer is a copy of
//!    `new`.
//! 2. **Prefix.** `old` is a chain `o0...ok` with `k <= n` whose segments match the leading
//!    segments of `exp`. A segment matches when it is equivalent, or when the `old` segment is
//!    a variable naming the function applied by the `exp` segment (`S.f` matches `S.f(x)`).
//!    The matched segments are replaced by the segments of `new` (or by `new` itself when it is
//!    not a chain) and the rest of the chain follows.
//! 3. **Head.** `old` matches the head segment alone: a variable with the same name, a variable
//!    naming the head function (renamed when `new` is a variable too), or an `#(...)` head
//!    rewritten by the historical-value rule. A chain replacement is spliced in.
//! 4. **Arguments.** Otherwise each function segment is rewritten on its own.
//!
//! After a prefix or head splice the segments that follow have their function arguments
//! rewritten as in rule 4. Any change invalidates the resolved semantic form, which is dropped.
use either::Either;
use log::trace;

use crate::{
    error::ExpResult,
    exp::{DotExp, Exp, ExpKind},
    rewrite::{
        equivalence::{all_equivalent, equivalent},
        replace::{Replaced, replace_typed},
    },
};

/// Outcome of matching the segments of `old` against the leading segments of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PrefixMatch {
    len: usize,
    /// The last matched segment is a function application matched through its name.
    function_head: bool,
}

/// Does the `old` segment `pattern` match the chain segment `segment`?
///
/// `Some(true)` when the match goes through the name of the function applied by `segment`.
fn segment_matches(pattern: &Exp, segment: &Exp) -> ExpResult<Option<bool>> {
    if let (Some(name), Some(function)) = (pattern.as_var(), segment.as_function()) {
        if name.name == function.name {
            return Ok(Some(true));
        }
    }
    Ok(equivalent(pattern, segment)?.then_some(false))
}

fn match_prefix(segments: &[Exp], pattern: &[Exp]) -> ExpResult<Option<PrefixMatch>> {
    if pattern.is_empty() || pattern.len() > segments.len() {
        return Ok(None);
    }
    let mut function_head = false;
    for (p, s) in pattern.iter().zip(segments) {
        match segment_matches(p, s)? {
            Some(through_name) => function_head = through_name,
            None => return Ok(None),
        }
    }
    Ok(Some(PrefixMatch {
        len: pattern.len(),
        function_head,
    }))
}

/// Segments that take the place of `replaced`: the segments of a chain, the renamed function
/// application when only its name changes, or `new` itself.
fn spliced_segments<'a>(
    replaced: &'a Exp,
    new: &'a Exp,
    function_head: bool,
) -> impl Iterator<Item = Exp> + 'a {
    match new.as_dot() {
        Some(chain) => Either::Left(chain.segments().iter().cloned()),
        None => Either::Right(std::iter::once(match new.as_var() {
            Some(to) if function_head => {
                let mut renamed = replaced.copy();
                renamed.rename_operator(&to.name);
                renamed
            }
            _ => new.copy(),
        })),
    }
}

/// Rebuild `exp` with segments `0..len` replaced by `spliced`. The remaining segments follow,
/// with their function arguments rewritten.
fn splice<I: IntoIterator<Item = Exp>>(
    exp: &Exp,
    len: usize,
    spliced: I,
    old: &Exp,
    new: &Exp,
) -> ExpResult<Exp> {
    let mut result = exp.copy();
    if let ExpKind::Dot(chain) = result.kind_mut() {
        let segments = chain.segments_mut();
        let tail = segments.split_off(len);
        segments.clear();
        segments.extend(spliced);
        for segment in tail {
            segments.push(replace_arguments(segment, old, new)?);
        }
        chain.semantic = None;
    }
    Ok(result)
}

/// `segment` with `old` replaced inside it when it is a function application.
fn replace_arguments(segment: Exp, old: &Exp, new: &Exp) -> ExpResult<Exp> {
    if !segment.kind().is_function() {
        return Ok(segment);
    }
    Ok(replace_typed(&segment, old, new)?.or_copy_of(&segment))
}

pub(crate) fn replace_in_dot(
    exp: &Exp,
    chain: &DotExp,
    old: &Exp,
    new: &Exp,
) -> ExpResult<Replaced> {
    let segments = chain.segments();

    if let Some(pattern) = old.as_dot() {
        if all_equivalent(pattern.segments(), segments)? {
            trace!("Whole chain of {} segments matched.", segments.len());
            return Ok(Replaced::Changed(new.copy()));
        }
        if let Some(matched) = match_prefix(segments, pattern.segments())? {
            trace!("Chain prefix of {} segments matched.", matched.len);
            let last = &segments[matched.len - 1];
            let spliced = spliced_segments(last, new, matched.function_head);
            return Ok(Replaced::Changed(splice(exp, matched.len, spliced, old, new)?));
        }
    }

    if let Some(result) = replace_head(exp, chain.head(), old, new)? {
        return Ok(Replaced::Changed(result));
    }

    let mut changed = false;
    let mut rewritten = Vec::with_capacity(segments.len());
    for segment in segments {
        let replaced = if segment.kind().is_function() {
            replace_typed(segment, old, new)?
        } else {
            Replaced::Unchanged
        };
        rewritten.push(match replaced {
            Replaced::Changed(replacement) => {
                changed = true;
                replacement
            }
            Replaced::Unchanged => segment.copy(),
        });
    }
    if !changed {
        return Ok(Replaced::Unchanged);
    }
    trace!("Chain arguments rewritten.");
    Ok(Replaced::Changed(splice(
        exp,
        segments.len(),
        rewritten,
        old,
        new,
    )?))
}

fn replace_head(exp: &Exp, head: &Exp, old: &Exp, new: &Exp) -> ExpResult<Option<Exp>> {
    let replacement = match (old.kind(), head.kind()) {
        (ExpKind::Var(target), ExpKind::Var(h)) if target.name == h.name => new.copy(),
        (ExpKind::Var(target), ExpKind::Function(f)) if target.name == f.name => {
            if !new.kind().is_var() {
                return Ok(None);
            }
            // Renames the function and rewrites its arguments.
            replace_typed(head, old, new)?.or_copy_of(head)
        }
        (ExpKind::Old(_), ExpKind::Old(_)) => match replace_typed(head, old, new)? {
            Replaced::Changed(replacement) => replacement,
            Replaced::Unchanged => return Ok(None),
        },
        _ => return Ok(None),
    };
    trace!("Chain head matched.");

    let spliced = match replacement.as_dot() {
        Some(inner) => Either::Left(inner.segments().to_vec().into_iter()),
        None => Either::Right(std::iter::once(replacement)),
    };
    Ok(Some(splice(exp, 1, spliced, old, new)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exp::func::*;

    fn chain(names: &[&str]) -> Exp {
        dot(names.iter().map(|n| var(n))).unwrap()
    }

    #[test]
    fn prefix_longer_than_chain_does_not_match() {
        let segments = [var("S"), var("Top")];
        let pattern = [var("S"), var("Top"), var("Next")];
        assert_eq!(match_prefix(&segments, &pattern).unwrap(), None);
    }

    #[test]
    fn prefix_of_equal_length_matches() {
        let segments = [var("S"), apply("f", vec![var("x")])];
        let pattern = [var("S"), var("f")];
        assert_eq!(
            match_prefix(&segments, &pattern).unwrap(),
            Some(PrefixMatch {
                len: 2,
                function_head: true
            })
        );
    }

    #[test]
    fn head_splice_keeps_tail() {
        let e = chain(&["S", "Top"]);
        let out = replace_head(&e, e.as_dot().unwrap().head(), &var("S"), &chain(&["T", "U"]))
            .unwrap()
            .unwrap();
        assert_eq!(out.as_dot().unwrap().segments().len(), 3);
    }
}
