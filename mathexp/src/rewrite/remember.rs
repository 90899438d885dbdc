//! Dropping historical-value markers.
use log::debug;

use crate::exp::{Exp, ExpKind, IntegerExp};

/// Copy of `exp` with every `#(e)` replaced by `e`.
///
/// Used once the pre-state of a procedure has been captured, when the remaining references to
/// incoming values become ordinary references. Applying it twice is the same as applying it
/// once.
pub fn remember(exp: &Exp) -> Exp {
    debug!("Remembering a `{}` tree.", exp.exp_type());
    let mut result = exp.copy();
    remember_in_place(&mut result);
    result
}

fn remember_in_place(exp: &mut Exp) {
    for child in exp.sub_expressions_mut() {
        remember_in_place(child);
    }

    match exp.kind_mut() {
        ExpKind::Dot(chain) => {
            if let Some(semantic) = chain.semantic.as_deref_mut() {
                remember_in_place(semantic);
            }
        }
        // The leading half may have been an `#(...)` around a tuple.
        ExpKind::Tuple(tuple) => tuple.refresh_size(),
        ExpKind::Old(_) => {
            let wrapper = std::mem::replace(exp, Exp::from(IntegerExp { value: 0 }));
            if let ExpKind::Old(old) = wrapper.into_kind() {
                *exp = old.into_inner();
            }
        }
        _ => {}
    }
}

impl Exp {
    /// See [`remember`].
    #[inline]
    pub fn remember(&self) -> Exp {
        remember(self)
    }
}
