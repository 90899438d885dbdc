//! Structural equivalence of expression trees.
//!
//! Two trees are equivalent when they have the same shape, the same operators and quantifiers
//! and the same identifiers, compared as strings. Locations and types are ignored. Ordered
//! constructs compare their children positionally; a [`BetweenExp`] compares its operands as an
//! unordered multiset.
//!
//! Comparison dispatches on the left operand. Proof-citation kinds have no rule and report
//! [`ExpError::Unsupported`].
use crate::{
    error::{ExpError, ExpResult, Operation},
    exp::{BetweenExp, Exp, ExpKind, MathVarDecl, VarExp},
    symbol::same_optional_name,
};

/// Is `a` structurally equivalent to `b`?
pub fn equivalent(a: &Exp, b: &Exp) -> ExpResult<bool> {
    let kind = a.exp_type();
    if kind.is_citation() {
        return Err(ExpError::Unsupported {
            operation: Operation::Equivalent,
            kind,
        });
    }

    use ExpKind as K;
    Ok(match (a.kind(), b.kind()) {
        (K::Integer(x), K::Integer(y)) => x.value == y.value,
        (K::Double(x), K::Double(y)) => x.value == y.value,
        (K::Char(x), K::Char(y)) => x.value == y.value,
        (K::Str(x), K::Str(y)) => x.value == y.value,
        (K::Var(x), K::Var(y)) => same_var(x, y),
        (K::VcVar(x), K::VcVar(y)) => x.state == y.state && equivalent(&x.exp, &y.exp)?,
        (K::Old(x), K::Old(y)) => equivalent(x.exp(), y.exp())?,
        (K::Infix(x), K::Infix(y)) => {
            x.operator == y.operator
                && equivalent(&x.left, &y.left)?
                && equivalent(&x.right, &y.right)?
        }
        (K::Prefix(x), K::Prefix(y)) => {
            x.symbol == y.symbol && equivalent(&x.argument, &y.argument)?
        }
        (K::Outfix(x), K::Outfix(y)) => {
            x.operator == y.operator && equivalent(&x.argument, &y.argument)?
        }
        (K::Equals(x), K::Equals(y)) => {
            x.operator == y.operator
                && equivalent(&x.left, &y.left)?
                && equivalent(&x.right, &y.right)?
        }
        (K::IsIn(x), K::IsIn(y)) => {
            x.operator == y.operator
                && equivalent(&x.left, &y.left)?
                && equivalent(&x.right, &y.right)?
        }
        (K::Between(x), K::Between(y)) => between_equivalent(x, y)?,
        (K::Function(x), K::Function(y)) => {
            same_optional_name(x.qualifier.as_ref(), y.qualifier.as_ref())
                && x.name == y.name
                && all_equivalent(&x.arguments, &y.arguments)?
        }
        (K::Dot(x), K::Dot(y)) => {
            optional_equivalent(x.semantic.as_deref(), y.semantic.as_deref())?
                && all_equivalent(x.segments(), y.segments())?
        }
        (K::Lambda(x), K::Lambda(y)) => {
            decls_equivalent(&x.parameters, &y.parameters)? && equivalent(&x.body, &y.body)?
        }
        (K::Quant(x), K::Quant(y)) => {
            x.quantification == y.quantification
                && decls_equivalent(&x.variables, &y.variables)?
                && optional_equivalent(x.where_clause.as_deref(), y.where_clause.as_deref())?
                && equivalent(&x.body, &y.body)?
        }
        (K::Set(x), K::Set(y)) => {
            decl_equivalent(&x.variable, &y.variable)?
                && optional_equivalent(x.where_clause.as_deref(), y.where_clause.as_deref())?
                && equivalent(&x.body, &y.body)?
        }
        (K::Iterative(x), K::Iterative(y)) => {
            x.operator == y.operator
                && decl_equivalent(&x.variable, &y.variable)?
                && optional_equivalent(x.where_clause.as_deref(), y.where_clause.as_deref())?
                && equivalent(&x.body, &y.body)?
        }
        (K::If(x), K::If(y)) => {
            equivalent(&x.test, &y.test)?
                && equivalent(&x.then_exp, &y.then_exp)?
                && optional_equivalent(x.else_exp.as_deref(), y.else_exp.as_deref())?
        }
        (K::Alternative(x), K::Alternative(y)) => {
            all_equivalent(x.alternatives(), y.alternatives())?
        }
        (K::AltItem(x), K::AltItem(y)) => {
            optional_equivalent(x.test.as_deref(), y.test.as_deref())?
                && equivalent(&x.assignment, &y.assignment)?
        }
        (K::Tuple(x), K::Tuple(y)) => {
            x.size() == y.size()
                && equivalent(x.first(), y.first())?
                && equivalent(x.second(), y.second())?
        }
        (K::SetCollection(x), K::SetCollection(y)) => all_equivalent(x.members(), y.members())?,
        (K::TypeAssertion(x), K::TypeAssertion(y)) => {
            equivalent(&x.exp, &y.exp)? && equivalent(&x.asserted, &y.asserted)?
        }
        (K::VariableName(x), K::VariableName(y)) => {
            same_optional_name(x.qualifier.as_ref(), y.qualifier.as_ref()) && x.name == y.name
        }
        (K::VariableDot(x), K::VariableDot(y)) => all_equivalent(x.segments(), y.segments())?,
        (K::ProgramParam(x), K::ProgramParam(y)) => {
            same_optional_name(x.qualifier.as_ref(), y.qualifier.as_ref())
                && x.name == y.name
                && all_equivalent(&x.arguments, &y.arguments)?
        }
        (K::ProgramOp(x), K::ProgramOp(y)) => {
            x.operator == y.operator && all_equivalent(&x.operands, &y.operands)?
        }
        // The justification is citation data and takes no part.
        (K::Justified(x), K::Justified(y)) => equivalent(&x.exp, &y.exp)?,
        // Different kinds.
        _ => false,
    })
}

/// Qualifier and name, compared as strings. The quantification is not part of the identity.
pub fn same_var(a: &VarExp, b: &VarExp) -> bool {
    same_optional_name(a.qualifier.as_ref(), b.qualifier.as_ref()) && a.name == b.name
}

/// Pairwise, in order, with equal lengths.
pub fn all_equivalent(a: &[Exp], b: &[Exp]) -> ExpResult<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !equivalent(x, y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Two absent children are equivalent; one absent child never is.
pub fn optional_equivalent(a: Option<&Exp>, b: Option<&Exp>) -> ExpResult<bool> {
    match (a, b) {
        (None, None) => Ok(true),
        (Some(a), Some(b)) => equivalent(a, b),
        _ => Ok(false),
    }
}

fn decl_equivalent(a: &MathVarDecl, b: &MathVarDecl) -> ExpResult<bool> {
    Ok(a.name == b.name && equivalent(&a.ty, &b.ty)?)
}

fn decls_equivalent(a: &[MathVarDecl], b: &[MathVarDecl]) -> ExpResult<bool> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b) {
        if !decl_equivalent(x, y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The operands as multisets: each operand of `a` is paired with a distinct equivalent
/// operand of `b`. The operands of `a` stay on the left of every comparison.
fn between_equivalent(a: &BetweenExp, b: &BetweenExp) -> ExpResult<bool> {
    if a.operands.len() != b.operands.len() {
        return Ok(false);
    }
    let mut paired = vec![false; b.operands.len()];
    'operands: for x in &a.operands {
        for (y, used) in b.operands.iter().zip(paired.iter_mut()) {
            if !*used && equivalent(x, y)? {
                *used = true;
                continue 'operands;
            }
        }
        return Ok(false);
    }
    Ok(true)
}

impl Exp {
    /// See [`equivalent`].
    #[inline]
    pub fn equivalent(&self, other: &Exp) -> ExpResult<bool> {
        equivalent(self, other)
    }
}
