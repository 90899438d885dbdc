//! Index-based, kind-agnostic access to the children of a node.
//!
//! Child order per kind is fixed and shared by [`Exp::sub_expressions`],
//! [`Exp::sub_expressions_mut`], [`Exp::set_sub_expression`] and [`Exp::map_children`]. Absent
//! optional children are skipped, so the meaning of an index may depend on which optional
//! children are present. [`AltItemExp`] keeps one more quirk callers rely on: index 1 always
//! designates the assignment, even for an otherwise-branch where the assignment is also index 0.
//!
//! Binder parameter types, the asserted type of a [`TypeAssertionExp`], the semantic form of a
//! [`DotExp`] and the designators of a justification are not children.
use log::trace;
use smallvec::SmallVec;

use crate::{
    error::{ExpError, ExpResult},
    exp::{
        AltItemExp, AlternativeExp, BetweenExp, DotExp, EqualsExp, Exp, ExpKind, ExpType,
        FunctionExp, IfExp, InfixExp, IsInExp, IterativeExp, JustifiedExp, LambdaExp,
        MathVarDecl, OldExp, OutfixExp, PrefixExp, ProgramOpExp, ProgramParamExp, QuantExp,
        SetCollectionExp, SetExp, TupleExp, TypeAssertionExp, VariableDotExp, VcVarExp,
    },
    symbol::PosSymbol,
};

/// Children of a node, borrowed.
pub type SubExpressions<'a> = SmallVec<[&'a Exp; 4]>;

/// Children of a node, mutably borrowed.
pub(crate) type SubExpressionsMut<'a> = SmallVec<[&'a mut Exp; 4]>;

fn out_of_range(kind: ExpType, index: usize, len: usize) -> ExpError {
    ExpError::SubExpressionIndex { kind, index, len }
}

fn set_in_list(kind: ExpType, list: &mut [Exp], index: usize, exp: Exp) -> ExpResult<()> {
    let len = list.len();
    match list.get_mut(index) {
        Some(slot) => {
            *slot = exp;
            Ok(())
        }
        None => Err(out_of_range(kind, index, len)),
    }
}

fn set_boxed(slot: &mut Box<Exp>, exp: Exp) -> ExpResult<()> {
    **slot = exp;
    Ok(())
}

/// `[where?, body]` setter shared by the binders.
fn set_where_body(
    kind: ExpType,
    where_clause: &mut Option<Box<Exp>>,
    body: &mut Box<Exp>,
    index: usize,
    exp: Exp,
) -> ExpResult<()> {
    match (where_clause.as_mut(), index) {
        (Some(w), 0) => set_boxed(w, exp),
        (Some(_), 1) | (None, 0) => set_boxed(body, exp),
        (w, index) => Err(out_of_range(kind, index, 1 + w.is_some() as usize)),
    }
}

fn map_opt<F: FnMut(&Exp) -> Exp>(exp: &Option<Box<Exp>>, f: &mut F) -> Option<Box<Exp>> {
    exp.as_ref().map(|e| Box::new(f(e)))
}

fn map_boxed<F: FnMut(&Exp) -> Exp>(exp: &Exp, f: &mut F) -> Box<Exp> {
    Box::new(f(exp))
}

/// Map a child whose slot only accepts kind `expected`; a result of another kind leaves the
/// original child in place.
fn map_restricted<F: FnMut(&Exp) -> Exp>(
    parent: ExpType,
    expected: ExpType,
    exp: &Exp,
    f: &mut F,
) -> Exp {
    let mapped = f(exp);
    if mapped.exp_type() == expected {
        mapped
    } else {
        trace!(
            "Rejected a `{}` as child of `{}` (expected `{}`), keeping the original child.",
            mapped.exp_type(),
            parent,
            expected
        );
        exp.copy()
    }
}

impl Exp {
    /// Ordered children of this node.
    pub fn sub_expressions(&self) -> SubExpressions<'_> {
        let mut children = SubExpressions::new();
        match self.kind() {
            ExpKind::Integer(_)
            | ExpKind::Double(_)
            | ExpKind::Char(_)
            | ExpKind::Str(_)
            | ExpKind::Var(_)
            | ExpKind::VariableName(_)
            | ExpKind::HypDesig(_)
            | ExpKind::Justification(_) => {}
            ExpKind::VcVar(v) => children.push(v.exp.as_ref()),
            ExpKind::Old(o) => children.push(o.exp.as_ref()),
            ExpKind::Infix(e) => children.extend([e.left.as_ref(), e.right.as_ref()]),
            ExpKind::Equals(e) => children.extend([e.left.as_ref(), e.right.as_ref()]),
            ExpKind::IsIn(e) => children.extend([e.left.as_ref(), e.right.as_ref()]),
            ExpKind::Prefix(e) => children.push(e.argument.as_ref()),
            ExpKind::Outfix(e) => children.push(e.argument.as_ref()),
            ExpKind::Between(e) => children.extend(e.operands.iter()),
            ExpKind::Function(e) => children.extend(e.arguments.iter()),
            ExpKind::Dot(e) => children.extend(e.segments().iter()),
            ExpKind::Lambda(e) => children.push(e.body.as_ref()),
            ExpKind::Quant(e) => {
                children.extend(e.where_clause.as_deref());
                children.push(e.body.as_ref());
            }
            ExpKind::Set(e) => {
                children.extend(e.where_clause.as_deref());
                children.push(e.body.as_ref());
            }
            ExpKind::Iterative(e) => {
                children.extend(e.where_clause.as_deref());
                children.push(e.body.as_ref());
            }
            ExpKind::If(e) => {
                children.extend([e.test.as_ref(), e.then_exp.as_ref()]);
                children.extend(e.else_exp.as_deref());
            }
            ExpKind::Alternative(e) => children.extend(e.alternatives().iter()),
            ExpKind::AltItem(e) => {
                children.extend(e.test.as_deref());
                children.push(e.assignment.as_ref());
            }
            ExpKind::Tuple(e) => children.extend([e.first(), e.second()]),
            ExpKind::SetCollection(e) => children.extend(e.members().iter()),
            ExpKind::TypeAssertion(e) => children.push(e.exp.as_ref()),
            ExpKind::VariableDot(e) => children.extend(e.segments().iter()),
            ExpKind::ProgramParam(e) => children.extend(e.arguments.iter()),
            ExpKind::ProgramOp(e) => children.extend(e.operands.iter()),
            ExpKind::MathRef(e) => children.extend(e.parameters().iter()),
            ExpKind::Justified(e) => children.push(e.exp.as_ref()),
        }
        children
    }

    /// Mutable counterpart of [`sub_expressions`](Self::sub_expressions), in the same order.
    ///
    /// Writing through these references bypasses the checks of
    /// [`set_sub_expression`](Self::set_sub_expression); callers must restore kind invariants
    /// themselves (see [`Exp::mirror_old_types`]).
    pub(crate) fn sub_expressions_mut(&mut self) -> SubExpressionsMut<'_> {
        let mut children = SubExpressionsMut::new();
        match self.kind_mut() {
            ExpKind::Integer(_)
            | ExpKind::Double(_)
            | ExpKind::Char(_)
            | ExpKind::Str(_)
            | ExpKind::Var(_)
            | ExpKind::VariableName(_)
            | ExpKind::HypDesig(_)
            | ExpKind::Justification(_) => {}
            ExpKind::VcVar(v) => children.push(v.exp.as_mut()),
            ExpKind::Old(o) => children.push(o.exp.as_mut()),
            ExpKind::Infix(e) => children.extend([e.left.as_mut(), e.right.as_mut()]),
            ExpKind::Equals(e) => children.extend([e.left.as_mut(), e.right.as_mut()]),
            ExpKind::IsIn(e) => children.extend([e.left.as_mut(), e.right.as_mut()]),
            ExpKind::Prefix(e) => children.push(e.argument.as_mut()),
            ExpKind::Outfix(e) => children.push(e.argument.as_mut()),
            ExpKind::Between(e) => children.extend(e.operands.iter_mut()),
            ExpKind::Function(e) => children.extend(e.arguments.iter_mut()),
            ExpKind::Dot(e) => children.extend(e.segments_mut().iter_mut()),
            ExpKind::Lambda(e) => children.push(e.body.as_mut()),
            ExpKind::Quant(e) => {
                children.extend(e.where_clause.as_deref_mut());
                children.push(e.body.as_mut());
            }
            ExpKind::Set(e) => {
                children.extend(e.where_clause.as_deref_mut());
                children.push(e.body.as_mut());
            }
            ExpKind::Iterative(e) => {
                children.extend(e.where_clause.as_deref_mut());
                children.push(e.body.as_mut());
            }
            ExpKind::If(e) => {
                children.extend([e.test.as_mut(), e.then_exp.as_mut()]);
                children.extend(e.else_exp.as_deref_mut());
            }
            ExpKind::Alternative(e) => children.extend(e.alternatives_mut().iter_mut()),
            ExpKind::AltItem(e) => {
                children.extend(e.test.as_deref_mut());
                children.push(e.assignment.as_mut());
            }
            ExpKind::Tuple(e) => {
                let (first, second) = e.halves_mut();
                children.extend([first, second]);
            }
            ExpKind::SetCollection(e) => children.extend(e.members_mut().iter_mut()),
            ExpKind::TypeAssertion(e) => children.push(e.exp.as_mut()),
            ExpKind::VariableDot(e) => children.extend(e.segments_mut().iter_mut()),
            ExpKind::ProgramParam(e) => children.extend(e.arguments.iter_mut()),
            ExpKind::ProgramOp(e) => children.extend(e.operands.iter_mut()),
            ExpKind::MathRef(e) => children.extend(e.parameters_mut().iter_mut()),
            ExpKind::Justified(e) => children.push(e.exp.as_mut()),
        }
        children
    }

    /// Replace child `index` (numbered as in [`sub_expressions`](Self::sub_expressions)).
    ///
    /// Slots restricted to one kind (alternatives, set members, citation parameters) reject
    /// other kinds, and an [`AlternativeExp`] refuses an edit that would remove its last
    /// otherwise-branch. The node is left untouched on error.
    pub fn set_sub_expression(&mut self, index: usize, exp: Exp) -> ExpResult<()> {
        let kind = self.exp_type();
        let len = self.sub_expressions().len();

        match self.kind_mut() {
            ExpKind::Integer(_)
            | ExpKind::Double(_)
            | ExpKind::Char(_)
            | ExpKind::Str(_)
            | ExpKind::Var(_)
            | ExpKind::VariableName(_)
            | ExpKind::HypDesig(_)
            | ExpKind::Justification(_) => Err(out_of_range(kind, index, 0)),
            ExpKind::VcVar(v) if index == 0 => set_boxed(&mut v.exp, exp),
            ExpKind::Old(o) if index == 0 => {
                set_boxed(&mut o.exp, exp)?;
                self.mirror_old_types();
                Ok(())
            }
            ExpKind::Infix(InfixExp { left, right, .. })
            | ExpKind::Equals(EqualsExp { left, right, .. })
            | ExpKind::IsIn(IsInExp { left, right, .. }) => match index {
                0 => set_boxed(left, exp),
                1 => set_boxed(right, exp),
                _ => Err(out_of_range(kind, index, 2)),
            },
            ExpKind::Prefix(PrefixExp { argument, .. })
            | ExpKind::Outfix(OutfixExp { argument, .. })
                if index == 0 =>
            {
                set_boxed(argument, exp)
            }
            ExpKind::Between(e) => set_in_list(kind, &mut e.operands, index, exp),
            ExpKind::Function(e) => set_in_list(kind, &mut e.arguments, index, exp),
            ExpKind::Dot(e) => set_in_list(kind, e.segments_mut(), index, exp),
            ExpKind::Lambda(e) if index == 0 => set_boxed(&mut e.body, exp),
            ExpKind::Quant(QuantExp {
                where_clause, body, ..
            })
            | ExpKind::Set(SetExp {
                where_clause, body, ..
            })
            | ExpKind::Iterative(IterativeExp {
                where_clause, body, ..
            }) => set_where_body(kind, where_clause, body, index, exp),
            ExpKind::If(e) => match (index, e.else_exp.as_mut()) {
                (0, _) => set_boxed(&mut e.test, exp),
                (1, _) => set_boxed(&mut e.then_exp, exp),
                (2, Some(else_exp)) => set_boxed(else_exp, exp),
                _ => Err(out_of_range(kind, index, len)),
            },
            ExpKind::Alternative(e) => {
                super::expect_kind(kind, index, ExpType::AltItem, &exp)?;
                if index >= len {
                    return Err(out_of_range(kind, index, len));
                }
                let keeps_otherwise = e.items().enumerate().any(|(i, item)| {
                    if i == index {
                        exp.as_alt_item().is_some_and(AltItemExp::is_otherwise)
                    } else {
                        item.is_otherwise()
                    }
                });
                if !keeps_otherwise {
                    return Err(ExpError::MissingOtherwise);
                }
                set_in_list(kind, e.alternatives_mut(), index, exp)
            }
            ExpKind::AltItem(e) => match (index, e.test.as_mut()) {
                (0, Some(test)) => set_boxed(test, exp),
                (0, None) | (1, _) => set_boxed(&mut e.assignment, exp),
                _ => Err(out_of_range(kind, index, len)),
            },
            ExpKind::Tuple(e) => match index {
                0 => {
                    e.set_half(false, exp);
                    Ok(())
                }
                1 => {
                    e.set_half(true, exp);
                    Ok(())
                }
                _ => Err(out_of_range(kind, index, 2)),
            },
            ExpKind::SetCollection(e) => {
                super::expect_kind(kind, index, ExpType::Var, &exp)?;
                set_in_list(kind, e.members_mut(), index, exp)
            }
            ExpKind::TypeAssertion(e) if index == 0 => set_boxed(&mut e.exp, exp),
            ExpKind::VariableDot(e) => set_in_list(kind, e.segments_mut(), index, exp),
            ExpKind::ProgramParam(e) => set_in_list(kind, &mut e.arguments, index, exp),
            ExpKind::ProgramOp(e) => set_in_list(kind, &mut e.operands, index, exp),
            ExpKind::MathRef(e) => {
                super::expect_kind(kind, index, ExpType::Var, &exp)?;
                set_in_list(kind, e.parameters_mut(), index, exp)
            }
            ExpKind::Justified(e) if index == 0 => set_boxed(&mut e.exp, exp),
            _ => Err(out_of_range(kind, index, len)),
        }
    }

    /// Build a node of the same kind whose children are `f` applied to the children of `self`,
    /// in child order. Everything that is not a child is copied; the semantic form of a
    /// [`DotExp`] is also passed through `f` so it keeps describing the segments.
    ///
    /// The result keeps the location, type and type-value of `self`.
    pub fn map_children<F: FnMut(&Exp) -> Exp>(&self, mut f: F) -> Exp {
        let f = &mut f;
        let kind = match self.kind() {
            ExpKind::Integer(e) => ExpKind::Integer(e.clone()),
            ExpKind::Double(e) => ExpKind::Double(e.clone()),
            ExpKind::Char(e) => ExpKind::Char(e.clone()),
            ExpKind::Str(e) => ExpKind::Str(e.clone()),
            ExpKind::Var(e) => ExpKind::Var(e.clone()),
            ExpKind::VariableName(e) => ExpKind::VariableName(e.clone()),
            ExpKind::HypDesig(e) => ExpKind::HypDesig(e.clone()),
            ExpKind::Justification(e) => ExpKind::Justification(e.clone()),
            ExpKind::VcVar(e) => ExpKind::VcVar(VcVarExp {
                exp: map_boxed(&e.exp, f),
                state: e.state,
            }),
            ExpKind::Old(e) => ExpKind::Old(OldExp::new(f(e.exp()))),
            ExpKind::Infix(e) => ExpKind::Infix(InfixExp {
                left: map_boxed(&e.left, f),
                operator: e.operator.clone(),
                right: map_boxed(&e.right, f),
            }),
            ExpKind::Prefix(e) => ExpKind::Prefix(PrefixExp {
                symbol: e.symbol.clone(),
                argument: map_boxed(&e.argument, f),
            }),
            ExpKind::Outfix(e) => ExpKind::Outfix(OutfixExp {
                operator: e.operator,
                argument: map_boxed(&e.argument, f),
            }),
            ExpKind::Equals(e) => ExpKind::Equals(EqualsExp {
                left: map_boxed(&e.left, f),
                operator: e.operator,
                right: map_boxed(&e.right, f),
            }),
            ExpKind::IsIn(e) => ExpKind::IsIn(IsInExp {
                left: map_boxed(&e.left, f),
                operator: e.operator,
                right: map_boxed(&e.right, f),
            }),
            ExpKind::Between(e) => ExpKind::Between(BetweenExp {
                operands: e.operands.iter().map(&mut *f).collect(),
            }),
            ExpKind::Function(e) => ExpKind::Function(FunctionExp {
                qualifier: e.qualifier.clone(),
                name: e.name.clone(),
                quantification: e.quantification,
                arguments: e.arguments.iter().map(&mut *f).collect(),
            }),
            ExpKind::Dot(e) => {
                let segments = e.segments().iter().map(&mut *f).collect();
                ExpKind::Dot(DotExp::from_parts(segments, map_opt(&e.semantic, f)))
            }
            ExpKind::Lambda(e) => ExpKind::Lambda(LambdaExp {
                parameters: e.parameters.clone(),
                body: map_boxed(&e.body, f),
            }),
            ExpKind::Quant(e) => ExpKind::Quant(QuantExp {
                quantification: e.quantification,
                variables: e.variables.clone(),
                where_clause: map_opt(&e.where_clause, f),
                body: map_boxed(&e.body, f),
            }),
            ExpKind::Set(e) => ExpKind::Set(SetExp {
                variable: e.variable.clone(),
                where_clause: map_opt(&e.where_clause, f),
                body: map_boxed(&e.body, f),
            }),
            ExpKind::Iterative(e) => ExpKind::Iterative(IterativeExp {
                operator: e.operator,
                variable: e.variable.clone(),
                where_clause: map_opt(&e.where_clause, f),
                body: map_boxed(&e.body, f),
            }),
            ExpKind::If(e) => ExpKind::If(IfExp {
                test: map_boxed(&e.test, f),
                then_exp: map_boxed(&e.then_exp, f),
                else_exp: map_opt(&e.else_exp, f),
            }),
            ExpKind::Alternative(e) => {
                let alternatives = e
                    .alternatives()
                    .iter()
                    .map(|item| map_restricted(ExpType::Alternative, ExpType::AltItem, item, f))
                    .collect();
                ExpKind::Alternative(AlternativeExp::from_parts(alternatives))
            }
            ExpKind::AltItem(e) => ExpKind::AltItem(AltItemExp {
                test: map_opt(&e.test, f),
                assignment: map_boxed(&e.assignment, f),
            }),
            ExpKind::Tuple(e) => {
                let first = f(e.first());
                let second = f(e.second());
                ExpKind::Tuple(TupleExp::pair(first, second))
            }
            ExpKind::SetCollection(e) => {
                let members = e
                    .members()
                    .iter()
                    .map(|m| map_restricted(ExpType::SetCollection, ExpType::Var, m, f))
                    .collect();
                ExpKind::SetCollection(SetCollectionExp::from_parts(members))
            }
            ExpKind::TypeAssertion(e) => ExpKind::TypeAssertion(TypeAssertionExp {
                exp: map_boxed(&e.exp, f),
                asserted: e.asserted.clone(),
            }),
            ExpKind::VariableDot(e) => {
                let segments = e.segments().iter().map(&mut *f).collect();
                ExpKind::VariableDot(VariableDotExp::from_parts(segments))
            }
            ExpKind::ProgramParam(e) => ExpKind::ProgramParam(ProgramParamExp {
                qualifier: e.qualifier.clone(),
                name: e.name.clone(),
                arguments: e.arguments.iter().map(&mut *f).collect(),
            }),
            ExpKind::ProgramOp(e) => ExpKind::ProgramOp(ProgramOpExp {
                operator: e.operator.clone(),
                operands: e.operands.iter().map(&mut *f).collect(),
            }),
            ExpKind::MathRef(e) => {
                let parameters = e
                    .parameters()
                    .iter()
                    .map(|p| map_restricted(ExpType::MathRef, ExpType::Var, p, f))
                    .collect();
                ExpKind::MathRef(e.reinstantiated(parameters))
            }
            ExpKind::Justified(e) => ExpKind::Justified(JustifiedExp {
                exp: map_boxed(&e.exp, f),
                justification: e.justification.clone(),
            }),
        };
        let mut mapped = Exp::new(kind);
        mapped.set_location(self.location().cloned());
        mapped.inherit_types(self);
        mapped
    }

    /// Variables introduced by this node when it is a binder.
    pub fn bound_variables(&self) -> &[MathVarDecl] {
        match self.kind() {
            ExpKind::Lambda(e) => &e.parameters,
            ExpKind::Quant(e) => &e.variables,
            ExpKind::Set(e) => std::slice::from_ref(&e.variable),
            ExpKind::Iterative(e) => std::slice::from_ref(&e.variable),
            _ => &[],
        }
    }

    /// Names of [`bound_variables`](Self::bound_variables).
    pub fn bound_names(&self) -> impl Iterator<Item = &PosSymbol> + '_ {
        self.bound_variables().iter().map(|decl| &decl.name)
    }

    fn bound_variables_mut(&mut self) -> &mut [MathVarDecl] {
        match self.kind_mut() {
            ExpKind::Lambda(e) => &mut e.parameters,
            ExpKind::Quant(e) => &mut e.variables,
            ExpKind::Set(e) => std::slice::from_mut(&mut e.variable),
            ExpKind::Iterative(e) => std::slice::from_mut(&mut e.variable),
            _ => &mut [],
        }
    }

    /// Rename the bound variable spelled `from` to `to`. Returns whether one was found.
    pub(crate) fn rename_bound(&mut self, from: &str, to: &PosSymbol) -> bool {
        let mut renamed = false;
        for decl in self.bound_variables_mut() {
            if decl.name.name() == from {
                decl.name = renamed_symbol(&decl.name, to);
                renamed = true;
            }
        }
        renamed
    }

    /// Operator or function name applied by this node.
    pub fn operator_name(&self) -> Option<&PosSymbol> {
        match self.kind() {
            ExpKind::Infix(e) => Some(&e.operator),
            ExpKind::Prefix(e) => Some(&e.symbol),
            ExpKind::Function(e) => Some(&e.name),
            _ => None,
        }
    }

    /// Rename the operator of an [`InfixExp`] or [`PrefixExp`], or the function of a
    /// [`FunctionExp`]. Other kinds are left untouched.
    pub(crate) fn rename_operator(&mut self, to: &PosSymbol) {
        match self.kind_mut() {
            ExpKind::Infix(e) => e.operator = renamed_symbol(&e.operator, to),
            ExpKind::Prefix(e) => e.symbol = renamed_symbol(&e.symbol, to),
            ExpKind::Function(e) => e.name = renamed_symbol(&e.name, to),
            _ => {}
        }
    }
}

/// `to`, read at the position of `from`.
fn renamed_symbol(from: &PosSymbol, to: &PosSymbol) -> PosSymbol {
    PosSymbol {
        location: from.location.clone(),
        symbol: to.symbol.clone(),
    }
}
