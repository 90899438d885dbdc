//! Payloads of the mathematical expression kinds.
//!
//! Payloads whose fields carry no invariant expose them publicly. The others (`OldExp`,
//! `DotExp`, `AlternativeExp`, `TupleExp`, `SetCollectionExp`) keep their children private and
//! are only built through validating constructors.
use std::fmt;

use crate::{
    error::{ExpError, ExpResult},
    exp::{Exp, ExpType, expect_kind},
    symbol::PosSymbol,
};

/// Quantifier attached to a variable or a binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantification {
    #[default]
    None,
    ForAll,
    Exists,
    Unique,
}

impl Quantification {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Quantification::None => None,
            Quantification::ForAll => Some("For_all"),
            Quantification::Exists => Some("There_exists"),
            Quantification::Unique => Some("There_exists_unique"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerExp {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoubleExp {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharExp {
    pub value: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringExp {
    pub value: String,
}

/// Reference to a mathematical variable, optionally qualified by its defining module.
#[derive(Debug, Clone, PartialEq)]
pub struct VarExp {
    pub qualifier: Option<PosSymbol>,
    pub name: PosSymbol,
    pub quantification: Quantification,
}

impl VarExp {
    pub fn new(name: impl Into<PosSymbol>) -> Self {
        VarExp {
            qualifier: None,
            name: name.into(),
            quantification: Quantification::None,
        }
    }

    pub fn qualified(qualifier: impl Into<PosSymbol>, name: impl Into<PosSymbol>) -> Self {
        VarExp {
            qualifier: Some(qualifier.into()),
            name: name.into(),
            quantification: Quantification::None,
        }
    }

    pub fn quantified(mut self, quantification: Quantification) -> Self {
        self.quantification = quantification;
        self
    }
}

/// A variable pinned to a numbered program state by the VC generator (`x'`, `x''`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct VcVarExp {
    pub exp: Box<Exp>,
    pub state: u32,
}

/// `#e`: the value `e` had on entry to the operation.
///
/// The wrapper always carries the type and type-value of `exp`; replacing `exp` through
/// [`Exp::set_sub_expression`] copies them again.
#[derive(Debug, Clone, PartialEq)]
pub struct OldExp {
    pub(crate) exp: Box<Exp>,
}

impl OldExp {
    pub fn new(exp: Exp) -> Self {
        OldExp { exp: Box::new(exp) }
    }

    #[inline]
    pub fn exp(&self) -> &Exp {
        &self.exp
    }

    pub fn into_inner(self) -> Exp {
        *self.exp
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfixExp {
    pub left: Box<Exp>,
    pub operator: PosSymbol,
    pub right: Box<Exp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExp {
    pub symbol: PosSymbol,
    pub argument: Box<Exp>,
}

/// Bracketing operators of [`OutfixExp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutfixOperator {
    Angle,
    DblAngle,
    Square,
    DblSquare,
    Bar,
    DblBar,
}

impl OutfixOperator {
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            OutfixOperator::Angle => ("<", ">"),
            OutfixOperator::DblAngle => ("<<", ">>"),
            OutfixOperator::Square => ("[", "]"),
            OutfixOperator::DblSquare => ("[[", "]]"),
            OutfixOperator::Bar => ("|", "|"),
            OutfixOperator::DblBar => ("||", "||"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutfixExp {
    pub operator: OutfixOperator,
    pub argument: Box<Exp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EqualsOperator {
    Equal,
    NotEqual,
}

impl EqualsOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            EqualsOperator::Equal => "=",
            EqualsOperator::NotEqual => "/=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EqualsExp {
    pub left: Box<Exp>,
    pub operator: EqualsOperator,
    pub right: Box<Exp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsInOperator {
    IsIn,
    IsNotIn,
}

impl IsInOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            IsInOperator::IsIn => "is_in",
            IsInOperator::IsNotIn => "is_not_in",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsInExp {
    pub left: Box<Exp>,
    pub operator: IsInOperator,
    pub right: Box<Exp>,
}

/// A chain of inequalities such as `0 <= i < n`, stored as its individual comparisons.
/// Their order carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExp {
    pub operands: Vec<Exp>,
}

/// Application of a named mathematical function, `Q.f(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExp {
    pub qualifier: Option<PosSymbol>,
    pub name: PosSymbol,
    pub quantification: Quantification,
    pub arguments: Vec<Exp>,
}

impl FunctionExp {
    pub fn new(name: impl Into<PosSymbol>, arguments: Vec<Exp>) -> Self {
        FunctionExp {
            qualifier: None,
            name: name.into(),
            quantification: Quantification::None,
            arguments,
        }
    }
}

/// Qualified or field-selection chain `a.b.c(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DotExp {
    segments: Vec<Exp>,
    /// Fully resolved form computed by the type checker, if any.
    pub semantic: Option<Box<Exp>>,
}

impl DotExp {
    pub fn new(segments: Vec<Exp>) -> ExpResult<Self> {
        if segments.is_empty() {
            return Err(ExpError::EmptyChain { kind: ExpType::Dot });
        }
        Ok(DotExp {
            segments,
            semantic: None,
        })
    }

    pub fn with_semantic(mut self, semantic: Exp) -> Self {
        self.semantic = Some(Box::new(semantic));
        self
    }

    #[inline]
    pub fn segments(&self) -> &[Exp] {
        &self.segments
    }

    /// First segment. Always present.
    #[inline]
    pub fn head(&self) -> &Exp {
        &self.segments[0]
    }

    pub fn into_segments(self) -> Vec<Exp> {
        self.segments
    }

    #[inline]
    pub(crate) fn segments_mut(&mut self) -> &mut Vec<Exp> {
        &mut self.segments
    }

    /// Build from segments already known to be non-empty.
    pub(crate) fn from_parts(segments: Vec<Exp>, semantic: Option<Box<Exp>>) -> Self {
        debug_assert!(!segments.is_empty());
        DotExp { segments, semantic }
    }
}

/// Binder parameter `x: T`. The type expression is compared by equivalence but never
/// substituted into.
#[derive(Debug, Clone, PartialEq)]
pub struct MathVarDecl {
    pub name: PosSymbol,
    pub ty: Box<Exp>,
}

impl MathVarDecl {
    pub fn new(name: impl Into<PosSymbol>, ty: Exp) -> Self {
        MathVarDecl {
            name: name.into(),
            ty: Box::new(ty),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExp {
    pub parameters: Vec<MathVarDecl>,
    pub body: Box<Exp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantExp {
    pub quantification: Quantification,
    pub variables: Vec<MathVarDecl>,
    pub where_clause: Option<Box<Exp>>,
    pub body: Box<Exp>,
}

/// Set comprehension `{x: T | where, body}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExp {
    pub variable: MathVarDecl,
    pub where_clause: Option<Box<Exp>>,
    pub body: Box<Exp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterativeOperator {
    Sum,
    Product,
    Union,
    Intersection,
}

impl IterativeOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            IterativeOperator::Sum => "Sum",
            IterativeOperator::Product => "Product",
            IterativeOperator::Union => "Union",
            IterativeOperator::Intersection => "Intersection",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterativeExp {
    pub operator: IterativeOperator,
    pub variable: MathVarDecl,
    pub where_clause: Option<Box<Exp>>,
    pub body: Box<Exp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExp {
    pub test: Box<Exp>,
    pub then_exp: Box<Exp>,
    pub else_exp: Option<Box<Exp>>,
}

/// One guarded branch of an [`AlternativeExp`]. A branch without a test is the
/// otherwise-branch.
#[derive(Debug, Clone, PartialEq)]
pub struct AltItemExp {
    pub test: Option<Box<Exp>>,
    pub assignment: Box<Exp>,
}

impl AltItemExp {
    pub fn new(test: Option<Exp>, assignment: Exp) -> Self {
        AltItemExp {
            test: test.map(Box::new),
            assignment: Box::new(assignment),
        }
    }

    pub fn otherwise(assignment: Exp) -> Self {
        Self::new(None, assignment)
    }

    #[inline]
    pub fn is_otherwise(&self) -> bool {
        self.test.is_none()
    }
}

/// Guarded multi-branch expression
///
/// ```text
/// {{ 1 if p;
///    2 if q;
///    3 otherwise; }}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeExp {
    alternatives: Vec<Exp>,
}

impl AlternativeExp {
    /// Every entry must be an [`AltItemExp`] and at least one of them must be an
    /// otherwise-branch.
    pub fn new(alternatives: Vec<Exp>) -> ExpResult<Self> {
        for (index, alternative) in alternatives.iter().enumerate() {
            expect_kind(ExpType::Alternative, index, ExpType::AltItem, alternative)?;
        }
        let has_otherwise = alternatives
            .iter()
            .filter_map(Exp::as_alt_item)
            .any(AltItemExp::is_otherwise);
        if !has_otherwise {
            return Err(ExpError::MissingOtherwise);
        }
        Ok(AlternativeExp { alternatives })
    }

    /// Convenience over [`AlternativeExp::new`] taking the branch payloads directly.
    pub fn from_items(items: Vec<AltItemExp>) -> ExpResult<Self> {
        Self::new(items.into_iter().map(Exp::from).collect())
    }

    #[inline]
    pub fn alternatives(&self) -> &[Exp] {
        &self.alternatives
    }

    pub fn items(&self) -> impl Iterator<Item = &AltItemExp> + '_ {
        self.alternatives.iter().filter_map(Exp::as_alt_item)
    }

    #[inline]
    pub(crate) fn alternatives_mut(&mut self) -> &mut Vec<Exp> {
        &mut self.alternatives
    }

    /// Build from items already known to satisfy the invariants of [`AlternativeExp::new`].
    pub(crate) fn from_parts(alternatives: Vec<Exp>) -> Self {
        AlternativeExp { alternatives }
    }
}

/// n-ary tuple stored as nested pairs: `(a, b, c)` is `((a, b), c)`.
///
/// A tuple appearing as the first field of a pair is read as the leading fields of the outer
/// tuple, so `((p, q), r)` and `(p, q, r)` have the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleExp {
    first: Box<Exp>,
    second: Box<Exp>,
    size: usize,
}

impl TupleExp {
    pub fn new(fields: Vec<Exp>) -> ExpResult<Self> {
        let found = fields.len();
        let mut fields = fields.into_iter();
        let (Some(first), Some(second)) = (fields.next(), fields.next()) else {
            return Err(ExpError::TupleArity { found });
        };

        let mut tuple = TupleExp::pair(first, second);
        for field in fields {
            tuple = TupleExp::pair(Exp::from(tuple), field);
        }
        Ok(tuple)
    }

    pub fn pair(first: Exp, second: Exp) -> Self {
        let size = match first.as_tuple() {
            Some(leading) => leading.size + 1,
            None => 2,
        };
        TupleExp {
            first: Box::new(first),
            second: Box::new(second),
            size,
        }
    }

    /// Flat arity of the tuple.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn first(&self) -> &Exp {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &Exp {
        &self.second
    }

    /// Field `index` of the flat tuple.
    pub fn field(&self, index: usize) -> ExpResult<&Exp> {
        if index >= self.size {
            return Err(ExpError::TupleFieldOutOfBounds {
                index,
                size: self.size,
            });
        }

        let mut current = self;
        loop {
            if index == current.size - 1 {
                return Ok(&current.second);
            }
            match current.first.as_tuple() {
                Some(leading) => current = leading,
                None => return Ok(&current.first),
            }
        }
    }

    /// All fields of the flat tuple, in order.
    pub fn fields(&self) -> Vec<&Exp> {
        let mut fields = Vec::with_capacity(self.size);
        let mut current = self;
        loop {
            fields.push(current.second.as_ref());
            match current.first.as_tuple() {
                Some(leading) => current = leading,
                None => {
                    fields.push(current.first.as_ref());
                    break;
                }
            }
        }
        fields.reverse();
        fields
    }

    /// Replace one half of the pair, recomputing the arity.
    pub(crate) fn set_half(&mut self, second: bool, exp: Exp) {
        if second {
            *self.second = exp;
        } else {
            *self.first = exp;
            self.refresh_size();
        }
    }

    /// Recompute the arity after the leading half changed shape.
    pub(crate) fn refresh_size(&mut self) {
        self.size = match self.first.as_tuple() {
            Some(leading) => leading.size + 1,
            None => 2,
        };
    }

    #[inline]
    pub(crate) fn halves_mut(&mut self) -> (&mut Exp, &mut Exp) {
        (&mut *self.first, &mut *self.second)
    }
}

/// Set literal `{x, y, z}` over variables.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCollectionExp {
    members: Vec<Exp>,
}

impl SetCollectionExp {
    pub fn new(members: Vec<Exp>) -> ExpResult<Self> {
        for (index, member) in members.iter().enumerate() {
            expect_kind(ExpType::SetCollection, index, ExpType::Var, member)?;
        }
        Ok(SetCollectionExp { members })
    }

    #[inline]
    pub fn members(&self) -> &[Exp] {
        &self.members
    }

    #[inline]
    pub(crate) fn members_mut(&mut self) -> &mut Vec<Exp> {
        &mut self.members
    }

    pub(crate) fn from_parts(members: Vec<Exp>) -> Self {
        SetCollectionExp { members }
    }
}

/// `e : T`. The asserted type expression is not a sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssertionExp {
    pub exp: Box<Exp>,
    pub asserted: Box<Exp>,
}

impl fmt::Display for Quantification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or(""))
    }
}
