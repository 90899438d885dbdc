//! The expression tree.
//!
//! Role
//! - [`Exp`] is one node of a parsed mathematical or program expression: an optional source
//!   location, an optional math type and type-value (filled in by type inference) and a
//!   kind-specific payload ([`ExpKind`]).
//! - Every node owns its children (`Box`/`Vec`), so any tree handed out by the rewrite engines
//!   is independent from the tree it was derived from and cycles cannot be represented.
//!
//! Construction
//! - Payload types that carry an invariant (`AlternativeExp`, `DotExp`, `TupleExp`, ...) only
//!   expose validating constructors returning [`ExpResult`].
//! - Free-function builders in [`func`] cover the common shapes and are what most callers use.
//!
//! Example
//! ```
//! use mathexp::prelude::*;
//!
//! // S.Top + 1
//! let e = infix(dot([var("S"), var("Top")]).unwrap(), "+", int(1));
//! assert_eq!(e.exp_type(), ExpType::Infix);
//! assert_eq!(e.sub_expressions().len(), 2);
//! ```

pub mod citation;
pub mod defs;
pub mod func;
pub mod pretty;
pub mod program;
mod query;
mod traversal;

pub use citation::*;
pub use defs::*;
pub use program::*;
pub use traversal::SubExpressions;

use std::fmt;

use strum::{EnumDiscriminants, EnumIs, EnumIter, EnumTryAs};

use crate::{
    error::{ExpError, ExpResult},
    symbol::Location,
    types::MathType,
};

/// Kind-specific payload of an expression node.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumTryAs, EnumDiscriminants)]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, EnumIter))]
#[strum_discriminants(name(ExpType))]
#[strum_discriminants(vis(pub))]
pub enum ExpKind {
    // Literals
    Integer(IntegerExp),
    Double(DoubleExp),
    Char(CharExp),
    Str(StringExp),

    // Names and historical values
    Var(VarExp),
    VcVar(VcVarExp),
    Old(OldExp),

    // Operator applications
    Infix(InfixExp),
    Prefix(PrefixExp),
    Outfix(OutfixExp),
    Equals(EqualsExp),
    IsIn(IsInExp),
    Between(BetweenExp),
    Function(FunctionExp),

    // Qualified chains
    Dot(DotExp),

    // Binders
    Lambda(LambdaExp),
    Quant(QuantExp),
    Set(SetExp),
    Iterative(IterativeExp),

    // Conditionals
    If(IfExp),
    Alternative(AlternativeExp),
    AltItem(AltItemExp),

    // Structures
    Tuple(TupleExp),
    SetCollection(SetCollectionExp),
    TypeAssertion(TypeAssertionExp),

    // Program expressions
    VariableName(VariableNameExp),
    VariableDot(VariableDotExp),
    ProgramParam(ProgramParamExp),
    ProgramOp(ProgramOpExp),

    // Proof citations
    MathRef(MathRefExp),
    HypDesig(HypDesigExp),
    Justification(JustificationExp),
    Justified(JustifiedExp),
}

impl ExpType {
    pub fn name(self) -> &'static str {
        match self {
            ExpType::Integer => "IntegerExp",
            ExpType::Double => "DoubleExp",
            ExpType::Char => "CharExp",
            ExpType::Str => "StringExp",
            ExpType::Var => "VarExp",
            ExpType::VcVar => "VCVarExp",
            ExpType::Old => "OldExp",
            ExpType::Infix => "InfixExp",
            ExpType::Prefix => "PrefixExp",
            ExpType::Outfix => "OutfixExp",
            ExpType::Equals => "EqualsExp",
            ExpType::IsIn => "IsInExp",
            ExpType::Between => "BetweenExp",
            ExpType::Function => "FunctionExp",
            ExpType::Dot => "DotExp",
            ExpType::Lambda => "LambdaExp",
            ExpType::Quant => "QuantExp",
            ExpType::Set => "SetExp",
            ExpType::Iterative => "IterativeExp",
            ExpType::If => "IfExp",
            ExpType::Alternative => "AlternativeExp",
            ExpType::AltItem => "AltItemExp",
            ExpType::Tuple => "TupleExp",
            ExpType::SetCollection => "SetCollectionExp",
            ExpType::TypeAssertion => "TypeAssertionExp",
            ExpType::VariableName => "VariableNameExp",
            ExpType::VariableDot => "VariableDotExp",
            ExpType::ProgramParam => "ProgramParamExp",
            ExpType::ProgramOp => "ProgramOpExp",
            ExpType::MathRef => "MathRefExp",
            ExpType::HypDesig => "HypDesigExp",
            ExpType::Justification => "JustificationExp",
            ExpType::Justified => "JustifiedExp",
        }
    }

    /// Kinds that are only consumed as citation data by the proof checker. They have no
    /// equivalence or replace rule.
    pub fn is_citation(self) -> bool {
        matches!(
            self,
            ExpType::MathRef | ExpType::HypDesig | ExpType::Justification
        )
    }
}

impl fmt::Display for ExpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the expression tree. See the [module documentation](self).
#[derive(Debug, Clone, PartialEq)]
pub struct Exp {
    location: Option<Location>,
    math_type: Option<MathType>,
    math_type_value: Option<MathType>,
    kind: ExpKind,
}

impl Exp {
    /// Wrap a payload into an unlocated, untyped node.
    ///
    /// An [`OldExp`] payload immediately takes the type and type-value of its inner expression.
    pub fn new(kind: ExpKind) -> Self {
        let mut exp = Exp {
            location: None,
            math_type: None,
            math_type_value: None,
            kind,
        };
        exp.mirror_old_types();
        exp
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_math_type(mut self, ty: MathType) -> ExpResult<Self> {
        self.set_math_type(ty)?;
        Ok(self)
    }

    pub fn with_math_type_value(mut self, ty: MathType) -> Self {
        self.set_math_type_value(ty);
        self
    }

    #[inline]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    #[inline]
    pub fn math_type(&self) -> Option<&MathType> {
        self.math_type.as_ref()
    }

    #[inline]
    pub fn math_type_value(&self) -> Option<&MathType> {
        self.math_type_value.as_ref()
    }

    #[inline]
    pub fn kind(&self) -> &ExpKind {
        &self.kind
    }

    /// Mutable access to the payload for the rewrite engines. Callers are responsible for
    /// keeping kind invariants, which is why this is not public.
    #[inline]
    pub(crate) fn kind_mut(&mut self) -> &mut ExpKind {
        &mut self.kind
    }

    pub fn into_kind(self) -> ExpKind {
        self.kind
    }

    #[inline]
    pub fn exp_type(&self) -> ExpType {
        ExpType::from(&self.kind)
    }

    pub fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    /// Type-annotation entry point for the type-inference pass.
    ///
    /// A lambda only accepts function types. Annotating an [`OldExp`] annotates the wrapped
    /// expression too, so both keep agreeing.
    pub fn set_math_type(&mut self, ty: MathType) -> ExpResult<()> {
        if self.kind.is_lambda() && !ty.is_function() {
            return Err(ExpError::NotAFunctionType {
                found: ty.to_string(),
            });
        }
        if let ExpKind::Old(old) = &mut self.kind {
            old.exp.set_math_type(ty.clone())?;
        }
        self.math_type = Some(ty);
        Ok(())
    }

    /// Same as [`set_math_type`](Self::set_math_type) for callers that may hold no type.
    /// Assigning nothing is an error rather than a reset.
    pub fn try_set_math_type(&mut self, ty: Option<MathType>) -> ExpResult<()> {
        match ty {
            Some(ty) => self.set_math_type(ty),
            None => Err(ExpError::NullMathType {
                kind: self.exp_type(),
            }),
        }
    }

    pub fn set_math_type_value(&mut self, ty: MathType) {
        if let ExpKind::Old(old) = &mut self.kind {
            old.exp.set_math_type_value(ty.clone());
        }
        self.math_type_value = Some(ty);
    }

    /// Deep copy. The result owns every node and carries the same locations, types and
    /// type-values as `self`.
    pub fn copy(&self) -> Exp {
        self.clone()
    }

    /// Reattach the type metadata of `original` onto `self`, keeping what `self` has where
    /// `original` has nothing. Used by substitution, whose results are type-preserving.
    pub(crate) fn inherit_types(&mut self, original: &Exp) {
        self.attach_types(
            original.math_type.clone(),
            original.math_type_value.clone(),
            true,
        );
    }

    /// Attach the type metadata of `original` onto `self` only where `self` has none. Used by
    /// replace, whose replacement nodes may already carry their own types.
    pub(crate) fn inherit_missing_types(&mut self, original: &Exp) {
        self.attach_types(
            original.math_type.clone(),
            original.math_type_value.clone(),
            false,
        );
    }

    fn attach_types(
        &mut self,
        ty: Option<MathType>,
        ty_value: Option<MathType>,
        overwrite: bool,
    ) {
        if let Some(ty) = ty {
            if overwrite || self.math_type.is_none() {
                if let ExpKind::Old(old) = &mut self.kind {
                    old.exp.attach_types(Some(ty.clone()), None, overwrite);
                }
                self.math_type = Some(ty);
            }
        }
        if let Some(ty_value) = ty_value {
            if overwrite || self.math_type_value.is_none() {
                if let ExpKind::Old(old) = &mut self.kind {
                    old.exp.attach_types(None, Some(ty_value.clone()), overwrite);
                }
                self.math_type_value = Some(ty_value);
            }
        }
    }

    /// Copy the type and type-value of an [`OldExp`]'s inner expression onto the wrapper.
    pub(crate) fn mirror_old_types(&mut self) {
        if let ExpKind::Old(old) = &self.kind {
            self.math_type = old.exp.math_type.clone();
            self.math_type_value = old.exp.math_type_value.clone();
        }
    }

    #[inline]
    pub fn as_var(&self) -> Option<&VarExp> {
        self.kind.try_as_var_ref()
    }

    #[inline]
    pub fn as_dot(&self) -> Option<&DotExp> {
        self.kind.try_as_dot_ref()
    }

    #[inline]
    pub fn as_function(&self) -> Option<&FunctionExp> {
        self.kind.try_as_function_ref()
    }

    #[inline]
    pub fn as_old(&self) -> Option<&OldExp> {
        self.kind.try_as_old_ref()
    }

    #[inline]
    pub fn as_tuple(&self) -> Option<&TupleExp> {
        self.kind.try_as_tuple_ref()
    }

    #[inline]
    pub fn as_alt_item(&self) -> Option<&AltItemExp> {
        self.kind.try_as_alt_item_ref()
    }

    #[inline]
    pub fn as_math_ref(&self) -> Option<&MathRefExp> {
        self.kind.try_as_math_ref_ref()
    }

    /// `true` for a variable reference spelled `name`, regardless of its qualifier.
    pub fn is_var_named(&self, name: &str) -> bool {
        self.as_var().is_some_and(|v| v.name.name() == name)
    }
}

macro_rules! impl_from_payload {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for ExpKind {
                #[inline]
                fn from(value: $payload) -> Self {
                    ExpKind::$variant(value)
                }
            }

            impl From<$payload> for Exp {
                #[inline]
                fn from(value: $payload) -> Self {
                    Exp::new(ExpKind::$variant(value))
                }
            }
        )*
    };
}

impl_from_payload!(
    IntegerExp => Integer,
    DoubleExp => Double,
    CharExp => Char,
    StringExp => Str,
    VarExp => Var,
    VcVarExp => VcVar,
    OldExp => Old,
    InfixExp => Infix,
    PrefixExp => Prefix,
    OutfixExp => Outfix,
    EqualsExp => Equals,
    IsInExp => IsIn,
    BetweenExp => Between,
    FunctionExp => Function,
    DotExp => Dot,
    LambdaExp => Lambda,
    QuantExp => Quant,
    SetExp => Set,
    IterativeExp => Iterative,
    IfExp => If,
    AlternativeExp => Alternative,
    AltItemExp => AltItem,
    TupleExp => Tuple,
    SetCollectionExp => SetCollection,
    TypeAssertionExp => TypeAssertion,
    VariableNameExp => VariableName,
    VariableDotExp => VariableDot,
    ProgramParamExp => ProgramParam,
    ProgramOpExp => ProgramOp,
    MathRefExp => MathRef,
    HypDesigExp => HypDesig,
    JustificationExp => Justification,
    JustifiedExp => Justified,
);

impl From<ExpKind> for Exp {
    fn from(kind: ExpKind) -> Self {
        Exp::new(kind)
    }
}

/// Check that `exp` has kind `expected`, reporting it as child `index` of a `parent` otherwise.
pub(crate) fn expect_kind(
    parent: ExpType,
    index: usize,
    expected: ExpType,
    exp: &Exp,
) -> ExpResult<()> {
    let found = exp.exp_type();
    if found == expected {
        Ok(())
    } else {
        Err(ExpError::InvalidChild {
            kind: parent,
            index,
            expected,
            found,
        })
    }
}
