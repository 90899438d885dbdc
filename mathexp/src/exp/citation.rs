//! Proof-citation nodes.
//!
//! These name the axioms, theorems, hypotheses and deduction rules used to justify a step of a
//! proof. The proof checker reads them as plain data through the accessors below; the rewrite
//! engines only substitute into the variables a citation is instantiated with.
use crate::{
    error::ExpResult,
    exp::{Exp, ExpType, expect_kind},
    symbol::PosSymbol,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathRefKind {
    Axiom,
    Theorem,
    Property,
    Lemma,
    Corollary,
    Supposition,
    LineRef,
    Definition,
    Deduction,
    SelfRef,
}

impl MathRefKind {
    pub fn keyword(self) -> &'static str {
        match self {
            MathRefKind::Axiom => "Axiom",
            MathRefKind::Theorem => "Theorem",
            MathRefKind::Property => "Property",
            MathRefKind::Lemma => "Lemma",
            MathRefKind::Corollary => "Corollary",
            MathRefKind::Supposition => "Supposition",
            MathRefKind::LineRef => "Line",
            MathRefKind::Definition => "Definition",
            MathRefKind::Deduction => "Deduction",
            MathRefKind::SelfRef => "Self",
        }
    }
}

/// Reference to a named fact, e.g. `(i) of Definition Foo from Bar_Theory [x, y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MathRefExp {
    pub kind: MathRefKind,
    pub id: Option<PosSymbol>,
    /// Clause of an inductive definition.
    pub index: Option<PosSymbol>,
    pub source_module: Option<PosSymbol>,
    parameters: Vec<Exp>,
}

impl MathRefExp {
    pub fn new(kind: MathRefKind, id: Option<PosSymbol>) -> Self {
        MathRefExp {
            kind,
            id,
            index: None,
            source_module: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: impl Into<PosSymbol>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn from_module(mut self, source_module: impl Into<PosSymbol>) -> Self {
        self.source_module = Some(source_module.into());
        self
    }

    /// Instantiate the cited fact with `parameters`, which must all be variables.
    pub fn with_parameters(mut self, parameters: Vec<Exp>) -> ExpResult<Self> {
        for (index, parameter) in parameters.iter().enumerate() {
            expect_kind(ExpType::MathRef, index, ExpType::Var, parameter)?;
        }
        self.parameters = parameters;
        Ok(self)
    }

    #[inline]
    pub fn parameters(&self) -> &[Exp] {
        &self.parameters
    }

    #[inline]
    pub(crate) fn parameters_mut(&mut self) -> &mut Vec<Exp> {
        &mut self.parameters
    }

    /// Same citation instantiated with other (variable) parameters.
    pub(crate) fn reinstantiated(&self, parameters: Vec<Exp>) -> Self {
        MathRefExp {
            kind: self.kind,
            id: self.id.clone(),
            index: self.index.clone(),
            source_module: self.source_module.clone(),
            parameters,
        }
    }
}

/// Hypothesis designator: a cited fact used as a premise.
#[derive(Debug, Clone, PartialEq)]
pub struct HypDesigExp {
    pub reference: MathRefExp,
}

/// `by <hyp>, <hyp>, <rule>` or `by definition`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JustificationExp {
    pub hyp_desig1: Option<HypDesigExp>,
    pub hyp_desig2: Option<HypDesigExp>,
    pub rule: Option<PosSymbol>,
    pub index: Option<PosSymbol>,
    pub source_module: Option<PosSymbol>,
    pub is_def: bool,
}

impl JustificationExp {
    pub fn by_rule(rule: impl Into<PosSymbol>) -> Self {
        JustificationExp {
            rule: Some(rule.into()),
            ..Default::default()
        }
    }

    pub fn by_definition() -> Self {
        JustificationExp {
            is_def: true,
            ..Default::default()
        }
    }

    /// Designators in citation order.
    pub fn hypotheses(&self) -> impl Iterator<Item = &HypDesigExp> + '_ {
        self.hyp_desig1.iter().chain(self.hyp_desig2.iter())
    }
}

/// A proof step `exp by justification`.
#[derive(Debug, Clone, PartialEq)]
pub struct JustifiedExp {
    pub exp: Box<Exp>,
    pub justification: JustificationExp,
}
