//! Payloads of program-level expressions (variables, record fields, calls and operators as they
//! appear in operation bodies). They take part in substitution and replace like their
//! mathematical counterparts.
use crate::{
    error::{ExpError, ExpResult},
    exp::{Exp, ExpType},
    symbol::PosSymbol,
};

#[derive(Debug, Clone, PartialEq)]
pub struct VariableNameExp {
    pub qualifier: Option<PosSymbol>,
    pub name: PosSymbol,
}

impl VariableNameExp {
    pub fn new(name: impl Into<PosSymbol>) -> Self {
        VariableNameExp {
            qualifier: None,
            name: name.into(),
        }
    }
}

/// Program record access `s.field.subfield`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDotExp {
    segments: Vec<Exp>,
}

impl VariableDotExp {
    pub fn new(segments: Vec<Exp>) -> ExpResult<Self> {
        if segments.is_empty() {
            return Err(ExpError::EmptyChain {
                kind: ExpType::VariableDot,
            });
        }
        Ok(VariableDotExp { segments })
    }

    #[inline]
    pub fn segments(&self) -> &[Exp] {
        &self.segments
    }

    #[inline]
    pub(crate) fn segments_mut(&mut self) -> &mut Vec<Exp> {
        &mut self.segments
    }

    pub(crate) fn from_parts(segments: Vec<Exp>) -> Self {
        VariableDotExp { segments }
    }
}

/// Call of a program operation or function, `Q.Op(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramParamExp {
    pub qualifier: Option<PosSymbol>,
    pub name: PosSymbol,
    pub arguments: Vec<Exp>,
}

/// Built-in program operator applied to its operands (`a + b`, `not p`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramOpExp {
    pub operator: PosSymbol,
    pub operands: Vec<Exp>,
}
