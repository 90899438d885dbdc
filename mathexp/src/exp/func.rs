//! Free-function builders for the common expression shapes.
//!
//! Builders for kinds with an invariant return [`ExpResult`]; the others are infallible.
use crate::{
    error::ExpResult,
    exp::{
        AltItemExp, AlternativeExp, BetweenExp, CharExp, DotExp, DoubleExp, EqualsExp,
        EqualsOperator, Exp, FunctionExp, IfExp, InfixExp, IntegerExp, IsInExp, IsInOperator,
        IterativeExp, IterativeOperator, LambdaExp, MathVarDecl, OldExp, OutfixExp,
        OutfixOperator, PrefixExp, ProgramOpExp, ProgramParamExp, QuantExp, Quantification,
        SetCollectionExp, SetExp, StringExp, TupleExp, TypeAssertionExp, VarExp, VariableDotExp,
        VariableNameExp, VcVarExp,
    },
    symbol::PosSymbol,
};

pub fn var(name: &str) -> Exp {
    VarExp::new(name).into()
}

pub fn qualified_var(qualifier: &str, name: &str) -> Exp {
    VarExp::qualified(qualifier, name).into()
}

pub fn quantified_var(name: &str, quantification: Quantification) -> Exp {
    VarExp::new(name).quantified(quantification).into()
}

pub fn int(value: i64) -> Exp {
    IntegerExp { value }.into()
}

pub fn double(value: f64) -> Exp {
    DoubleExp { value }.into()
}

pub fn char_lit(value: char) -> Exp {
    CharExp { value }.into()
}

pub fn string_lit(value: &str) -> Exp {
    StringExp {
        value: value.to_string(),
    }
    .into()
}

pub fn old(exp: Exp) -> Exp {
    OldExp::new(exp).into()
}

pub fn vc_var(exp: Exp, state: u32) -> Exp {
    VcVarExp {
        exp: Box::new(exp),
        state,
    }
    .into()
}

pub fn infix(left: Exp, operator: &str, right: Exp) -> Exp {
    InfixExp {
        left: Box::new(left),
        operator: PosSymbol::new(operator),
        right: Box::new(right),
    }
    .into()
}

pub fn and(left: Exp, right: Exp) -> Exp {
    infix(left, "and", right)
}

pub fn or(left: Exp, right: Exp) -> Exp {
    infix(left, "or", right)
}

pub fn implies(left: Exp, right: Exp) -> Exp {
    infix(left, "implies", right)
}

pub fn prefix(symbol: &str, argument: Exp) -> Exp {
    PrefixExp {
        symbol: PosSymbol::new(symbol),
        argument: Box::new(argument),
    }
    .into()
}

pub fn not(argument: Exp) -> Exp {
    prefix("not", argument)
}

pub fn outfix(operator: OutfixOperator, argument: Exp) -> Exp {
    OutfixExp {
        operator,
        argument: Box::new(argument),
    }
    .into()
}

pub fn equals(left: Exp, right: Exp) -> Exp {
    EqualsExp {
        left: Box::new(left),
        operator: EqualsOperator::Equal,
        right: Box::new(right),
    }
    .into()
}

pub fn not_equals(left: Exp, right: Exp) -> Exp {
    EqualsExp {
        left: Box::new(left),
        operator: EqualsOperator::NotEqual,
        right: Box::new(right),
    }
    .into()
}

pub fn is_in(left: Exp, right: Exp) -> Exp {
    IsInExp {
        left: Box::new(left),
        operator: IsInOperator::IsIn,
        right: Box::new(right),
    }
    .into()
}

pub fn is_not_in(left: Exp, right: Exp) -> Exp {
    IsInExp {
        left: Box::new(left),
        operator: IsInOperator::IsNotIn,
        right: Box::new(right),
    }
    .into()
}

pub fn between(operands: Vec<Exp>) -> Exp {
    BetweenExp { operands }.into()
}

pub fn apply(name: &str, arguments: Vec<Exp>) -> Exp {
    FunctionExp::new(name, arguments).into()
}

pub fn dot<I: IntoIterator<Item = Exp>>(segments: I) -> ExpResult<Exp> {
    Ok(DotExp::new(segments.into_iter().collect())?.into())
}

/// Binder parameter `name: ty` with the type given by name.
pub fn decl(name: &str, ty: &str) -> MathVarDecl {
    MathVarDecl::new(name, var(ty))
}

pub fn lambda(parameters: Vec<MathVarDecl>, body: Exp) -> Exp {
    LambdaExp {
        parameters,
        body: Box::new(body),
    }
    .into()
}

pub fn forall(variables: Vec<MathVarDecl>, where_clause: Option<Exp>, body: Exp) -> Exp {
    quant(Quantification::ForAll, variables, where_clause, body)
}

pub fn exists(variables: Vec<MathVarDecl>, where_clause: Option<Exp>, body: Exp) -> Exp {
    quant(Quantification::Exists, variables, where_clause, body)
}

pub fn quant(
    quantification: Quantification,
    variables: Vec<MathVarDecl>,
    where_clause: Option<Exp>,
    body: Exp,
) -> Exp {
    QuantExp {
        quantification,
        variables,
        where_clause: where_clause.map(Box::new),
        body: Box::new(body),
    }
    .into()
}

pub fn set_comprehension(variable: MathVarDecl, where_clause: Option<Exp>, body: Exp) -> Exp {
    SetExp {
        variable,
        where_clause: where_clause.map(Box::new),
        body: Box::new(body),
    }
    .into()
}

pub fn iterative(
    operator: IterativeOperator,
    variable: MathVarDecl,
    where_clause: Option<Exp>,
    body: Exp,
) -> Exp {
    IterativeExp {
        operator,
        variable,
        where_clause: where_clause.map(Box::new),
        body: Box::new(body),
    }
    .into()
}

pub fn if_exp(test: Exp, then_exp: Exp, else_exp: Option<Exp>) -> Exp {
    IfExp {
        test: Box::new(test),
        then_exp: Box::new(then_exp),
        else_exp: else_exp.map(Box::new),
    }
    .into()
}

pub fn alt_item(test: Option<Exp>, assignment: Exp) -> Exp {
    AltItemExp::new(test, assignment).into()
}

pub fn alternative(alternatives: Vec<Exp>) -> ExpResult<Exp> {
    Ok(AlternativeExp::new(alternatives)?.into())
}

pub fn tuple(fields: Vec<Exp>) -> ExpResult<Exp> {
    Ok(TupleExp::new(fields)?.into())
}

pub fn set_collection(members: Vec<Exp>) -> ExpResult<Exp> {
    Ok(SetCollectionExp::new(members)?.into())
}

pub fn type_assertion(exp: Exp, asserted: Exp) -> Exp {
    TypeAssertionExp {
        exp: Box::new(exp),
        asserted: Box::new(asserted),
    }
    .into()
}

pub fn program_var(name: &str) -> Exp {
    VariableNameExp::new(name).into()
}

pub fn program_dot(segments: Vec<Exp>) -> ExpResult<Exp> {
    Ok(VariableDotExp::new(segments)?.into())
}

pub fn call(name: &str, arguments: Vec<Exp>) -> Exp {
    ProgramParamExp {
        qualifier: None,
        name: PosSymbol::new(name),
        arguments,
    }
    .into()
}

pub fn program_op(operator: &str, operands: Vec<Exp>) -> Exp {
    ProgramOpExp {
        operator: PosSymbol::new(operator),
        operands,
    }
    .into()
}
