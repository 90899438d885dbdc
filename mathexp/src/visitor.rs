//! Per-kind dispatch for passes over the expression tree.
//!
//! Passes such as type inference or VC emission implement [`ExpVisitor`] and override the
//! `visit_*` methods of the kinds they care about; every other kind falls back to
//! [`ExpVisitor::visit_exp`]. Dispatch is a `match` on the node kind, see [`Exp::accept`].
//!
//! Descending into children is up to the visitor.
use std::fmt::Write;

use crate::{config::MathExpConfig, exp::*};

macro_rules! exp_visitor {
    ($($method:ident => $variant:ident($payload:ty)),* $(,)?) => {
        /// One entry point per expression kind, each defaulting to
        /// [`visit_exp`](ExpVisitor::visit_exp).
        pub trait ExpVisitor {
            type Output;

            /// Fallback for every kind whose method is not overridden.
            fn visit_exp(&mut self, exp: &Exp) -> Self::Output;

            $(
                #[inline]
                fn $method(&mut self, exp: &Exp, payload: &$payload) -> Self::Output {
                    let _ = payload;
                    self.visit_exp(exp)
                }
            )*
        }

        impl Exp {
            /// Call the method of `visitor` matching the kind of this node.
            pub fn accept<V: ExpVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
                match self.kind() {
                    $(ExpKind::$variant(payload) => visitor.$method(self, payload),)*
                }
            }
        }
    };
}

exp_visitor!(
    visit_integer => Integer(IntegerExp),
    visit_double => Double(DoubleExp),
    visit_char => Char(CharExp),
    visit_string => Str(StringExp),
    visit_var => Var(VarExp),
    visit_vc_var => VcVar(VcVarExp),
    visit_old => Old(OldExp),
    visit_infix => Infix(InfixExp),
    visit_prefix => Prefix(PrefixExp),
    visit_outfix => Outfix(OutfixExp),
    visit_equals => Equals(EqualsExp),
    visit_is_in => IsIn(IsInExp),
    visit_between => Between(BetweenExp),
    visit_function => Function(FunctionExp),
    visit_dot => Dot(DotExp),
    visit_lambda => Lambda(LambdaExp),
    visit_quant => Quant(QuantExp),
    visit_set => Set(SetExp),
    visit_iterative => Iterative(IterativeExp),
    visit_if => If(IfExp),
    visit_alternative => Alternative(AlternativeExp),
    visit_alt_item => AltItem(AltItemExp),
    visit_tuple => Tuple(TupleExp),
    visit_set_collection => SetCollection(SetCollectionExp),
    visit_type_assertion => TypeAssertion(TypeAssertionExp),
    visit_variable_name => VariableName(VariableNameExp),
    visit_variable_dot => VariableDot(VariableDotExp),
    visit_program_param => ProgramParam(ProgramParamExp),
    visit_program_op => ProgramOp(ProgramOpExp),
    visit_math_ref => MathRef(MathRefExp),
    visit_hyp_desig => HypDesig(HypDesigExp),
    visit_justification => Justification(JustificationExp),
    visit_justified => Justified(JustifiedExp),
);

/// Indented one-node-per-line rendering of a tree, with types when known.
struct Dump {
    out: String,
    indent: usize,
    level: usize,
}

impl Dump {
    fn node(&mut self, exp: &Exp, detail: std::fmt::Arguments<'_>) {
        let pad = self.level * self.indent;
        let _ = write!(self.out, "{:pad$}{}{}", "", exp.exp_type(), detail);
        if let Some(ty) = exp.math_type() {
            let _ = write!(self.out, " : {}", ty);
        }
        self.out.push('\n');

        self.level += 1;
        for child in exp.sub_expressions() {
            child.accept(self);
        }
        self.level -= 1;
    }
}

impl ExpVisitor for Dump {
    type Output = ();

    fn visit_exp(&mut self, exp: &Exp) {
        self.node(exp, format_args!(""));
    }

    fn visit_integer(&mut self, exp: &Exp, payload: &IntegerExp) {
        self.node(exp, format_args!(" {}", payload.value));
    }

    fn visit_double(&mut self, exp: &Exp, payload: &DoubleExp) {
        self.node(exp, format_args!(" {}", payload.value));
    }

    fn visit_var(&mut self, exp: &Exp, payload: &VarExp) {
        match &payload.qualifier {
            Some(q) => self.node(exp, format_args!(" {}::{}", q, payload.name)),
            None => self.node(exp, format_args!(" {}", payload.name)),
        }
    }

    fn visit_infix(&mut self, exp: &Exp, payload: &InfixExp) {
        self.node(exp, format_args!(" {}", payload.operator));
    }

    fn visit_prefix(&mut self, exp: &Exp, payload: &PrefixExp) {
        self.node(exp, format_args!(" {}", payload.symbol));
    }

    fn visit_function(&mut self, exp: &Exp, payload: &FunctionExp) {
        self.node(exp, format_args!(" {}", payload.name));
    }

    fn visit_tuple(&mut self, exp: &Exp, payload: &TupleExp) {
        self.node(exp, format_args!(" (size {})", payload.size()));
    }

    fn visit_vc_var(&mut self, exp: &Exp, payload: &VcVarExp) {
        self.node(exp, format_args!(" (state {})", payload.state));
    }

    fn visit_variable_name(&mut self, exp: &Exp, payload: &VariableNameExp) {
        self.node(exp, format_args!(" {}", payload.name));
    }
}

impl Exp {
    /// Debug rendering of the tree, one node per line, children indented by `indent` spaces.
    pub fn dump(&self, indent: usize) -> String {
        let mut dump = Dump {
            out: String::new(),
            indent,
            level: 0,
        };
        self.accept(&mut dump);
        dump.out
    }

    /// [`dump`](Self::dump) with the indentation of `config`.
    pub fn dump_with(&self, config: &MathExpConfig) -> String {
        self.dump(config.dump.indent)
    }
}
