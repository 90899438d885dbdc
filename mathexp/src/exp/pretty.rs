//! RcDoc-based pretty-printer with termcolor annotations for [`Exp`].
//!
//! Role
//! - Convert an expression tree into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs and tests.
//!
//! The output is meant for diagnostics; it is close to the concrete syntax of the specification
//! language but is not guaranteed to parse back.
//!
//! Performance
//! - Building the doc is O(n) in expression size; rendering respects line widths with
//!   linear-time layout in the size of the resulting document.
use std::{
    fmt,
    io::{self, Write},
};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    config::MathExpConfig,
    exp::{Exp, ExpKind, HypDesigExp, JustificationExp, MathRefExp, MathVarDecl},
    symbol::PosSymbol,
};

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, colons, periods, bars
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // if, then, else, For_all, lambda, by
    Operator, // and, +, =, is_in, #
    Ident,    // variables, functions
    Literal,  // numbers, characters, strings
    Type,     // binder parameter types
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 6 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::White,
                    3 => Color::Yellow,
                    4 => Color::Red,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Literal => {
                s.set_fg(Some(Color::Red));
            }
            Style::Type => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

type Doc = RcDoc<'static, Style>;

fn styled(style: Style, s: &'static str) -> Doc {
    RcDoc::as_string(s).annotate(style)
}

fn punct(s: &'static str) -> Doc {
    styled(Style::Punct, s)
}

#[inline]
fn lparen(depth: u8) -> Doc {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> Doc {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn kw(s: &'static str) -> Doc {
    styled(Style::Keyword, s)
}

fn op(s: &str) -> Doc {
    RcDoc::as_string(s).annotate(Style::Operator)
}

fn ident(name: &PosSymbol) -> Doc {
    RcDoc::as_string(name.name()).annotate(Style::Ident)
}

fn literal(value: impl fmt::Display) -> Doc {
    RcDoc::as_string(value).annotate(Style::Literal)
}

fn qualified(qualifier: Option<&PosSymbol>, name: &PosSymbol) -> Doc {
    match qualifier {
        Some(q) => ident(q).append(punct("::")).append(ident(name)),
        None => ident(name),
    }
}

const ATOM: u8 = u8::MAX;

fn infix_precedence(operator: &str) -> u8 {
    match operator {
        "implies" | "iff" => 2,
        "or" => 3,
        "and" => 4,
        "=" | "/=" | "<" | "<=" | ">" | ">=" | "is_in" | "is_not_in" | "is_subset_of"
        | "is_proper_subset_of" => 5,
        "*" | "/" | "mod" | "rem" | "div" | "intersect" => 7,
        _ => 6,
    }
}

fn precedence(e: &Exp) -> u8 {
    match e.kind() {
        ExpKind::If(_)
        | ExpKind::Lambda(_)
        | ExpKind::Quant(_)
        | ExpKind::Iterative(_)
        | ExpKind::Justified(_) => 1,
        ExpKind::TypeAssertion(_) => 2,
        ExpKind::Infix(e) => infix_precedence(e.operator.name()),
        ExpKind::Between(_) => 4,
        ExpKind::Equals(_) | ExpKind::IsIn(_) => 5,
        ExpKind::ProgramOp(e) if e.operands.len() == 2 => infix_precedence(e.operator.name()),
        ExpKind::Prefix(_) | ExpKind::ProgramOp(_) => 8,
        _ => ATOM,
    }
}

/// Print `e` as an operand of a construct of precedence `parent`. Right operands are also
/// parenthesized at equal precedence, so chains read left-associatively.
fn operand(e: &Exp, parent: u8, right: bool, depth: u8) -> Doc {
    let current = precedence(e);
    let need = current < parent || (right && current == parent && current != ATOM);
    if need {
        lparen(depth)
            .append(to_doc_with_depth(e, depth.wrapping_add(1)))
            .append(rparen(depth))
            .group()
    } else {
        to_doc_with_depth(e, depth)
    }
}

fn binary(left: &Exp, operator: Doc, right: &Exp, precedence: u8, depth: u8) -> Doc {
    operand(left, precedence, false, depth)
        .append(RcDoc::space())
        .append(operator)
        .append(RcDoc::line())
        .append(operand(right, precedence, true, depth))
        .group()
        .nest(2)
}

fn list<'e, I: IntoIterator<Item = &'e Exp>>(items: I, depth: u8) -> Doc {
    RcDoc::intersperse(
        items.into_iter().map(|e| to_doc_with_depth(e, depth)),
        punct(",").append(RcDoc::line()),
    )
    .group()
}

fn call(head: Doc, arguments: &[Exp], depth: u8) -> Doc {
    head.append(lparen(depth))
        .append(list(arguments, depth.wrapping_add(1)).nest(2))
        .append(rparen(depth))
        .group()
}

fn decl(d: &MathVarDecl, depth: u8) -> Doc {
    ident(&d.name)
        .append(punct(":"))
        .append(RcDoc::space())
        .append(to_doc_with_depth(&d.ty, depth).annotate(Style::Type))
}

fn decls(ds: &[MathVarDecl], depth: u8) -> Doc {
    RcDoc::intersperse(ds.iter().map(|d| decl(d, depth)), punct(", "))
}

fn where_clause(w: Option<&Exp>, depth: u8) -> Doc {
    match w {
        Some(w) => RcDoc::space()
            .append(kw("where"))
            .append(RcDoc::space())
            .append(to_doc_with_depth(w, depth)),
        None => RcDoc::nil(),
    }
}

fn math_ref(r: &MathRefExp, depth: u8) -> Doc {
    let mut doc = kw(r.kind.keyword());
    if let Some(id) = &r.id {
        doc = doc.append(RcDoc::space()).append(ident(id));
    }
    if let Some(index) = &r.index {
        doc = doc
            .append(punct("["))
            .append(ident(index))
            .append(punct("]"));
    }
    if !r.parameters().is_empty() {
        doc = call(doc, r.parameters(), depth);
    }
    doc
}

fn hyp_desig(h: &HypDesigExp, depth: u8) -> Doc {
    math_ref(&h.reference, depth)
}

fn justification(j: &JustificationExp, depth: u8) -> Doc {
    let mut parts: Vec<Doc> = j.hypotheses().map(|h| hyp_desig(h, depth)).collect();
    if j.is_def {
        parts.push(kw("Definition"));
    }
    if let Some(rule) = &j.rule {
        parts.push(ident(rule));
    }
    kw("by")
        .append(RcDoc::space())
        .append(RcDoc::intersperse(parts, punct(", ")))
}

/// Depth-aware document builder that colors parentheses by nesting level.
fn to_doc_with_depth(e: &Exp, depth: u8) -> Doc {
    match e.kind() {
        ExpKind::Integer(e) => literal(e.value),
        ExpKind::Double(e) => literal(e.value),
        ExpKind::Char(e) => literal(format!("'{}'", e.value.escape_default())),
        ExpKind::Str(e) => literal(format!("\"{}\"", e.value.escape_default())),
        ExpKind::Var(v) => qualified(v.qualifier.as_ref(), &v.name),
        ExpKind::VcVar(v) => to_doc_with_depth(&v.exp, depth)
            .append(RcDoc::as_string("'".repeat(v.state as usize)).annotate(Style::Punct)),
        ExpKind::Old(o) => op("#").append(operand(o.exp(), ATOM, false, depth)),

        ExpKind::Infix(i) => {
            let p = infix_precedence(i.operator.name());
            binary(&i.left, op(i.operator.name()), &i.right, p, depth)
        }
        ExpKind::Prefix(p) => {
            let symbol = p.symbol.name();
            let separator = if symbol.chars().all(char::is_alphanumeric) {
                RcDoc::space()
            } else {
                RcDoc::nil()
            };
            op(symbol)
                .append(separator)
                .append(operand(&p.argument, 8, false, depth))
        }
        ExpKind::Outfix(o) => {
            let (open, close) = o.operator.delimiters();
            op(open)
                .append(to_doc_with_depth(&o.argument, depth))
                .append(op(close))
                .group()
        }
        ExpKind::Equals(eq) => binary(&eq.left, op(eq.operator.symbol()), &eq.right, 5, depth),
        ExpKind::IsIn(i) => binary(&i.left, op(i.operator.symbol()), &i.right, 5, depth),
        ExpKind::Between(b) => RcDoc::intersperse(
            b.operands.iter().map(|e| operand(e, 5, false, depth)),
            RcDoc::line().append(op("and")).append(RcDoc::space()),
        )
        .group(),
        ExpKind::Function(f) => call(qualified(f.qualifier.as_ref(), &f.name), &f.arguments, depth),
        ExpKind::Dot(d) => RcDoc::intersperse(
            d.segments().iter().map(|s| operand(s, ATOM, false, depth)),
            punct("."),
        ),

        ExpKind::Lambda(l) => kw("lambda")
            .append(RcDoc::space())
            .append(decls(&l.parameters, depth))
            .append(punct("."))
            .append(lparen(depth))
            .append(to_doc_with_depth(&l.body, depth.wrapping_add(1)))
            .append(rparen(depth))
            .group(),
        ExpKind::Quant(q) => {
            kw(q.quantification.keyword().unwrap_or("For_all"))
                .append(RcDoc::space())
                .append(decls(&q.variables, depth))
                .append(where_clause(q.where_clause.as_deref(), depth))
                .append(punct(","))
                .append(RcDoc::line())
                .append(to_doc_with_depth(&q.body, depth))
                .group()
                .nest(2)
        }
        ExpKind::Set(s) => punct("{")
            .append(decl(&s.variable, depth))
            .append(where_clause(s.where_clause.as_deref(), depth))
            .append(RcDoc::space())
            .append(punct("|"))
            .append(RcDoc::line())
            .append(to_doc_with_depth(&s.body, depth))
            .append(punct("}"))
            .group()
            .nest(2),
        ExpKind::Iterative(i) => kw(i.operator.keyword())
            .append(RcDoc::space())
            .append(decl(&i.variable, depth))
            .append(where_clause(i.where_clause.as_deref(), depth))
            .append(punct(","))
            .append(RcDoc::line())
            .append(to_doc_with_depth(&i.body, depth))
            .group()
            .nest(2),

        ExpKind::If(i) => {
            let mut doc = kw("if")
                .append(RcDoc::space())
                .append(to_doc_with_depth(&i.test, depth))
                .append(RcDoc::line())
                .append(kw("then"))
                .append(RcDoc::space())
                .append(operand(&i.then_exp, 2, false, depth));
            if let Some(else_exp) = &i.else_exp {
                doc = doc
                    .append(RcDoc::line())
                    .append(kw("else"))
                    .append(RcDoc::space())
                    .append(to_doc_with_depth(else_exp, depth));
            }
            doc.group().nest(2)
        }
        ExpKind::Alternative(a) => punct("{{")
            .append(
                RcDoc::line()
                    .append(RcDoc::intersperse(
                        a.alternatives()
                            .iter()
                            .map(|item| to_doc_with_depth(item, depth).append(punct(";"))),
                        RcDoc::line(),
                    ))
                    .nest(2),
            )
            .append(RcDoc::line())
            .append(punct("}}"))
            .group(),
        ExpKind::AltItem(a) => {
            let guard = match &a.test {
                Some(test) => kw("if")
                    .append(RcDoc::space())
                    .append(to_doc_with_depth(test, depth)),
                None => kw("otherwise"),
            };
            to_doc_with_depth(&a.assignment, depth)
                .append(RcDoc::space())
                .append(guard)
        }

        ExpKind::Tuple(t) => lparen(depth)
            .append(list(t.fields(), depth.wrapping_add(1)))
            .append(rparen(depth))
            .group(),
        ExpKind::SetCollection(s) => punct("{")
            .append(list(s.members(), depth))
            .append(punct("}"))
            .group(),
        ExpKind::TypeAssertion(t) => operand(&t.exp, 3, false, depth)
            .append(RcDoc::space())
            .append(punct(":"))
            .append(RcDoc::space())
            .append(to_doc_with_depth(&t.asserted, depth).annotate(Style::Type)),

        ExpKind::VariableName(v) => qualified(v.qualifier.as_ref(), &v.name),
        ExpKind::VariableDot(v) => RcDoc::intersperse(
            v.segments().iter().map(|s| to_doc_with_depth(s, depth)),
            punct("."),
        ),
        ExpKind::ProgramParam(p) => {
            call(qualified(p.qualifier.as_ref(), &p.name), &p.arguments, depth)
        }
        ExpKind::ProgramOp(p) => match p.operands.as_slice() {
            [left, right] => {
                let prec = infix_precedence(p.operator.name());
                binary(left, op(p.operator.name()), right, prec, depth)
            }
            [argument] => op(p.operator.name())
                .append(RcDoc::space())
                .append(operand(argument, 8, false, depth)),
            operands => call(op(p.operator.name()), operands, depth),
        },

        ExpKind::MathRef(r) => math_ref(r, depth),
        ExpKind::HypDesig(h) => hyp_desig(h, depth),
        ExpKind::Justification(j) => justification(j, depth),
        ExpKind::Justified(j) => operand(&j.exp, 2, false, depth)
            .append(RcDoc::line())
            .append(justification(&j.justification, depth))
            .group()
            .nest(2),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Render a document to a `termcolor::WriteColor` with width-aware layout.
fn render_to<W: WriteColor + Write>(doc: &Doc, width: usize, out: &mut W) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

fn print_colored(e: &Exp, width: usize, choice: ColorChoice) -> io::Result<()> {
    let stdout = StandardStream::stdout(choice);
    let mut stdout = stdout.lock();
    render_to(&to_doc_with_depth(e, 0), width, &mut stdout)?;
    writeln!(stdout)
}

fn to_plain_string(e: &Exp, width: usize) -> String {
    let mut buf = String::new();
    let _ = to_doc_with_depth(e, 0).render_fmt(width, &mut buf);
    buf
}

/// Width of the terminal, or 80 if it cannot be determined.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for [`Exp`].
pub trait PrettyExp {
    /// Annotated document of this expression, for composing or rendering manually.
    fn pretty_doc(&self) -> Doc;

    /// Render this expression with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print this expression to stdout with colors (TTY-aware), at the terminal width (or 80).
    fn pretty_print(&self) -> io::Result<()>;

    /// Print this expression to stdout with the width and color mode of `config`.
    fn pretty_print_with(&self, config: &MathExpConfig) -> io::Result<()>;

    /// Format this expression into a plain string (no colors) at width 80.
    fn pretty_string(&self) -> String;
}

impl PrettyExp for Exp {
    #[inline]
    fn pretty_doc(&self) -> Doc {
        to_doc_with_depth(self, 0)
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.pretty_doc(), width, out)
    }

    #[inline]
    fn pretty_print(&self) -> io::Result<()> {
        print_colored(self, terminal_width(), ColorChoice::Auto)
    }

    fn pretty_print_with(&self, config: &MathExpConfig) -> io::Result<()> {
        print_colored(self, config.pretty_width(), config.pretty.color.into())
    }

    #[inline]
    fn pretty_string(&self) -> String {
        to_plain_string(self, 80)
    }
}

impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(80, &mut w)
    }
}
