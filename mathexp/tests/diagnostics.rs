use std::path::PathBuf;

use mathexp::config::{ColorMode, DumpConfig, PrettyConfig};
use mathexp::prelude::*;
use termcolor::{Buffer, ColorChoice};

#[test]
fn pretty_prints_operators_with_precedence() {
    let e = infix(infix(var("a"), "+", var("b")), "*", var("c"));
    assert_eq!(e.to_string(), "(a + b) * c");

    let e = infix(var("a"), "-", infix(var("b"), "-", var("c")));
    assert_eq!(e.to_string(), "a - (b - c)");

    let e = implies(and(var("p"), not(var("q"))), equals(var("x"), int(0)));
    assert_eq!(e.to_string(), "p and not q implies x = 0");
}

#[test]
fn pretty_prints_common_kinds() {
    assert_eq!(old(var("x")).to_string(), "#x");
    assert_eq!(old(infix(var("x"), "+", int(1))).to_string(), "#(x + 1)");
    assert_eq!(qualified_var("Std", "x").to_string(), "Std::x");
    assert_eq!(apply("f", vec![var("a"), var("b")]).to_string(), "f(a, b)");
    assert_eq!(dot([var("S"), var("Top")]).unwrap().to_string(), "S.Top");
    assert_eq!(outfix(OutfixOperator::Bar, var("s")).to_string(), "|s|");
    assert_eq!(
        tuple(vec![var("a"), var("b"), var("c")]).unwrap().to_string(),
        "(a, b, c)"
    );
    assert_eq!(
        set_collection(vec![var("a"), var("b")]).unwrap().to_string(),
        "{a, b}"
    );
    assert_eq!(
        if_exp(var("p"), int(1), Some(int(2))).to_string(),
        "if p then 1 else 2"
    );
    assert_eq!(string_lit("hi").to_string(), "\"hi\"");
}

#[test]
fn pretty_breaks_long_lines() {
    let long: Vec<Exp> = (0..30).map(|i| var(&format!("argument_{i}"))).collect();
    let e = apply("f", long);
    let s = e.pretty_string();
    assert!(s.lines().count() > 1);
    assert!(s.lines().all(|l| l.len() <= 80));
}

#[test]
fn deeply_nested_calls_render() {
    let mut e = var("x");
    for _ in 0..300 {
        e = apply("f", vec![e]);
    }
    let text = e.to_string();
    assert_eq!(text.matches("f(").count(), 300);
    assert!(text.ends_with(&")".repeat(300)));
}

#[test]
fn colored_render_writes_escape_codes() {
    let e = and(var("p"), var("q"));
    let mut colored = Buffer::ansi();
    e.pretty_render_to(80, &mut colored).unwrap();
    assert!(colored.as_slice().contains(&0x1b));

    let mut plain = Buffer::no_color();
    e.pretty_render_to(80, &mut plain).unwrap();
    assert_eq!(plain.as_slice(), b"p and q");
}

#[test]
fn dump_lists_one_node_per_line() {
    let e = infix(var("x").with_math_type(MathType::named("Z")).unwrap(), "+", int(1));
    assert_eq!(
        e.dump(2),
        "InfixExp +\n  VarExp x : Z\n  IntegerExp 1\n"
    );
    assert_eq!(
        e.dump(4).lines().nth(1),
        Some("    VarExp x : Z")
    );
}

struct CountKinds {
    vars: usize,
    others: usize,
}

impl ExpVisitor for CountKinds {
    type Output = ();

    fn visit_exp(&mut self, exp: &Exp) {
        self.others += 1;
        for child in exp.sub_expressions() {
            child.accept(self);
        }
    }

    fn visit_var(&mut self, _exp: &Exp, _payload: &VarExp) {
        self.vars += 1;
    }
}

#[test]
fn visitor_dispatches_per_kind() {
    let e = and(var("p"), apply("f", vec![var("x"), int(0)]));
    let mut counter = CountKinds { vars: 0, others: 0 };
    e.accept(&mut counter);
    assert_eq!(counter.vars, 2);
    assert_eq!(counter.others, 3);
}

struct Rename;

impl ExpVisitor for Rename {
    type Output = Exp;

    fn visit_exp(&mut self, exp: &Exp) -> Exp {
        exp.map_children(|child| child.accept(&mut Rename))
    }

    fn visit_var(&mut self, _exp: &Exp, payload: &VarExp) -> Exp {
        var(&format!("{}'", payload.name))
    }
}

#[test]
fn visitor_can_rebuild_trees() {
    let e = infix(var("a"), "+", var("b"));
    assert_eq!(e.accept(&mut Rename).to_string(), "a' + b'");
}

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("mathexp-test-{}-{}", std::process::id(), name))
        .join("config.toml")
}

#[test]
fn config_defaults() {
    let config = MathExpConfig::default();
    assert_eq!(config.pretty.width, None);
    assert_eq!(config.pretty.color, ColorMode::Auto);
    assert_eq!(config.dump.indent, 2);
    assert_eq!(ColorChoice::from(ColorMode::Never), ColorChoice::Never);
}

#[test]
fn config_round_trips_through_toml() {
    let path = temp_config_path("roundtrip");
    let config = MathExpConfig {
        pretty: PrettyConfig {
            width: Some(100),
            color: ColorMode::Never,
        },
        dump: DumpConfig { indent: 4 },
    };
    config.save_to_toml(&path).unwrap();
    let loaded = MathExpConfig::load_from_toml(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.pretty_width(), 100);
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn config_fills_missing_fields() {
    let path = temp_config_path("partial");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[dump]\nindent = 3\n").unwrap();
    let loaded = MathExpConfig::load_from_toml(&path).unwrap();
    assert_eq!(loaded.dump.indent, 3);
    assert_eq!(loaded.pretty, PrettyConfig::default());
    assert_eq!(var("x").dump_with(&loaded), "VarExp x\n");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn config_parse_errors_name_the_file() {
    let path = temp_config_path("broken");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[dump]\nindent = \"wide\"\n").unwrap();
    let err = MathExpConfig::load_from_toml(&path).unwrap_err();
    assert!(matches!(err, ExpError::ConfigParse { ref file, .. } if file.ends_with("config.toml")));
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn config_missing_file_is_an_io_error() {
    let path = temp_config_path("missing");
    assert!(matches!(
        MathExpConfig::load_from_toml(&path),
        Err(ExpError::Io(_))
    ));
}
