use std::io::Write;

use clap::{Parser, Subcommand};
use mathexp::prelude::*;
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Apply a rewrite to a sample verification condition and print the result
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to the user configuration)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Line width, overriding the configuration
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Also print the one-node-per-line dump of the result
    #[arg(short, long, default_value_t = false)]
    pub dump: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Simultaneously substitute variables, e.g. `substitute x=0 S=T`
    Substitute {
        /// `name=value` pairs; integer values become literals, others variables
        pairs: Vec<String>,
    },
    /// Replace every occurrence of a variable, or of `#name` when `--old` is set
    Replace {
        name: String,
        value: String,
        #[arg(long, default_value_t = false)]
        old: bool,
    },
    /// Turn every `#e` into `e`
    Remember,
}

fn value_of(text: &str) -> Exp {
    match text.parse::<i64>() {
        Ok(n) => int(n),
        Err(_) => var(text),
    }
}

fn sample() -> Exp {
    // For_all x: Z where x is_in S, #S.Top + x = S.Top + 1 implies f(x) /= #f(x)
    let top = || dot([var("S"), var("Top")]).expect("valid chain");
    forall(
        vec![decl("x", "Z")],
        Some(is_in(var("x"), var("S"))),
        implies(
            equals(infix(old(top()), "+", var("x")), infix(top(), "+", int(1))),
            not_equals(
                apply("f", vec![var("x")]),
                old(apply("f", vec![var("x")])),
            ),
        ),
    )
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MathExpConfig::load_from_toml(std::path::Path::new(path)),
        None => MathExpConfig::load_or_default(),
    }
    .expect("Failed to load configuration");
    if args.width.is_some() {
        config.pretty.width = args.width;
    }

    let input = sample();
    let output = match &args.command {
        Command::Substitute { pairs } => {
            let pairs: Vec<(&str, Exp)> = pairs
                .iter()
                .map(|pair| {
                    let (name, value) = pair.split_once('=').unwrap_or_else(|| {
                        eprintln!("Expected `name=value`, found `{pair}`.");
                        std::process::exit(1);
                    });
                    (name, value_of(value))
                })
                .collect();
            input.substitute_names(pairs)
        }
        Command::Replace { name, value, old: in_old } => {
            let target = if *in_old { old(var(name)) } else { var(name) };
            input
                .replace(&target, &value_of(value))
                .expect("Sample contains no citation kinds")
                .or_copy_of(&input)
        }
        Command::Remember => input.remember(),
    };

    let mut title = ColorSpec::new();
    title.set_fg(Some(termcolor::Color::Green));
    title.set_intense(true);

    let stdout = StandardStream::stdout(ColorChoice::from(config.pretty.color));
    let mut stdout = stdout.lock();
    for (label, exp) in [("Input:", &input), ("Output:", &output)] {
        stdout.set_color(&title).unwrap();
        writeln!(stdout, "{label}").unwrap();
        stdout.reset().unwrap();
        stdout.flush().unwrap();
        exp.pretty_print_with(&config).unwrap();
    }

    if args.dump {
        print!("{}", output.dump_with(&config));
    }
}
