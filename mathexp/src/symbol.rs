//! Identifiers and source positions attached to expressions.
//!
//! Both are produced by the lexer/parser and are opaque to the rewrite engines: names are
//! compared as strings, locations are carried along for diagnostics only.
use std::{fmt, sync::Arc};

/// An identifier. Cloning is cheap (shared, immutable storage).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol(Arc::from(s))
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of a token in a source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Option<Arc<str>>,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: Option<&str>, line: u32, column: u32) -> Self {
        Location {
            file: file.map(Arc::from),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// A symbol together with the place it was read from.
///
/// Equality only looks at the symbol; two occurrences of `x` at different places are the same
/// name.
#[derive(Clone, Debug, Eq)]
pub struct PosSymbol {
    pub location: Option<Location>,
    pub symbol: Symbol,
}

impl PosSymbol {
    pub fn new(name: &str) -> Self {
        PosSymbol {
            location: None,
            symbol: Symbol::new(name),
        }
    }

    pub fn located(location: Location, name: &str) -> Self {
        PosSymbol {
            location: Some(location),
            symbol: Symbol::new(name),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.symbol.as_str()
    }

    /// Copy of this symbol with its location dropped.
    pub fn unlocated(&self) -> Self {
        PosSymbol {
            location: None,
            symbol: self.symbol.clone(),
        }
    }
}

impl PartialEq for PosSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl std::hash::Hash for PosSymbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl From<&str> for PosSymbol {
    fn from(s: &str) -> Self {
        PosSymbol::new(s)
    }
}

impl From<Symbol> for PosSymbol {
    fn from(symbol: Symbol) -> Self {
        PosSymbol {
            location: None,
            symbol,
        }
    }
}

impl fmt::Display for PosSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.symbol, f)
    }
}

/// Compare two optional names the way the equivalence engine does: both absent, or both present
/// and spelled the same.
#[inline]
pub fn same_optional_name(a: Option<&PosSymbol>, b: Option<&PosSymbol>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.name() == b.name(),
        _ => false,
    }
}
