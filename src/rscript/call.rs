use std::fmt;

use indexmap::IndexMap;

use crate::rscript::literal::Literal;

/// Named arguments in output order. `None` entries are skipped when rendering.
pub type NamedArgs = IndexMap<String, Option<Literal>>;

/// One R function call, e.g. `points(c(0, 1), c(3, 4), col='red')`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub positional: Vec<Literal>,
    pub named: NamedArgs,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: Vec::new(),
            named: IndexMap::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Literal>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn named(mut self, key: impl Into<String>, value: Option<Literal>) -> Self {
        self.named.insert(key.into(), value);
        self
    }

    pub fn to_r(&self) -> String {
        encode_call(&self.name, &self.positional, &self.named)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_r())
    }
}

/// Render `name(p0, p1, ..., k0=v0, ...)`.
pub fn encode_call(name: &str, positional: &[Literal], named: &NamedArgs) -> String {
    let mut parts: Vec<String> = positional.iter().map(Literal::to_r).collect();
    for (key, value) in named {
        if let Some(value) = value {
            parts.push(format!("{}={}", key, value.to_r()));
        }
    }
    format!("{}({})", name, parts.join(", "))
}
