//! Starlark expression builder.
//!
//! BUCK files are produced from an explicit [`Expr`] tree written through a
//! [`StarlarkWriter`]. Every ordering decision is made by whoever builds the
//! tree; the writer emits lists and `select` arms exactly in the order given.

use std::io::{self, Write};

const INDENT: &str = "    ";

/// A Starlark value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A quoted string.
    Str(String),
    /// Emitted verbatim.
    Raw(String),
    /// A list of strings, one item per line.
    List(Vec<String>),
    /// A list of strings on a single line.
    InlineList(Vec<String>),
    /// A `select({...})` expression.
    Select(Select),
    /// `lhs + rhs`.
    Concat(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn str(s: impl Into<String>) -> Self {
        Expr::Str(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Expr::Raw(s.into())
    }

    pub fn concat(lhs: Expr, rhs: Expr) -> Self {
        Expr::Concat(Box::new(lhs), Box::new(rhs))
    }
}

/// A `select` keyed by constraint, with a `DEFAULT` fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub default: Box<Expr>,
    pub arms: Vec<(String, Expr)>,
}

impl Select {
    pub fn new(default: Expr) -> Self {
        Self {
            default: Box::new(default),
            arms: Vec::new(),
        }
    }

    pub fn arm(&mut self, key: impl Into<String>, value: Expr) {
        self.arms.push((key.into(), value));
    }
}

/// Quote a string as a Starlark string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Writes rule invocations and expressions to an `io::Write` sink.
pub struct StarlarkWriter<W> {
    out: W,
}

impl<W: Write> StarlarkWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write text verbatim.
    pub fn raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    /// Open a rule invocation: `rule(`.
    pub fn open_call(&mut self, rule: &str) -> io::Result<()> {
        write!(self.out, "{rule}(")
    }

    /// One keyword argument on its own line: `key = <expr>,`.
    pub fn attr(&mut self, key: &str, value: &Expr) -> io::Result<()> {
        write!(self.out, "\n{INDENT}{key} = ")?;
        self.expr(value, 1)?;
        self.out.write_all(b",")
    }

    /// Close a rule invocation opened with [`StarlarkWriter::open_call`].
    pub fn close_call(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n)\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Write an expression whose first line sits at indentation `level`.
    fn expr(&mut self, expr: &Expr, level: usize) -> io::Result<()> {
        match expr {
            Expr::Str(s) => self.out.write_all(quote(s).as_bytes()),
            Expr::Raw(s) => self.out.write_all(s.as_bytes()),
            Expr::InlineList(items) => {
                let items: Vec<String> = items.iter().map(|i| quote(i)).collect();
                write!(self.out, "[{}]", items.join(", "))
            }
            Expr::List(items) => {
                let inner = INDENT.repeat(level + 1);
                self.out.write_all(b"[")?;
                for item in items {
                    write!(self.out, "\n{inner}{},", quote(item))?;
                }
                write!(self.out, "\n{}]", INDENT.repeat(level))
            }
            Expr::Select(select) => {
                let inner = INDENT.repeat(level + 1);
                self.out.write_all(b"select({")?;
                write!(self.out, "\n{inner}\"DEFAULT\": ")?;
                self.expr(&select.default, level + 1)?;
                self.out.write_all(b",")?;
                for (key, value) in &select.arms {
                    write!(self.out, "\n{inner}{}: ", quote(key))?;
                    self.expr(value, level + 1)?;
                    self.out.write_all(b",")?;
                }
                write!(self.out, "\n{}}})", INDENT.repeat(level))
            }
            Expr::Concat(lhs, rhs) => {
                self.expr(lhs, level)?;
                self.out.write_all(b" + ")?;
                self.expr(rhs, level)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_attr(key: &str, value: &Expr) -> String {
        let mut buf = Vec::new();
        StarlarkWriter::new(&mut buf).attr(key, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn string_and_raw() {
        assert_eq!(render_attr("name", &Expr::str("foo")), "\n    name = \"foo\",");
        assert_eq!(render_attr("srcs", &Expr::raw("glob([])")), "\n    srcs = glob([]),");
    }

    #[test]
    fn inline_list() {
        let list = Expr::InlineList(vec!["PUBLIC".into()]);
        assert_eq!(render_attr("visibility", &list), "\n    visibility = [\"PUBLIC\"],");
        assert_eq!(render_attr("x", &Expr::InlineList(vec![])), "\n    x = [],");
    }

    #[test]
    fn multi_line_list() {
        let list = Expr::List(vec!["b".into(), "a".into()]);
        assert_eq!(
            render_attr("deps", &list),
            "\n    deps = [\n        \"b\",\n        \"a\",\n    ],"
        );
        assert_eq!(render_attr("deps", &Expr::List(vec![])), "\n    deps = [\n    ],");
    }

    #[test]
    fn nested_select() {
        let mut inner = Select::new(Expr::InlineList(vec![]));
        inner.arm("amd64", Expr::List(vec!["dep".into()]));
        let mut outer = Select::new(Expr::InlineList(vec![]));
        outer.arm("linux", Expr::Select(inner));

        let expected = "\n    deps = select({\n        \"DEFAULT\": [],\n        \"linux\": select({\n            \"DEFAULT\": [],\n            \"amd64\": [\n                \"dep\",\n            ],\n        }),\n    }),";
        assert_eq!(render_attr("deps", &Expr::Select(outer)), expected);
    }

    #[test]
    fn concat() {
        let expr = Expr::concat(Expr::List(vec![]), Expr::Select(Select::new(Expr::raw("None"))));
        assert_eq!(
            render_attr("deps", &expr),
            "\n    deps = [\n    ] + select({\n        \"DEFAULT\": None,\n    }),"
        );
    }

    #[test]
    fn call_framing() {
        let mut buf = Vec::new();
        let mut w = StarlarkWriter::new(&mut buf);
        w.open_call("go_library").unwrap();
        w.attr("name", &Expr::str("foo")).unwrap();
        w.close_call().unwrap();
        drop(w);
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "go_library(\n    name = \"foo\",\n)\n");
    }
}
