// Hand-off IR from the schema compiler. Plain data, serde in and out; no regexes
// are compiled here (see `lower`).
use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Bool,
    Null,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Eq,
    Ne,
    Le,
    Lt,
    Ge,
    Gt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Date,
    DateTime,
    Email,
    Url,
    Uuid,
    RegexSyntax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Node {
    Type { kind: Kind },
    /// closed object: exactly `count` properties
    PropertyCount { count: usize },
    /// closed object: no property outside `names` (optional ones included)
    Closed { names: Vec<String> },
    Property {
        name: String,
        #[serde(default)]
        mandatory: bool,
        node: Box<Node>,
    },
    Elements { node: Box<Node> },
    Constraint { op: Op, limit: f64 },
    Pattern {
        regex: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        flags: String,
    },
    Format { format: Format },
    All { nodes: Vec<Node> },
    Reference { schema: String },
}

/// One compiled unit: every schema it defines, by name. `""` is the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub schemas: BTreeMap<String, Node>,
}

// ------------------------------ Builders ---------------------------------- //

impl Node {
    pub fn kind(kind: Kind) -> Self {
        Node::Type { kind }
    }

    pub fn object() -> Self {
        Node::kind(Kind::Object)
    }

    pub fn array() -> Self {
        Node::kind(Kind::Array)
    }

    pub fn string() -> Self {
        Node::kind(Kind::String)
    }

    pub fn number() -> Self {
        Node::kind(Kind::Number)
    }

    pub fn integer() -> Self {
        Node::kind(Kind::Integer)
    }

    pub fn bool() -> Self {
        Node::kind(Kind::Bool)
    }

    pub fn null() -> Self {
        Node::kind(Kind::Null)
    }

    pub fn any() -> Self {
        Node::kind(Kind::Any)
    }

    pub fn property_count(count: usize) -> Self {
        Node::PropertyCount { count }
    }

    pub fn closed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Closed {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mandatory(name: impl Into<String>, node: Node) -> Self {
        Node::Property {
            name: name.into(),
            mandatory: true,
            node: Box::new(node),
        }
    }

    pub fn optional(name: impl Into<String>, node: Node) -> Self {
        Node::Property {
            name: name.into(),
            mandatory: false,
            node: Box::new(node),
        }
    }

    pub fn elements(node: Node) -> Self {
        Node::Elements { node: Box::new(node) }
    }

    pub fn constraint(op: Op, limit: f64) -> Self {
        Node::Constraint { op, limit }
    }

    pub fn pattern(regex: impl Into<String>, flags: impl Into<String>) -> Self {
        Node::Pattern {
            regex: regex.into(),
            flags: flags.into(),
        }
    }

    pub fn format(format: Format) -> Self {
        Node::Format { format }
    }

    pub fn all(nodes: impl IntoIterator<Item = Node>) -> Self {
        Node::All {
            nodes: nodes.into_iter().collect(),
        }
    }

    pub fn reference(schema: impl Into<String>) -> Self {
        Node::Reference {
            schema: schema.into(),
        }
    }

    /// `array` ∧ every element satisfies `item`.
    pub fn array_of(item: Node) -> Self {
        Node::all([Node::array(), Node::elements(item)])
    }
}

impl Unit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit with only the default schema.
    pub fn single(root: Node) -> Self {
        Self::new().with("", root)
    }

    pub fn with(mut self, name: impl Into<String>, node: Node) -> Self {
        self.schemas.insert(name.into(), node);
        self
    }
}

// ------------------------------ Labels ------------------------------------ //

impl Op {
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Le => "<=",
            Op::Lt => "<",
            Op::Ge => ">=",
            Op::Gt => ">",
        }
    }
}

impl Kind {
    /// Diagnostic for a value of the wrong kind.
    pub fn mismatch(self) -> &'static str {
        match self {
            Kind::Object => "not an object",
            Kind::Array => "not an array",
            Kind::String => "not a string",
            Kind::Number => "not a number",
            Kind::Integer => "not an integer",
            Kind::Bool => "not a boolean",
            Kind::Null => "not null",
            Kind::Any => "unexpected value",
        }
    }
}

impl Format {
    pub fn label(self) -> &'static str {
        match self {
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Email => "email",
            Format::Url => "URL",
            Format::Uuid => "UUID",
            Format::RegexSyntax => "regex",
        }
    }
}
