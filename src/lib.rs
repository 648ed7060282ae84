//! Structural validation of JSON values against compiled schema models.
//!
//! A schema compiler (not part of this crate) hands over a [`Unit`]: named
//! rule trees in the [`ir`] format. [`lower`] compiles it once into a
//! read-only [`Registry`]; a [`Model`] does that lazily and thread-safely on
//! first use. Validation walks a `serde_json::Value` against a rule and yields
//! a boolean plus, on request, a [`Report`] of `"<path>: <message>"` entries.
//!
//! ```
//! use json_model_check::{Model, Node, Op, Unit};
//! use serde_json::json;
//!
//! let model = Model::from_unit(Unit::single(Node::all([
//!     Node::object(),
//!     Node::mandatory("name", Node::all([Node::string(), Node::constraint(Op::Ge, 2.0)])),
//! ])));
//! let out = model.validate("", &json!({ "name": "A" })).unwrap();
//! assert!(!out.valid);
//! assert_eq!(out.report.lines()[0], "$.name: length must be >= 2 [.name]");
//! ```
pub mod error;
pub mod interp;
pub mod ir;
pub mod lower;
pub mod path;
pub mod path_de;
pub mod primitive;
pub mod registry;
pub mod report;
pub mod rule;

pub use error::ModelError;
pub use interp::Options;
pub use ir::{Format, Kind, Node, Op, Unit};
pub use lower::lower;
pub use path::Path;
pub use registry::{Model, Outcome, Registry};
pub use report::{Entry, Report};
pub use rule::Rule;
