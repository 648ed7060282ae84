use std::collections::HashMap;

use regex::Regex;

use crate::error::ModelError;
use crate::ir::{Node, Unit};
use crate::registry::Registry;
use crate::rule::{Check, Pattern, Rule};

/// Compile every schema of `unit`: precompile patterns, check that every
/// reference names a schema of the unit, and stamp each rule with its site.
pub fn lower(unit: &Unit) -> Result<Registry, ModelError> {
    let mut rules = HashMap::with_capacity(unit.schemas.len());
    for (name, node) in &unit.schemas {
        let rule = lower_node(unit, node, root_site(name))?;
        rules.insert(name.clone(), rule);
    }
    Ok(Registry::from_rules(rules))
}

fn lower_node(unit: &Unit, node: &Node, site: String) -> Result<Rule, ModelError> {
    let check = match node {
        Node::Type { kind } => Check::Type(*kind),
        Node::PropertyCount { count } => Check::PropertyCount(*count),
        Node::Closed { names } => Check::Closed(names.iter().cloned().collect()),
        Node::Property { name, mandatory, node } => Check::Property {
            name: name.clone(),
            mandatory: *mandatory,
            rule: Box::new(lower_node(unit, node, child_site(&site, name))?),
        },
        Node::Elements { node } => {
            Check::Elements(Box::new(lower_node(unit, node, child_site(&site, "0"))?))
        }
        Node::Constraint { op, limit } => Check::Constraint { op: *op, limit: *limit },
        Node::Pattern { regex, flags } => Check::Pattern(compile_pattern(regex, flags, &site)?),
        Node::Format { format } => Check::Format(*format),
        Node::All { nodes } => Check::All(
            nodes
                .iter()
                .map(|n| lower_node(unit, n, site.clone()))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Node::Reference { schema } => {
            if !unit.schemas.contains_key(schema) {
                return Err(ModelError::UnresolvedReference {
                    site,
                    target: schema.clone(),
                });
            }
            Check::Reference(schema.clone())
        }
    };
    Ok(Rule { site, check })
}

fn compile_pattern(regex: &str, flags: &str, site: &str) -> Result<Pattern, ModelError> {
    let source = if flags.is_empty() {
        regex.to_owned()
    } else {
        format!("(?{flags}){regex}")
    };
    let compiled = Regex::new(&source).map_err(|e| ModelError::InvalidPattern {
        site: site.to_owned(),
        pattern: regex.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(Pattern {
        label: format!("/{regex}/{flags}"),
        regex: compiled,
    })
}

fn root_site(name: &str) -> String {
    if name.is_empty() {
        ".".to_owned()
    } else {
        format!("${name}")
    }
}

fn child_site(site: &str, step: &str) -> String {
    if site == "." {
        format!(".{step}")
    } else {
        format!("{site}.{step}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site_of<'a>(rule: &'a Rule, steps: &[usize]) -> &'a Rule {
        let mut cur = rule;
        for &i in steps {
            cur = match &cur.check {
                Check::All(rules) => &rules[i],
                Check::Property { rule, .. } | Check::Elements(rule) => rule.as_ref(),
                other => panic!("no child under {other:?}"),
            };
        }
        cur
    }

    #[test]
    fn sites_follow_schema_structure() {
        let unit = Unit::single(Node::all([
            Node::object(),
            Node::mandatory("tags", Node::array_of(Node::string())),
        ]))
        .with("Tree", Node::optional("children", Node::elements(Node::reference("Tree"))));
        let reg = lower(&unit).unwrap();

        let root = reg.lookup("").unwrap();
        assert_eq!(root.site, ".");
        assert_eq!(site_of(root, &[1]).site, ".");
        assert_eq!(site_of(root, &[1, 0]).site, ".tags");
        assert_eq!(site_of(root, &[1, 0, 1, 0]).site, ".tags.0");

        let tree = reg.lookup("Tree").unwrap();
        assert_eq!(tree.site, "$Tree");
        assert_eq!(site_of(tree, &[0, 0]).site, "$Tree.children.0");
    }

    #[test]
    fn flags_are_inlined_and_labelled() {
        let reg = lower(&Unit::single(Node::pattern("^[a-z]+$", "i"))).unwrap();
        let Check::Pattern(p) = &reg.lookup("").unwrap().check else {
            panic!("expected a pattern");
        };
        assert_eq!(p.label, "/^[a-z]+$/i");
        assert!(p.regex.is_match("ABC"));
    }

    #[test]
    fn bad_pattern_is_a_model_error() {
        let unit = Unit::single(Node::mandatory("x", Node::pattern("(", "")));
        match lower(&unit) {
            Err(ModelError::InvalidPattern { site, pattern, .. }) => {
                assert_eq!(site, ".x");
                assert_eq!(pattern, "(");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dangling_reference_is_a_model_error() {
        let unit = Unit::single(Node::reference("Missing"));
        assert_eq!(
            lower(&unit).unwrap_err(),
            ModelError::UnresolvedReference { site: ".".into(), target: "Missing".into() }
        );
    }
}
