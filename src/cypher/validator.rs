//! Schema checks for generated Cypher.
//!
//! Labels, relationship types and properties must exist in the live schema,
//! the query must be read-only, and a single-type hop pointing against every
//! known pattern is turned around.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::lexer::{blank_literals, check_balanced, is_ident_byte, parse_ident, skip_ws};
use super::patterns::{scan, Direction, Hop, NodePattern, Patterns};
use super::ValidationError;
use crate::graph::GraphSchema;

lazy_static! {
    static ref WRITE_CLAUSE: Regex = Regex::new(
        r"(?i)\b(CREATE|MERGE|DELETE|DETACH|SET|REMOVE|DROP|FOREACH|LOAD\s+CSV)\b"
    )
    .unwrap();
    static ref PROCEDURE_CALL: Regex = Regex::new(
        r"(?i)\bCALL\s+([A-Za-z_][A-Za-z0-9_]*(?:\s*\.\s*[A-Za-z_][A-Za-z0-9_]*)*)"
    )
    .unwrap();
    static ref LABEL_PREDICATE: Regex = Regex::new(
        r"([A-Za-z_][A-Za-z0-9_]*|`[^`]+`)\s*:\s*([A-Za-z_][A-Za-z0-9_]*|`[^`]+`)"
    )
    .unwrap();
    static ref PROPERTY_ACCESS: Regex = Regex::new(
        r"([A-Za-z_][A-Za-z0-9_]*|`[^`]+`)\s*\.\s*([A-Za-z_][A-Za-z0-9_]*|`[^`]+`)"
    )
    .unwrap();
}

/// Procedures a generated query may `CALL`. Entries ending in `.` cover a namespace.
const READ_PROCEDURES: &[&str] = &[
    "db.labels",
    "db.relationshipTypes",
    "db.propertyKeys",
    "db.schema.",
    "db.index.fulltext.queryNodes",
    "db.index.fulltext.queryRelationships",
    "db.index.vector.queryNodes",
    "db.idx.fulltext.queryNodes",
    "db.idx.vector.queryNodes",
    "apoc.meta.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuery {
    pub query: String,
    /// At least one relationship arrow was flipped.
    pub corrected: bool,
}

#[derive(Debug, Clone)]
enum Binding {
    Node(Vec<String>),
    Relationship(Vec<String>),
}

enum Edit {
    Insert(usize, char),
    Delete(usize),
}

impl Edit {
    fn position(&self) -> usize {
        match self {
            Edit::Insert(pos, _) | Edit::Delete(pos) => *pos,
        }
    }
}

pub fn validate(query: &str, schema: &GraphSchema) -> Result<ValidatedQuery, ValidationError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ValidationError::Empty);
    }

    let blanked = blank_literals(query)?;
    if blanked.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    check_balanced(&blanked)?;
    check_read_only(&blanked)?;
    check_procedures(&blanked)?;

    let patterns = scan(&blanked);
    check_labels_and_types(&patterns, schema)?;

    let bindings = bind_variables(&patterns);
    check_label_predicates(&blanked, &bindings, schema)?;
    check_inline_properties(&patterns, &bindings, schema)?;
    check_property_access(&blanked, &bindings, schema)?;

    let edits = direction_edits(&patterns, &bindings, schema)?;
    let corrected = !edits.is_empty();

    Ok(ValidatedQuery {
        query: apply_edits(query, edits),
        corrected,
    })
}

fn check_read_only(blanked: &str) -> Result<(), ValidationError> {
    let text = mask_backticks(blanked);
    let bytes = text.as_bytes();

    for m in WRITE_CLAUSE.find_iter(&text) {
        let before = m.start().checked_sub(1).map(|i| bytes[i]);
        if matches!(before, Some(b'.') | Some(b':') | Some(b'$')) {
            continue;
        }
        let after = text[m.end()..].trim_start();
        if after.starts_with(':') || after.starts_with('.') {
            // map key such as `{set: 1}`, or a variable named like a keyword
            continue;
        }
        if follows_as(&text[..m.start()]) {
            continue;
        }
        let clause = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
        return Err(ValidationError::WriteClause(clause.to_uppercase()));
    }
    Ok(())
}

/// True when `before` ends with the keyword `AS`, i.e. the next word is an alias.
fn follows_as(before: &str) -> bool {
    let bytes = before.trim_end().as_bytes();
    let n = bytes.len();
    n >= 2 && bytes[n - 2..].eq_ignore_ascii_case(b"as") && (n == 2 || !is_ident_byte(bytes[n - 3]))
}

fn check_procedures(blanked: &str) -> Result<(), ValidationError> {
    let text = mask_backticks(blanked);

    for caps in PROCEDURE_CALL.captures_iter(&text) {
        let Some(name) = caps.get(1) else {
            continue;
        };
        let name: String = name.as_str().split_whitespace().collect();
        let allowed = READ_PROCEDURES.iter().any(|allowed| {
            if allowed.ends_with('.') {
                name.starts_with(*allowed)
            } else {
                name == *allowed
            }
        });
        if !allowed {
            return Err(ValidationError::ProcedureNotAllowed(name));
        }
    }
    Ok(())
}

/// Blank everything between backticks, keeping the length.
fn mask_backticks(text: &str) -> String {
    let mut inside = false;
    text.chars()
        .flat_map(|c| {
            let keep = c == '`' || !inside;
            if c == '`' {
                inside = !inside;
            }
            let replacement = if keep { c } else { ' ' };
            std::iter::repeat(replacement).take(if keep { 1 } else { c.len_utf8() })
        })
        .collect()
}

fn check_labels_and_types(patterns: &Patterns, schema: &GraphSchema) -> Result<(), ValidationError> {
    for node in &patterns.nodes {
        if let Some(label) = node.labels.iter().find(|l| !schema.has_label(l)) {
            return Err(ValidationError::UnknownLabel(label.clone()));
        }
    }
    for hop in &patterns.hops {
        if let Some(rel_type) = hop.rel.types.iter().find(|t| !schema.has_rel_type(t)) {
            return Err(ValidationError::UnknownRelationshipType(rel_type.clone()));
        }
    }
    Ok(())
}

/// Variables bound by patterns, with every label (or type) seen for them.
fn bind_variables(patterns: &Patterns) -> HashMap<String, Binding> {
    let mut bindings: HashMap<String, Binding> = HashMap::new();

    for node in &patterns.nodes {
        if let Some(var) = &node.variable {
            let entry = bindings
                .entry(var.clone())
                .or_insert_with(|| Binding::Node(Vec::new()));
            if let Binding::Node(labels) = entry {
                merge(labels, &node.labels);
            }
        }
    }
    for hop in &patterns.hops {
        if let Some(var) = &hop.rel.variable {
            let entry = bindings
                .entry(var.clone())
                .or_insert_with(|| Binding::Relationship(Vec::new()));
            if let Binding::Relationship(types) = entry {
                merge(types, &hop.rel.types);
            }
        }
    }

    bindings
}

fn merge(into: &mut Vec<String>, from: &[String]) {
    for name in from {
        if !into.contains(name) {
            into.push(name.clone());
        }
    }
}

/// Check `n:Label` and `r:TYPE` predicates on bound variables outside patterns.
fn check_label_predicates(
    blanked: &str,
    bindings: &HashMap<String, Binding>,
    schema: &GraphSchema,
) -> Result<(), ValidationError> {
    let bytes = blanked.as_bytes();

    for caps in LABEL_PREDICATE.captures_iter(blanked) {
        let (Some(whole), Some(var), Some(first)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some(&before) = whole.start().checked_sub(1).and_then(|i| bytes.get(i)) {
            if matches!(before, b'.' | b'$' | b'`') || is_ident_byte(before) {
                continue;
            }
        }
        let Some(binding) = bindings.get(unquote(var.as_str())) else {
            continue;
        };

        let mut names = vec![unquote(first.as_str()).to_string()];
        let mut j = whole.end();
        loop {
            let k = skip_ws(bytes, j);
            if !matches!(bytes.get(k), Some(b':') | Some(b'|') | Some(b'&')) {
                break;
            }
            let mut k = skip_ws(bytes, k + 1);
            if bytes.get(k) == Some(&b':') {
                k = skip_ws(bytes, k + 1);
            }
            let Some((name, next)) = parse_ident(blanked, k) else {
                break;
            };
            names.push(name);
            j = next;
        }

        for name in names {
            match binding {
                Binding::Node(_) if !schema.has_label(&name) => {
                    return Err(ValidationError::UnknownLabel(name));
                }
                Binding::Relationship(_) if !schema.has_rel_type(&name) => {
                    return Err(ValidationError::UnknownRelationshipType(name));
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn binding_has_property(binding: &Binding, property: &str, schema: &GraphSchema) -> bool {
    match binding {
        Binding::Node(labels) if !labels.is_empty() => {
            labels.iter().any(|l| schema.label_has_property(l, property))
        }
        Binding::Relationship(types) if !types.is_empty() => {
            types.iter().any(|t| schema.rel_has_property(t, property))
        }
        _ => schema.has_property(property),
    }
}

fn node_labels<'a>(node: &'a NodePattern, bindings: &'a HashMap<String, Binding>) -> &'a [String] {
    match node.variable.as_ref().and_then(|v| bindings.get(v)) {
        Some(Binding::Node(labels)) => labels.as_slice(),
        _ => node.labels.as_slice(),
    }
}

fn check_inline_properties(
    patterns: &Patterns,
    bindings: &HashMap<String, Binding>,
    schema: &GraphSchema,
) -> Result<(), ValidationError> {
    for node in &patterns.nodes {
        let binding = Binding::Node(node_labels(node, bindings).to_vec());
        if let Some(key) = node.keys.iter().find(|k| !binding_has_property(&binding, k, schema)) {
            return Err(ValidationError::UnknownProperty {
                variable: node
                    .variable
                    .clone()
                    .unwrap_or_else(|| node.labels.join(":")),
                property: key.clone(),
            });
        }
    }

    for hop in &patterns.hops {
        let binding = Binding::Relationship(hop.rel.types.clone());
        if let Some(key) = hop.rel.keys.iter().find(|k| !binding_has_property(&binding, k, schema)) {
            return Err(ValidationError::UnknownProperty {
                variable: hop
                    .rel
                    .variable
                    .clone()
                    .unwrap_or_else(|| hop.rel.types.join("|")),
                property: key.clone(),
            });
        }
    }
    Ok(())
}

fn check_property_access(
    blanked: &str,
    bindings: &HashMap<String, Binding>,
    schema: &GraphSchema,
) -> Result<(), ValidationError> {
    let bytes = blanked.as_bytes();

    for caps in PROPERTY_ACCESS.captures_iter(blanked) {
        let (Some(whole), Some(var), Some(prop)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some(&before) = whole.start().checked_sub(1).and_then(|i| bytes.get(i)) {
            if matches!(before, b'.' | b'$' | b'`') || is_ident_byte(before) {
                continue;
            }
        }

        let variable = unquote(var.as_str());
        let property = unquote(prop.as_str());
        let Some(binding) = bindings.get(variable) else {
            continue;
        };
        if !binding_has_property(binding, property, schema) {
            return Err(ValidationError::UnknownProperty {
                variable: variable.to_string(),
                property: property.to_string(),
            });
        }
    }
    Ok(())
}

fn unquote(ident: &str) -> &str {
    ident
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
        .unwrap_or(ident)
}

fn direction_edits(
    patterns: &Patterns,
    bindings: &HashMap<String, Binding>,
    schema: &GraphSchema,
) -> Result<Vec<Edit>, ValidationError> {
    let mut edits = Vec::new();

    for hop in &patterns.hops {
        let [rel_type] = hop.rel.types.as_slice() else {
            continue;
        };
        if hop.rel.var_length || !schema.relationships.iter().any(|r| &r.rel_type == rel_type) {
            continue;
        }
        let left = node_labels(&patterns.nodes[hop.left], bindings);
        let right = node_labels(&patterns.nodes[hop.right], bindings);
        if left.is_empty() || right.is_empty() {
            continue;
        }

        let forward = connects(schema, left, rel_type, right);
        let backward = connects(schema, right, rel_type, left);

        match hop.rel.direction() {
            Direction::Outgoing if !forward && backward => edits.extend(flip(hop)),
            Direction::Incoming if !backward && forward => edits.extend(flip(hop)),
            Direction::Outgoing | Direction::Either if !forward && !backward => {
                return Err(unsupported(left, rel_type, right));
            }
            Direction::Incoming if !forward && !backward => {
                return Err(unsupported(right, rel_type, left));
            }
            _ => {}
        }
    }

    Ok(edits)
}

fn connects(schema: &GraphSchema, from: &[String], rel_type: &str, to: &[String]) -> bool {
    from.iter()
        .any(|s| to.iter().any(|e| schema.has_pattern(s, rel_type, e)))
}

fn unsupported(start: &[String], rel_type: &str, end: &[String]) -> ValidationError {
    ValidationError::UnsupportedPattern {
        start: start[0].clone(),
        rel_type: rel_type.to_string(),
        end: end[0].clone(),
    }
}

fn flip(hop: &Hop) -> Vec<Edit> {
    match (hop.rel.left_arrow, hop.rel.right_arrow) {
        (None, Some(right)) => vec![Edit::Insert(hop.rel.left_dash, '<'), Edit::Delete(right)],
        (Some(left), None) => vec![Edit::Delete(left), Edit::Insert(hop.rel.right_dash + 1, '>')],
        _ => Vec::new(),
    }
}

fn apply_edits(query: &str, mut edits: Vec<Edit>) -> String {
    let mut out = query.to_string();
    edits.sort_by_key(|e| std::cmp::Reverse(e.position()));
    for edit in edits {
        match edit {
            Edit::Insert(pos, c) => out.insert(pos, c),
            Edit::Delete(pos) => {
                out.remove(pos);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Property, RelationshipPattern};
    use crate::prompt::EXAMPLES;

    fn restaurant_schema() -> GraphSchema {
        let mut schema = GraphSchema::default();
        for (label, props) in [
            ("Dish", &["name", "price", "description"][..]),
            ("Place", &["name", "description"][..]),
            ("FoodCategory", &["name"][..]),
        ] {
            for prop in props {
                let prop_type = if *prop == "price" { "FLOAT" } else { "STRING" };
                schema.add_node_property(label, Property::new(*prop, prop_type));
            }
        }
        schema.add_rel_property("SERVES", Property::new("since", "INTEGER"));
        schema.add_relationship(RelationshipPattern::new("Place", "SERVES", "Dish"));
        schema.add_relationship(RelationshipPattern::new("Dish", "TYPE_OF", "FoodCategory"));
        schema
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = validate("MATCH (x:NotARealLabel) RETURN x", &restaurant_schema()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownLabel("NotARealLabel".into()));

        let err = validate("MATCH (x:NotARealLabel) RETURN x", &GraphSchema::default()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownLabel(_)));
    }

    #[test]
    fn test_all_examples_accepted() {
        let schema = restaurant_schema();
        for example in EXAMPLES {
            let validated = validate(example.query, &schema)
                .unwrap_or_else(|e| panic!("{} rejected: {e}", example.question));
            assert_eq!(validated.query, example.query);
            assert!(!validated.corrected);
        }
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(validate("  \n", &restaurant_schema()), Err(ValidationError::Empty));
        assert_eq!(validate("// nothing", &restaurant_schema()), Err(ValidationError::Empty));
    }

    #[test]
    fn test_unknown_relationship_type() {
        let err = validate("MATCH (p:Place)-[:OWNS]->(d:Dish) RETURN p", &restaurant_schema()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownRelationshipType("OWNS".into()));
    }

    #[test]
    fn test_unknown_property_access() {
        let err = validate("MATCH (d:Dish) RETURN d.calories", &restaurant_schema()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownProperty {
                variable: "d".into(),
                property: "calories".into()
            }
        );
    }

    #[test]
    fn test_property_on_wrong_label() {
        let err = validate("MATCH (fc:FoodCategory) RETURN fc.price", &restaurant_schema()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownProperty { .. }));
    }

    #[test]
    fn test_inline_property_checked() {
        let schema = restaurant_schema();
        assert!(validate("MATCH (p:Place {name: 'Burtons Grill'}) RETURN p", &schema).is_ok());
        let err = validate("MATCH (p:Place {rating: 5}) RETURN p", &schema).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownProperty { property, .. } if property == "rating"));
    }

    #[test]
    fn test_relationship_variable_properties() {
        let schema = restaurant_schema();
        assert!(validate("MATCH (:Place)-[s:SERVES]->(:Dish) RETURN s.since", &schema).is_ok());
        assert!(validate("MATCH (:Place)-[s:SERVES]->(:Dish) RETURN s.price", &schema).is_err());
    }

    #[test]
    fn test_unlabeled_variable_uses_whole_schema() {
        let schema = restaurant_schema();
        assert!(validate("MATCH (n) RETURN n.price", &schema).is_ok());
        assert!(validate("MATCH (n) RETURN n.calories", &schema).is_err());
    }

    #[test]
    fn test_literals_and_unbound_names_ignored() {
        let schema = restaurant_schema();
        let query = "MATCH (d:Dish) WHERE d.description CONTAINS 'x.unknown (y:Fake)' RETURN d.name, toLower(d.name)";
        assert!(validate(query, &schema).is_ok());
    }

    #[test]
    fn test_write_clauses_rejected() {
        let schema = restaurant_schema();
        for query in [
            "MATCH (d:Dish) DETACH DELETE d",
            "CREATE (d:Dish {name: 'x'})",
            "MATCH (d:Dish) set d.price = 1",
            "MERGE (p:Place {name: 'x'}) RETURN p",
            "LOAD  CSV FROM 'file:///x.csv' AS row RETURN row",
        ] {
            assert!(
                matches!(validate(query, &schema), Err(ValidationError::WriteClause(_))),
                "{query}"
            );
        }
    }

    #[test]
    fn test_label_predicate_in_where() {
        let schema = restaurant_schema();
        let err = validate("MATCH (n) WHERE n:NotARealLabel RETURN n", &schema).unwrap_err();
        assert_eq!(err, ValidationError::UnknownLabel("NotARealLabel".into()));

        let err = validate("MATCH (n) RETURN n:Dish AND n:Fake AS odd", &schema).unwrap_err();
        assert_eq!(err, ValidationError::UnknownLabel("Fake".into()));

        let err = validate("MATCH (n) WHERE n:Dish|Ghost RETURN n", &schema).unwrap_err();
        assert_eq!(err, ValidationError::UnknownLabel("Ghost".into()));

        assert!(validate("MATCH (n) WHERE n:Dish OR n:Place RETURN n.name", &schema).is_ok());
    }

    #[test]
    fn test_type_predicate_on_relationship_variable() {
        let schema = restaurant_schema();
        let err = validate("MATCH (:Place)-[r]->(:Dish) WHERE r:OWNS RETURN r", &schema).unwrap_err();
        assert_eq!(err, ValidationError::UnknownRelationshipType("OWNS".into()));
    }

    #[test]
    fn test_map_keys_are_not_label_predicates() {
        let query = "MATCH (d:Dish) RETURN {name: d.name, price: d.price} AS dish";
        assert!(validate(query, &restaurant_schema()).is_ok());
    }

    #[test]
    fn test_inline_where_in_node_pattern() {
        let schema = restaurant_schema();
        let err = validate("MATCH (x:NotARealLabel WHERE x.name = 'a') RETURN x", &schema).unwrap_err();
        assert_eq!(err, ValidationError::UnknownLabel("NotARealLabel".into()));

        let err = validate(
            "MATCH (p:Place)-[:OWNS]->(d:Dish WHERE d.price > 10) RETURN p",
            &schema,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::UnknownRelationshipType("OWNS".into()));

        let err = validate("MATCH (d:Dish WHERE d.calories < 500) RETURN d", &schema).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownProperty { .. }));

        let query = "MATCH (p:Place)-[:SERVES]->(d:Dish WHERE d.price > 10 AND size([1, 2]) = 2) RETURN p.name";
        assert!(validate(query, &schema).is_ok());
    }

    #[test]
    fn test_write_procedures_rejected() {
        let schema = restaurant_schema();
        let err = validate(
            "CALL apoc.create.node(['Dish'], {name: 'x'}) YIELD node RETURN node",
            &schema,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::ProcedureNotAllowed("apoc.create.node".into()));

        let err = validate(
            "CALL apoc.cypher.runWrite('MATCH (n) DETACH DELETE n', {}) YIELD value RETURN value",
            &schema,
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::ProcedureNotAllowed("apoc.cypher.runWrite".into()));

        assert!(matches!(
            validate("call apoc.periodic.iterate('a', 'b', {}) YIELD batches RETURN batches", &schema),
            Err(ValidationError::ProcedureNotAllowed(_))
        ));
    }

    #[test]
    fn test_read_procedures_allowed() {
        let schema = restaurant_schema();
        assert!(validate("CALL db.labels() YIELD label RETURN label", &schema).is_ok());
        assert!(validate("CALL apoc.meta.data() YIELD label RETURN label", &schema).is_ok());
        // subqueries are not procedures
        assert!(validate("CALL { MATCH (d:Dish) RETURN d } RETURN d.name", &schema).is_ok());
    }

    #[test]
    fn test_keyword_aliases_are_not_write_clauses() {
        let schema = restaurant_schema();
        assert!(validate("MATCH (d:Dish) RETURN d.name AS set", &schema).is_ok());
        assert!(validate("MATCH (d:Dish) WITH d AS delete RETURN delete.name", &schema).is_ok());
        assert!(matches!(
            validate("MATCH (d:Dish) WITH d AS x SET x.price = 1", &schema),
            Err(ValidationError::WriteClause(_))
        ));
    }

    #[test]
    fn test_keywords_inside_strings_are_fine() {
        let query = "MATCH (d:Dish) WHERE d.description = 'delete set create' RETURN d";
        assert!(validate(query, &restaurant_schema()).is_ok());
    }

    #[test]
    fn test_reversed_outgoing_arrow_is_flipped() {
        let validated =
            validate("MATCH (d:Dish)-[:SERVES]->(p:Place) RETURN p.name", &restaurant_schema()).unwrap();
        assert_eq!(validated.query, "MATCH (d:Dish)<-[:SERVES]-(p:Place) RETURN p.name");
        assert!(validated.corrected);
    }

    #[test]
    fn test_reversed_incoming_arrow_is_flipped() {
        let validated =
            validate("MATCH (p:Place)<-[:SERVES]-(d:Dish) RETURN d", &restaurant_schema()).unwrap();
        assert_eq!(validated.query, "MATCH (p:Place)-[:SERVES]->(d:Dish) RETURN d");
    }

    #[test]
    fn test_flip_uses_labels_bound_earlier() {
        let query = "MATCH (p:Place), (d:Dish) MATCH (d)-[:SERVES]->(p) RETURN p";
        let validated = validate(query, &restaurant_schema()).unwrap();
        assert_eq!(
            validated.query,
            "MATCH (p:Place), (d:Dish) MATCH (d)<-[:SERVES]-(p) RETURN p"
        );
    }

    #[test]
    fn test_impossible_pattern() {
        let err = validate("MATCH (p:Place)-[:TYPE_OF]->(d:Dish) RETURN p", &restaurant_schema()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedPattern {
                start: "Place".into(),
                rel_type: "TYPE_OF".into(),
                end: "Dish".into()
            }
        );
    }

    #[test]
    fn test_undirected_hop_accepted() {
        let query = "MATCH (d:Dish)-[:SERVES]-(p:Place) RETURN p";
        let validated = validate(query, &restaurant_schema()).unwrap();
        assert_eq!(validated.query, query);
    }

    #[test]
    fn test_syntax_errors() {
        let schema = restaurant_schema();
        assert!(matches!(validate("MATCH (d:Dish RETURN d", &schema), Err(ValidationError::Syntax(_))));
        assert!(matches!(validate("RETURN 'open", &schema), Err(ValidationError::Syntax(_))));
    }
}
