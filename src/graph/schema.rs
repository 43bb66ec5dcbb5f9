//! Structured view of the graph schema and its prompt rendering.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub property: String,
    #[serde(rename = "type")]
    pub prop_type: String,
}

impl Property {
    pub fn new(property: impl Into<String>, prop_type: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            prop_type: prop_type.into(),
        }
    }
}

/// One observed `(:start)-[:rel_type]->(:end)` pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationshipPattern {
    pub start: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub end: String,
}

impl RelationshipPattern {
    pub fn new(start: impl Into<String>, rel_type: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            rel_type: rel_type.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSchema {
    pub node_props: BTreeMap<String, Vec<Property>>,
    pub rel_props: BTreeMap<String, Vec<Property>>,
    pub relationships: Vec<RelationshipPattern>,
}

impl GraphSchema {
    /// Register a label with no properties. Existing properties are kept.
    pub fn add_label(&mut self, label: impl Into<String>) {
        self.node_props.entry(label.into()).or_default();
    }

    pub fn add_node_property(&mut self, label: impl Into<String>, property: Property) {
        let props = self.node_props.entry(label.into()).or_default();
        if !props.iter().any(|p| p.property == property.property) {
            props.push(property);
        }
    }

    pub fn add_rel_type(&mut self, rel_type: impl Into<String>) {
        self.rel_props.entry(rel_type.into()).or_default();
    }

    pub fn add_rel_property(&mut self, rel_type: impl Into<String>, property: Property) {
        let props = self.rel_props.entry(rel_type.into()).or_default();
        if !props.iter().any(|p| p.property == property.property) {
            props.push(property);
        }
    }

    pub fn add_relationship(&mut self, pattern: RelationshipPattern) {
        self.add_label(pattern.start.clone());
        self.add_label(pattern.end.clone());
        self.add_rel_type(pattern.rel_type.clone());
        if !self.relationships.contains(&pattern) {
            self.relationships.push(pattern);
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.node_props.contains_key(label)
    }

    pub fn has_rel_type(&self, rel_type: &str) -> bool {
        self.rel_props.contains_key(rel_type)
            || self.relationships.iter().any(|r| r.rel_type == rel_type)
    }

    pub fn label_has_property(&self, label: &str, property: &str) -> bool {
        self.node_props
            .get(label)
            .is_some_and(|props| props.iter().any(|p| p.property == property))
    }

    pub fn rel_has_property(&self, rel_type: &str, property: &str) -> bool {
        self.rel_props
            .get(rel_type)
            .is_some_and(|props| props.iter().any(|p| p.property == property))
    }

    /// True if any label or relationship type carries the property.
    pub fn has_property(&self, property: &str) -> bool {
        self.node_props
            .values()
            .chain(self.rel_props.values())
            .flatten()
            .any(|p| p.property == property)
    }

    pub fn has_pattern(&self, start: &str, rel_type: &str, end: &str) -> bool {
        self.relationships
            .iter()
            .any(|r| r.start == start && r.rel_type == rel_type && r.end == end)
    }

    pub fn is_empty(&self) -> bool {
        self.node_props.is_empty() && self.rel_props.is_empty() && self.relationships.is_empty()
    }

    /// Text form embedded in the generation prompt.
    pub fn to_prompt_text(&self) -> String {
        let node_lines = self
            .node_props
            .iter()
            .map(|(label, props)| format!("{} {}", label, format_props(props)))
            .collect::<Vec<_>>()
            .join("\n");

        let rel_lines = self
            .rel_props
            .iter()
            .filter(|(_, props)| !props.is_empty())
            .map(|(rel_type, props)| format!("{} {}", rel_type, format_props(props)))
            .collect::<Vec<_>>()
            .join("\n");

        let mut patterns = self.relationships.clone();
        patterns.sort();
        let pattern_lines = patterns
            .iter()
            .map(|r| format!("(:{})-[:{}]->(:{})", r.start, r.rel_type, r.end))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Node properties:\n{}\nRelationship properties:\n{}\nThe relationships:\n{}",
            node_lines, rel_lines, pattern_lines
        )
    }
}

fn format_props(props: &[Property]) -> String {
    let inner = props
        .iter()
        .map(|p| format!("{}: {}", p.property, p.prop_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", inner)
}
