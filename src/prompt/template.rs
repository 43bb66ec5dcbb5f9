use std::collections::HashMap;

use crate::error::{ChainError, ChainResult};

/// A `{name}` placeholder template. `{{` and `}}` render literal braces.
///
/// Rendering is a single left-to-right pass: substituted values are copied
/// verbatim and never scanned for placeholders, so user text cannot open or
/// close a placeholder of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Build a template, collecting its variable names in order of first use.
    pub fn from_template(template: impl Into<String>) -> ChainResult<Self> {
        let template = template.into();
        let mut input_variables: Vec<String> = Vec::new();

        for segment in parse(&template)? {
            if let Segment::Variable(name) = segment {
                if !input_variables.iter().any(|v| v == name) {
                    input_variables.push(name.to_string());
                }
            }
        }

        Ok(Self {
            template,
            input_variables,
        })
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn format(&self, values: &HashMap<&str, &str>) -> ChainResult<String> {
        let mut out = String::with_capacity(self.template.len());

        for segment in parse(&self.template)? {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Brace(c) => out.push(c),
                Segment::Variable(name) => {
                    let value = values.get(name).ok_or_else(|| {
                        ChainError::Template(format!("missing value for '{name}'"))
                    })?;
                    out.push_str(value);
                }
            }
        }

        Ok(out)
    }
}

enum Segment<'a> {
    Text(&'a str),
    Brace(char),
    Variable(&'a str),
}

fn parse(template: &str) -> ChainResult<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(|c| c == '{' || c == '}') {
        if pos > 0 {
            segments.push(Segment::Text(&rest[..pos]));
        }
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            segments.push(Segment::Brace('{'));
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            segments.push(Segment::Brace('}'));
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            return Err(ChainError::Template(
                "unmatched '}' in template".to_string(),
            ));
        } else {
            let end = tail
                .find('}')
                .ok_or_else(|| ChainError::Template("unclosed '{' in template".to_string()))?;
            let name = tail[1..end].trim();
            if name.is_empty() || name.contains('{') {
                return Err(ChainError::Template(format!(
                    "invalid placeholder '{}'",
                    &tail[..=end]
                )));
            }
            segments.push(Segment::Variable(name));
            rest = &tail[end + 1..];
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_in_order() {
        let t = PromptTemplate::from_template("{schema} then {question} and {schema}").unwrap();
        assert_eq!(t.input_variables(), ["schema", "question"]);
    }

    #[test]
    fn test_substitution_is_single_pass() {
        let t = PromptTemplate::from_template("S={schema}\nQ={question}").unwrap();
        let values = HashMap::from([("schema", "Dish {name: STRING}"), ("question", "{schema}?")]);
        assert_eq!(t.format(&values).unwrap(), "S=Dish {name: STRING}\nQ={schema}?");
    }

    #[test]
    fn test_escaped_braces() {
        let t = PromptTemplate::from_template("RETURN {{count: {n}}}").unwrap();
        let values = HashMap::from([("n", "1")]);
        assert_eq!(t.format(&values).unwrap(), "RETURN {count: 1}");
        assert_eq!(t.input_variables(), ["n"]);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let t = PromptTemplate::from_template("{question}").unwrap();
        let err = t.format(&HashMap::new()).unwrap_err();
        assert!(matches!(err, ChainError::Template(_)));
    }

    #[test]
    fn test_malformed_templates() {
        assert!(PromptTemplate::from_template("oops {question").is_err());
        assert!(PromptTemplate::from_template("oops }").is_err());
        assert!(PromptTemplate::from_template("empty {}").is_err());
    }
}
