use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-run pattern"));

/// Values substituted into a [`Template`].
#[derive(Debug, Default, Clone)]
pub struct TemplateVars {
    values: HashMap<&'static str, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(name, value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// A markdown template with `{{ name }}` placeholders.
///
/// Unset placeholders render empty. Blank lines left behind by empty
/// values are collapsed, and the result never starts or ends with a newline.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    pub fn render(&self, vars: &TemplateVars) -> String {
        let substituted = PLACEHOLDER.replace_all(self.source, |caps: &Captures| {
            vars.get(&caps[1]).unwrap_or_default().to_string()
        });

        BLANK_RUN
            .replace_all(&substituted, "\n\n")
            .trim_matches('\n')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_substituted() {
        let template = Template::new("## {{ name }}\n\n{{description}}");
        let vars = TemplateVars::new()
            .set("name", "Patients")
            .set("description", "A patient cohort.");

        assert_eq!(template.render(&vars), "## Patients\n\nA patient cohort.");
    }

    #[test]
    fn test_missing_values_leave_no_gaps() {
        let template = Template::new("## {{ name }}\n\n{{ description }}\n\n{{ blocks }}");
        let vars = TemplateVars::new().set("name", "Patients");

        assert_eq!(template.render(&vars), "## Patients");
    }

    #[test]
    fn test_values_are_not_reexpanded() {
        let template = Template::new("{{ a }}");
        let vars = TemplateVars::new().set("a", "{{ b }}").set("b", "nope");

        assert_eq!(template.render(&vars), "{{ b }}");
    }
}
