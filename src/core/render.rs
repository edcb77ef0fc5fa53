//! Markdown fragments for backend, contract and spec entries.
//!
//! Each entry kind has a fixed [`Template`]. Fields the template does not
//! name explicitly are rendered as labeled blocks, in the order they appear
//! in the data file.

use crate::core::template::{Template, TemplateVars};
use crate::domain::model::{
    parse_entry, BackendEntry, ContractColumn, ContractEntry, DataDocument, SpecEntry,
    SpecSection,
};
use crate::utils::error::Result;
use serde_json::{Map, Value};

const BACKEND_TEMPLATE: Template = Template::new(
    "## {{ name }}\n\
     \n\
     {{ description }}\n\
     \n\
     {{ blocks }}",
);

const CONTRACT_TEMPLATE: Template = Template::new(
    "## {{ name }}\n\
     \n\
     {{ description }}\n\
     \n\
     {{ columns }}\n\
     \n\
     {{ blocks }}",
);

const SPEC_TEMPLATE: Template = Template::new(
    "## {{ heading }}\n\
     \n\
     {{ description }}\n\
     \n\
     {{ sections }}\n\
     \n\
     {{ blocks }}",
);

const SPEC_SECTION_TEMPLATE: Template = Template::new(
    "### {{ heading }}\n\
     \n\
     {{ description }}\n\
     \n\
     {{ blocks }}",
);

const ENTRY_SEPARATOR: &str = "\n\n";

pub fn render_backend(data: &DataDocument, identifier: &str) -> Result<String> {
    let value = data.backend(identifier)?;
    let entry: BackendEntry = parse_entry("backend", identifier, value)?;

    let vars = TemplateVars::new()
        .set("name", entry.name)
        .set("description", entry.description.unwrap_or_default())
        .set("blocks", render_blocks(&entry.extra));

    Ok(BACKEND_TEMPLATE.render(&vars))
}

/// Renders every contract, in stored order. An empty list renders empty.
pub fn render_contracts(contracts: &[Value]) -> Result<String> {
    let mut rendered = Vec::with_capacity(contracts.len());
    for (index, value) in contracts.iter().enumerate() {
        let entry: ContractEntry = parse_entry("contract", &index.to_string(), value)?;
        rendered.push(render_contract(entry));
    }
    Ok(rendered.join(ENTRY_SEPARATOR))
}

fn render_contract(entry: ContractEntry) -> String {
    let vars = TemplateVars::new()
        .set("name", entry.name)
        .set("description", entry.description.unwrap_or_default())
        .set("columns", render_columns(&entry.columns))
        .set("blocks", render_blocks(&entry.extra));

    CONTRACT_TEMPLATE.render(&vars)
}

fn render_columns(columns: &[ContractColumn]) -> String {
    if columns.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        "| Column | Type | Description | Constraints |".to_string(),
        "| --- | --- | --- | --- |".to_string(),
    ];
    for column in columns {
        lines.push(format!(
            "| `{}` | {} | {} | {} |",
            column.name,
            escape_cell(column.column_type.as_deref().unwrap_or_default()),
            escape_cell(column.description.as_deref().unwrap_or_default()),
            escape_cell(&column.constraints.join("; ")),
        ));
    }
    lines.join("\n")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Renders every spec, in stored order. An empty list renders empty.
pub fn render_specs(specs: &[Value]) -> Result<String> {
    let mut rendered = Vec::with_capacity(specs.len());
    for (index, value) in specs.iter().enumerate() {
        let entry: SpecEntry = parse_entry("spec", &index.to_string(), value)?;
        rendered.push(render_spec(entry));
    }
    Ok(rendered.join(ENTRY_SEPARATOR))
}

fn render_spec(entry: SpecEntry) -> String {
    let sections = entry
        .sections
        .iter()
        .map(render_spec_section)
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR);

    let vars = TemplateVars::new()
        .set("heading", heading(entry.id.as_deref(), &entry.title))
        .set("description", entry.description.unwrap_or_default())
        .set("sections", sections)
        .set("blocks", render_blocks(&entry.extra));

    SPEC_TEMPLATE.render(&vars)
}

fn render_spec_section(section: &SpecSection) -> String {
    let vars = TemplateVars::new()
        .set("heading", heading(section.id.as_deref(), &section.title))
        .set("description", section.description.clone().unwrap_or_default())
        .set("blocks", render_blocks(&section.extra));

    SPEC_SECTION_TEMPLATE.render(&vars)
}

fn heading(id: Option<&str>, title: &str) -> String {
    match id {
        Some(id) if !id.is_empty() => format!("{} {}", id, title),
        _ => title.to_string(),
    }
}

/// Renders each field as a labeled block, separated by blank lines.
pub fn render_blocks(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .filter_map(|(key, value)| render_block(key, value))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

fn render_block(key: &str, value: &Value) -> Option<String> {
    let label = label(key);
    match value {
        Value::Null => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) => {
            let bullets: Vec<String> = items.iter().map(array_bullet).collect();
            Some(format!("**{}**\n\n{}", label, bullets.join("\n")))
        }
        Value::Object(map) => {
            let bullets: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("- {}: {}", k, scalar_text(v)))
                .collect();
            Some(format!("**{}**\n\n{}", label, bullets.join("\n")))
        }
        scalar => Some(format!("**{}**: {}", label, scalar_text(scalar))),
    }
}

fn array_bullet(item: &Value) -> String {
    match item {
        Value::Object(map) => {
            let name = map
                .get("name")
                .or_else(|| map.get("title"))
                .and_then(Value::as_str);
            let description = map
                .get("description")
                .or_else(|| map.get("docstring"))
                .and_then(Value::as_str);
            match (name, description) {
                (Some(name), Some(description)) => format!("- **{}**: {}", name, description),
                (Some(name), None) => format!("- **{}**", name),
                _ => format!("- `{}`", item),
            }
        }
        other => format!("- {}", scalar_text(other)),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => format!("`{}`", value),
        other => other.to_string(),
    }
}

fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
