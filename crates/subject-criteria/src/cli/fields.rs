//! Fields command implementation

use super::output::{self, OutputFormat};
use anyhow::Result;
use serde::Serialize;
use subject_criteria_catalog::{FieldCatalog, FieldSpec, normalize_key};
use tabled::{Table, Tabled, settings::Style};

/// One catalog entry as listed by `fields`
#[derive(Debug, Serialize, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Aliases")]
    pub aliases: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub value_type: String,
    #[tabled(rename = "Accepts")]
    pub accepts: String,
    #[tabled(rename = "Column")]
    pub column: String,
}

impl From<&FieldSpec> for FieldRow {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            field: spec.field.to_string(),
            aliases: spec.aliases.join(", "),
            value_type: spec.value_type.to_string(),
            accepts: spec.accepts.to_string(),
            column: spec
                .column
                .column()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Catalog rows, optionally filtered by a substring of the field or an alias
pub fn field_rows(catalog: &FieldCatalog, filter: Option<&str>) -> Vec<FieldRow> {
    let filter = filter.map(normalize_key);
    catalog
        .iter()
        .filter(|spec| match &filter {
            Some(needle) => spec.names().any(|name| name.contains(needle.as_str())),
            None => true,
        })
        .map(FieldRow::from)
        .collect()
}

/// List the field catalog
pub fn fields(filter: Option<&str>, format: OutputFormat) -> Result<()> {
    let catalog = FieldCatalog::global()?;
    let rows = field_rows(catalog, filter);
    output::print(&rows, format, || {
        let mut table = Table::new(&rows);
        table.with(Style::modern());
        format!(
            "{}\n{} field(s), catalog version {}",
            table,
            rows.len(),
            catalog.version()
        )
    })
}
