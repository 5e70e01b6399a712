//! Entity sheets: which components (with which field values) and which
//! capabilities make up one kind of entity.
//!
//! # CSV format
//!
//! One row per component, property or capability, in the order they should
//! be applied.  `field`, `type` and `value` are empty except on property
//! rows.  Lines starting with `#` are comments.
//!
//! ```csv
//! kind,name,field,type,value
//! component,Health,,,
//! property,Health,max,float,100
//! property,Health,regen,bool,true
//! capability,Regenerate,,,
//! ```
//!
//! A property row must name a component declared on an earlier row.
//! Declaring the same component twice merges its properties into the first
//! declaration.  See [`PropertyValue`] for the `type` tags.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{AssemblyError, AssemblyResult, PropertyValue};

// ── Sheet model ───────────────────────────────────────────────────────────────

/// One field assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertySpec {
    pub field: String,
    pub value: PropertyValue,
}

/// A component to attach, by catalog name, and the fields to set on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentSpec {
    pub name:       String,
    pub properties: Vec<PropertySpec>,
}

/// Everything needed to assemble one entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    /// Applied in order, before any capability is created.
    pub components:   Vec<ComponentSpec>,
    /// Capability catalog names, instantiated in order.
    pub capabilities: Vec<String>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component with the given field values.
    pub fn with_component<I, F>(mut self, name: &str, properties: I) -> Self
    where
        I: IntoIterator<Item = (F, PropertyValue)>,
        F: Into<String>,
    {
        let spec = self.component_entry(name);
        spec.properties.extend(
            properties
                .into_iter()
                .map(|(field, value)| PropertySpec { field: field.into(), value }),
        );
        self
    }

    /// Add a capability by catalog name.
    pub fn with_capability(mut self, name: &str) -> Self {
        self.capabilities.push(name.to_string());
        self
    }

    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.capabilities.is_empty()
    }

    fn component_entry(&mut self, name: &str) -> &mut ComponentSpec {
        let pos = match self.components.iter().position(|c| c.name == name) {
            Some(pos) => pos,
            None => {
                self.components.push(ComponentSpec { name: name.to_string(), properties: Vec::new() });
                self.components.len() - 1
            }
        };
        &mut self.components[pos]
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SheetRecord {
    kind:  String,
    name:  String,
    #[serde(default)]
    field: String,
    #[serde(rename = "type", default)]
    value_type: String,
    #[serde(default)]
    value: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Sheet`] from a CSV file.
pub fn load_sheet_csv(path: &Path) -> AssemblyResult<Sheet> {
    let file = std::fs::File::open(path).map_err(AssemblyError::Io)?;
    load_sheet_reader(file)
}

/// Like [`load_sheet_csv`] but accepts any `Read` source.
///
/// Useful for tests (pass a `std::io::Cursor`) or sheets embedded with
/// `include_str!`.
pub fn load_sheet_reader<R: Read>(reader: R) -> AssemblyResult<Sheet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut sheet = Sheet::new();
    for (row, result) in csv_reader.deserialize::<SheetRecord>().enumerate() {
        let record = result.map_err(|e| AssemblyError::Parse(e.to_string()))?;
        apply_record(&mut sheet, record).map_err(|e| match e {
            AssemblyError::Parse(msg) => AssemblyError::Parse(format!("row {}: {msg}", row + 1)),
            other => other,
        })?;
    }
    Ok(sheet)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn apply_record(sheet: &mut Sheet, record: SheetRecord) -> AssemblyResult<()> {
    if record.name.is_empty() {
        return Err(AssemblyError::Parse("empty name".into()));
    }
    match record.kind.to_ascii_lowercase().as_str() {
        "component" => {
            sheet.component_entry(&record.name);
        }
        "capability" => sheet.capabilities.push(record.name),
        "property" => {
            if record.field.is_empty() {
                return Err(AssemblyError::Parse(format!(
                    "property row for {:?} has no field name",
                    record.name
                )));
            }
            let value = PropertyValue::parse(&record.value_type, &record.value)?;
            let spec = sheet
                .components
                .iter_mut()
                .find(|c| c.name == record.name)
                .ok_or_else(|| {
                    AssemblyError::Parse(format!(
                        "property {:?} refers to undeclared component {:?}",
                        record.field, record.name
                    ))
                })?;
            spec.properties.push(PropertySpec { field: record.field, value });
        }
        other => {
            return Err(AssemblyError::Parse(format!(
                "unknown row kind {other:?}: expected \"component\", \"property\" or \"capability\""
            )));
        }
    }
    Ok(())
}
