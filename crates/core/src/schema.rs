use std::collections::HashMap;
use std::fmt;

use crate::types::{MediaRow, MediaValue};

/// Comparison type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field shows up in the markdown table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Never displayed; exists for sorting and statistics.
    Internal,
    /// Displayed only when every field is requested.
    Hidden,
    /// Folded into the displayed value of the named field.
    MergedInto(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub alias: Option<&'static str>,
    pub visibility: Visibility,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            alias: None,
            visibility: Visibility::Visible,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldType::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn internal(mut self) -> Self {
        self.visibility = Visibility::Internal;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::Hidden;
        self
    }

    pub fn merged_into(mut self, target: &'static str) -> Self {
        self.visibility = Visibility::MergedInto(target);
        self
    }
}

/// Ordered set of field descriptors with alias lookup.
///
/// Field order is the column order of the rendered table and the key order of
/// every row built from the schema.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<&'static str, usize>,
    by_alias: HashMap<&'static str, usize>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut by_alias = HashMap::new();
        for (idx, field) in fields.iter().enumerate() {
            by_name.insert(field.name, idx);
            if let Some(alias) = field.alias {
                by_alias.insert(alias, idx);
            }
        }
        Self {
            fields,
            by_name,
            by_alias,
        }
    }

    /// Look up a field by canonical name, then by alias.
    pub fn resolve(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .map(|&idx| &self.fields[idx])
    }

    pub fn resolve_name(&self, name: &str) -> Option<&'static str> {
        self.resolve(name).map(|f| f.name)
    }

    /// Canonical-name lookup only.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Fields folded into `target` for display.
    pub fn merged_into<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a FieldDescriptor> {
        self.fields
            .iter()
            .filter(move |f| matches!(f.visibility, Visibility::MergedInto(t) if t == target))
    }

    /// A row holding every schema field, all absent.
    pub fn empty_row(&self) -> MediaRow {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), MediaValue::Absent))
            .collect()
    }

    /// Copy of the schema with `extra` inserted right after the field `after`.
    pub fn with_fields_after(&self, after: &str, extra: Vec<FieldDescriptor>) -> Self {
        let pos = self
            .fields
            .iter()
            .position(|f| f.name == after)
            .map_or(self.fields.len(), |p| p + 1);
        let mut fields = self.fields.clone();
        fields.splice(pos..pos, extra);
        Self::new(fields)
    }
}
