use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::prompts::DEFAULT_SYSTEM_PROMPT;

/// A named voice profile used to condition generated text.
///
/// Attribute values are free-form JSON; rosters in the wild mix plain
/// strings ("personality": "insightful") with lists ("expertise":
/// ["finance", "investing"]).
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub name: String,
    pub attributes: Map<String, Value>,
}

impl Persona {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Attribute block interpolated into generation prompts.
    pub fn attribute_block(&self) -> String {
        serde_json::to_string(&self.attributes).unwrap_or_default()
    }

    /// System prompt for chat. Personas without an explicit
    /// `system_prompt` attribute fall back to a neutral one.
    pub fn system_prompt(&self) -> String {
        self.attributes
            .get("system_prompt")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
            .to_string()
    }
}

/// A roster of personas loaded from a JSON file mapping persona name to
/// an attribute object. Personas keep the order the file lists them in.
#[derive(Debug, Clone, Default)]
pub struct PersonaRoster {
    personas: Vec<Persona>,
}

impl PersonaRoster {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read persona file: {}", path.display()))?;
        let table: Map<String, Value> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse persona file: {}", path.display()))?;

        let mut personas = Vec::new();
        for (name, value) in table {
            let attributes = match value {
                Value::Object(map) => map,
                other => bail!("Persona '{}' must map to an attribute object, got {}", name, other),
            };
            personas.push(Persona { name, attributes });
        }

        if personas.is_empty() {
            bail!("Persona file {} defines no personas", path.display());
        }

        Ok(Self { personas })
    }

    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn names(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
