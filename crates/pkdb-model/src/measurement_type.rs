//! Measurement type definitions.
//!
//! A [`MeasurementTypeDefinition`] is one row of the configuration table as
//! written by a curator. [`MeasurementType::from_definition`] resolves its unit
//! strings against a [`UnitRegistry`] once, fixing the allowed dimensions and
//! the canonical unit per dimension.

use std::collections::BTreeMap;

use pkdb_units::{Dimension, NO_UNIT, Unit, UnitRegistry};
use serde::{Deserialize, Serialize};

use crate::enums::DataKind;
use crate::error::ModelError;
use crate::ids::InfoNodeId;

/// Types that need an accompanying `time` and `time_unit` unless the row
/// says otherwise.
pub const TIME_REQUIRED: &[&str] = &[
    "cumulative amount",
    "cumulative metabolic ratio",
    "recovery",
    "auc_end",
];

/// Types whose statistical fields may be negative unless the row says
/// otherwise.
pub const CAN_BE_NEGATIVE: &[&str] = &[];

/// Ontology annotation attached to a measurement type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub term: String,
    pub relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Annotation {
    pub fn render(&self) -> String {
        format!("relation <{}>:, {}", self.relation, self.term)
    }
}

/// One row of the measurement-type table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasurementTypeDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_slug: Option<String>,
    pub dtype: DataKind,
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_negative: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_node: Option<InfoNodeId>,
}

impl MeasurementTypeDefinition {
    pub fn new(name: impl Into<String>, dtype: DataKind) -> Self {
        Self {
            name: name.into(),
            url_slug: None,
            dtype,
            units: Vec::new(),
            choices: Vec::new(),
            requires_time: None,
            can_be_negative: None,
            creator: None,
            description: None,
            synonyms: Vec::new(),
            annotations: Vec::new(),
            info_node: None,
        }
    }

    pub fn with_units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units = units.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_requires_time(mut self, requires_time: bool) -> Self {
        self.requires_time = Some(requires_time);
        self
    }

    pub fn with_can_be_negative(mut self, can_be_negative: bool) -> Self {
        self.can_be_negative = Some(can_be_negative);
        self
    }
}

/// A measurement type with its units resolved.
#[derive(Debug, Clone)]
pub struct MeasurementType {
    name: String,
    url_slug: String,
    data_kind: DataKind,
    units: Vec<Unit>,
    canonical: BTreeMap<Dimension, usize>,
    choices: Vec<String>,
    requires_time: bool,
    can_be_negative: bool,
    creator: Option<String>,
    description: Option<String>,
    synonyms: Vec<String>,
    annotations: Vec<Annotation>,
    described_by: Option<InfoNodeId>,
}

impl MeasurementType {
    /// Resolve a table row. The first listed unit of each dimension becomes
    /// that dimension's canonical unit.
    pub fn from_definition(
        definition: MeasurementTypeDefinition,
        registry: &UnitRegistry,
    ) -> Result<Self, ModelError> {
        let name = definition.name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }

        let mut units = Vec::with_capacity(definition.units.len());
        let mut canonical = BTreeMap::new();
        for unit in &definition.units {
            let resolved = registry
                .resolve(unit)
                .map_err(|source| ModelError::InvalidUnit {
                    measurement_type: name.clone(),
                    unit: unit.clone(),
                    source,
                })?;
            canonical
                .entry(resolved.dimension().clone())
                .or_insert(units.len());
            units.push(resolved);
        }

        let requires_time = definition
            .requires_time
            .unwrap_or_else(|| TIME_REQUIRED.contains(&name.as_str()));
        let can_be_negative = definition
            .can_be_negative
            .unwrap_or_else(|| CAN_BE_NEGATIVE.contains(&name.as_str()));
        let url_slug = definition.url_slug.unwrap_or_else(|| slugify(&name));

        Ok(Self {
            name,
            url_slug,
            data_kind: definition.dtype,
            units,
            canonical,
            choices: definition.choices,
            requires_time,
            can_be_negative,
            creator: definition.creator,
            description: definition.description,
            synonyms: definition.synonyms,
            annotations: definition.annotations,
            described_by: definition.info_node,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url_slug(&self) -> &str {
        &self.url_slug
    }

    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    pub fn allowed_units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.units.iter().map(Unit::name).collect()
    }

    /// True if the type lists the `NO_UNIT` sentinel.
    pub fn allows_no_unit(&self) -> bool {
        self.units.iter().any(|unit| unit.name() == NO_UNIT)
    }

    /// Canonical unit for a dimension, if the type supports it.
    pub fn canonical_unit(&self, dimension: &Dimension) -> Option<&Unit> {
        self.canonical.get(dimension).map(|index| &self.units[*index])
    }

    /// Canonical units in the order they were listed.
    pub fn canonical_units(&self) -> Vec<&Unit> {
        let mut indices: Vec<usize> = self.canonical.values().copied().collect();
        indices.sort_unstable();
        indices.into_iter().map(|index| &self.units[index]).collect()
    }

    /// Supported dimensions in the order their canonical units were listed.
    pub fn allowed_dimensions(&self) -> Vec<&Dimension> {
        self.canonical_units()
            .into_iter()
            .map(Unit::dimension)
            .collect()
    }

    pub fn supports_dimension(&self, dimension: &Dimension) -> bool {
        self.canonical.contains_key(dimension)
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_valid_choice(&self, choice: &str) -> bool {
        self.choices.iter().any(|allowed| allowed == choice)
    }

    pub fn requires_time(&self) -> bool {
        self.requires_time
    }

    pub fn can_be_negative(&self) -> bool {
        self.can_be_negative
    }

    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn described_by(&self) -> Option<&InfoNodeId> {
        self.described_by.as_ref()
    }

    pub fn describe(&self) -> MeasurementTypeInfo {
        MeasurementTypeInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            annotations: self.annotations.iter().map(Annotation::render).collect(),
            url_slug: self.url_slug.clone(),
            dtype: self.data_kind,
            choices: self.choices.clone(),
            units: self.unit_names().into_iter().map(str::to_string).collect(),
            canonical_units: self
                .canonical_units()
                .into_iter()
                .map(|unit| unit.name().to_string())
                .collect(),
            valid_unit_dimensions: self
                .allowed_dimensions()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            requires_time: self.requires_time,
            can_be_negative: self.can_be_negative,
            creator: self.creator.clone(),
            described_by: self.described_by.clone(),
        }
    }
}

/// Serializable summary of a measurement type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementTypeInfo {
    pub name: String,
    pub description: Option<String>,
    pub annotations: Vec<String>,
    pub url_slug: String,
    pub dtype: DataKind,
    pub choices: Vec<String>,
    pub units: Vec<String>,
    pub canonical_units: Vec<String>,
    pub valid_unit_dimensions: Vec<String>,
    pub requires_time: bool,
    pub can_be_negative: bool,
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub described_by: Option<InfoNodeId>,
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}
