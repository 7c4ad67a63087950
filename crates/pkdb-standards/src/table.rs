#![deny(unsafe_code)]

use pkdb_model::MeasurementTypeDefinition;
use serde::{Deserialize, Serialize};

pub const TABLE_SCHEMA: &str = "pkdb.measurement-types";
pub const TABLE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementTypeTable {
    pub catalog: TableHeader,
    #[serde(default, rename = "measurement_type")]
    pub measurement_types: Vec<MeasurementTypeDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableHeader {
    pub schema: String,
    pub schema_version: u32,
}
