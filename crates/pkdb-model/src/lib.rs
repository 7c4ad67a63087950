#![deny(unsafe_code)]

pub mod catalog;
pub mod enums;
pub mod error;
pub mod ids;
pub mod measurement_type;
pub mod record;
pub mod violation;

pub use catalog::MeasurementTypeCatalog;
pub use enums::{DataKind, RecordField};
pub use error::ModelError;
pub use ids::InfoNodeId;
pub use measurement_type::{
    Annotation, CAN_BE_NEGATIVE, MeasurementType, MeasurementTypeDefinition,
    MeasurementTypeInfo, TIME_REQUIRED,
};
pub use record::{Record, StatValue};
pub use violation::{Violation, ViolationPayload, Violations};
