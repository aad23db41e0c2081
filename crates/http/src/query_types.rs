//! Request/query types (Deserialize)

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub subject: String,
    pub test_item: String,
}

/// Registry entry form. `identifier` stays textual so the service can
/// report a non-integer value as a validation failure.
#[derive(Debug, Deserialize)]
pub struct RegistryForm {
    pub local_name: String,
    #[serde(default)]
    pub external_name: String,
    pub identifier: String,
}
