use serde::{Deserialize, Serialize};
use swift_query::{FieldType, FieldTypes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Collection holding the song records.
    pub collection: String,
    /// Declared types of filterable fields; anything not listed is a string.
    pub field_types: FieldTypes,
    /// Field summed by the album roll-up when the request has no sort.
    pub album_sum_field: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let numbers = ["year", "plays", "plays-june", "plays-july", "plays-august"];
        Self {
            collection: "taylorsongs".into(),
            field_types: numbers
                .into_iter()
                .map(|field| (field.to_string(), FieldType::Number))
                .collect(),
            album_sum_field: "plays".into(),
        }
    }
}
