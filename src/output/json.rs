//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the response
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp of the response
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    /// Create a new JSON output with metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(data);
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize)]
    struct TestItem {
        name: String,
        count: usize,
    }

    #[test]
    fn test_format_json_wraps_data_and_meta() {
        let item = TestItem {
            name: "portfolio".to_string(),
            count: 3,
        };

        let json = format_json(&item).unwrap();

        assert!(json.contains("\"data\""));
        assert!(json.contains("\"meta\""));
        assert!(json.contains("\"portfolio\""));
        assert!(json.contains("\"version\""));
    }

    #[test]
    fn test_format_json_timestamp_is_rfc3339() {
        let json = format_json(&TestItem {
            name: "x".to_string(),
            count: 0,
        })
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let timestamp = value["meta"]["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}
