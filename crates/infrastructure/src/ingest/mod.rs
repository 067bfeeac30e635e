//! Input-file ingestion
//!
//! Parses CSV, JSON, JSONL, and plain-text files into a uniform list of
//! raw items for the record normalizer. Every ingestion failure is fatal
//! to the run: the pipeline never proceeds with a partially parsed input
//! set.

use std::fs;
use std::path::Path;

use application::RawItem;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading an input file
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file does not exist
    #[error("Input file not found: {0}")]
    NotFound(String),

    /// File extension gives no usable format hint
    #[error("Could not infer format from extension '{0}'; specify the format explicitly")]
    UnknownFormat(String),

    /// File content could not be parsed in the selected format
    #[error("Failed to parse {format} input: {message}")]
    Parse { format: InputFormat, message: String },

    /// Underlying I/O failure
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Csv,
    Json,
    Jsonl,
    Txt,
}

impl InputFormat {
    /// Infer the format from a file extension
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "jsonl" => Some(Self::Jsonl),
            "txt" | "log" => Some(Self::Txt),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Jsonl => "jsonl",
            Self::Txt => "txt",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "jsonl" => Ok(Self::Jsonl),
            "txt" | "log" | "text" => Ok(Self::Txt),
            other => Err(format!("Unsupported input format: {other}")),
        }
    }
}

/// Load raw items from an input file
///
/// The format is taken from `format_override` when given, otherwise
/// sniffed from the file extension.
pub fn load_items(path: &Path, format_override: Option<InputFormat>) -> Result<Vec<RawItem>, IngestError> {
    if !path.exists() {
        return Err(IngestError::NotFound(path.display().to_string()));
    }

    let format = match format_override {
        Some(format) => format,
        None => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default();
            InputFormat::from_extension(ext)
                .ok_or_else(|| IngestError::UnknownFormat(format!(".{ext}")))?
        },
    };

    debug!(path = %path.display(), %format, "Loading input file");

    let items = match format {
        InputFormat::Csv => load_csv(path)?,
        InputFormat::Json => load_json(path)?,
        InputFormat::Jsonl => load_jsonl(path)?,
        InputFormat::Txt => load_txt(path)?,
    };

    info!(count = items.len(), %format, "Input loaded");
    Ok(items)
}

fn load_csv(path: &Path) -> Result<Vec<RawItem>, IngestError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| parse_err(InputFormat::Csv, e))?;
    let headers = reader
        .headers()
        .map_err(|e| parse_err(InputFormat::Csv, e))?
        .clone();

    let mut items = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| parse_err(InputFormat::Csv, e))?;
        let mut fields = serde_json::Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            fields.insert(header.to_string(), Value::String(cell.to_string()));
        }
        items.push(RawItem::Fields(fields));
    }
    Ok(items)
}

fn load_json(path: &Path) -> Result<Vec<RawItem>, IngestError> {
    let content = fs::read_to_string(path)?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| parse_err(InputFormat::Json, e))?;

    match value {
        Value::Array(entries) => Ok(entries.into_iter().map(value_to_item).collect()),
        Value::Object(map) => {
            // A single object is accepted when it wraps a list of prompts,
            // e.g. {"prompts": ["...", "..."]}
            for (_, field) in map {
                if let Value::Array(entries) = field {
                    return Ok(entries.into_iter().map(value_to_item).collect());
                }
            }
            Err(IngestError::Parse {
                format: InputFormat::Json,
                message: "expected an array of items or an object wrapping one".to_string(),
            })
        },
        _ => Err(IngestError::Parse {
            format: InputFormat::Json,
            message: "expected an array of items".to_string(),
        }),
    }
}

fn load_jsonl(path: &Path) -> Result<Vec<RawItem>, IngestError> {
    let content = fs::read_to_string(path)?;
    let mut items = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value =
            serde_json::from_str(line).map_err(|e| parse_err(InputFormat::Jsonl, e))?;
        items.push(value_to_item(value));
    }
    Ok(items)
}

fn load_txt(path: &Path) -> Result<Vec<RawItem>, IngestError> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| RawItem::Text(line.trim().to_string()))
        .collect())
}

/// Convert a parsed JSON value to a raw item, stringifying scalars
fn value_to_item(value: Value) -> RawItem {
    match value {
        Value::Object(map) => RawItem::Fields(map),
        Value::String(s) => RawItem::Text(s),
        other => RawItem::Text(other.to_string()),
    }
}

fn parse_err(format: InputFormat, err: impl std::fmt::Display) -> IngestError {
    IngestError::Parse {
        format,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_items(Path::new("/does/not/exist.csv"), None).unwrap_err();
        assert!(matches!(err, IngestError::NotFound(_)));
    }

    #[test]
    fn unknown_extension_without_override_fails() {
        let file = temp_with(".dat", "whatever");
        let err = load_items(file.path(), None).unwrap_err();
        assert!(matches!(err, IngestError::UnknownFormat(_)));
    }

    #[test]
    fn override_beats_extension() {
        let file = temp_with(".dat", "one prompt\nanother prompt\n");
        let items = load_items(file.path(), Some(InputFormat::Txt)).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn csv_rows_become_field_maps() {
        let file = temp_with(".csv", "prompt,ts\nhello,2024-05-01\nworld,2024-05-02\n");
        let items = load_items(file.path(), None).unwrap();
        assert_eq!(items.len(), 2);
        match &items[0] {
            RawItem::Fields(fields) => {
                assert_eq!(fields.get("prompt"), Some(&Value::String("hello".into())));
                assert_eq!(fields.get("ts"), Some(&Value::String("2024-05-01".into())));
            },
            RawItem::Text(_) => unreachable!("CSV rows must be field maps"),
        }
    }

    #[test]
    fn malformed_csv_is_a_parse_error() {
        let file = temp_with(".csv", "prompt,ts\n\"unterminated\n");
        let err = load_items(file.path(), None).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }

    #[test]
    fn json_array_of_mixed_items() {
        let file = temp_with(".json", r#"[{"prompt": "a"}, "bare string", 42]"#);
        let items = load_items(file.path(), None).unwrap();
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0], RawItem::Fields(_)));
        assert_eq!(items[1], RawItem::Text("bare string".to_string()));
        assert_eq!(items[2], RawItem::Text("42".to_string()));
    }

    #[test]
    fn json_object_wrapping_a_list() {
        let file = temp_with(".json", r#"{"prompts": ["a", "b"]}"#);
        let items = load_items(file.path(), None).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn json_scalar_root_is_rejected() {
        let file = temp_with(".json", "42");
        let err = load_items(file.path(), None).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }

    #[test]
    fn jsonl_lines_parse_individually() {
        let file = temp_with(".jsonl", "{\"prompt\": \"a\"}\n\n\"bare\"\n");
        let items = load_items(file.path(), None).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn jsonl_with_bad_line_fails_whole_file() {
        let file = temp_with(".jsonl", "{\"prompt\": \"a\"}\nnot json\n");
        let err = load_items(file.path(), None).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }

    #[test]
    fn txt_skips_blank_lines() {
        let file = temp_with(".txt", "first\n\n  \nsecond\n");
        let items = load_items(file.path(), None).unwrap();
        assert_eq!(
            items,
            vec![
                RawItem::Text("first".to_string()),
                RawItem::Text("second".to_string())
            ]
        );
    }

    #[test]
    fn log_extension_is_plain_text() {
        let file = temp_with(".log", "a line\n");
        let items = load_items(file.path(), None).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!("CSV".parse::<InputFormat>().unwrap(), InputFormat::Csv);
        assert_eq!("jsonl".parse::<InputFormat>().unwrap(), InputFormat::Jsonl);
        assert!("parquet".parse::<InputFormat>().is_err());
    }
}
