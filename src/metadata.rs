use std::{fs::File, io::BufReader, path::Path};

use log::{error, info};
use serde_json::{Map, Value};

/// Optional key/value data supplied next to the document. Only `author` is read.
#[derive(Debug, Default, Clone)]
pub(crate) struct Metadata(Map<String, Value>);

impl Metadata {
    /// Never fails: a missing file is logged at info level, a broken one at error level.
    pub fn load(metadata_path: Option<&Path>) -> Metadata {
        let Some(metadata_path) = metadata_path else {
            return Metadata::default();
        };
        if !metadata_path.exists() {
            info!("Metadata file({metadata_path:?}) does not exist. ignoring...");
            return Metadata::default();
        }

        match read_object(metadata_path) {
            Ok(map) => Metadata(map),
            Err(e) => {
                error!("Error reading metadata file {metadata_path:?}: {e:#}");
                Metadata::default()
            }
        }
    }

    pub fn author(&self) -> Option<String> {
        match self.0.get("author")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

fn read_object(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let fd = File::open(path)?;
    let reader = BufReader::new(fd);
    let value: Value = serde_json::from_reader(reader)?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a JSON object, found {}", json_kind(&other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
