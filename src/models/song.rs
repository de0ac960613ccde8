use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::SecondsFormat;
use mongodb::bson::{oid::ObjectId, Bson, DateTime, Document};
use serde_json::{Map, Value};

use crate::errors::StoreError;

/// Songs are schemaless; only these fields carry meaning.
pub const ID_FIELD: &str = "_id";
pub const NAME_FIELD: &str = "name";
pub const CREATE_DATE_FIELD: &str = "createDate";
pub const FILE_ID_FIELD: &str = "file_id";

pub fn parse_song_id(raw: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(raw).map_err(|_| StoreError::BadId(raw.to_string()))
}

/// Builds a song document from a request body, keeping caller fields as-is.
/// A hex `file_id` is stored as an ObjectId so it can address a GridFS file.
pub fn document_from_json(body: Map<String, Value>) -> Document {
    let mut doc = Document::new();
    for (key, value) in body {
        let value = match (key.as_str(), value) {
            (FILE_ID_FIELD, Value::String(raw)) => match ObjectId::parse_str(&raw) {
                Ok(oid) => Bson::ObjectId(oid),
                Err(_) => Bson::String(raw),
            },
            (_, value) => bson_from_json(value),
        };
        doc.insert(key, value);
    }
    doc
}

pub fn bson_from_json(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(items.into_iter().map(bson_from_json).collect()),
        Value::Object(map) => {
            let mut doc = Document::new();
            for (key, value) in map {
                doc.insert(key, bson_from_json(value));
            }
            Bson::Document(doc)
        }
    }
}

pub fn document_to_json(doc: &Document) -> Value {
    let mut map = Map::new();
    for (key, value) in doc {
        map.insert(key.clone(), bson_to_json(value));
    }
    Value::Object(map)
}

/// Ids come back as hex strings and dates as RFC 3339, the way API clients
/// already read them.
pub fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(render_datetime(*dt)),
        Bson::Binary(bin) => Value::String(STANDARD.encode(&bin.bytes)),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        other => other.clone().into_relaxed_extjson(),
    }
}

fn render_datetime(dt: DateTime) -> String {
    match chrono::DateTime::from_timestamp_millis(dt.timestamp_millis()) {
        Some(at) => at.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => dt.to_string(),
    }
}

pub fn has_name(doc: &Document) -> bool {
    matches!(doc.get(NAME_FIELD), Some(Bson::String(name)) if !name.is_empty())
}

pub fn stamp_create_date(doc: &mut Document) {
    doc.insert(CREATE_DATE_FIELD, DateTime::now());
}

pub fn strip_id(doc: &mut Document) {
    doc.remove(ID_FIELD);
}

/// The blob id a song points at, if it has one.
pub fn file_id(doc: &Document) -> Option<Bson> {
    match doc.get(FILE_ID_FIELD) {
        None | Some(Bson::Null) => None,
        Some(id) => Some(id.clone()),
    }
}
