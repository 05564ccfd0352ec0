use serde::Deserialize;

/// Result table in the TAP JSON serialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TapTable {
    pub metadata: Vec<FieldMeta>,
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}

/// One `FIELD` of the result: name, VOTable datatype and description.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(default)]
    pub arraysize: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub ucd: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Integer,
    Float,
    Text,
}

impl FieldMeta {
    pub fn kind(&self) -> FieldKind {
        let scalar = match self.arraysize.as_deref() {
            None | Some("1") => true,
            Some(_) => false,
        };
        match self.datatype.as_deref() {
            Some("boolean") if scalar => FieldKind::Bool,
            Some("short" | "int" | "long" | "unsignedByte") if scalar => FieldKind::Integer,
            Some("float" | "double") if scalar => FieldKind::Float,
            _ => FieldKind::Text,
        }
    }

    pub fn data_type(&self) -> String {
        self.datatype.clone().unwrap_or_else(|| "char".to_string())
    }
}

/// Form fields of a synchronous TAP query.
#[derive(Debug, Clone)]
pub struct SyncRequest<'a> {
    pub query: &'a str,
    pub max_records: Option<u64>,
}

impl<'a> SyncRequest<'a> {
    pub const LANG: &'static str = "ADQL";
    pub const FORMAT: &'static str = "json";

    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            max_records: None,
        }
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("REQUEST", "doQuery".to_string()),
            ("LANG", Self::LANG.to_string()),
            ("FORMAT", Self::FORMAT.to_string()),
            ("QUERY", self.query.to_string()),
        ];
        if let Some(max) = self.max_records {
            fields.push(("MAXREC", max.to_string()));
        }
        fields
    }
}
