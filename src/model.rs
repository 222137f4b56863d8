use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root of a parsed ASS script, as emitted by the upstream parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default)]
    pub info: BTreeMap<String, Value>,
    #[serde(default)]
    pub styles: Styles,
    #[serde(default)]
    pub events: Events,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Styles {
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub style: Vec<StyleRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Events {
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub comment: Vec<Value>,
    #[serde(default)]
    pub dialogue: Vec<DialogueEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleRecord {
    #[serde(rename = "Name")]
    pub name: String,
    /// Numpad alignment (1-9). The parser emits it as a string.
    #[serde(
        rename = "Alignment",
        default,
        deserialize_with = "de_lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub alignment: Option<i64>,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueEvent {
    /// Seconds.
    #[serde(rename = "Start")]
    pub start: f64,
    /// Seconds.
    #[serde(rename = "End")]
    pub end: f64,
    #[serde(rename = "Style", default)]
    pub style: String,
    #[serde(rename = "Text", default)]
    pub text: EventText,
    #[serde(flatten)]
    pub rest: BTreeMap<String, Value>,
}

impl DialogueEvent {
    /// The unparsed line, falling back to the combined text.
    pub fn raw_text(&self) -> &str {
        if self.text.raw.is_empty() {
            &self.text.combined
        } else {
            &self.text.raw
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventText {
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub combined: String,
    #[serde(default)]
    pub parsed: Vec<TextSegment>,
}

/// A run of text plus the override tags that take effect at its start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextSegment {
    #[serde(default)]
    pub tags: Vec<OverrideTag>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drawing: Vec<Value>,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, tags: Vec<OverrideTag>) -> Self {
        Self {
            tags,
            text: text.into(),
            drawing: Vec::new(),
        }
    }
}

/// One override tag. Usually only one field is set per object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<i64>,
    /// Numpad alignment (`\an`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub an: Option<i64>,
    /// Legacy SSA alignment (`\a`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<i64>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl OverrideTag {
    pub fn bold(v: i64) -> Self {
        Self {
            b: Some(v),
            ..Self::default()
        }
    }

    pub fn italic(v: i64) -> Self {
        Self {
            i: Some(v),
            ..Self::default()
        }
    }

    pub fn underline(v: i64) -> Self {
        Self {
            u: Some(v),
            ..Self::default()
        }
    }

    pub fn an(v: i64) -> Self {
        Self {
            an: Some(v),
            ..Self::default()
        }
    }

    pub fn legacy_a(v: i64) -> Self {
        Self {
            a: Some(v),
            ..Self::default()
        }
    }

    pub fn is_alignment(&self) -> bool {
        self.an.is_some() || self.a.is_some()
    }
}

fn de_lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
