use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Askbot serializes timestamps as strings on some versions and numbers on others.
fn deserialize_epoch<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| de::Error::custom(format!("Unsupported timestamp: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("Unsupported timestamp: {}", s))),
        other => Err(de::Error::custom(format!("Unsupported timestamp: {}", other))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Author {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Question {
    pub id: u64,
    pub author: Author,
    #[serde(deserialize_with = "deserialize_epoch")]
    pub added_at: i64,
    #[serde(deserialize_with = "deserialize_epoch")]
    pub last_activity_at: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    pub answer_count: u64,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Any other keys the server sends, kept so key-based columns can reach them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of the `questions` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub pages: u32,
}
