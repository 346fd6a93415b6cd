use crate::error::{AskbotError, Result};
use crate::models::Question;
use chrono::DateTime;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
}

/// How a column pulls its value out of a question.
#[derive(Debug, Clone, Copy)]
pub enum Accessor {
    /// Top-level key of the question's JSON object.
    Key(&'static str),
    Derived(fn(&Question) -> Value),
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    pub align: Align,
    pub max_width: Option<u16>,
    pub accessor: Accessor,
    pub formatter: Option<fn(&Value) -> String>,
    pub default: bool,
}

impl Column {
    const fn new(label: &'static str, accessor: Accessor) -> Self {
        Self {
            label,
            align: Align::Center,
            max_width: None,
            accessor,
            formatter: None,
            default: true,
        }
    }

    const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    const fn max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    const fn formatter(mut self, formatter: fn(&Value) -> String) -> Self {
        self.formatter = Some(formatter);
        self
    }

    const fn hidden(mut self) -> Self {
        self.default = false;
        self
    }

    /// Template field name: `"Question"` becomes `question`.
    pub fn field_name(&self) -> String {
        self.label.to_lowercase().replace(' ', "_")
    }

    fn cell(&self, question: &Question, json: &Value) -> String {
        let value = match self.accessor {
            Accessor::Key(key) => json.get(key).cloned().unwrap_or(Value::Null),
            Accessor::Derived(f) => f(question),
        };

        match self.formatter {
            Some(format) if !value.is_null() => format(&value),
            _ => plain(&value),
        }
    }
}

fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn author_username(question: &Question) -> Value {
    Value::String(question.author.username.clone())
}

pub fn format_date(value: &Value) -> String {
    let epoch = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    epoch
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| plain(value))
}

pub fn format_tags(value: &Value) -> String {
    match value {
        Value::Array(tags) => tags.iter().map(plain).collect::<Vec<_>>().join(" "),
        other => plain(other),
    }
}

pub const COLUMNS: [Column; 9] = [
    Column::new("Question", Accessor::Key("id")),
    Column::new("Author", Accessor::Derived(author_username)).max_width(15),
    Column::new("Posted", Accessor::Key("added_at")).formatter(format_date),
    Column::new("Latest", Accessor::Key("last_activity_at")).formatter(format_date),
    Column::new("Tags", Accessor::Key("tags"))
        .align(Align::Left)
        .formatter(format_tags),
    Column::new("Answers", Accessor::Key("answer_count")),
    Column::new("Title", Accessor::Key("title"))
        .align(Align::Left)
        .max_width(40),
    Column::new("URL", Accessor::Key("url")).align(Align::Left).hidden(),
    Column::new("Score", Accessor::Key("score")).hidden(),
];

/// Projects one question into a display row, one cell per column.
pub fn project(question: &Question, columns: &[Column]) -> Vec<String> {
    let json = serde_json::to_value(question).unwrap_or_default();
    columns.iter().map(|c| c.cell(question, &json)).collect()
}

/// Resolves `--column` labels (case-insensitive) to column indices in table
/// order. With no labels the default-visible columns are used.
pub fn visible_columns(columns: &[Column], labels: &[String]) -> Result<Vec<usize>> {
    if labels.is_empty() {
        return Ok(columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.default)
            .map(|(i, _)| i)
            .collect());
    }

    for label in labels {
        if !columns.iter().any(|c| c.label.eq_ignore_ascii_case(label)) {
            return Err(AskbotError::invalid("column", label.as_str()));
        }
    }

    Ok(columns
        .iter()
        .enumerate()
        .filter(|(_, c)| labels.iter().any(|l| c.label.eq_ignore_ascii_case(l)))
        .map(|(i, _)| i)
        .collect())
}
