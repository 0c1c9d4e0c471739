//! Transport-agnostic text formatting for tool outputs.
//!
//! Tool outputs are rendered to text through the [`TextFormat`] trait. The
//! active rendering choices live in a [`TextOptions`] value that the server is
//! constructed with, so there is no process-wide formatter to configure.
//!
//! ```ignore
//! use harness_tools_core::fmt::{TextFormat, TextOptions, TextStyle};
//!
//! let rows = serde_json::json!([{"identifier": "build", "name": "Build"}]);
//! let text = rows.fmt_text(&TextOptions::new().with_style(TextStyle::Table));
//! assert!(text.contains("identifier | name"));
//! ```

use serde_json::Value as JsonValue;

/// Text rendering style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextStyle {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// One row per record, one column per scalar field.
    Table,
}

/// Options controlling text formatting behavior.
#[derive(Clone, Debug, Default)]
pub struct TextOptions {
    /// The rendering style to use.
    pub style: TextStyle,
    /// Whether to wrap output in markdown formatting.
    pub markdown: bool,
    /// Maximum number of rows to display in collections.
    pub max_items: Option<usize>,
}

impl TextOptions {
    /// Create new text options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text style.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable markdown formatting.
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Set the maximum number of rows to display.
    pub fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }
}

/// Human-readable formatting for tool outputs.
pub trait TextFormat {
    /// Format the value as text according to `opts`.
    fn fmt_text(&self, opts: &TextOptions) -> String;
}

impl TextFormat for String {
    fn fmt_text(&self, _opts: &TextOptions) -> String {
        self.clone()
    }
}

impl TextFormat for JsonValue {
    fn fmt_text(&self, opts: &TextOptions) -> String {
        match opts.style {
            TextStyle::Json => {
                let text = fallback_text_from_json(self);
                if opts.markdown {
                    format!("```json\n{text}\n```")
                } else {
                    text
                }
            }
            TextStyle::Table => match table_rows(self) {
                Some(rows) => render_table(rows, opts),
                None => fallback_text_from_json(self),
            },
        }
    }
}

/// Pretty JSON, or compact JSON if pretty-printing fails.
pub fn fallback_text_from_json(v: &JsonValue) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Locate the record list inside a response payload.
///
/// Accepts a bare array, or the paged shapes Harness services return
/// (`content`, `data`, `items`).
fn table_rows(v: &JsonValue) -> Option<&[JsonValue]> {
    match v {
        JsonValue::Array(items) => Some(items),
        JsonValue::Object(map) => ["content", "data", "items"]
            .iter()
            .find_map(|k| map.get(*k).and_then(JsonValue::as_array))
            .map(Vec::as_slice),
        _ => None,
    }
}

/// Render records as rows. Only scalar fields become columns.
pub fn render_table(rows: &[JsonValue], opts: &TextOptions) -> String {
    if rows.is_empty() {
        return "(no results)".to_string();
    }

    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        if let JsonValue::Object(map) = row {
            for (k, v) in map {
                if is_scalar(v) && !columns.contains(&k.as_str()) {
                    columns.push(k);
                }
            }
        }
    }
    if columns.is_empty() {
        return fallback_text_from_json(&JsonValue::Array(rows.to_vec()));
    }

    let limit = opts.max_items.unwrap_or(rows.len()).min(rows.len());
    let mut out = Vec::with_capacity(limit + 3);

    if opts.markdown {
        out.push(format!("| {} |", columns.join(" | ")));
        out.push(format!("|{}|", vec!["---"; columns.len()].join("|")));
    } else {
        out.push(columns.join(" | "));
    }

    for row in &rows[..limit] {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| row.get(*c).map(cell).unwrap_or_default())
            .collect();
        if opts.markdown {
            out.push(format!("| {} |", cells.join(" | ")));
        } else {
            out.push(cells.join(" | "));
        }
    }

    if limit < rows.len() {
        out.push(format!("... ({} more)", rows.len() - limit));
    }

    out.join("\n")
}

fn is_scalar(v: &JsonValue) -> bool {
    !matches!(v, JsonValue::Array(_) | JsonValue::Object(_))
}

fn cell(v: &JsonValue) -> String {
    match v {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
