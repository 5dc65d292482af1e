//! Column renderer: turns one field of a record into a [`Presentation`].
//!
//! Dispatch is on the column's [`RenderKind`], never on the runtime type of
//! the value. Templates only decide how each presentation variant looks.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;

use crate::view::columns::{ColumnDescriptor, RenderKind};
use crate::view::translate::Translate;

/// Text shown for a null description, price or content.
pub const NO_CONTENT: &str = "no content";
/// Number of collection entries drawn before the overlay badge takes over.
pub const STACK_WINDOW: usize = 3;
/// Horizontal offset between stacked entries.
pub const STACK_OFFSET_PX: usize = 20;
/// Descriptions longer than this are truncated.
pub const DESCRIPTION_LIMIT: usize = 20;
const TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M:%S";

/// Values the renderer needs besides the record itself.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    /// Detail screen prefix, e.g. `/items`.
    pub base_path: &'a str,
    /// Prefix images are served from.
    pub image_base_url: &'a str,
    pub translate: &'a Translate,
}

impl RenderContext<'_> {
    fn image_url(&self, name: &str) -> String {
        format!("{}/{}", self.image_base_url.trim_end_matches('/'), name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackShape {
    Image,
    Color,
    Size,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StackEntry {
    /// Image URL, color code or size label depending on the shape.
    pub content: String,
    pub offset_px: usize,
    pub z_index: usize,
}

/// Overlapping collection preview with an optional `+N` badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stack {
    pub shape: StackShape,
    pub entries: Vec<StackEntry>,
    /// Number of entries left out of the window.
    pub overflow: Option<usize>,
    pub overflow_offset_px: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub severity: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    Link { href: String, label: String },
    /// Circular avatar; `src` is `None` when the placeholder icon is shown.
    Avatar { src: Option<String> },
    Stack(Stack),
    Badge(StatusBadge),
    Text { text: String },
    /// Trusted markup inserted unescaped.
    Html { markup: String },
    Raw { value: Value },
}

/// Splits a collection into the displayed window and the overflow count.
///
/// The overflow is `Some(len - 3)` exactly when the collection holds more
/// than three entries.
pub fn stack_window<T>(items: &[T]) -> (&[T], Option<usize>) {
    let shown = items.len().min(STACK_WINDOW);
    let overflow = (items.len() > STACK_WINDOW).then(|| items.len() - STACK_WINDOW);
    (&items[..shown], overflow)
}

fn stack(shape: StackShape, contents: Vec<String>) -> Presentation {
    let (window, overflow) = stack_window(&contents);
    let entries = window
        .iter()
        .enumerate()
        .map(|(index, content)| StackEntry {
            content: content.clone(),
            offset_px: index * STACK_OFFSET_PX,
            z_index: index * STACK_OFFSET_PX,
        })
        .collect();
    Presentation::Stack(Stack {
        shape,
        entries,
        overflow,
        overflow_offset_px: STACK_WINDOW * STACK_OFFSET_PX,
    })
}

/// String form of a scalar JSON value.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // Gallery entries may arrive as `{ "image": "name" }` objects.
                Value::Object(map) => map.get("image").map(value_text).unwrap_or_default(),
                other => value_text(other),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::Null => Vec::new(),
        other => vec![value_text(other)],
    }
}

fn size_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(serialized) => match serde_json::from_str::<Value>(serialized) {
            Ok(parsed @ Value::Array(_)) => string_list(&parsed),
            Ok(_) | Err(_) => {
                log::warn!("Ignoring malformed size list `{serialized}`");
                Vec::new()
            }
        },
        Value::Array(_) => string_list(value),
        _ => Vec::new(),
    }
}

fn status_severity(raw: &str) -> &'static str {
    match raw {
        "ACTIVE" => "success",
        "DISABLE" => "warning",
        "PENDING" => "info",
        "DELETED" | "BLOCK" => "danger",
        _ => "secondary",
    }
}

fn or_no_content(value: &Value, present: impl FnOnce(String) -> Presentation) -> Presentation {
    match value {
        Value::Null => Presentation::Text {
            text: NO_CONTENT.to_string(),
        },
        other => present(value_text(other)),
    }
}

/// Renders `column` of `record`. `column_index` is the column's position in
/// the rendered header.
pub fn render(
    record: &Value,
    column: &ColumnDescriptor,
    column_index: usize,
    ctx: &RenderContext<'_>,
) -> Presentation {
    let value = record.get(&column.field).unwrap_or(&Value::Null);
    log::trace!("Rendering column #{column_index} `{}`", column.field);

    match column.kind {
        RenderKind::Identifier => {
            let id = value_text(value);
            Presentation::Link {
                href: format!("{}/{}", ctx.base_path.trim_end_matches('/'), id),
                label: id,
            }
        }
        RenderKind::Thumbnail => {
            let name = match value {
                Value::Object(map) => map.get("image").map(value_text),
                other => Some(value_text(other)),
            };
            Presentation::Avatar {
                src: name.filter(|n| !n.is_empty()).map(|n| ctx.image_url(&n)),
            }
        }
        RenderKind::Gallery => {
            let urls = string_list(value)
                .iter()
                .map(|name| ctx.image_url(name))
                .collect();
            stack(StackShape::Image, urls)
        }
        RenderKind::Colors => stack(StackShape::Color, string_list(value)),
        RenderKind::Sizes => stack(StackShape::Size, size_list(value)),
        RenderKind::Status => {
            let raw = value_text(value);
            Presentation::Badge(StatusBadge {
                label: ctx.translate.status_label(&raw),
                severity: status_severity(&raw),
            })
        }
        RenderKind::Description => or_no_content(value, |text| {
            let text = if text.chars().count() > DESCRIPTION_LIMIT {
                let head: String = text.chars().take(DESCRIPTION_LIMIT).collect();
                format!("{head}...")
            } else {
                text
            };
            Presentation::Text { text }
        }),
        RenderKind::Price => or_no_content(value, |text| Presentation::Text { text }),
        RenderKind::RichContent => or_no_content(value, |markup| Presentation::Html { markup }),
        RenderKind::Timestamp => {
            let raw = value_text(value);
            let text = raw
                .parse::<NaiveDateTime>()
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or(raw);
            Presentation::Text { text }
        }
        RenderKind::Plain => match value {
            Value::Null => Presentation::Text {
                text: String::new(),
            },
            other => Presentation::Raw {
                value: other.clone(),
            },
        },
    }
}
