//! Column descriptors and the closed set of render kinds.

use serde::Serialize;

/// How a column's value is presented, chosen from the field name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Identifier,
    Thumbnail,
    Gallery,
    Colors,
    Sizes,
    Status,
    Description,
    Price,
    RichContent,
    Timestamp,
    Plain,
}

impl RenderKind {
    pub fn for_field(field: &str) -> Self {
        match field {
            "id" => RenderKind::Identifier,
            "thumbnail_photo" | "profile" | "image" => RenderKind::Thumbnail,
            "product_photo" => RenderKind::Gallery,
            "item_color" => RenderKind::Colors,
            "item_size" => RenderKind::Sizes,
            "status" => RenderKind::Status,
            "description" => RenderKind::Description,
            "price" => RenderKind::Price,
            "content" => RenderKind::RichContent,
            "created_at" | "updated_at" => RenderKind::Timestamp,
            _ => RenderKind::Plain,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub field: String,
    pub header: String,
    /// Whether the column is visible by default.
    pub show: bool,
    pub kind: RenderKind,
}

impl ColumnDescriptor {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        let field = field.into();
        let kind = RenderKind::for_field(&field);
        Self {
            field,
            header: header.into(),
            show: true,
            kind,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// Columns of one list screen plus the toggleable audit columns.
#[derive(Clone, Debug)]
pub struct ColumnSet {
    columns: Vec<ColumnDescriptor>,
    audit: Vec<ColumnDescriptor>,
}

impl ColumnSet {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            audit: vec![
                ColumnDescriptor::new("created_at", "Created At"),
                ColumnDescriptor::new("updated_at", "Updated At"),
            ],
        }
    }

    /// Columns to render: the default-visible ones, then the audit columns
    /// when `show_audit` is on.
    pub fn visible(&self, show_audit: bool) -> Vec<&ColumnDescriptor> {
        let audit: &[ColumnDescriptor] = if show_audit { &self.audit } else { &[] };
        self.columns
            .iter()
            .filter(|c| c.show)
            .chain(audit.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_inferred_from_field_name() {
        assert_eq!(RenderKind::for_field("id"), RenderKind::Identifier);
        assert_eq!(RenderKind::for_field("profile"), RenderKind::Thumbnail);
        assert_eq!(RenderKind::for_field("item_size"), RenderKind::Sizes);
        assert_eq!(RenderKind::for_field("sell_price"), RenderKind::Plain);
    }

    #[test]
    fn hidden_columns_and_audit_toggle() {
        let set = ColumnSet::new(vec![
            ColumnDescriptor::new("id", "ID"),
            ColumnDescriptor::new("code", "Code").hidden(),
            ColumnDescriptor::new("name", "Name"),
        ]);

        let fields = |show_audit| {
            set.visible(show_audit)
                .into_iter()
                .map(|c| c.field.as_str())
                .collect::<Vec<_>>()
        };

        assert_eq!(fields(false), vec!["id", "name"]);
        assert_eq!(fields(true), vec!["id", "name", "created_at", "updated_at"]);
    }
}
