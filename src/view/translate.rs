//! Interface labels, overridable from the `translate` config section.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Translate {
    pub item_list: String,
    pub user_list: String,
    pub promotion_list: String,
    pub total: String,
    pub filter_by: String,
    pub filter_by_date: String,
    pub press_enter_key_to_search: String,
    pub audit_columns: String,
    pub reset: String,
    pub export: String,
    pub import: String,
    pub create: String,
    pub empty: String,
    pub load_failed: String,
    /// Status badge labels keyed by raw status value.
    pub status: HashMap<String, String>,
}

impl Default for Translate {
    fn default() -> Self {
        let status = [
            ("ACTIVE", "Active"),
            ("DISABLE", "Disabled"),
            ("DELETED", "Deleted"),
            ("PENDING", "Pending"),
            ("BLOCK", "Blocked"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            item_list: "Item List".to_string(),
            user_list: "User List".to_string(),
            promotion_list: "Promotion List".to_string(),
            total: "Total".to_string(),
            filter_by: "Filter by status".to_string(),
            filter_by_date: "Filter by date".to_string(),
            press_enter_key_to_search: "Press enter key to search".to_string(),
            audit_columns: "Audit Columns".to_string(),
            reset: "Reset".to_string(),
            export: "Export".to_string(),
            import: "Import".to_string(),
            create: "Create".to_string(),
            empty: "No records found.".to_string(),
            load_failed: "Could not refresh the list, showing the last loaded page".to_string(),
            status,
        }
    }
}

impl Translate {
    /// Label for a raw status value; unknown values are shown as-is.
    pub fn status_label(&self, raw: &str) -> String {
        self.status
            .get(raw)
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }
}
