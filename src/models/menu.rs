//! Header menu model

use serde::{Deserialize, Serialize};

use super::{null_as_default, NodeList};

/// Header menu entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, alias = "label", deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, alias = "uri", deserialize_with = "null_as_default")]
    pub href: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub child_items: NodeList<MenuItem>,
}

impl MenuItem {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            parent_id: None,
            child_items: NodeList::default(),
        }
    }

    /// Top-level entry (no parent)
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn children(&self) -> &[MenuItem] {
        &self.child_items.nodes
    }
}
