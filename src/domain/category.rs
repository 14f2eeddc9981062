//! Document Category Entity
//!
//! Categories group the documents shown in the document library.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::ordered::Ordered;

/// A document category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCategory {
    /// Unique identifier (0 until created)
    #[serde(default)]
    pub id: u32,
    /// Display name
    pub name: String,
    /// Optional description shown under the name
    #[serde(default)]
    pub description: Option<String>,
    /// Position in the category list
    #[serde(default)]
    pub order_index: u32,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl DocumentCategory {
    pub fn new(id: u32, name: String, order_index: u32) -> Self {
        Self {
            id,
            name,
            description: None,
            order_index,
            updated_at: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}

impl Entity for DocumentCategory {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Ordered for DocumentCategory {
    fn order_index(&self) -> u32 {
        self.order_index
    }

    fn set_order_index(&mut self, order_index: u32) {
        self.order_index = order_index;
    }

    fn touch(&mut self, at_millis: i64) {
        self.updated_at = Some(at_millis);
    }
}
