//! Questionnaire Entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::ordered::Ordered;

/// An audit questionnaire template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    /// Inactive questionnaires stay listed but cannot be assigned
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub order_index: u32,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

fn default_active() -> bool {
    true
}

impl Questionnaire {
    pub fn new(id: u32, title: String, order_index: u32) -> Self {
        Self {
            id,
            title,
            active: true,
            order_index,
            updated_at: None,
        }
    }
}

impl Entity for Questionnaire {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Ordered for Questionnaire {
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
