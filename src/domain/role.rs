//! Role Entity

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::ordered::Ordered;

/// A staff role (store manager, shift lead, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    /// Permission keys granted to the role
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub order_index: u32,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Role {
    pub fn new(id: u32, name: String, order_index: u32) -> Self {
        Self {
            id,
            name,
            permissions: Vec::new(),
            order_index,
            updated_at: None,
        }
    }

    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

impl Entity for Role {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Ordered for Role {
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
