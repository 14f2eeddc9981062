//! Audit Task Entity
//!
//! A single checklist step performed during a branch audit.

use serde::{Deserialize, Serialize};
use super::entity::Entity;
use super::ordered::Ordered;

/// A checklist task, optionally assigned to a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTask {
    #[serde(default)]
    pub id: u32,
    pub title: String,
    /// Role responsible for the task (None = anyone)
    #[serde(default)]
    pub role_id: Option<u32>,
    /// Whether completing the task needs a photo attached
    #[serde(default)]
    pub requires_photo: bool,
    #[serde(default)]
    pub order_index: u32,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl AuditTask {
    pub fn new(id: u32, title: String, order_index: u32) -> Self {
        Self {
            id,
            title,
            role_id: None,
            requires_photo: false,
            order_index,
            updated_at: None,
        }
    }

    pub fn for_role(mut self, role_id: u32) -> Self {
        self.role_id = Some(role_id);
        self
    }
}

impl Entity for AuditTask {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn set_id(&mut self, id: Self::Id) {
        self.id = id;
    }
}

impl Ordered for AuditTask {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_for_role() {
        let task = AuditTask::new(1, "Check fridge temperature".to_string(), 0).for_role(2);
        assert_eq!(task.role_id, Some(2));
        assert!(!task.requires_photo);
    }
}
