use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::rules::validate_hex_color;

// Label models
#[derive(Queryable, Selectable, Identifiable, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::labels)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub project_id: Uuid,
}

#[derive(Insertable, Clone, Debug)]
#[diesel(table_name = crate::schema::labels)]
pub struct NewLabel {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub project_id: Uuid,
}

impl NewLabel {
    pub fn new(project_id: Uuid, name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            project_id,
        }
    }
}

#[derive(Insertable, Queryable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::task_labels)]
pub struct TaskLabel {
    pub task_id: Uuid,
    pub label_id: Uuid,
}

#[derive(Deserialize, Validate)]
pub struct CreateLabelRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Label name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
}
