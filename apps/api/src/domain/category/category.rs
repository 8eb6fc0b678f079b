use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// A note category created by a user
///
/// # Invariants
/// - `category_id` is unique across the store
/// - `category_name` is not blank
/// - `category_created_by` never changes after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
    pub category_description: String,
    pub category_created_by: UserId,
    pub category_creation_date: DateTime<Utc>,
}

impl Category {
    /// Creates a new category owned by `created_by`
    ///
    /// A fresh UUID is used when `category_id` is `None`.
    ///
    /// # Example
    /// ```
    /// use keepnote_api::domain::category::Category;
    /// use keepnote_api::domain::user::UserId;
    ///
    /// let owner = UserId::new("alice").unwrap();
    /// let category = Category::new(None, "Work", "", owner.clone()).expect("valid category");
    /// assert!(category.is_owned_by(&owner));
    /// ```
    pub fn new(
        category_id: Option<String>,
        category_name: impl Into<String>,
        category_description: impl Into<String>,
        created_by: UserId,
    ) -> Result<Self, String> {
        let category_name = category_name.into();
        validate_name(&category_name)?;

        let category_id = match category_id {
            Some(id) if id.trim().is_empty() => {
                return Err("Category id cannot be blank".to_string())
            }
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        Ok(Self {
            category_id,
            category_name,
            category_description: category_description.into(),
            category_created_by: created_by,
            category_creation_date: Utc::now(),
        })
    }

    /// Returns true if `user_id` created this category
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.category_created_by == user_id
    }

    /// Replaces the editable fields, keeping identity, owner and creation date
    pub fn apply_update(
        &mut self,
        category_name: impl Into<String>,
        category_description: impl Into<String>,
    ) -> Result<(), String> {
        let category_name = category_name.into();
        validate_name(&category_name)?;
        self.category_name = category_name;
        self.category_description = category_description.into();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Category name cannot be empty".to_string());
    }
    Ok(())
}
