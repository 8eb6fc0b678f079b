use std::sync::Arc;

use tracing::instrument;

use super::errors::{ensure_owner, parse_user_id, ServiceError, ServiceResult};
use crate::domain::category::Category;
use crate::domain::repositories::{CategoryRepository, RepositoryError};
use crate::domain::user::UserId;

/// Input for creating a category
#[derive(Debug, Clone, Default)]
pub struct NewCategory {
    pub category_id: Option<String>,
    pub category_name: String,
    pub category_description: String,
    /// Defaults to the caller when absent
    pub category_created_by: Option<String>,
}

/// Editable category fields
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub category_name: String,
    pub category_description: String,
}

/// CRUD over categories, scoped to the creating user
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// Creates a category owned by the caller
    ///
    /// A rejected insert (including a taken id) fails with `NotCreated`.
    #[instrument(skip(self, new_category), err(level = "warn"))]
    pub async fn create(
        &self,
        caller: &UserId,
        new_category: NewCategory,
    ) -> ServiceResult<Category> {
        let owner = match new_category.category_created_by.as_deref() {
            Some(raw) => parse_user_id(raw)?,
            None => caller.clone(),
        };
        ensure_owner(caller, &owner)?;

        let category = Category::new(
            new_category.category_id,
            new_category.category_name,
            new_category.category_description,
            owner,
        )
        .map_err(ServiceError::Validation)?;

        self.categories
            .insert(&category)
            .await
            .map_err(|e| match e {
                RepositoryError::Duplicate(key) => {
                    tracing::warn!(%key, "category insert rejected");
                    ServiceError::NotCreated(format!("Category not created: {} already exists", key))
                }
                other => other.into(),
            })?;

        tracing::info!(category_id = %category.category_id, "category created");
        Ok(category)
    }

    #[instrument(skip(self), err(level = "warn"))]
    pub async fn delete(&self, caller: &UserId, category_id: &str) -> ServiceResult<bool> {
        let category = self.require(category_id).await?;
        ensure_owner(caller, &category.category_created_by)?;

        if !self.categories.delete(category_id).await? {
            return Err(not_found(category_id));
        }
        tracing::info!("category deleted");
        Ok(true)
    }

    /// Updates name and description of an existing category
    ///
    /// The path id is authoritative; owner and creation date are kept.
    /// Missing categories fail with `NotFound` rather than being created.
    #[instrument(skip(self, update), err(level = "warn"))]
    pub async fn update(
        &self,
        caller: &UserId,
        category_id: &str,
        update: CategoryUpdate,
    ) -> ServiceResult<Category> {
        let mut category = self.require(category_id).await?;
        ensure_owner(caller, &category.category_created_by)?;

        category
            .apply_update(update.category_name, update.category_description)
            .map_err(ServiceError::Validation)?;
        // a delete may have landed since the read
        if !self.categories.update(&category).await? {
            return Err(not_found(category_id));
        }

        tracing::info!("category updated");
        self.require(category_id).await
    }

    #[instrument(skip(self), err(level = "warn"))]
    pub async fn get_by_id(&self, caller: &UserId, category_id: &str) -> ServiceResult<Category> {
        let category = self.require(category_id).await?;
        ensure_owner(caller, &category.category_created_by)?;
        Ok(category)
    }

    /// Lists every category created by `user_id`, in no guaranteed order
    #[instrument(skip(self), err(level = "warn"))]
    pub async fn list_by_owner(&self, caller: &UserId, user_id: &str) -> ServiceResult<Vec<Category>> {
        let user_id = parse_user_id(user_id)?;
        ensure_owner(caller, &user_id)?;
        Ok(self.categories.find_by_creator(&user_id).await?)
    }

    async fn require(&self, category_id: &str) -> ServiceResult<Category> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| not_found(category_id))
    }
}

fn not_found(category_id: &str) -> ServiceError {
    ServiceError::NotFound(format!("Category not found: {}", category_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::RepositoryResult;
    use crate::infrastructure::repositories::InMemoryCategoryRepository;
    use crate::services::log_capture::CapturedLogs;
    use async_trait::async_trait;

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(InMemoryCategoryRepository::new()))
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn named(id: &str, name: &str) -> NewCategory {
        NewCategory {
            category_id: Some(id.to_string()),
            category_name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_defaults_owner_to_caller() {
        let svc = service();
        let category = svc.create(&user("alice"), named("c1", "Work")).await.unwrap();
        assert_eq!(category.category_created_by, user("alice"));
    }

    #[tokio::test]
    async fn create_for_someone_else_forbidden() {
        let mut input = named("c1", "Work");
        input.category_created_by = Some("bob".into());
        assert!(matches!(
            service().create(&user("alice"), input).await,
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_id_not_created() {
        let svc = service();
        svc.create(&user("alice"), named("c1", "Work")).await.unwrap();
        assert!(matches!(
            svc.create(&user("alice"), named("c1", "Other")).await,
            Err(ServiceError::NotCreated(_))
        ));
    }

    #[tokio::test]
    async fn list_by_owner_filters_and_handles_empty() {
        let svc = service();
        svc.create(&user("alice"), named("c1", "Work")).await.unwrap();
        svc.create(&user("alice"), named("c2", "Home")).await.unwrap();
        svc.create(&user("bob"), named("c3", "Bob's")).await.unwrap();

        let mut names: Vec<String> = svc
            .list_by_owner(&user("alice"), "alice")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.category_name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Home", "Work"]);

        assert!(svc
            .list_by_owner(&user("carol"), "carol")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn list_foreign_owner_forbidden() {
        assert!(matches!(
            service().list_by_owner(&user("alice"), "bob").await,
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let err = service()
            .update(
                &user("alice"),
                "ghost",
                CategoryUpdate {
                    category_name: "x".into(),
                    category_description: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_keeps_identity_and_owner() {
        let svc = service();
        svc.create(&user("alice"), named("c1", "Work")).await.unwrap();

        let updated = svc
            .update(
                &user("alice"),
                "c1",
                CategoryUpdate {
                    category_name: "Office".into(),
                    category_description: "9 to 5".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.category_id, "c1");
        assert_eq!(updated.category_name, "Office");
        assert_eq!(updated.category_created_by, user("alice"));
    }

    #[tokio::test]
    async fn foreign_caller_cannot_touch_category() {
        let svc = service();
        svc.create(&user("alice"), named("c1", "Work")).await.unwrap();

        assert!(matches!(
            svc.get_by_id(&user("bob"), "c1").await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            svc.delete(&user("bob"), "c1").await,
            Err(ServiceError::Forbidden(_))
        ));
        assert!(svc.get_by_id(&user("alice"), "c1").await.is_ok());
    }

    #[tokio::test]
    async fn delete_then_get_not_found() {
        let svc = service();
        svc.create(&user("alice"), named("c1", "Work")).await.unwrap();

        assert!(svc.delete(&user("alice"), "c1").await.unwrap());
        assert!(matches!(
            svc.get_by_id(&user("alice"), "c1").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete(&user("alice"), "c1").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    /// Deletes the category right after it has been read
    struct VanishingCategoryRepository {
        inner: InMemoryCategoryRepository,
    }

    #[async_trait]
    impl CategoryRepository for VanishingCategoryRepository {
        async fn insert(&self, category: &Category) -> RepositoryResult<()> {
            self.inner.insert(category).await
        }

        async fn find_by_id(&self, category_id: &str) -> RepositoryResult<Option<Category>> {
            let found = self.inner.find_by_id(category_id).await?;
            self.inner.delete(category_id).await?;
            Ok(found)
        }

        async fn find_by_creator(&self, user_id: &UserId) -> RepositoryResult<Vec<Category>> {
            self.inner.find_by_creator(user_id).await
        }

        async fn update(&self, category: &Category) -> RepositoryResult<bool> {
            self.inner.update(category).await
        }

        async fn delete(&self, category_id: &str) -> RepositoryResult<bool> {
            self.inner.delete(category_id).await
        }
    }

    #[tokio::test]
    async fn update_after_concurrent_delete_not_found() {
        let inner = InMemoryCategoryRepository::new();
        inner
            .insert(&Category::new(Some("c1".into()), "Work", "", user("alice")).unwrap())
            .await
            .unwrap();
        let svc = CategoryService::new(Arc::new(VanishingCategoryRepository {
            inner: inner.clone(),
        }));

        let result = svc
            .update(
                &user("alice"),
                "c1",
                CategoryUpdate {
                    category_name: "Office".into(),
                    category_description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert!(inner.find_by_id("c1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn failed_lookup_logged_at_warn() {
        let (logs, _guard) = CapturedLogs::install();

        let result = service().get_by_id(&user("alice"), "ghost").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));

        let output = logs.contents();
        let line = output
            .lines()
            .find(|l| l.contains("Category not found: ghost"))
            .unwrap_or_else(|| panic!("no failure event in {:?}", output));
        assert!(line.contains("WARN"), "{}", line);
        assert!(line.contains("get_by_id"), "{}", line);
    }
}
