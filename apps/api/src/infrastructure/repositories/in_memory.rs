// In-memory repository adapters
// Same contracts as the PostgreSQL adapters; state is lost on restart

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::category::Category;
use crate::domain::note::{Note, NoteOwner};
use crate::domain::repositories::{
    CategoryRepository, NoteRepository, RepositoryError, RepositoryResult, UserRepository,
};
use crate::domain::user::{User, UserId};

/// In-memory implementation of UserRepository
#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> RepositoryResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) {
            return Err(RepositoryError::Duplicate(format!("user {}", user.user_id)));
        }
        users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn update(&self, user: &User) -> RepositoryResult<bool> {
        match self.users.write().await.get_mut(&user.user_id) {
            Some(stored) => {
                stored.user_name = user.user_name.clone();
                stored.password_hash = user.password_hash.clone();
                stored.user_mobile = user.user_mobile.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user_id: &UserId) -> RepositoryResult<bool> {
        Ok(self.users.write().await.remove(user_id).is_some())
    }
}

/// In-memory implementation of CategoryRepository
#[derive(Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<String, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: &Category) -> RepositoryResult<()> {
        let mut categories = self.categories.write().await;
        if categories.contains_key(&category.category_id) {
            return Err(RepositoryError::Duplicate(format!(
                "category {}",
                category.category_id
            )));
        }
        categories.insert(category.category_id.clone(), category.clone());
        Ok(())
    }

    async fn find_by_id(&self, category_id: &str) -> RepositoryResult<Option<Category>> {
        Ok(self.categories.read().await.get(category_id).cloned())
    }

    async fn find_by_creator(&self, user_id: &UserId) -> RepositoryResult<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .values()
            .filter(|c| c.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn update(&self, category: &Category) -> RepositoryResult<bool> {
        match self.categories.write().await.get_mut(&category.category_id) {
            Some(stored) => {
                stored.category_name = category.category_name.clone();
                stored.category_description = category.category_description.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, category_id: &str) -> RepositoryResult<bool> {
        Ok(self.categories.write().await.remove(category_id).is_some())
    }
}

#[derive(Clone)]
struct StoredBucket {
    notes: Vec<Note>,
    version: i64,
}

/// In-memory implementation of NoteRepository
///
/// Saves compare versions under the write lock, matching the conditional
/// update of the PostgreSQL adapter.
#[derive(Default, Clone)]
pub struct InMemoryNoteRepository {
    buckets: Arc<RwLock<HashMap<UserId, StoredBucket>>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, owner: &NoteOwner) -> RepositoryResult<()> {
        let mut buckets = self.buckets.write().await;
        if buckets.contains_key(owner.user_id()) {
            return Err(RepositoryError::Duplicate(format!(
                "note bucket {}",
                owner.user_id()
            )));
        }
        buckets.insert(
            owner.user_id().clone(),
            StoredBucket {
                notes: owner.notes().to_vec(),
                version: NoteOwner::INITIAL_VERSION,
            },
        );
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> RepositoryResult<Option<NoteOwner>> {
        Ok(self.buckets.read().await.get(user_id).map(|bucket| {
            NoteOwner::from_persistence(user_id.clone(), bucket.notes.clone(), bucket.version)
        }))
    }

    async fn save(&self, owner: &NoteOwner) -> RepositoryResult<i64> {
        let mut buckets = self.buckets.write().await;
        let conflict = || RepositoryError::VersionConflict {
            key: owner.user_id().to_string(),
            expected: owner.version(),
        };

        let bucket = buckets.get_mut(owner.user_id()).ok_or_else(conflict)?;
        if bucket.version != owner.version() {
            return Err(conflict());
        }

        bucket.notes = owner.notes().to_vec();
        bucket.version += 1;
        Ok(bucket.version)
    }

    async fn delete(&self, user_id: &UserId) -> RepositoryResult<bool> {
        Ok(self.buckets.write().await.remove(user_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn alice() -> UserId {
        UserId::new("alice").unwrap()
    }

    fn note(id: i32) -> Note {
        Note::new(id, format!("note {}", id), "", None, None, alice()).unwrap()
    }

    #[tokio::test]
    async fn user_insert_rejects_duplicate() {
        let repo = InMemoryUserRepository::new();
        let user = User {
            user_id: alice(),
            user_name: "Alice".into(),
            password_hash: "hash".into(),
            user_mobile: None,
            user_added_date: Utc::now(),
        };

        repo.insert(&user).await.unwrap();
        assert!(matches!(
            repo.insert(&user).await,
            Err(RepositoryError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn categories_filtered_by_creator() {
        let repo = InMemoryCategoryRepository::new();
        let bob = UserId::new("bob").unwrap();
        repo.insert(&Category::new(None, "A", "", alice()).unwrap())
            .await
            .unwrap();
        repo.insert(&Category::new(None, "B", "", bob.clone()).unwrap())
            .await
            .unwrap();

        let found = repo.find_by_creator(&bob).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category_name, "B");
    }

    #[tokio::test]
    async fn category_update_only_touches_existing() {
        let repo = InMemoryCategoryRepository::new();
        let mut category = Category::new(Some("c1".into()), "A", "", alice()).unwrap();
        assert!(!repo.update(&category).await.unwrap());
        assert!(repo.find_by_id("c1").await.unwrap().is_none());

        repo.insert(&category).await.unwrap();
        category.apply_update("B", "desc").unwrap();
        assert!(repo.update(&category).await.unwrap());
        assert_eq!(repo.find_by_id("c1").await.unwrap().unwrap().category_name, "B");
    }

    #[tokio::test]
    async fn user_update_missing_returns_false() {
        let repo = InMemoryUserRepository::new();
        let user = User {
            user_id: alice(),
            user_name: "Alice".into(),
            password_hash: "hash".into(),
            user_mobile: None,
            user_added_date: Utc::now(),
        };
        assert!(!repo.update(&user).await.unwrap());
        assert!(repo.find_by_id(&alice()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bucket_save_bumps_version() {
        let repo = InMemoryNoteRepository::new();
        repo.insert(&NoteOwner::new(alice(), note(1)).unwrap())
            .await
            .unwrap();

        let mut bucket = repo.find_by_user(&alice()).await.unwrap().unwrap();
        bucket.add(note(2)).unwrap();
        let version = repo.save(&bucket).await.unwrap();

        assert_eq!(version, NoteOwner::INITIAL_VERSION + 1);
        let reloaded = repo.find_by_user(&alice()).await.unwrap().unwrap();
        assert_eq!(reloaded.notes().len(), 2);
        assert_eq!(reloaded.version(), version);
    }

    #[tokio::test]
    async fn stale_bucket_save_conflicts() {
        let repo = InMemoryNoteRepository::new();
        repo.insert(&NoteOwner::new(alice(), note(1)).unwrap())
            .await
            .unwrap();

        let mut first = repo.find_by_user(&alice()).await.unwrap().unwrap();
        let mut second = first.clone();

        first.add(note(2)).unwrap();
        repo.save(&first).await.unwrap();

        second.add(note(3)).unwrap();
        assert!(matches!(
            repo.save(&second).await,
            Err(RepositoryError::VersionConflict { expected: 1, .. })
        ));

        // the losing write did not clobber the winner
        let stored = repo.find_by_user(&alice()).await.unwrap().unwrap();
        assert!(stored.find(2).is_some());
        assert!(stored.find(3).is_none());
    }

    #[tokio::test]
    async fn save_after_delete_conflicts() {
        let repo = InMemoryNoteRepository::new();
        let bucket = NoteOwner::new(alice(), note(1)).unwrap();
        repo.insert(&bucket).await.unwrap();

        assert!(repo.delete(&alice()).await.unwrap());
        assert!(!repo.delete(&alice()).await.unwrap());
        assert!(matches!(
            repo.save(&bucket).await,
            Err(RepositoryError::VersionConflict { .. })
        ));
    }
}
