// In-memory repositories
//
// Keep all records in process memory. Used for `storage.backend = "memory"`
// and by the integration tests; nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::identity::errors::IdentityError;
use crate::identity::models::Identity;
use crate::identity::models::SubjectId;
use crate::identity::ports::IdentityRepository;
use crate::todo::errors::TodoError;
use crate::todo::models::EditTodoCommand;
use crate::todo::models::Todo;
use crate::todo::models::TodoId;
use crate::todo::ports::TodoRepository;

// ============================================================================
// InMemoryIdentityRepository - identities keyed by email
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct InMemoryIdentityRepository {
    identities: Arc<RwLock<HashMap<String, Identity>>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        // Check and insert under one write lock, so concurrent
        // registrations of the same email cannot both land.
        let mut identities = self.identities.write().await;
        let email = identity.email.as_str().to_string();

        if identities.contains_key(&email) {
            return Err(IdentityError::DuplicateIdentity(email));
        }

        identities.insert(email, identity.clone());
        Ok(identity)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        Ok(self.identities.read().await.get(email).cloned())
    }
}

// ============================================================================
// InMemoryTodoRepository - todos grouped by owner, in insertion order
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<SubjectId, Vec<Todo>>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn create(&self, todo: Todo) -> Result<Todo, TodoError> {
        self.todos
            .write()
            .await
            .entry(todo.owner)
            .or_default()
            .push(todo.clone());
        Ok(todo)
    }

    async fn list_by_owner(&self, owner: &SubjectId) -> Result<Vec<Todo>, TodoError> {
        Ok(self
            .todos
            .read()
            .await
            .get(owner)
            .cloned()
            .unwrap_or_default())
    }

    async fn update(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        command: EditTodoCommand,
    ) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .get_mut(owner)
            .and_then(|owned| owned.iter_mut().find(|todo| todo.id == *id))
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        command.apply(todo);
        Ok(todo.clone())
    }

    async fn set_status(
        &self,
        owner: &SubjectId,
        id: &TodoId,
        status: bool,
    ) -> Result<(), TodoError> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .get_mut(owner)
            .and_then(|owned| owned.iter_mut().find(|todo| todo.id == *id))
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        todo.status = status;
        Ok(())
    }

    async fn delete(&self, owner: &SubjectId, id: &TodoId) -> Result<(), TodoError> {
        let mut todos = self.todos.write().await;
        let owned = todos
            .get_mut(owner)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;

        let before = owned.len();
        owned.retain(|todo| todo.id != *id);

        if owned.len() == before {
            return Err(TodoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::identity::models::EmailAddress;
    use crate::todo::models::Priority;
    use crate::todo::models::Title;

    fn identity(email: &str) -> Identity {
        Identity {
            id: SubjectId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn todo(owner: SubjectId, title: &str) -> Todo {
        Todo {
            id: TodoId::new(),
            owner,
            title: Title::new(title.to_string()).unwrap(),
            description: String::new(),
            created_at: Utc::now(),
            deadline: None,
            priority: Priority::Normal,
            status: false,
        }
    }

    #[tokio::test]
    async fn test_identity_email_is_unique() {
        let repository = InMemoryIdentityRepository::new();

        repository.create(identity("alice@example.com")).await.unwrap();
        let result = repository.create(identity("alice@example.com")).await;

        assert!(matches!(result, Err(IdentityError::DuplicateIdentity(_))));
    }

    #[tokio::test]
    async fn test_identity_lookup_is_case_sensitive() {
        let repository = InMemoryIdentityRepository::new();
        repository.create(identity("alice@example.com")).await.unwrap();

        assert!(repository
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .is_some());
        assert!(repository
            .find_by_email("Alice@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_todos_are_scoped_by_owner() {
        let repository = InMemoryTodoRepository::new();
        let alice = SubjectId::new();
        let bob = SubjectId::new();

        let first = repository.create(todo(alice, "first")).await.unwrap();
        repository.create(todo(alice, "second")).await.unwrap();

        let listed = repository.list_by_owner(&alice).await.unwrap();
        assert_eq!(
            listed.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(),
            vec!["first", "second"]
        );
        assert!(repository.list_by_owner(&bob).await.unwrap().is_empty());

        assert!(matches!(
            repository
                .update(&bob, &first.id, EditTodoCommand::default())
                .await,
            Err(TodoError::NotFound(_))
        ));
        assert!(matches!(
            repository.set_status(&bob, &first.id, true).await,
            Err(TodoError::NotFound(_))
        ));
        assert!(matches!(
            repository.delete(&bob, &first.id).await,
            Err(TodoError::NotFound(_))
        ));

        repository.set_status(&alice, &first.id, true).await.unwrap();
        assert!(repository.list_by_owner(&alice).await.unwrap()[0].status);

        repository.delete(&alice, &first.id).await.unwrap();
        assert_eq!(repository.list_by_owner(&alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_status_set_after_read() {
        let repository = InMemoryTodoRepository::new();
        let alice = SubjectId::new();
        let stored = repository.create(todo(alice, "mine")).await.unwrap();

        // Status flips between a client's read and its edit
        repository.set_status(&alice, &stored.id, true).await.unwrap();

        let command = EditTodoCommand {
            description: Some("d".to_string()),
            ..Default::default()
        };
        let edited = repository.update(&alice, &stored.id, command).await.unwrap();

        assert!(edited.status);
        assert_eq!(edited.description, "d");
        assert_eq!(edited.title.as_str(), "mine");
        assert!(repository.list_by_owner(&alice).await.unwrap()[0].status);
    }
}
