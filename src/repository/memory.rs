use super::{FooRepository, Page, PageRequest};
use crate::domain::{Foo, User};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Foo>,
    next_id: i64,
}

impl Table {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Ordered map standing in for the `foo` table. Ids come from a counter
/// that never reuses a value, like a database sequence.
#[derive(Default)]
pub struct InMemoryFooRepository {
    table: RwLock<Table>,
}

impl InMemoryFooRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FooRepository for InMemoryFooRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<Foo>, AppError> {
        let table = self.table.read().await;
        let total = table.rows.len() as u64;
        let content = table
            .rows
            .values()
            .skip(request.offset().min(usize::MAX as u64) as usize)
            .take(request.size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn find_one(&self, id: i64) -> Result<Option<Foo>, AppError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, mut foo: Foo) -> Result<Foo, AppError> {
        let mut table = self.table.write().await;
        let id = match foo.id {
            Some(id) if table.rows.contains_key(&id) => id,
            _ => table.next_id(),
        };
        foo.id = Some(id);
        // Only the user id is written; there is no user table to read a login from.
        foo.back = foo.back.map(|u| User::with_id(u.id));
        tracing::debug!(id, "in-memory save");
        table.rows.insert(id, foo.clone());
        Ok(foo)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
