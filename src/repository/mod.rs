//! Persistence boundary for Foo records.
//!
//! Handlers only see [`FooRepository`]; `PgFooRepository` is used in
//! production and `InMemoryFooRepository` in tests or database-less runs.

mod memory;
mod postgres;

pub use memory::InMemoryFooRepository;
pub use postgres::PgFooRepository;

use crate::domain::Foo;
use crate::error::AppError;
use async_trait::async_trait;

/// Zero-based page index and page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size: size.max(1) }
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// One slice of an ordered result set plus totals over the whole set.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1) as u64;
        let total_pages = total_elements.div_ceil(size).min(u32::MAX as u64) as u32;
        Self {
            content,
            total_elements,
            total_pages,
            number: request.page,
            size: request.size,
        }
    }
}

#[async_trait]
pub trait FooRepository: Send + Sync {
    /// Rows ordered by ascending id.
    async fn find_all(&self, request: PageRequest) -> Result<Page<Foo>, AppError>;

    async fn find_one(&self, id: i64) -> Result<Option<Foo>, AppError>;

    /// Inserts when `foo.id` is absent or unknown, otherwise overwrites the row.
    async fn save(&self, foo: Foo) -> Result<Foo, AppError>;

    /// Removing an id that does not exist is not an error.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
