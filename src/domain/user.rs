use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account a Foo points back to. Only the identity is written through a Foo;
/// `login` is filled in on reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub login: Option<String>,
}

impl User {
    pub fn with_id(id: i64) -> Self {
        Self { id, login: None }
    }
}
