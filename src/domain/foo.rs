use super::{date_format, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use utoipa::ToSchema;

/// A Foo record. Identity is assigned by the store on first save.
///
/// Equality is by `id` only. A record without an id equals only itself.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Foo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, with = "date_format")]
    #[schema(value_type = Option<String>, example = "1970-01-01T00:00:00Z")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub back: Option<User>,
}

impl Foo {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

impl PartialEq for Foo {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Foo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Foo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map(|i| i.to_string()).unwrap_or_else(|| "null".into());
        let date = self.date.as_ref().map(date_format::format).unwrap_or_else(|| "null".into());
        write!(
            f,
            "Foo{{id={}, name='{}', comment='{}', date='{}'}}",
            id,
            self.name.as_deref().unwrap_or("null"),
            self.comment.as_deref().unwrap_or("null"),
            date
        )
    }
}
