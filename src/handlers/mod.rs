//! HTTP handlers for the Foo resource.

pub mod foo;
