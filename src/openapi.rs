//! OpenAPI description of the `/api` resources.

use crate::domain::{Foo, User};
use crate::handlers::foo;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(foo::create, foo::update, foo::list, foo::read, foo::delete),
    components(schemas(Foo, User)),
    tags((name = "foo", description = "Foo management"))
)]
pub struct ApiDoc;
