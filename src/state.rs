//! Shared application state for all routes.

use crate::header::Alerts;
use crate::repository::FooRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub foos: Arc<dyn FooRepository>,
    pub alerts: Alerts,
}

impl AppState {
    pub fn new(foos: Arc<dyn FooRepository>, alerts: Alerts) -> Self {
        Self { foos, alerts }
    }
}
