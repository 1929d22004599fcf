//! Change-notification headers sent with every write on a resource.
//!
//! Clients read `X-<app>-alert` as a translation key (`<app>.<entity>.<event>`)
//! and `X-<app>-params` as its argument, usually the entity id.

use crate::error::ConfigError;
use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Header carrying the reason a request was rejected.
pub const FAILURE: HeaderName = HeaderName::from_static("failure");

/// Alert header names and message prefix for one application.
#[derive(Clone, Debug)]
pub struct Alerts {
    app_name: String,
    alert: HeaderName,
    params: HeaderName,
}

impl Alerts {
    pub fn new(app_name: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::Invalid {
            key: "APP_NAME",
            value: app_name.to_string(),
        };
        if app_name.is_empty() {
            return Err(invalid());
        }
        let alert = HeaderName::from_bytes(format!("x-{}-alert", app_name).as_bytes()).map_err(|_| invalid())?;
        let params = HeaderName::from_bytes(format!("x-{}-params", app_name).as_bytes()).map_err(|_| invalid())?;
        Ok(Self {
            app_name: app_name.to_string(),
            alert,
            params,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn alert(&self, message: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(v) = HeaderValue::from_str(message) {
            headers.insert(self.alert.clone(), v);
        }
        if let Ok(v) = HeaderValue::from_str(param) {
            headers.insert(self.params.clone(), v);
        }
        headers
    }

    pub fn entity_created(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.created", self.app_name, entity), param)
    }

    pub fn entity_updated(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.updated", self.app_name, entity), param)
    }

    pub fn entity_deleted(&self, entity: &str, param: &str) -> HeaderMap {
        self.alert(&format!("{}.{}.deleted", self.app_name, entity), param)
    }
}

pub fn failure_alert(message: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(message) {
        headers.insert(FAILURE, v);
    }
    headers
}
