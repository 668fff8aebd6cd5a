//! Access to the external HTML template assets. The templates live on disk
//! (their storage is not this module's concern) and an unreadable template is
//! a fatal error for the render call that needed it.

use std::path::{Path, PathBuf};

use crate::errors::ServiceError;

pub const ORDER_TEMPLATE: &str = "order.html";
pub const PRICE_LIST_TEMPLATE: &str = "price_list.html";

/// Loads template files from a configured directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load(&self, name: &str) -> Result<String, ServiceError> {
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| {
            ServiceError::TemplateError(format!("failed to read {}: {}", path.display(), e))
        })
    }

    pub fn order_template(&self) -> Result<String, ServiceError> {
        self.load(ORDER_TEMPLATE)
    }

    pub fn price_list_template(&self) -> Result<String, ServiceError> {
        self.load(PRICE_LIST_TEMPLATE)
    }
}
