//! In-memory engine fakes shared by unit tests

use super::Engine;
use crate::error::{Error, Result};
use crate::schema::TableDesc;
use std::cell::RefCell;

/// Records every statement and describes nothing
#[derive(Default)]
pub(crate) struct RecordingEngine {
    statements: RefCell<Vec<String>>,
    fail_prefix: Option<&'static str>,
}

impl RecordingEngine {
    /// Fail every statement starting with `prefix`
    pub(crate) fn failing_on(prefix: &'static str) -> Self {
        Self {
            statements: RefCell::default(),
            fail_prefix: Some(prefix),
        }
    }

    pub(crate) fn statements(&self) -> Vec<String> {
        self.statements.borrow().clone()
    }
}

impl Engine for RecordingEngine {
    fn execute(&self, sql: &str) -> Result<()> {
        self.statements.borrow_mut().push(sql.to_string());
        match self.fail_prefix {
            Some(prefix) if sql.starts_with(prefix) => Err(Error::Other(format!("refused: {sql}"))),
            _ => Ok(()),
        }
    }

    fn describe(&self, relation: &str) -> Result<TableDesc> {
        self.statements
            .borrow_mut()
            .push(format!("DESCRIBE {relation}"));
        Ok(TableDesc::default())
    }
}
