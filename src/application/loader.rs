//! Chart file loading
//!
//! A chart file is TOML with one `[[employees]]` table per employee:
//!
//! ```toml
//! [[employees]]
//! id = 1
//! name = "Mark Zuckerberg"
//!
//! [[employees]]
//! id = 2
//! name = "Sarah Donald"
//! supervisor = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ChartBuilder, EmployeeRecord, OrgArena};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartFile {
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
}

impl ChartFile {
    pub fn build(&self) -> ApplicationResult<OrgArena> {
        Ok(ChartBuilder::new().build(&self.employees)?)
    }
}

/// Parse chart TOML into a tree.
pub fn parse_chart(content: &str) -> ApplicationResult<OrgArena> {
    let file: ChartFile = toml::from_str(content).map_err(|e| ApplicationError::OperationFailed {
        context: "parse chart".to_string(),
        source: Box::new(e),
    })?;
    file.build()
}

/// Read and parse a chart file.
pub fn load_chart(path: &Path) -> ApplicationResult<OrgArena> {
    debug!("load_chart: path={}", path.display());
    let content = std::fs::read_to_string(path).with_path_context("read chart", path)?;
    let file: ChartFile = toml::from_str(&content).with_path_context("parse chart", path)?;
    let chart = file.build()?;
    debug!("load_chart: {} employees", chart.len());
    Ok(chart)
}
