use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;

use crate::models::Record;
use crate::modules::Module;

/// Read-only holder for the per-module record arrays, loaded once at
/// startup. There is no partial-data mode: any missing or unparsable file
/// aborts the load, and no mutation API exists afterwards.
#[derive(Debug)]
pub struct RecordStore {
    records: HashMap<Module, Vec<Record>>,
}

impl RecordStore {
    /// Load all four module data sets from `data_dir`.
    pub fn load(data_dir: &Path) -> anyhow::Result<RecordStore> {
        let mut records = HashMap::new();
        for module in Module::ALL {
            let path = data_dir.join(module.file_name());
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read data file {}", path.display()))?;
            let parsed = module
                .parse_records(&raw)
                .with_context(|| format!("failed to parse data file {}", path.display()))?;
            tracing::info!(
                module = module.name(),
                rows = parsed.len(),
                "loaded data set"
            );
            records.insert(module, parsed);
        }
        Ok(RecordStore { records })
    }

    /// Build a store from already-parsed records; used by tests and
    /// embedders that source data elsewhere.
    pub fn from_records(records: HashMap<Module, Vec<Record>>) -> RecordStore {
        RecordStore { records }
    }

    pub fn records(&self, module: Module) -> &[Record] {
        self.records.get(&module).map(Vec::as_slice).unwrap_or(&[])
    }
}
