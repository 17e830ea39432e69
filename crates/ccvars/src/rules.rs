//! attribute path classification
//!
//! The flattener picks a traversal strategy purely by the attribute path of the node it is looking at.
//! All of those decisions are answered here, so new attribute paths only ever change configuration.
use indexmap::IndexSet;
use regex::Regex;

pub const SPEC: &str = "spec";
pub const METADATA_NAME: &str = "metadata.name";
pub const METADATA_NAMESPACE: &str = "metadata.namespace";

pub const TOPOLOGY_CLASS: &str = "spec.topology.class";
pub const TOPOLOGY_VARIABLES: &str = "spec.topology.variables";
pub const TOPOLOGY_VARIABLES_NETWORK_SUBNETS: &str = "spec.topology.variables.network.subnets";
pub const TOPOLOGY_VARIABLES_NODES: &str = "spec.topology.variables.nodes";
pub const TOPOLOGY_VARIABLES_PROXY: &str = "spec.topology.variables.proxy";
pub const TOPOLOGY_WORKERS_MACHINE_DEPLOYMENTS: &str = "spec.topology.workers.machineDeployments";

/// `spec.topology.workers.machineDeployments.<n>.variables.overrides`
pub const MACHINE_DEPLOYMENT_OVERRIDES_PATTERN: &str =
    r"^spec\.topology\.workers\.machineDeployments\.[0-9]+\.variables\.overrides$";

/// Override record whose value is a list of `{name, data}` records
pub const TRUST_VARIABLE: &str = "trust";
/// Override record that has no legacy counterpart
pub const TKR_DATA_VARIABLE: &str = "TKR_DATA";

/// How a sequence found at a given path is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEncoding {
    /// element `i` continues at `path.i`
    IndexExpanded,
    /// elements are `{name, value}` records, continuing at `path.<name>`
    OverrideRecords,
    /// every element continues at `path` itself
    Repeated,
}

#[derive(Debug, Clone)]
pub struct PathRules {
    index_expanded: IndexSet<String>,
    override_records: IndexSet<String>,
    override_record_patterns: Vec<Regex>,
    array_typed: IndexSet<String>,
}

impl PathRules {
    pub fn new(
        index_expanded: impl IntoIterator<Item = String>,
        override_records: impl IntoIterator<Item = String>,
        override_record_patterns: Vec<Regex>,
        array_typed: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            index_expanded: index_expanded.into_iter().collect(),
            override_records: override_records.into_iter().collect(),
            override_record_patterns,
            array_typed: array_typed.into_iter().collect(),
        }
    }

    pub fn sequence_encoding(&self, path: &str) -> SequenceEncoding {
        if self.index_expanded.contains(path) {
            return SequenceEncoding::IndexExpanded;
        }

        if self.override_records.contains(path)
            || self
                .override_record_patterns
                .iter()
                .any(|pattern| pattern.is_match(path))
        {
            return SequenceEncoding::OverrideRecords;
        }

        SequenceEncoding::Repeated
    }

    /// Paths whose sequence value is stored as a single comma joined string
    pub fn is_array_typed(&self, path: &str) -> bool {
        self.array_typed.contains(path)
    }

    /// Paths that mark proxy support as enabled when anything below them is set
    pub fn is_proxy_attribute(path: &str) -> bool {
        path.starts_with(TOPOLOGY_VARIABLES_PROXY)
    }
}
