//! mapping configuration: attribute path tables, precedence and path classification
//!
//! [TranslationConfig::builtin] carries the tables for every supported provider. A yaml file with the
//! same (camelCase) layout can be laid over the built-ins with [TranslationConfig::load]:
//!
//! ```yaml
//! mappings:
//!   aws:
//!     spec.topology.variables.worker.rootVolume.type: AWS_NODE_ROOT_VOLUME_TYPE
//! precedence:
//!   spec.topology.workers.machineDeployments.3.variables.overrides.NODE_MACHINE_TYPE: spec.topology.variables.nodes.3.machineType
//! arrayTypedPaths:
//! - spec.topology.variables.controlPlane.network.nameservers
//! ```
use crate::detect::Provider;
use crate::error::{Error, Result};
use crate::rules::{PathRules, MACHINE_DEPLOYMENT_OVERRIDES_PATTERN};
use crate::tables;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationConfig {
    pub mappings: Mappings,
    /// higher precedence path to lower precedence path, both resolving to the same legacy variable
    pub precedence: IndexMap<String, String>,
    pub array_typed_paths: IndexSet<String>,
    pub index_expanded_paths: IndexSet<String>,
    pub override_record_paths: IndexSet<String>,
    pub override_record_patterns: IndexSet<String>,
}

/// Attribute path to legacy variable name, per provider
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Mappings {
    /// merged into every provider table, taking priority over provider entries
    pub common: IndexMap<String, String>,
    pub aws: IndexMap<String, String>,
    pub azure: IndexMap<String, String>,
    pub vsphere: IndexMap<String, String>,
    pub docker: IndexMap<String, String>,
}

impl Mappings {
    pub fn provider(&self, provider: Provider) -> &IndexMap<String, String> {
        match provider {
            Provider::Aws => &self.aws,
            Provider::Azure => &self.azure,
            Provider::Vsphere => &self.vsphere,
            Provider::Docker => &self.docker,
        }
    }

    fn tables_mut(&mut self) -> [&mut IndexMap<String, String>; 5] {
        [
            &mut self.common,
            &mut self.aws,
            &mut self.azure,
            &mut self.vsphere,
            &mut self.docker,
        ]
    }
}

/// The effective attribute path to legacy variable table of a single provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: IndexMap<String, String>,
}

impl MappingTable {
    /// Legacy variable for `path`; paths mapped to an empty name have no legacy counterpart
    pub fn legacy_name(&self, path: &str) -> Option<&str> {
        self.entries
            .get(path)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn owned_table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(path, name)| (path.to_string(), name.to_string()))
        .collect()
}

fn owned_set(entries: &[&str]) -> IndexSet<String> {
    entries.iter().map(|entry| entry.to_string()).collect()
}

impl TranslationConfig {
    pub fn builtin() -> Self {
        Self {
            mappings: Mappings {
                common: owned_table(tables::COMMON),
                aws: owned_table(tables::AWS),
                azure: owned_table(tables::AZURE),
                vsphere: owned_table(tables::VSPHERE),
                docker: owned_table(tables::DOCKER),
            },
            precedence: owned_table(tables::PRECEDENCE),
            array_typed_paths: owned_set(tables::ARRAY_TYPED_PATHS),
            index_expanded_paths: owned_set(tables::INDEX_EXPANDED_PATHS),
            override_record_paths: owned_set(tables::OVERRIDE_RECORD_PATHS),
            override_record_patterns: owned_set(&[MACHINE_DEPLOYMENT_OVERRIDES_PATTERN]),
        }
    }

    /// Built-in configuration with the file at `path` laid over it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loading mapping configuration");

        let overlay: TranslationConfig =
            serde_yaml::from_str(&content).map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::builtin();
        config.overlay(overlay);
        Ok(config)
    }

    /// Entries of `other` replace or extend the entries of `self`, nothing is removed
    pub fn overlay(&mut self, other: TranslationConfig) {
        let TranslationConfig {
            mappings,
            precedence,
            array_typed_paths,
            index_expanded_paths,
            override_record_paths,
            override_record_patterns,
        } = other;

        let Mappings {
            common,
            aws,
            azure,
            vsphere,
            docker,
        } = mappings;
        for (table, entries) in self
            .mappings
            .tables_mut()
            .into_iter()
            .zip([common, aws, azure, vsphere, docker])
        {
            table.extend(entries);
        }

        self.precedence.extend(precedence);
        self.array_typed_paths.extend(array_typed_paths);
        self.index_expanded_paths.extend(index_expanded_paths);
        self.override_record_paths.extend(override_record_paths);
        self.override_record_patterns.extend(override_record_patterns);
    }

    /// The provider table with the common table merged in
    pub fn mapping_table(&self, provider: Provider) -> MappingTable {
        let mut entries = self.mappings.provider(provider).clone();
        entries.extend(
            self.mappings
                .common
                .iter()
                .map(|(path, name)| (path.clone(), name.clone())),
        );
        MappingTable { entries }
    }

    pub fn path_rules(&self) -> Result<PathRules> {
        let patterns = self
            .override_record_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PathRules::new(
            self.index_expanded_paths.iter().cloned(),
            self.override_record_paths.iter().cloned(),
            patterns,
            self.array_typed_paths.iter().cloned(),
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn common_entries_are_merged_into_every_provider() {
        let config = TranslationConfig::builtin();
        for provider in [
            Provider::Aws,
            Provider::Azure,
            Provider::Vsphere,
            Provider::Docker,
        ] {
            let table = config.mapping_table(provider);
            assert_eq!(table.legacy_name("metadata.name"), Some("CLUSTER_NAME"));
            assert_eq!(
                table.legacy_name("spec.clusterNetwork.pods.cidrBlocks"),
                Some("CLUSTER_CIDR")
            );
        }
        assert_eq!(
            config.mapping_table(Provider::Docker).len(),
            tables::COMMON.len()
        );
    }

    #[test]
    fn provider_specific_entries() {
        let config = TranslationConfig::builtin();
        let path = "spec.topology.workers.machineDeployments.0.replicas";
        assert_eq!(
            config.mapping_table(Provider::Vsphere).legacy_name(path),
            Some("WORKER_MACHINE_COUNT")
        );
        assert_eq!(
            config.mapping_table(Provider::Aws).legacy_name(path),
            Some("WORKER_MACHINE_COUNT_0")
        );
        assert_eq!(config.mapping_table(Provider::Docker).legacy_name(path), None);
    }

    #[test]
    fn empty_legacy_name_is_unmapped() {
        let table = TranslationConfig::builtin().mapping_table(Provider::Aws);
        assert_eq!(
            table.legacy_name("spec.topology.workers.machineDeployments.0.class"),
            None
        );
    }

    #[test]
    fn load_overlays_builtin() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"
mappings:
  aws:
    spec.topology.variables.region: MY_REGION
    spec.topology.variables.worker.rootVolume.type: AWS_NODE_ROOT_VOLUME_TYPE
arrayTypedPaths:
- spec.topology.variables.controlPlane.network.nameservers
"#
        )
        .expect("write");

        let config = TranslationConfig::load(file.path()).expect("valid config");
        let table = config.mapping_table(Provider::Aws);
        assert_eq!(
            table.legacy_name("spec.topology.variables.region"),
            Some("MY_REGION")
        );
        assert_eq!(
            table.legacy_name("spec.topology.variables.worker.rootVolume.type"),
            Some("AWS_NODE_ROOT_VOLUME_TYPE")
        );
        assert_eq!(
            table.legacy_name("spec.topology.variables.sshKeyName"),
            Some("AWS_SSH_KEY_NAME")
        );

        let rules = config.path_rules().expect("valid rules");
        assert!(rules.is_array_typed("spec.topology.variables.controlPlane.network.nameservers"));
        assert!(rules.is_array_typed("spec.clusterNetwork.pods.cidrBlocks"));
    }

    #[test]
    fn load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "mappings: [not, a, map]").expect("write");

        let err = TranslationConfig::load(file.path()).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn invalid_pattern() {
        let mut config = TranslationConfig::builtin();
        config.override_record_patterns.insert("(".to_string());

        let err = config.path_rules().expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
