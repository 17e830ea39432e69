//! Flatten a resource tree into dotted attribute paths
//!
//! **Example**
//!
//! ```yaml
//! spec:
//!   clusterNetwork:
//!     pods:
//!       cidrBlocks: [100.96.0.0/11, "fd00:100:96::/48"]
//!   topology:
//!     class: tkg-aws-default
//!     variables:
//!     - name: proxy
//!       value:
//!         httpProxy: http://proxy:3128
//!     - name: trust
//!       value:
//!       - name: imageRepository
//!         data: LS0tLS1CRUdJTi...
//!     workers:
//!       machineDeployments:
//!       - class: tkg-worker
//!         variables:
//!           overrides:
//!           - name: NODE_MACHINE_TYPE
//!             value: m5.large
//! ```
//!
//! | **path**                                                                         | **value**                         |
//! |----------------------------------------------------------------------------------|-----------------------------------|
//! | `spec.clusterNetwork.pods.cidrBlocks`                                            | `100.96.0.0/11,fd00:100:96::/48`  |
//! | `spec.topology.class`                                                            | `tkg-aws-default`                 |
//! | `spec.topology.variables.proxy.httpProxy`                                        | `http://proxy:3128`               |
//! | `spec.topology.variables.proxy`                                                  | `true`                            |
//! | `spec.topology.variables.trust.imageRepository`                                  | `LS0tLS1CRUdJTi...`               |
//! | `spec.topology.workers.machineDeployments.0.class`                               | `tkg-worker`                      |
//! | `spec.topology.workers.machineDeployments.0.variables.overrides.NODE_MACHINE_TYPE` | `m5.large`                      |
//!
use crate::error::{Error, Result};
use crate::node::ConfigNode;
use crate::rules::{
    PathRules, SequenceEncoding, TKR_DATA_VARIABLE, TOPOLOGY_VARIABLES_PROXY, TRUST_VARIABLE,
};
use indexmap::IndexMap;

/// Attribute path to leaf value, in traversal order
///
/// A path keeps the first non-empty value written to it. The only exception is the proxy marker
/// (`spec.topology.variables.proxy`), which is set to `true` whenever a scalar attribute below it is written.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlattenedMap {
    values: IndexMap<String, String>,
}

impl FlattenedMap {
    /// Returns `false` when the value was dropped (empty, or the path already has a value)
    pub fn insert(&mut self, path: &str, value: String) -> bool {
        if value.is_empty() {
            tracing::trace!(path, "empty value ignored");
            return false;
        }

        if let Some(existing) = self.values.get(path) {
            tracing::warn!(
                path,
                existing = existing.as_str(),
                ignored = value.as_str(),
                "duplicate variable in input cluster class config file"
            );
            return false;
        }

        tracing::trace!(path, value = value.as_str(), "attribute added");
        self.values.insert(path.to_string(), value);
        true
    }

    fn mark_proxy(&mut self) {
        self.values
            .insert(TOPOLOGY_VARIABLES_PROXY.to_string(), true.to_string());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(derive_new::new)]
pub struct Flattener<'r> {
    rules: &'r PathRules,
}

impl Flattener<'_> {
    /// Walk `node` (found at `path`) and record every leaf in `out`
    pub fn flatten(&self, node: &ConfigNode, path: &str, out: &mut FlattenedMap) -> Result<()> {
        match node {
            ConfigNode::Map(map) => {
                for (key, value) in map {
                    let child_path = format!("{path}.{key}");
                    if self.rules.is_array_typed(&child_path) && !value.is_null() {
                        let joined = join_array(value, &child_path)?;
                        out.insert(&child_path, joined);
                    } else {
                        self.flatten(value, &child_path, out)?;
                    }
                }
            }
            ConfigNode::Sequence(items) => self.flatten_sequence(items, path, out)?,
            ConfigNode::Tagged { .. } => {
                return Err(Error::UnsupportedValue {
                    kind: node.kind(),
                    path: path.to_string(),
                })
            }
            ConfigNode::Null
            | ConfigNode::Boolean(_)
            | ConfigNode::Integer(_)
            | ConfigNode::Decimal(_)
            | ConfigNode::String(_) => {
                if let Some(value) = node.scalar_string() {
                    // array typed values below proxy (noProxy) leave the marker alone
                    if out.insert(path, value) && PathRules::is_proxy_attribute(path) {
                        out.mark_proxy();
                    }
                }
            }
        }

        Ok(())
    }

    fn flatten_sequence(
        &self,
        items: &[ConfigNode],
        path: &str,
        out: &mut FlattenedMap,
    ) -> Result<()> {
        match self.rules.sequence_encoding(path) {
            SequenceEncoding::IndexExpanded => {
                for (index, item) in items.iter().enumerate() {
                    self.flatten(item, &format!("{path}.{index}"), out)?;
                }
            }
            SequenceEncoding::OverrideRecords => {
                for (index, record) in items.iter().enumerate() {
                    self.flatten_override_record(record, index, path, out)?;
                }
            }
            SequenceEncoding::Repeated => {
                for item in items {
                    self.flatten(item, path, out)?;
                }
            }
        }

        Ok(())
    }

    fn flatten_override_record(
        &self,
        record: &ConfigNode,
        index: usize,
        path: &str,
        out: &mut FlattenedMap,
    ) -> Result<()> {
        let name = record_name(record, &format!("{path}.{index}"))?;
        let child_path = format!("{path}.{name}");
        let value = record.get("value").unwrap_or(&ConfigNode::Null);

        match name {
            TRUST_VARIABLE => match value {
                ConfigNode::Sequence(trusted) => {
                    for (trust_index, trust) in trusted.iter().enumerate() {
                        let trust_name =
                            record_name(trust, &format!("{child_path}.{trust_index}"))?;
                        let data = trust.get("data").unwrap_or(&ConfigNode::Null);
                        self.flatten(data, &format!("{child_path}.{trust_name}"), out)?;
                    }
                }
                ConfigNode::Null => {}
                other => {
                    return Err(Error::malformed(
                        child_path,
                        format!(
                            "expected a list of {{name, data}} records, found {}",
                            other.kind()
                        ),
                    ))
                }
            },
            TKR_DATA_VARIABLE => {
                tracing::trace!(path = child_path.as_str(), "skipped, no legacy variable");
            }
            _ => self.flatten(value, &child_path, out)?,
        }

        Ok(())
    }
}

fn record_name<'n>(record: &'n ConfigNode, path: &str) -> Result<&'n str> {
    record
        .get("name")
        .and_then(ConfigNode::as_str)
        .ok_or_else(|| Error::malformed(path, "record without a string `name`"))
}

/// Serialize an array typed attribute as a comma joined string
fn join_array(value: &ConfigNode, path: &str) -> Result<String> {
    let ConfigNode::Sequence(items) = value else {
        return value.scalar_string().ok_or_else(|| {
            Error::malformed(path, format!("expected a list, found {}", value.kind()))
        });
    };

    let elements = items
        .iter()
        .map(|item| {
            item.scalar_string().ok_or_else(|| {
                Error::malformed(path, format!("list elements must be scalars, found {}", item.kind()))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(elements.join(","))
}
