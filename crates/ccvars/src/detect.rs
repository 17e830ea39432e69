//! locate the Cluster resource and find out if it is ClusterClass based
use crate::documents::Documents;
use crate::error::{Error, Result};
use crate::node::ConfigNode;
use regex::Regex;
use std::sync::OnceLock;

pub const KIND_CLUSTER: &str = "Cluster";

const TOPOLOGY_CLASS_PATTERN: &str = r"^tkg-(aws|azure|vsphere)-default$";

/// Infrastructure provider targeted by a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Aws,
    Azure,
    Vsphere,
    Docker,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Vsphere => "vsphere",
            Provider::Docker => "docker",
        }
    }

    /// Provider named by a `tkg-{provider}-default` ClusterClass
    ///
    /// Only aws, azure and vsphere ship such a class.
    pub fn from_class_name(class_name: Option<&str>) -> Result<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(TOPOLOGY_CLASS_PATTERN).expect("topology class pattern is valid")
        });

        let provider = class_name
            .and_then(|name| pattern.captures(name))
            .and_then(|captures| captures.get(1))
            .ok_or(Error::UnknownProvider)?;

        provider.as_str().parse()
    }

    /// Whether the legacy variables need credentials taken from a Secret in the input
    pub fn requires_credential_secret(&self) -> bool {
        matches!(self, Provider::Vsphere)
    }
}

impl std::str::FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aws" => Ok(Provider::Aws),
            "azure" => Ok(Provider::Azure),
            "vsphere" => Ok(Provider::Vsphere),
            "docker" => Ok(Provider::Docker),
            _ => Err(Error::UnknownProvider),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The located, ClusterClass based, Cluster resource
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterResource {
    pub name: String,
    pub namespace: String,
    /// `spec.topology.class`, never empty
    pub class: String,
    pub spec: ConfigNode,
}

/// Find the first Cluster resource
///
/// - no Cluster resource: `Ok(None)`
/// - Cluster resource without `spec.topology.class`: [Error::MissingTopology]
/// - otherwise the cluster is ClusterClass based: `Ok(Some(..))`
pub fn detect(documents: &Documents) -> Result<Option<ClusterResource>> {
    let Some((index, _source, cluster)) = documents.first_of_kind(KIND_CLUSTER) else {
        tracing::debug!("no Cluster resource found");
        return Ok(None);
    };

    let class = cluster
        .get_path(&["spec", "topology", "class"])
        .and_then(ConfigNode::as_str)
        .filter(|class| !class.is_empty())
        .ok_or(Error::MissingTopology)?;

    tracing::debug!(
        index,
        name = cluster.name.as_str(),
        namespace = cluster.namespace.as_str(),
        class,
        "ClusterClass based Cluster resource found"
    );

    Ok(Some(ClusterResource {
        name: cluster.name.clone(),
        namespace: cluster.namespace.clone(),
        class: class.to_string(),
        spec: cluster.get_path(&["spec"]).cloned().unwrap_or(ConfigNode::Null),
    }))
}

/// [detect] on a raw yaml stream; empty input is not ClusterClass based
pub fn detect_str(document: &str) -> Result<Option<ClusterResource>> {
    if document.trim().is_empty() {
        return Ok(None);
    }

    detect(&Documents::parse(document)?)
}
