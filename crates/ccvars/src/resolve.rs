//! map flattened attribute paths to legacy variables
use crate::config::TranslationConfig;
use crate::detect::{ClusterResource, Provider};
use crate::documents::Documents;
use crate::error::{Error, Result};
use crate::flatten::FlattenedMap;
use crate::ip_family;
use crate::node::ConfigNode;
use crate::rules::TOPOLOGY_CLASS;
use crate::tables::{
    CLUSTER_CIDR, INFRASTRUCTURE_PROVIDER, SERVICE_CIDR, TKG_IPV6_PRIMARY, TKG_IP_FAMILY,
    VSPHERE_PASSWORD, VSPHERE_USERNAME,
};
use indexmap::IndexMap;

pub const KIND_SECRET: &str = "Secret";

/// Legacy variable name to value, in the order the variables were first resolved
pub type LegacyVariables = IndexMap<String, String>;

#[derive(derive_new::new)]
pub struct Resolver<'c> {
    config: &'c TranslationConfig,
}

impl Resolver<'_> {
    /// Resolve the legacy variables of a flattened ClusterClass based cluster
    ///
    /// `documents` is searched for provider credentials that have no attribute path of their own.
    pub fn resolve(
        &self,
        flat: &FlattenedMap,
        cluster: &ClusterResource,
        documents: &Documents,
    ) -> Result<LegacyVariables> {
        let provider = Provider::from_class_name(flat.get(TOPOLOGY_CLASS))?;
        let table = self.config.mapping_table(provider);
        tracing::debug!(%provider, entries = table.len(), "mapping table selected");

        let mut variables = LegacyVariables::new();
        for (path, value) in flat.iter() {
            if let Some(name) = table.legacy_name(path) {
                variables.insert(name.to_string(), value.to_string());
            }
        }

        // runs after every plain mapping so the higher precedence path always wins
        for (higher, lower) in &self.config.precedence {
            if let (Some(name), Some(value)) = (table.legacy_name(higher), flat.get(higher)) {
                tracing::debug!(
                    higher = higher.as_str(),
                    lower = lower.as_str(),
                    name,
                    "higher precedence attribute applied"
                );
                variables.insert(name.to_string(), value.to_string());
            }
        }

        variables.insert(INFRASTRUCTURE_PROVIDER.to_string(), provider.to_string());

        if provider.requires_credential_secret() {
            for (name, value) in credentials_from_secret(cluster, documents)? {
                variables.insert(name.to_string(), value);
            }
        }

        let is_ipv6_primary = variables
            .get(TKG_IPV6_PRIMARY)
            .and_then(|value| parse_bool(value))
            .unwrap_or(false);
        let family = ip_family::classify_pair(
            variables.get(CLUSTER_CIDR).map(String::as_str).unwrap_or_default(),
            variables.get(SERVICE_CIDR).map(String::as_str).unwrap_or_default(),
            is_ipv6_primary,
        )?;
        variables.insert(TKG_IP_FAMILY.to_string(), family.to_string());

        tracing::debug!(variables = variables.len(), "legacy variables resolved");
        Ok(variables)
    }
}

/// `stringData.username` and `stringData.password` of the Secret named after the cluster
fn credentials_from_secret(
    cluster: &ClusterResource,
    documents: &Documents,
) -> Result<[(&'static str, String); 2]> {
    let secret_name = format!("{}/{}", cluster.namespace, cluster.name);
    let (index, _source, secret) = documents
        .find(KIND_SECRET, &cluster.name, &cluster.namespace)
        .ok_or_else(|| {
            Error::MissingCredential(format!(
                "Secret {secret_name} not found in {}",
                documents.describe_sources()
            ))
        })?;
    tracing::debug!(index, secret = secret_name.as_str(), "credential Secret found");

    let field = |field: &str| -> Result<String> {
        let path = format!("stringData.{field}");
        match secret.get_path(&["stringData", field]) {
            None => Err(Error::MissingCredential(format!(
                "{path} not found in Secret {secret_name}"
            ))),
            Some(ConfigNode::String(value)) => Ok(value.clone()),
            Some(other) => Err(Error::MissingCredential(format!(
                "Failed to parse {path} in Secret {secret_name}: expected a string, found {}",
                other.kind()
            ))),
        }
    };

    Ok([
        (VSPHERE_USERNAME, field("username")?),
        (VSPHERE_PASSWORD, field("password")?),
    ])
}

/// Boolean spellings accepted for legacy boolean variables
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
