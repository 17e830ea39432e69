//! end-to-end translation of a ClusterClass based cluster into legacy variables
use crate::config::TranslationConfig;
use crate::detect::{detect, ClusterResource};
use crate::documents::Documents;
use crate::error::Result;
use crate::flatten::{FlattenedMap, Flattener};
use crate::resolve::{LegacyVariables, Resolver};
use crate::rules::{METADATA_NAME, METADATA_NAMESPACE, SPEC};
use crate::store::VariableStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// The input has no Cluster resource; nothing was written
    NotClusterClass,
    /// Variables written to the store
    Translated(LegacyVariables),
}

/// Flatten the cluster's name, namespace and `spec`
pub fn flatten_cluster(cluster: &ClusterResource, config: &TranslationConfig) -> Result<FlattenedMap> {
    let rules = config.path_rules()?;
    let mut flat = FlattenedMap::default();
    flat.insert(METADATA_NAME, cluster.name.clone());
    flat.insert(METADATA_NAMESPACE, cluster.namespace.clone());
    Flattener::new(&rules).flatten(&cluster.spec, SPEC, &mut flat)?;

    tracing::debug!(attributes = flat.len(), "cluster flattened");
    Ok(flat)
}

/// Detect, flatten and resolve, then write the result to `store` in one batch
///
/// Nothing is written when any step fails.
pub fn translate(
    documents: &Documents,
    config: &TranslationConfig,
    store: &dyn VariableStore,
) -> Result<Translation> {
    let Some(cluster) = detect(documents)? else {
        return Ok(Translation::NotClusterClass);
    };

    let flat = flatten_cluster(&cluster, config)?;
    let variables = Resolver::new(config).resolve(&flat, &cluster, documents)?;

    store.set_batch(&variables);
    tracing::info!(
        cluster = cluster.name.as_str(),
        namespace = cluster.namespace.as_str(),
        variables = variables.len(),
        "cluster translated to legacy variables"
    );
    Ok(Translation::Translated(variables))
}
