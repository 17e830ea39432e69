//! collection of kubernetes style resources (parsed yaml documents and path to source file)
//!
//! [Documents] tracks
//! - the source path
//! - every non-empty yaml document of each source, as a [Resource]
//! and defines a numeric index for each resource. Once added those indices are stable (removal is not possible)
use crate::error::{Error, Result};
use crate::node::ConfigNode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A single resource object: `apiVersion`, `kind`, `metadata` and the full body
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub body: ConfigNode,
}

impl Resource {
    pub fn new(body: ConfigNode) -> Self {
        let text = |path: &[&str]| {
            body.get_path(path)
                .and_then(ConfigNode::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            api_version: text(&["apiVersion"]),
            kind: text(&["kind"]),
            name: text(&["metadata", "name"]),
            namespace: text(&["metadata", "namespace"]),
            body,
        }
    }

    pub fn get_path(&self, path: &[&str]) -> Option<&ConfigNode> {
        self.body.get_path(path)
    }
}

#[derive(Default, Debug)]
pub struct Documents {
    sources: Vec<Source>,
    resources: Vec<(usize, Resource)>,
}

impl Documents {
    pub fn parse(content: &str) -> Result<Self> {
        let mut documents = Documents::default();
        documents.insert(content, None)?;
        Ok(documents)
    }

    /// Parses and indexes every document of a (multi document) yaml stream
    ///
    /// Nothing is added when any document of the stream fails to parse.
    pub fn insert(&mut self, content: &str, path: impl Into<Option<PathBuf>>) -> Result<()> {
        let mut parsed = vec![];
        for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
            let value = serde_yaml::Value::deserialize(document)?;
            let node = ConfigNode::try_from(value)?;
            match node {
                ConfigNode::Null => continue,
                ConfigNode::Map(_) => parsed.push(Resource::new(node)),
                other => {
                    return Err(Error::NotAResource {
                        index,
                        kind: match other {
                            ConfigNode::Sequence(_) => "sequence",
                            ConfigNode::Tagged { .. } => "tagged value",
                            _ => "scalar",
                        },
                    })
                }
            }
        }

        let source_index = self.sources.len();
        self.sources.push(path.into());
        tracing::debug!(
            source = source_index,
            resources = parsed.len(),
            "documents indexed"
        );
        self.resources
            .extend(parsed.into_iter().map(|resource| (source_index, resource)));
        Ok(())
    }

    pub fn load_file(&mut self, file_path: &Path) -> Result<()> {
        let io_error = |source| Error::Io {
            path: file_path.to_path_buf(),
            source,
        };
        let file_path = file_path.canonicalize().map_err(io_error)?;
        tracing::info!(path=%file_path.display(), "loading file");

        let file_contents = std::fs::read_to_string(&file_path).map_err(io_error)?;
        self.insert(&file_contents, Some(file_path))
    }

    pub fn resources(&self) -> impl Iterator<Item = SourceResource> {
        self.resources
            .iter()
            .enumerate()
            .map(|(index, (source_index, resource))| {
                (index, &self.sources[*source_index], resource)
            })
    }

    /// First resource (in load order) of the given kind
    pub fn first_of_kind(&self, kind: &str) -> Option<SourceResource> {
        self.resources()
            .find(|(_, _, resource)| resource.kind == kind)
    }

    /// First resource (in load order) matching kind, name and namespace
    pub fn find(&self, kind: &str, name: &str, namespace: &str) -> Option<SourceResource> {
        self.resources().find(|(_, _, resource)| {
            resource.kind == kind && resource.name == name && resource.namespace == namespace
        })
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Human readable description of all sources, used in error messages
    pub fn describe_sources(&self) -> String {
        let names: Vec<String> = self
            .sources
            .iter()
            .map(|source| match source {
                Some(path) => path.display().to_string(),
                None => "input document".to_string(),
            })
            .collect();

        if names.is_empty() {
            "input document".to_string()
        } else {
            names.join(", ")
        }
    }
}

/// Utility macro to create [Documents]
///
/// Create from a single yaml stream
/// ```
/// # use ccvars::documents;
/// documents!("kind: Cluster\nmetadata:\n  name: one");
/// ```
///
/// Create from multiple streams (path required)
/// ```
/// # use ccvars::documents;
/// documents! {
///   "cluster.yaml" => "kind: Cluster",
///   "secret.yaml" => "kind: Secret"
/// };
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use ccvars::documents;
/// documents!("- not\n- a\n- resource");
/// ```
#[macro_export]
macro_rules! documents {
    // single stream without source
    { $expr:expr } => {
        $crate::documents::Documents::parse($expr).expect("documents must parse")
    };
    // multiple streams with sources
    { $($source:expr => $expr:expr),+ } => {{
        let mut docs = $crate::documents::Documents::default();
        $(
            docs.insert($expr, Some(std::path::PathBuf::from($source))).expect("documents must parse");
        )+

        docs
    }};
}

pub type Source = Option<std::path::PathBuf>;
pub type SourceResource<'a> = (usize, &'a Source, &'a Resource);
