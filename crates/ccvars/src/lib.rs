//! # ccvars - ClusterClass to legacy variables
//!
//! Translates a ClusterClass based `Cluster` resource into the flat `NAME=value` variables consumed by the
//! legacy, template based provisioning pipeline.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `ccvars` works internally.
//!
//! ### Loading input
//!
//! The input is one or more yaml streams, each holding any number of kubernetes style resources
//! (`apiVersion`, `kind`, `metadata`, ...). We use [documents::Documents] to store all resources of all streams and
//! track their source path, so error messages can point back to the file. Every resource is parsed into an untyped
//! [node::ConfigNode] tree. At this point a document only has to be a yaml map to be accepted.
//!
//! ### Detection
//!
//! see [detect::detect]
//!
//! The first resource of kind `Cluster` is the translation target. A cluster without `spec.topology.class` is
//! rejected. Input without any `Cluster` resource is not ClusterClass based and left alone.
//!
//! ### Flattening
//!
//! see [flatten::Flattener]
//!
//! The cluster's `spec` is walked and every leaf is recorded under its dotted attribute path.
//! Sequences are walked differently depending on the path they are found at ([rules::PathRules]):
//!
//! | **path**                                                   | **sequence handling**                        |
//! |------------------------------------------------------------|----------------------------------------------|
//! | `spec.clusterNetwork.pods.cidrBlocks`, ...                 | joined into a single `a,b` value             |
//! | `spec.topology.workers.machineDeployments`, ...            | element `i` continues at `path.i`            |
//! | `spec.topology.variables`, machine deployment overrides    | `{name, value}` records, at `path.<name>`    |
//! | anything else                                              | every element continues at `path` itself     |
//!
//! The first value written to a path wins. Later writes are logged and dropped.
//!
//! ### Resolving
//!
//! see [resolve::Resolver]
//!
//! The provider is taken from the class name (`tkg-{aws,azure,vsphere}-default`) and selects a mapping table
//! ([config::TranslationConfig::mapping_table]). Every flattened path with a legacy name becomes a legacy variable,
//! then higher precedence paths are applied on top. Finally a few variables without an attribute path are derived:
//! - `INFRASTRUCTURE_PROVIDER`
//! - `VSPHERE_USERNAME` and `VSPHERE_PASSWORD` from a Secret named after the cluster
//! - `TKG_IP_FAMILY` from the cluster and service CIDRs ([ip_family::classify_pair])
//!
//! ### Output
//!
//! [translate::translate] runs all of the above and writes the result into a [store::VariableStore] in a single
//! batch. Nothing is written when any step fails.
//!
pub mod config;
pub mod detect;
pub mod documents;
pub mod error;
pub mod flatten;
pub mod ip_family;
pub mod node;
pub mod options;
pub mod resolve;
pub mod rules;
pub mod store;
pub mod tables;
pub mod translate;

pub use error::{Error, ErrorKind, Result};
