//! error types
use crate::ip_family::IpFamilyError;
use std::path::PathBuf;

/// Returned when a Cluster resource has no `spec.topology.class`
pub const CLUSTER_WITHOUT_TOPOLOGY_MSG: &str = "input file contains Cluster resource which doesn't have ClusterClass specified. Passing Cluster resource without ClusterClass specification is not supported";

/// Returned when `spec.topology.class` does not follow the `tkg-{provider}-default` convention
pub const TOPOLOGY_CLASS_INCORRECT_MSG: &str = "input cluster class file, attribute spec.topology.class has no value or incorrect value or not following correct naming convention";

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Unable to read input file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Input file content is not yaml formatted")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Input document {index} is a {kind}, expected a resource object")]
    NotAResource { index: usize, kind: &'static str },
    #[error("unsupported input value type:{kind} in input cluster class file attribute at:{path}")]
    UnsupportedValue { kind: String, path: String },
    #[error("malformed input cluster class file attribute at:{path}: {reason}")]
    MalformedAttribute { path: String, reason: String },
    #[error("{}", CLUSTER_WITHOUT_TOPOLOGY_MSG)]
    MissingTopology,
    #[error("{}", TOPOLOGY_CLASS_INCORRECT_MSG)]
    UnknownProvider,
    #[error("{0}")]
    MissingCredential(String),
    #[error(transparent)]
    IpFamily(#[from] IpFamilyError),
    #[error("variable {0} not found")]
    VariableNotFound(String),
    #[error("invalid mapping configuration {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid override record pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Classification of fatal translation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    MissingTopology,
    UnknownProvider,
    MissingCredential,
    InconsistentIpFamily,
    NotFound,
    Configuration,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. }
            | Error::Yaml(_)
            | Error::NotAResource { .. }
            | Error::UnsupportedValue { .. }
            | Error::MalformedAttribute { .. } => ErrorKind::MalformedInput,
            Error::MissingTopology => ErrorKind::MissingTopology,
            Error::UnknownProvider => ErrorKind::UnknownProvider,
            Error::MissingCredential(_) => ErrorKind::MissingCredential,
            Error::IpFamily(_) => ErrorKind::InconsistentIpFamily,
            Error::VariableNotFound(_) => ErrorKind::NotFound,
            Error::Config { .. } | Error::InvalidPattern { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedAttribute {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
