//! ccvars cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; ccvars ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a ClusterClass based cluster file into legacy variables
    ///
    /// Reads yaml from stdin unless files are provided (via --input-file)
    Translate(TranslateCommand),

    /// Report whether the input holds a ClusterClass based Cluster resource
    Detect(DetectCommand),

    /// Classify pods and services CIDRs into an IP family
    #[command(name = "ip-family")]
    IpFamily(IpFamilyCommand),

    /// Cluster creation options after applying the translated variables
    Options(OptionsCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct TranslateCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub mapping: MappingArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct DetectCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct IpFamilyCommand {
    /// Comma separated pods CIDRs
    #[clap(long = "pods", default_value = "")]
    pub pods: String,

    /// Comma separated services CIDRs
    #[clap(long = "services", default_value = "")]
    pub services: String,

    /// The first CIDR of each list must be IPv6
    #[clap(long = "ipv6-primary")]
    pub ipv6_primary: bool,
}

#[derive(Parser, Debug)]
pub struct OptionsCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub mapping: MappingArgs,

    #[clap(flatten)]
    pub output: OutputArgs,

    /// Cluster name, replaced by CLUSTER_NAME
    #[clap(long = "cluster-name", default_value = "")]
    pub cluster_name: String,

    /// Cluster plan, replaced by CLUSTER_PLAN
    #[clap(long = "plan", default_value = "")]
    pub plan: String,

    /// Namespace, replaced by NAMESPACE
    #[clap(long = "namespace", default_value = "")]
    pub namespace: String,

    /// Number of control plane machines, replaced by CONTROL_PLANE_MACHINE_COUNT
    #[clap(long = "controlplane-machine-count", default_value = "")]
    pub control_plane_machine_count: String,

    /// Number of worker machines, replaced by WORKER_MACHINE_COUNT
    #[clap(long = "worker-machine-count", default_value = "")]
    pub worker_machine_count: String,

    /// Container network interface, replaced by CNI
    #[clap(long = "cni", default_value = "")]
    pub cni: String,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load a file
    #[clap(short = 'f', long = "input-file")]
    pub files: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct MappingArgs {
    /// Lay a mapping configuration file over the built-in tables
    #[clap(long = "mapping-file")]
    pub mapping_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
    /// `NAME=value` lines
    Env,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Env => f.write_str("env"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub mapping: MappingArgs,

    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    Documents,
    Flattened,
    Mapping,
}
