mod cli;

use ccvars::config::TranslationConfig;
use ccvars::detect::Provider;
use ccvars::documents::Documents;
use ccvars::options::ClusterOptions;
use ccvars::store::MemoryStore;
use ccvars::translate::{translate, Translation};
use serde::Serialize;
use std::io::Write;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CCVARS_LOG"))
        .with_writer(std::io::stderr)
        .init();

    for new_path in cli.directory.iter() {
        match new_path.canonicalize() {
            Err(e) => {
                eprintln!(
                    "Failed to resolve path for -C/--directory {}\n{}",
                    new_path.display(),
                    e
                );
                std::process::exit(1);
            }
            Ok(cwd) => {
                if let Err(err) = std::env::set_current_dir(&cwd) {
                    eprintln!("Failed to set work directory to {}\n{}", cwd.display(), err,);
                    std::process::exit(1);
                }

                tracing::info!(directory=%cwd.display(), "Changed working directory");
            }
        }
    }

    let command_result = match cli.command {
        cli::Command::Translate(translate_cli) => translate_command(translate_cli),
        cli::Command::Detect(detect_cli) => detect(detect_cli),
        cli::Command::IpFamily(ip_family_cli) => ip_family(ip_family_cli),
        cli::Command::Options(options_cli) => options(options_cli),
        cli::Command::Dev(dev_cli) => dev(dev_cli),
    };

    if let Err(e) = command_result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

pub fn translate_command(cli: cli::TranslateCommand) -> anyhow::Result<()> {
    let documents = load(&cli.input)?;
    let config = mapping(&cli.mapping)?;

    match translate(&documents, &config, &MemoryStore::default())? {
        Translation::Translated(variables) => output(&cli.output, &variables),
        Translation::NotClusterClass => {
            anyhow::bail!("Input does not contain a Cluster resource, nothing to translate")
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Detection {
    cluster_class_based: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<Provider>,
}

pub fn detect(cli: cli::DetectCommand) -> anyhow::Result<()> {
    let documents = load(&cli.input)?;

    let detection = match ccvars::detect::detect(&documents)? {
        None => Detection {
            cluster_class_based: false,
            name: None,
            namespace: None,
            class: None,
            provider: None,
        },
        Some(cluster) => Detection {
            cluster_class_based: true,
            provider: Provider::from_class_name(Some(&cluster.class)).ok(),
            name: Some(cluster.name),
            namespace: Some(cluster.namespace),
            class: Some(cluster.class),
        },
    };

    output(&cli.output, &detection)
}

pub fn ip_family(cli: cli::IpFamilyCommand) -> anyhow::Result<()> {
    let family = ccvars::ip_family::classify_pair(&cli.pods, &cli.services, cli.ipv6_primary)?;
    println!("{family}");
    Ok(())
}

pub fn options(cli: cli::OptionsCommand) -> anyhow::Result<()> {
    let documents = load(&cli.input)?;
    let config = mapping(&cli.mapping)?;

    let mut options = ClusterOptions {
        cluster_name: cli.cluster_name,
        plan: cli.plan,
        namespace: cli.namespace,
        control_plane_machine_count: cli.control_plane_machine_count,
        worker_machine_count: cli.worker_machine_count,
        cni_type: cli.cni,
        ..Default::default()
    };

    let store = MemoryStore::default();
    if translate(&documents, &config, &store)? == Translation::NotClusterClass {
        tracing::info!("input is not ClusterClass based, options left unchanged");
    }
    options.override_from_store(&store);

    output(&cli.output, &options)
}

fn load(input: &cli::InputArgs) -> anyhow::Result<Documents> {
    if input.files.is_empty() {
        let stdin = std::io::read_to_string(std::io::stdin())?;
        return Ok(Documents::parse(&stdin)?);
    }

    let mut documents = Documents::default();
    for file_path in &input.files {
        documents.load_file(file_path)?;
    }

    Ok(documents)
}

fn mapping(mapping: &cli::MappingArgs) -> anyhow::Result<TranslationConfig> {
    Ok(match &mapping.mapping_file {
        Some(path) => TranslationConfig::load(path)?,
        None => TranslationConfig::builtin(),
    })
}

fn output<T: Serialize>(output: &cli::OutputArgs, value: &T) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), value)?,
        cli::OutputFormat::Env => {
            let serde_json::Value::Object(entries) = serde_json::to_value(value)? else {
                anyhow::bail!("Output can not be written as NAME=value lines");
            };

            let mut stdout = std::io::stdout().lock();
            for (name, value) in entries {
                match value {
                    serde_json::Value::String(value) => writeln!(stdout, "{name}={value}")?,
                    other => writeln!(stdout, "{name}={other}")?,
                }
            }
        }
    };

    Ok(())
}

/// (ccvars-)developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(cli: cli::DevCommand) -> anyhow::Result<()> {
    let config = mapping(&cli.mapping)?;

    match cli.command {
        cli::DevSubCommand::Documents => println!("{:#?}", load(&cli.input)?),
        cli::DevSubCommand::Flattened => {
            let documents = load(&cli.input)?;
            let cluster = ccvars::detect::detect(&documents)?
                .ok_or_else(|| anyhow::anyhow!("No Cluster resource found"))?;
            let flat = ccvars::translate::flatten_cluster(&cluster, &config)?;
            for (path, value) in flat.iter() {
                println!("{path} = {value}");
            }
        }
        cli::DevSubCommand::Mapping => serde_yaml::to_writer(std::io::stdout(), &config)?,
    }

    Ok(())
}
