//! End to end tests
//!
//! Loads the cluster files in /tests/fixtures/ and checks the legacy variables written to the store.

use ccvars::config::TranslationConfig;
use ccvars::documents::Documents;
use ccvars::options::ClusterOptions;
use ccvars::store::{MemoryStore, VariableStore};
use ccvars::translate::{translate, Translation};
use ccvars::ErrorKind;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("CCVARS_LOG"))
        .with_writer(std::io::stderr)
        .try_init();
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> Documents {
    init_tracing();
    let mut documents = Documents::default();
    documents
        .load_file(&fixture(name))
        .expect("fixture must load");
    documents
}

/// Sorted `NAME=value` lines
fn render(variables: &IndexMap<String, String>) -> String {
    let mut lines: Vec<String> = variables
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    lines.sort();
    lines.join("\n")
}

fn translated(documents: &Documents, store: &MemoryStore) -> IndexMap<String, String> {
    match translate(documents, &TranslationConfig::builtin(), store).expect("translate") {
        Translation::Translated(variables) => variables,
        Translation::NotClusterClass => panic!("expected a ClusterClass based cluster"),
    }
}

/// One line per resource, then the detection result
fn summary(documents: &Documents) -> String {
    let mut lines: Vec<String> = documents
        .resources()
        .map(|(_, _, resource)| match resource.kind.as_str() {
            "" => "(no kind)".to_string(),
            kind => format!("{kind} {}/{}", resource.namespace, resource.name),
        })
        .collect();

    lines.push(
        match ccvars::detect::detect(documents).expect("detect") {
            Some(cluster) => format!("cluster class: {}", cluster.class),
            None => "not ClusterClass based".to_string(),
        },
    );
    lines.join("\n")
}

#[test]
fn fixture_summaries() {
    init_tracing();
    insta::glob!("fixtures/*.yaml", |path| {
        let mut documents = Documents::default();
        documents.load_file(path).expect("fixture must load");
        insta::assert_snapshot!(summary(&documents));
    });
}

#[test]
fn aws() {
    let store = MemoryStore::default();
    let variables = translated(&load("cluster_aws.yaml"), &store);

    assert_eq!(store.snapshot(), variables);
    insta::assert_snapshot!(render(&variables), @r###"
    AWS_CONTROL_PLANE_OS_DISK_SIZE_GIB=80
    AWS_NODE_AZ=us-east-1a
    AWS_NODE_AZ_1=us-east-1b
    AWS_PRIVATE_NODE_CIDR=10.0.0.0/24
    AWS_PRIVATE_SUBNET_ID_1=idValuePrivate1
    AWS_PUBLIC_NODE_CIDR=10.1.1.0/24
    AWS_REGION=us-east-1
    AWS_SECURITY_GROUP_NODE=securitygroupNode
    AWS_VPC_ID=vpcID11
    CLUSTER_CIDR=2002::1234:abcd:ffff:c0a8:101/64,100.96.0.0/11
    CLUSTER_CLASS=tkg-aws-default
    CLUSTER_NAME=aws-workload-cluster1
    CONTROL_PLANE_MACHINE_COUNT=1
    CONTROL_PLANE_MACHINE_TYPE=m5.large
    INFRASTRUCTURE_PROVIDER=aws
    KUBERNETES_VERSION=v1.24.9+vmware.1
    NAMESPACE=default
    NODE_MACHINE_TYPE_1=worker1
    SERVICE_CIDR=2002::1234:abcd:ffff:c0a8:101/64,100.64.0.0/18
    TKG_CUSTOM_IMAGE_REPOSITORY_CA_CERTIFICATE=trust.imageRepository.val
    TKG_HTTPS_PROXY=http://10.0.200.100
    TKG_HTTP_PROXY=http://10.0.200.100
    TKG_HTTP_PROXY_ENABLED=true
    TKG_IPV6_PRIMARY=true
    TKG_IP_FAMILY=ipv6,ipv4
    TKG_NO_PROXY=127.0.0.1,localhost
    WORKER_MACHINE_COUNT_0=1
    WORKER_MACHINE_COUNT_1=2
    "###);
}

#[test]
fn vsphere_with_credential_secret() {
    let store = MemoryStore::default();
    let variables = translated(&load("cluster_vsphere.yaml"), &store);

    insta::assert_snapshot!(render(&variables), @r###"
    CLUSTER_CIDR=100.96.0.0/11
    CLUSTER_CLASS=tkg-vsphere-default
    CLUSTER_NAME=vsphere-workload
    CONTROL_PLANE_MACHINE_COUNT=3
    INFRASTRUCTURE_PROVIDER=vsphere
    KUBERNETES_VERSION=v1.24.9+vmware.1
    NAMESPACE=tkg-system
    SERVICE_CIDR=100.64.0.0/13
    TKG_IP_FAMILY=ipv4
    VSPHERE_AZ_0=az-1
    VSPHERE_CLONE_MODE=fullClone
    VSPHERE_CONTROL_PLANE_ENDPOINT=10.10.10.10
    VSPHERE_DATACENTER=/dc0
    VSPHERE_DATASTORE=/dc0/datastore/ds0
    VSPHERE_PASSWORD=Admin!23
    VSPHERE_SERVER=vcenter.example.com
    VSPHERE_SSH_AUTHORIZED_KEY=ssh-rsa AAAA
    VSPHERE_TEMPLATE=/dc0/vm/ubuntu-2004
    VSPHERE_USERNAME=administrator@vsphere.local
    WORKER_MACHINE_COUNT=2
    WORKER_NODE_NAMESERVERS=10.0.0.1
    "###);
}

#[test]
fn vsphere_secret_in_separate_file() {
    init_tracing();
    let content = std::fs::read_to_string(fixture("cluster_vsphere.yaml")).expect("fixture");
    let (cluster, secret) = content.split_once("\n---\n").expect("two documents");

    let dir = tempfile::tempdir().expect("temp dir");
    let cluster_path = dir.path().join("cluster.yaml");
    let secret_path = dir.path().join("secret.yaml");
    std::fs::write(&cluster_path, cluster).expect("write cluster");
    std::fs::write(&secret_path, secret).expect("write secret");

    let mut documents = Documents::default();
    documents.load_file(&cluster_path).expect("cluster");

    let err = translate(&documents, &TranslationConfig::builtin(), &MemoryStore::default())
        .expect_err("Secret missing");
    assert_eq!(err.kind(), ErrorKind::MissingCredential);
    assert!(err
        .to_string()
        .starts_with("Secret tkg-system/vsphere-workload not found in "));

    documents.load_file(&secret_path).expect("secret");
    let variables = translated(&documents, &MemoryStore::default());
    assert_eq!(variables["VSPHERE_USERNAME"], "administrator@vsphere.local");
}

#[test]
fn azure() {
    let variables = translated(&load("cluster_azure.yaml"), &MemoryStore::default());

    assert_eq!(variables["INFRASTRUCTURE_PROVIDER"], "azure");
    assert_eq!(variables["NAMESPACE"], "azure-clusters");
    assert_eq!(variables["AZURE_LOCATION"], "westus2");
    assert_eq!(variables["AZURE_VNET_CIDR"], "10.0.0.0/16,10.1.0.0/16");
    assert_eq!(variables["AZURE_VNET_NAME"], "my-vnet");
    assert_eq!(variables["AZURE_NODE_MACHINE_TYPE"], "Standard_D2s_v3");
    assert_eq!(variables["AZURE_ENABLE_NODE_OUTBOUND_LB"], "true");
    assert_eq!(variables["AZURE_NODE_AZ"], "1");
    assert_eq!(variables["AZURE_NODE_AZ_1"], "2");
    assert_eq!(variables["WORKER_MACHINE_COUNT_1"], "1");
    assert_eq!(variables["NODE_MACHINE_TYPE_1"], "Standard_D4s_v3");
    assert!(!variables.contains_key("VSPHERE_USERNAME"));
}

#[test]
fn legacy_config_is_not_cluster_class_based() {
    let store = MemoryStore::default();
    let translation = translate(
        &load("cluster_legacy.yaml"),
        &TranslationConfig::builtin(),
        &store,
    )
    .expect("translate");

    assert_eq!(translation, Translation::NotClusterClass);
    assert!(store.snapshot().is_empty());
}

#[test]
fn fatal_errors_leave_store_untouched() {
    init_tracing();
    let aws = std::fs::read_to_string(fixture("cluster_aws.yaml")).expect("fixture");

    let cases = [
        (
            aws.replace("tkg-aws-default", "tkg-unknown-default"),
            ErrorKind::UnknownProvider,
        ),
        (
            aws.replace("    class: tkg-aws-default\n", ""),
            ErrorKind::MissingTopology,
        ),
        (
            aws.replace("ipv6Primary: true", "ipv6Primary: false")
                .replace("- 100.64.0.0/18", "- 100.64.0.0/18\n      - 100.65.0.0/18"),
            ErrorKind::InconsistentIpFamily,
        ),
        (
            aws.replace("region\n      value: us-east-1", "region\n      value: !region us-east-1"),
            ErrorKind::MalformedInput,
        ),
    ];

    for (content, kind) in cases {
        let store = MemoryStore::new(IndexMap::from([(
            "CLUSTER_PLAN".to_string(),
            "dev".to_string(),
        )]));
        let documents = Documents::parse(&content).expect("valid yaml");
        let err = translate(&documents, &TranslationConfig::builtin(), &store)
            .expect_err("must fail");

        assert_eq!(err.kind(), kind, "{err}");
        assert_eq!(store.snapshot().len(), 1);
    }
}

#[test]
fn mapping_file_overlay() {
    init_tracing();
    let mut mapping = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        mapping,
        r#"
mappings:
  aws:
    spec.topology.workers.machineDeployments.1.variables.overrides.NODE_MACHINE_TYPE: NODE_MACHINE_TYPE_1
    spec.topology.variables.nodes.1.machineType: NODE_MACHINE_TYPE_1
"#
    )
    .expect("write");
    let config = TranslationConfig::load(mapping.path()).expect("valid mapping");

    let documents = Documents::parse(
        r#"
kind: Cluster
metadata:
  name: precedence
  namespace: default
spec:
  topology:
    class: tkg-aws-default
    workers:
      machineDeployments:
      - replicas: 1
      - replicas: 1
        variables:
          overrides:
          - name: NODE_MACHINE_TYPE
            value: m5.2xlarge
    variables:
    - name: nodes
      value:
      - machineType: t3.small
      - machineType: t3.large
"#,
    )
    .expect("valid yaml");

    let store = MemoryStore::default();
    translate(&documents, &config, &store).expect("translate");
    assert_eq!(
        store.get("NODE_MACHINE_TYPE_1").expect("mapped"),
        "m5.2xlarge"
    );
}

#[test]
fn options_follow_translated_variables() {
    let store = MemoryStore::default();
    translated(&load("cluster_vsphere.yaml"), &store);

    let mut options = ClusterOptions {
        cluster_name: "from-flag".into(),
        plan: "devcc".into(),
        ..Default::default()
    };
    options.override_from_store(&store);

    assert_eq!(options.cluster_name, "vsphere-workload");
    assert_eq!(options.plan, "devcc");
    assert_eq!(options.namespace, "tkg-system");
    assert_eq!(options.infrastructure_provider, "vsphere");
    assert_eq!(options.control_plane_machine_count, "3");
    assert_eq!(options.worker_machine_count, "2");
    assert_eq!(options.vsphere_control_plane_endpoint, "10.10.10.10");
}

#[test]
fn no_proxy_without_proxy_servers_keeps_proxy_disabled() {
    init_tracing();
    let documents = Documents::parse(
        r#"
kind: Cluster
metadata:
  name: no-proxy
  namespace: default
spec:
  topology:
    class: tkg-aws-default
    variables:
    - name: proxy
      value:
        noProxy: [localhost, 127.0.0.1]
"#,
    )
    .expect("valid yaml");

    let variables = translated(&documents, &MemoryStore::default());
    assert_eq!(variables["TKG_NO_PROXY"], "localhost,127.0.0.1");
    assert!(!variables.contains_key("TKG_HTTP_PROXY_ENABLED"));
}
