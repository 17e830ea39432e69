//! built-in attribute path to legacy variable tables
//!
//! An empty legacy name means the attribute is known but has no legacy counterpart.
use crate::rules::{
    TOPOLOGY_VARIABLES, TOPOLOGY_VARIABLES_NETWORK_SUBNETS, TOPOLOGY_VARIABLES_NODES,
    TOPOLOGY_WORKERS_MACHINE_DEPLOYMENTS,
};

pub const CLUSTER_NAME: &str = "CLUSTER_NAME";
pub const CLUSTER_PLAN: &str = "CLUSTER_PLAN";
pub const NAMESPACE: &str = "NAMESPACE";
pub const CLUSTER_CIDR: &str = "CLUSTER_CIDR";
pub const SERVICE_CIDR: &str = "SERVICE_CIDR";
pub const INFRASTRUCTURE_PROVIDER: &str = "INFRASTRUCTURE_PROVIDER";
pub const TKG_IP_FAMILY: &str = "TKG_IP_FAMILY";
pub const TKG_IPV6_PRIMARY: &str = "TKG_IPV6_PRIMARY";
pub const VSPHERE_USERNAME: &str = "VSPHERE_USERNAME";
pub const VSPHERE_PASSWORD: &str = "VSPHERE_PASSWORD";
pub const CONTROL_PLANE_MACHINE_COUNT: &str = "CONTROL_PLANE_MACHINE_COUNT";
pub const WORKER_MACHINE_COUNT: &str = "WORKER_MACHINE_COUNT";
pub const SIZE: &str = "SIZE";
pub const CONTROLPLANE_SIZE: &str = "CONTROLPLANE_SIZE";
pub const WORKER_SIZE: &str = "WORKER_SIZE";
pub const CNI: &str = "CNI";
pub const ENABLE_CLUSTER_OPTIONS: &str = "ENABLE_CLUSTER_OPTIONS";
pub const VSPHERE_CONTROL_PLANE_ENDPOINT: &str = "VSPHERE_CONTROL_PLANE_ENDPOINT";

pub const COMMON: &[(&str, &str)] = &[
    ("metadata.name", CLUSTER_NAME),
    ("metadata.namespace", NAMESPACE),
    ("spec.clusterNetwork.pods.cidrBlocks", CLUSTER_CIDR),
    ("spec.clusterNetwork.services.cidrBlocks", SERVICE_CIDR),
    ("spec.topology.class", "CLUSTER_CLASS"),
    ("spec.topology.version", "KUBERNETES_VERSION"),
    ("spec.topology.controlPlane.replicas", CONTROL_PLANE_MACHINE_COUNT),
    ("spec.topology.controlPlane.metadata.annotations.run.tanzu.vmware.com/resolve-os-image", ""),
    ("spec.topology.variables.network.ipv6Primary", TKG_IPV6_PRIMARY),
    ("spec.topology.variables.proxy", "TKG_HTTP_PROXY_ENABLED"),
    ("spec.topology.variables.proxy.httpProxy", "TKG_HTTP_PROXY"),
    ("spec.topology.variables.proxy.httpsProxy", "TKG_HTTPS_PROXY"),
    ("spec.topology.variables.proxy.noProxy", "TKG_NO_PROXY"),
    ("spec.topology.variables.imageRepository.host", "TKG_CUSTOM_IMAGE_REPOSITORY"),
    ("spec.topology.variables.imageRepository.tlsCertificateValidation", "TKG_CUSTOM_IMAGE_REPOSITORY_SKIP_TLS_VERIFY"),
    ("spec.topology.variables.clusterRole", "TKG_CLUSTER_ROLE"),
    ("spec.topology.variables.auditLogging.enabled", "ENABLE_AUDIT_LOGGING"),
    ("spec.topology.variables.trust.proxy", "TKG_PROXY_CA_CERT"),
    ("spec.topology.variables.trust.imageRepository", "TKG_CUSTOM_IMAGE_REPOSITORY_CA_CERTIFICATE"),
    ("spec.topology.variables.apiServerPort", "CLUSTER_API_SERVER_PORT"),
];

pub const AWS: &[(&str, &str)] = &[
    ("spec.topology.variables.region", "AWS_REGION"),
    ("spec.topology.variables.sshKeyName", "AWS_SSH_KEY_NAME"),
    ("spec.topology.variables.loadBalancerSchemeInternal", "AWS_LOAD_BALANCER_SCHEME_INTERNAL"),
    ("spec.topology.variables.network.subnets.0.az", "AWS_NODE_AZ"),
    ("spec.topology.variables.network.subnets.0.private.cidr", "AWS_PRIVATE_NODE_CIDR"),
    ("spec.topology.variables.network.subnets.0.private.id", "AWS_PRIVATE_SUBNET_ID"),
    ("spec.topology.variables.network.subnets.0.public.cidr", "AWS_PUBLIC_NODE_CIDR"),
    ("spec.topology.variables.network.subnets.0.public.id", "AWS_PUBLIC_SUBNET_ID"),
    ("spec.topology.variables.network.subnets.1.az", "AWS_NODE_AZ_1"),
    ("spec.topology.variables.network.subnets.1.private.cidr", "AWS_PRIVATE_NODE_CIDR_1"),
    ("spec.topology.variables.network.subnets.1.private.id", "AWS_PRIVATE_SUBNET_ID_1"),
    ("spec.topology.variables.network.subnets.1.public.cidr", "AWS_PUBLIC_NODE_CIDR_1"),
    ("spec.topology.variables.network.subnets.1.public.id", "AWS_PUBLIC_SUBNET_ID_1"),
    ("spec.topology.variables.network.subnets.2.az", "AWS_NODE_AZ_2"),
    ("spec.topology.variables.network.subnets.2.private.cidr", "AWS_PRIVATE_NODE_CIDR_2"),
    ("spec.topology.variables.network.subnets.2.private.id", "AWS_PRIVATE_SUBNET_ID_2"),
    ("spec.topology.variables.network.subnets.2.public.cidr", "AWS_PUBLIC_NODE_CIDR_2"),
    ("spec.topology.variables.network.subnets.2.public.id", "AWS_PUBLIC_SUBNET_ID_2"),
    ("spec.topology.variables.network.vpc.cidr", "AWS_VPC_CIDR"),
    ("spec.topology.variables.network.vpc.existingID", "AWS_VPC_ID"),
    ("spec.topology.variables.network.securityGroupOverrides.bastion", "AWS_SECURITY_GROUP_BASTION"),
    ("spec.topology.variables.network.securityGroupOverrides.apiServerLB", "AWS_SECURITY_GROUP_APISERVER_LB"),
    ("spec.topology.variables.network.securityGroupOverrides.lb", "AWS_SECURITY_GROUP_LB"),
    ("spec.topology.variables.network.securityGroupOverrides.controlPlane", "AWS_SECURITY_GROUP_CONTROLPLANE"),
    ("spec.topology.variables.network.securityGroupOverrides.node", "AWS_SECURITY_GROUP_NODE"),
    ("spec.topology.variables.bastion.enabled", "BASTION_HOST_ENABLED"),
    ("spec.topology.variables.identityRef.name", "AWS_IDENTITY_REF_NAME"),
    ("spec.topology.variables.identityRef.kind", "AWS_IDENTITY_REF_KIND"),
    ("spec.topology.variables.worker.instanceType", "NODE_MACHINE_TYPE"),
    ("spec.topology.variables.worker.rootVolume.sizeGiB", "AWS_NODE_OS_DISK_SIZE_GIB"),
    ("spec.topology.variables.controlPlane.instanceType", "CONTROL_PLANE_MACHINE_TYPE"),
    ("spec.topology.variables.controlPlane.rootVolume.sizeGiB", "AWS_CONTROL_PLANE_OS_DISK_SIZE_GIB"),
    ("spec.topology.workers.machineDeployments.0.class", ""),
    ("spec.topology.workers.machineDeployments.0.name", ""),
    ("spec.topology.workers.machineDeployments.0.replicas", "WORKER_MACHINE_COUNT_0"),
    ("spec.topology.workers.machineDeployments.0.failureDomain", ""),
    ("spec.topology.workers.machineDeployments.0.metadata.annotations.run.tanzu.vmware.com/resolve-os-image", ""),
    ("spec.topology.workers.machineDeployments.1.class", ""),
    ("spec.topology.workers.machineDeployments.1.name", ""),
    ("spec.topology.workers.machineDeployments.1.replicas", "WORKER_MACHINE_COUNT_1"),
    ("spec.topology.workers.machineDeployments.1.failureDomain", ""),
    ("spec.topology.workers.machineDeployments.1.variables.overrides.worker.instanceType", "NODE_MACHINE_TYPE_1"),
    ("spec.topology.workers.machineDeployments.2.class", ""),
    ("spec.topology.workers.machineDeployments.2.name", ""),
    ("spec.topology.workers.machineDeployments.2.replicas", "WORKER_MACHINE_COUNT_2"),
    ("spec.topology.workers.machineDeployments.2.failureDomain", ""),
    ("spec.topology.workers.machineDeployments.2.variables.overrides.worker.instanceType", "NODE_MACHINE_TYPE_2"),
];

pub const AZURE: &[(&str, &str)] = &[
    ("spec.topology.variables.network.vnet.cidrBlocks", "AZURE_VNET_CIDR"),
    ("spec.topology.variables.network.vnet.name", "AZURE_VNET_NAME"),
    ("spec.topology.variables.network.vnet.resourceGroup", "AZURE_VNET_RESOURCE_GROUP"),
    ("spec.topology.variables.location", "AZURE_LOCATION"),
    ("spec.topology.variables.resourceGroup", "AZURE_RESOURCE_GROUP"),
    ("spec.topology.variables.subscriptionID", "AZURE_SUBSCRIPTION_ID"),
    ("spec.topology.variables.environment", "AZURE_ENVIRONMENT"),
    ("spec.topology.variables.sshPublicKey", "AZURE_SSH_PUBLIC_KEY_B64"),
    ("spec.topology.variables.frontendPrivateIP", "AZURE_FRONTEND_PRIVATE_IP"),
    ("spec.topology.variables.customTags", "AZURE_CUSTOM_TAGS"),
    ("spec.topology.variables.acceleratedNetworking.enabled", "AZURE_ENABLE_ACCELERATED_NETWORKING"),
    ("spec.topology.variables.privateCluster.enabled", "AZURE_ENABLE_PRIVATE_CLUSTER"),
    ("spec.topology.variables.identityRef.name", "AZURE_IDENTITY_NAME"),
    ("spec.topology.variables.identityRef.namespace", "AZURE_IDENTITY_NAMESPACE"),
    ("spec.topology.variables.controlPlane.vmSize", "AZURE_CONTROL_PLANE_MACHINE_TYPE"),
    ("spec.topology.variables.controlPlane.dataDisks.sizeGiB", "AZURE_CONTROL_PLANE_DATA_DISK_SIZE_GIB"),
    ("spec.topology.variables.controlPlane.osDisk.sizeGiB", "AZURE_CONTROL_PLANE_OS_DISK_SIZE_GIB"),
    ("spec.topology.variables.controlPlane.osDisk.storageAccountType", "AZURE_CONTROL_PLANE_OS_DISK_STORAGE_ACCOUNT_TYPE"),
    ("spec.topology.variables.controlPlane.subnet.name", "AZURE_CONTROL_PLANE_SUBNET_NAME"),
    ("spec.topology.variables.controlPlane.subnet.cidr", "AZURE_CONTROL_PLANE_SUBNET_CIDR"),
    ("spec.topology.variables.controlPlane.subnet.securityGroup", "AZURE_CONTROL_PLANE_SUBNET_SECURITY_GROUP"),
    ("spec.topology.variables.controlPlane.outboundLB.enabled", "AZURE_ENABLE_CONTROL_PLANE_OUTBOUND_LB"),
    ("spec.topology.variables.controlPlane.outboundLB.frontendIPCount", "AZURE_CONTROL_PLANE_OUTBOUND_LB_FRONTEND_IP_COUNT"),
    ("spec.topology.variables.worker.vmSize", "AZURE_NODE_MACHINE_TYPE"),
    ("spec.topology.variables.worker.osDisk.sizeGiB", "AZURE_NODE_OS_DISK_SIZE_GIB"),
    ("spec.topology.variables.worker.osDisk.storageAccountType", "AZURE_NODE_OS_DISK_STORAGE_ACCOUNT_TYPE"),
    ("spec.topology.variables.worker.dataDisks.sizeGiB", "AZURE_NODE_DATA_DISK_SIZE_GIB"),
    ("spec.topology.variables.worker.subnet.cidr", "AZURE_NODE_SUBNET_CIDR"),
    ("spec.topology.variables.worker.subnet.name", "AZURE_NODE_SUBNET_NAME"),
    ("spec.topology.variables.worker.subnet.securityGroup", "AZURE_NODE_SUBNET_SECURITY_GROUP"),
    ("spec.topology.variables.worker.outboundLB.enabled", "AZURE_ENABLE_NODE_OUTBOUND_LB"),
    ("spec.topology.variables.worker.outboundLB.frontendIPCount", "AZURE_NODE_OUTBOUND_LB_FRONTEND_IP_COUNT"),
    ("spec.topology.variables.worker.outboundLB.idleTimeoutInMinutes", "AZURE_NODE_OUTBOUND_LB_IDLE_TIMEOUT_IN_MINUTES"),
    ("spec.topology.workers.machineDeployments.0.class", ""),
    ("spec.topology.workers.machineDeployments.0.name", ""),
    ("spec.topology.workers.machineDeployments.0.replicas", "WORKER_MACHINE_COUNT_0"),
    ("spec.topology.workers.machineDeployments.0.failureDomain", "AZURE_NODE_AZ"),
    ("spec.topology.workers.machineDeployments.0.metadata.annotations.run.tanzu.vmware.com/resolve-os-image", ""),
    ("spec.topology.workers.machineDeployments.1.class", ""),
    ("spec.topology.workers.machineDeployments.1.name", ""),
    ("spec.topology.workers.machineDeployments.1.replicas", "WORKER_MACHINE_COUNT_1"),
    ("spec.topology.workers.machineDeployments.1.failureDomain", "AZURE_NODE_AZ_1"),
    ("spec.topology.workers.machineDeployments.1.variables.overrides.worker.vmSize", "NODE_MACHINE_TYPE_1"),
    ("spec.topology.workers.machineDeployments.2.class", ""),
    ("spec.topology.workers.machineDeployments.2.name", ""),
    ("spec.topology.workers.machineDeployments.2.replicas", "WORKER_MACHINE_COUNT_2"),
    ("spec.topology.workers.machineDeployments.2.failureDomain", "AZURE_NODE_AZ_2"),
    ("spec.topology.workers.machineDeployments.2.variables.overrides.worker.vmSize", "NODE_MACHINE_TYPE_2"),
];

pub const VSPHERE: &[(&str, &str)] = &[
    ("spec.topology.variables.apiServerEndpoint", VSPHERE_CONTROL_PLANE_ENDPOINT),
    ("spec.topology.variables.vipNetworkInterface", "VIP_NETWORK_INTERFACE"),
    ("spec.topology.variables.aviAPIServerHAProvider", "AVI_CONTROL_PLANE_HA_PROVIDER"),
    ("spec.topology.variables.vcenter.cloneMode", "VSPHERE_CLONE_MODE"),
    ("spec.topology.variables.vcenter.network", "VSPHERE_NETWORK"),
    ("spec.topology.variables.vcenter.resourcePool", "VSPHERE_RESOURCE_POOL"),
    ("spec.topology.variables.vcenter.template", "VSPHERE_TEMPLATE"),
    ("spec.topology.variables.vcenter.tlsThumbprint", "VSPHERE_TLS_THUMBPRINT"),
    ("spec.topology.variables.vcenter.datacenter", "VSPHERE_DATACENTER"),
    ("spec.topology.variables.vcenter.datastore", "VSPHERE_DATASTORE"),
    ("spec.topology.variables.vcenter.folder", "VSPHERE_FOLDER"),
    ("spec.topology.variables.vcenter.server", "VSPHERE_SERVER"),
    ("spec.topology.variables.user.sshAuthorizedKeys", "VSPHERE_SSH_AUTHORIZED_KEY"),
    ("spec.topology.variables.controlPlane.machine.diskGiB", "VSPHERE_CONTROL_PLANE_DISK_GIB"),
    ("spec.topology.variables.controlPlane.machine.memoryMiB", "VSPHERE_CONTROL_PLANE_MEM_MIB"),
    ("spec.topology.variables.controlPlane.machine.numCPUs", "VSPHERE_CONTROL_PLANE_NUM_CPUS"),
    ("spec.topology.variables.controlPlane.network.nameservers", "CONTROL_PLANE_NODE_NAMESERVERS"),
    ("spec.topology.variables.worker.machine.diskGiB", "VSPHERE_WORKER_DISK_GIB"),
    ("spec.topology.variables.worker.machine.memoryMiB", "VSPHERE_WORKER_MEM_MIB"),
    ("spec.topology.variables.worker.machine.numCPUs", "VSPHERE_WORKER_NUM_CPUS"),
    ("spec.topology.variables.worker.network.nameservers", "WORKER_NODE_NAMESERVERS"),
    ("spec.topology.workers.machineDeployments.0.class", ""),
    ("spec.topology.workers.machineDeployments.0.name", ""),
    ("spec.topology.workers.machineDeployments.0.replicas", WORKER_MACHINE_COUNT),
    ("spec.topology.workers.machineDeployments.0.failureDomain", "VSPHERE_AZ_0"),
    ("spec.topology.workers.machineDeployments.1.class", ""),
    ("spec.topology.workers.machineDeployments.1.name", ""),
    ("spec.topology.workers.machineDeployments.1.replicas", "WORKER_MACHINE_COUNT_1"),
    ("spec.topology.workers.machineDeployments.1.failureDomain", "VSPHERE_AZ_1"),
    ("spec.topology.workers.machineDeployments.2.class", ""),
    ("spec.topology.workers.machineDeployments.2.name", ""),
    ("spec.topology.workers.machineDeployments.2.replicas", "WORKER_MACHINE_COUNT_2"),
    ("spec.topology.workers.machineDeployments.2.failureDomain", "VSPHERE_AZ_2"),
];

pub const DOCKER: &[(&str, &str)] = &[];

/// higher precedence path, lower precedence path
pub const PRECEDENCE: &[(&str, &str)] = &[
    (
        "spec.topology.workers.machineDeployments.1.variables.overrides.NODE_MACHINE_TYPE",
        "spec.topology.variables.nodes.1.machineType",
    ),
    (
        "spec.topology.workers.machineDeployments.2.variables.overrides.NODE_MACHINE_TYPE",
        "spec.topology.variables.nodes.2.machineType",
    ),
];

pub const ARRAY_TYPED_PATHS: &[&str] = &[
    "spec.clusterNetwork.pods.cidrBlocks",
    "spec.clusterNetwork.services.cidrBlocks",
    "spec.topology.variables.proxy.noProxy",
    "spec.topology.variables.user.sshAuthorizedKeys",
    "spec.topology.variables.network.vnet.cidrBlocks",
];

pub const INDEX_EXPANDED_PATHS: &[&str] = &[
    TOPOLOGY_VARIABLES_NETWORK_SUBNETS,
    TOPOLOGY_VARIABLES_NODES,
    TOPOLOGY_WORKERS_MACHINE_DEPLOYMENTS,
];

pub const OVERRIDE_RECORD_PATHS: &[&str] = &[TOPOLOGY_VARIABLES];
