//! cluster creation options refreshed from the legacy variable store
use crate::store::VariableStore;
use crate::tables::{
    CLUSTER_NAME, CLUSTER_PLAN, CNI, CONTROLPLANE_SIZE, CONTROL_PLANE_MACHINE_COUNT,
    ENABLE_CLUSTER_OPTIONS, INFRASTRUCTURE_PROVIDER, NAMESPACE, SIZE,
    VSPHERE_CONTROL_PLANE_ENDPOINT, WORKER_MACHINE_COUNT, WORKER_SIZE,
};
use serde::Serialize;

/// Options of a cluster creation request
///
/// Values given on the command line may be superseded by whatever a translated cluster file wrote to
/// the store, see [ClusterOptions::override_from_store].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOptions {
    pub cluster_name: String,
    pub plan: String,
    pub namespace: String,
    pub infrastructure_provider: String,
    pub control_plane_machine_count: String,
    pub worker_machine_count: String,
    pub size: String,
    pub control_plane_size: String,
    pub worker_size: String,
    pub cni_type: String,
    pub enable_cluster_options: String,
    pub vsphere_control_plane_endpoint: String,
}

impl ClusterOptions {
    /// Replace every option whose legacy variable is set in `store`
    ///
    /// Machine counts are only replaced by integer values.
    pub fn override_from_store(&mut self, store: &dyn VariableStore) {
        let text_options = [
            (CLUSTER_NAME, &mut self.cluster_name),
            (CLUSTER_PLAN, &mut self.plan),
            (NAMESPACE, &mut self.namespace),
            (INFRASTRUCTURE_PROVIDER, &mut self.infrastructure_provider),
            (SIZE, &mut self.size),
            (CONTROLPLANE_SIZE, &mut self.control_plane_size),
            (WORKER_SIZE, &mut self.worker_size),
            (CNI, &mut self.cni_type),
            (ENABLE_CLUSTER_OPTIONS, &mut self.enable_cluster_options),
            (
                VSPHERE_CONTROL_PLANE_ENDPOINT,
                &mut self.vsphere_control_plane_endpoint,
            ),
        ];
        for (name, option) in text_options {
            if let Ok(value) = store.get(name) {
                *option = value;
            }
        }

        let count_options = [
            (
                CONTROL_PLANE_MACHINE_COUNT,
                &mut self.control_plane_machine_count,
            ),
            (WORKER_MACHINE_COUNT, &mut self.worker_machine_count),
        ];
        for (name, option) in count_options {
            match store.get(name) {
                Ok(value) if value.trim().parse::<i64>().is_ok() => *option = value,
                Ok(value) => {
                    tracing::debug!(name, value = value.as_str(), "not an integer, option kept")
                }
                Err(_) => {}
            }
        }
    }
}
