use chrono::{DateTime, SubsecRound as _, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::{
    api::{ObjectMeta, TypeMeta},
    Resource,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::deepcopy::{clone_via_deep_copy, DeepCopy};
use crate::object::impl_object;

mod crd {
    use kube::CustomResource;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(CustomResource, Deserialize, Serialize, Clone, Default, Debug, JsonSchema)]
    #[kube(
        kind = "VmGroup",
        group = "vsphere.vmware.com",
        version = "v1alpha1",
        plural = "vmgroups",
        namespaced
    )]
    pub struct VmGroupPhantomSpec {}
}

/// A group of identical virtual machines cloned from one vSphere template.
#[derive(Resource, Serialize, Deserialize, Debug, Default, PartialEq)]
#[resource(inherit = crd::VmGroup)]
pub struct VmGroup {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: VmGroupSpec,
    #[serde(default)]
    pub status: VmGroupStatus,
}

/// Desired state of a VmGroup
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VmGroupSpec {
    /// Name of the template VM the replicas are cloned from.
    pub template: String,
    /// Number of VMs that should exist in the group.
    pub replicas: i32,
    /// Virtual CPUs per VM.
    pub cpu: i32,
    /// Memory per VM in GiB.
    pub memory: i32,
}

/// Observed state of a VmGroup
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, JsonSchema)]
pub struct VmGroupStatus {
    /// Status written by the vm operator.
    #[serde(default)]
    pub vm_operator: VmOperatorStatus,
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VmOperatorStatus {
    pub phase: Option<Phase>,
    /// UTC, written as `%Y-%m-%d %H:%M:%S` with whole seconds.
    #[serde(default, with = "operator_time")]
    #[schemars(with = "Option<String>")]
    pub last_updated: Option<DateTime<Utc>>,
    pub last_message: Option<String>,
    #[serde(default)]
    pub current_replicas: i32,
    #[serde(default)]
    pub desired_replicas: i32,
}

mod operator_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.collect_str(&ts.format(FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                NaiveDateTime::parse_from_str(&raw, FORMAT)
                    .map(|naive| naive.and_utc())
                    .map_err(D::Error::custom)
            })
            .transpose()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    #[default]
    Pending,
    Ready,
    Error,
}

/// An ordered collection of VmGroups.
///
/// `items` distinguishes a list that was never populated (`None`) from one
/// populated with zero elements (`Some(vec![])`).
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct VmGroupList {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ListMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<VmGroup>>,
}

impl VmGroup {
    pub fn new(name: &str, spec: VmGroupSpec) -> Self {
        Self {
            types: Some(TypeMeta::resource::<VmGroup>()),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec,
            status: Default::default(),
        }
    }
}

impl VmOperatorStatus {
    /// Status stamped with the current time, truncated to whole seconds.
    pub fn new(
        phase: Phase,
        message: impl Into<String>,
        current_replicas: i32,
        desired_replicas: i32,
    ) -> Self {
        Self {
            phase: Some(phase),
            last_updated: Some(Utc::now().trunc_subsecs(0)),
            last_message: Some(message.into()),
            current_replicas,
            desired_replicas,
        }
    }
}

impl VmGroupList {
    pub const KIND: &'static str = "VmGroupList";

    pub fn new(items: Vec<VmGroup>) -> Self {
        Self {
            types: Some(TypeMeta {
                api_version: <VmGroup as Resource>::api_version(&()).into_owned(),
                kind: Self::KIND.to_string(),
            }),
            metadata: Default::default(),
            items: Some(items),
        }
    }
}

impl FromIterator<VmGroup> for VmGroupList {
    fn from_iter<I: IntoIterator<Item = VmGroup>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DeepCopy for VmGroupSpec {
    fn deep_copy_into(&self, out: &mut Self) {
        let Self {
            template,
            replicas,
            cpu,
            memory,
        } = self;
        out.template.clone_from(template);
        out.replicas = *replicas;
        out.cpu = *cpu;
        out.memory = *memory;
    }
}

impl DeepCopy for VmOperatorStatus {
    fn deep_copy_into(&self, out: &mut Self) {
        let Self {
            phase,
            last_updated,
            last_message,
            current_replicas,
            desired_replicas,
        } = self;
        out.phase = *phase;
        out.last_updated = *last_updated;
        out.last_message.clone_from(last_message);
        out.current_replicas = *current_replicas;
        out.desired_replicas = *desired_replicas;
    }
}

impl DeepCopy for VmGroupStatus {
    fn deep_copy_into(&self, out: &mut Self) {
        let Self { vm_operator } = self;
        vm_operator.deep_copy_into(&mut out.vm_operator);
    }
}

impl DeepCopy for VmGroup {
    fn deep_copy_into(&self, out: &mut Self) {
        let Self {
            types,
            metadata,
            spec,
            status,
        } = self;
        types.deep_copy_into(&mut out.types);
        metadata.deep_copy_into(&mut out.metadata);
        spec.deep_copy_into(&mut out.spec);
        status.deep_copy_into(&mut out.status);
    }
}

impl DeepCopy for VmGroupList {
    fn deep_copy_into(&self, out: &mut Self) {
        let Self {
            types,
            metadata,
            items,
        } = self;
        types.deep_copy_into(&mut out.types);
        metadata.deep_copy_into(&mut out.metadata);
        // absent stays absent, present is copied element by element in order
        items.deep_copy_into(&mut out.items);
    }
}

clone_via_deep_copy!(VmGroupSpec, VmOperatorStatus, VmGroupStatus, VmGroup, VmGroupList);

impl_object!(
    VmGroup,
    kind: <VmGroup as Resource>::kind(&()),
    api_version: <VmGroup as Resource>::api_version(&()),
    meta: metadata
);

impl_object!(
    VmGroupList,
    kind: VmGroupList::KIND.into(),
    api_version: <VmGroup as Resource>::api_version(&())
);
