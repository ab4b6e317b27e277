pub mod vmgroup;

pub use vmgroup::{Phase, VmGroup, VmGroupList, VmGroupSpec, VmGroupStatus, VmOperatorStatus};
