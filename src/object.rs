//! Kind-agnostic handle over resource objects.
use std::any::Any;
use std::borrow::Cow;
use std::fmt::Debug;

use dyn_clone::DynClone;
use kube::api::ObjectMeta;

/// A resource object that generic code can copy without knowing its concrete kind.
///
/// Cloning a `Box<dyn Object>` dispatches to the concrete type's deep copy,
/// so informer-style caches can hold heterogeneous objects and still hand
/// out private working copies.
pub trait Object: DynClone + Any + Debug + Send + Sync {
    fn kind(&self) -> Cow<'_, str>;

    fn api_version(&self) -> Cow<'_, str>;

    /// Object metadata, `None` for collection types.
    fn object_meta(&self) -> Option<&ObjectMeta> {
        None
    }

    /// Deep copy this object into a new handle of the same concrete kind.
    fn deep_copy_object(&self) -> Box<dyn Object>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

dyn_clone::clone_trait_object!(Object);

impl dyn Object {
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast<T: Object>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast().ok()
    }
}

/// Deep copy an optional object into a polymorphic handle.
///
/// An absent source yields `None`, the "no object" sentinel.
pub fn deep_copy_object<T: Object>(src: Option<&T>) -> Option<Box<dyn Object>> {
    src.map(Object::deep_copy_object)
}

/// Wires a record's [`crate::deepcopy::DeepCopy`] impl into [`Object`].
macro_rules! impl_object {
    ($ty:ty, kind: $kind:expr, api_version: $api_version:expr $(, meta: $meta:ident)?) => {
        impl $crate::object::Object for $ty {
            fn kind(&self) -> ::std::borrow::Cow<'_, str> {
                match &self.types {
                    Some(types) if !types.kind.is_empty() => types.kind.as_str().into(),
                    _ => $kind,
                }
            }

            fn api_version(&self) -> ::std::borrow::Cow<'_, str> {
                match &self.types {
                    Some(types) if !types.api_version.is_empty() => {
                        types.api_version.as_str().into()
                    }
                    _ => $api_version,
                }
            }

            $(
                fn object_meta(&self) -> Option<&::kube::api::ObjectMeta> {
                    Some(&self.$meta)
                }
            )?

            fn deep_copy_object(&self) -> Box<dyn $crate::object::Object> {
                Box::new($crate::deepcopy::DeepCopy::deep_copy(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}

pub(crate) use impl_object;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{VmGroup, VmGroupList, VmGroupSpec};

    fn mixed_objects() -> Vec<Box<dyn Object>> {
        let group = VmGroup::new(
            "db",
            VmGroupSpec {
                template: "rocky-9".into(),
                replicas: 2,
                cpu: 4,
                memory: 16,
            },
        );
        vec![
            Box::new(group.clone()) as Box<dyn Object>,
            Box::new(VmGroupList::new(vec![group])),
            Box::new(VmGroupList::default()),
        ]
    }

    #[test]
    fn generic_copy_preserves_kinds_and_order() {
        let objects = mixed_objects();
        let copies: Vec<Box<dyn Object>> =
            objects.iter().map(|obj| obj.deep_copy_object()).collect();

        let kinds = |objs: &[Box<dyn Object>]| -> Vec<String> {
            objs.iter().map(|obj| obj.kind().into_owned()).collect()
        };
        assert_eq!(vec!["VmGroup", "VmGroupList", "VmGroupList"], kinds(&copies));
        assert!(copies[0].is::<VmGroup>());
        assert_eq!(
            Some(&None),
            copies[2].downcast_ref::<VmGroupList>().map(|list| &list.items)
        );
    }

    #[test]
    fn cloned_vec_of_handles_is_independent() {
        let objects = mixed_objects();
        let mut cloned = objects.clone();

        let Some(group) = cloned.remove(0).downcast::<VmGroup>() else {
            panic!("expected a VmGroup");
        };
        let mut group = *group;
        group.spec.replicas = 0;
        group.metadata.name = Some("renamed".into());

        let original = objects[0].downcast_ref::<VmGroup>();
        assert_eq!(Some(2), original.map(|g| g.spec.replicas));
        assert_eq!(Some("db"), original.and_then(|g| g.metadata.name.as_deref()));
        assert_eq!(3, objects.len());
    }

    #[test]
    fn absent_object_yields_no_handle() {
        assert!(deep_copy_object::<VmGroup>(None).is_none());
        assert!(deep_copy_object::<VmGroupList>(None).is_none());
    }
}
