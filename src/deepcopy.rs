//! Deep copy contract shared by every record in the API.
//!
//! A deep copy produces a value that shares no owned state with its source.
//! In-crate records implement [`DeepCopy::deep_copy_into`] by destructuring
//! `self` exhaustively, so a new field that is not copied fails to compile
//! instead of being silently dropped or aliased.
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ListMeta;
use kube::api::{ObjectMeta, TypeMeta};

pub trait DeepCopy: Default {
    /// Copy the receiver into `out`, overwriting every field of `out`.
    fn deep_copy_into(&self, out: &mut Self);

    /// Copy the receiver into a freshly allocated value.
    fn deep_copy(&self) -> Self {
        let mut out = Self::default();
        self.deep_copy_into(&mut out);
        out
    }
}

/// Deep copy an optional value. Absent input stays absent.
pub fn deep_copy<T: DeepCopy>(src: Option<&T>) -> Option<T> {
    src.map(DeepCopy::deep_copy)
}

impl<T: DeepCopy> DeepCopy for Option<T> {
    fn deep_copy_into(&self, out: &mut Self) {
        let Some(src) = self else {
            *out = None;
            return;
        };
        if let Some(dst) = out.as_mut() {
            src.deep_copy_into(dst);
        } else {
            *out = Some(src.deep_copy());
        }
    }
}

impl<T: DeepCopy> DeepCopy for Vec<T> {
    fn deep_copy_into(&self, out: &mut Self) {
        out.resize_with(self.len(), T::default);
        for (src, dst) in self.iter().zip(out.iter_mut()) {
            src.deep_copy_into(dst);
        }
    }

    fn deep_copy(&self) -> Self {
        self.iter().map(DeepCopy::deep_copy).collect()
    }
}

// Framework-owned metadata is opaque here; its own Clone is the copy contract.
macro_rules! deep_copy_via_clone {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl DeepCopy for $ty {
                fn deep_copy_into(&self, out: &mut Self) {
                    out.clone_from(self);
                }

                fn deep_copy(&self) -> Self {
                    self.clone()
                }
            }
        )+
    };
}

deep_copy_via_clone!(ObjectMeta, ListMeta, TypeMeta);

/// Implements `Clone` for records in terms of their [`DeepCopy`] impl, so
/// generic code that only asks for `Clone` gets the same guarantees.
macro_rules! clone_via_deep_copy {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Clone for $ty {
                fn clone(&self) -> Self {
                    $crate::deepcopy::DeepCopy::deep_copy(self)
                }

                fn clone_from(&mut self, source: &Self) {
                    $crate::deepcopy::DeepCopy::deep_copy_into(source, self)
                }
            }
        )+
    };
}

pub(crate) use clone_via_deep_copy;
