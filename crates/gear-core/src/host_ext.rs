use host_kernel::{HostIntrospect, HostKernel};

/// A host that can be both edited and queried.
///
/// Gear operations edit the pipe and then check the result against the
/// host's own topology within one call; `as_introspect` hands out the
/// read-only view for that check while the caller holds `&mut`.
pub trait HostBundle: HostKernel + HostIntrospect {
    fn as_introspect(&self) -> &dyn HostIntrospect;
}

impl<T: HostKernel + HostIntrospect> HostBundle for T {
    fn as_introspect(&self) -> &dyn HostIntrospect {
        self
    }
}
