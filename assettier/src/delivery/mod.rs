//! Tier-aware delivery policy.
//!
//! Stateless answers derived from a [`TierDescriptor`](crate::capability::TierDescriptor):
//! which texture variant to request, whether KTX2 containers are eligible,
//! and how many loads may run concurrently.

mod policy;

pub use policy::{
    max_concurrent_loads, max_concurrent_loads_for_label, DeliveryPolicy,
    DEFAULT_MAX_CONCURRENT_LOADS, DEFAULT_TEXTURE_ROOT,
};
