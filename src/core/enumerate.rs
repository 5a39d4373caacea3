//! Recursive blob store enumeration
//!
//! Walks the hierarchical namespace depth first and returns every leaf
//! object found. Listing failures are logged and contained: the affected
//! subtree is skipped, the walk continues elsewhere.

use crate::adapters::store::BlobStore;
use crate::domain::ObjectHandle;

/// Enumerate all leaf objects under `root`, depth first
///
/// Containers are never returned, only the objects inside them. A container
/// whose listing fails contributes nothing; its siblings are unaffected.
pub async fn enumerate(store: &dyn BlobStore, root: &str) -> Vec<ObjectHandle> {
    let mut objects = Vec::new();
    let mut pending = vec![root.to_string()];

    while let Some(prefix) = pending.pop() {
        let listing = match store.list_children(&prefix).await {
            Ok(listing) => listing,
            Err(e) => {
                tracing::warn!(
                    prefix = %prefix,
                    error = %e,
                    "Skipping subtree after listing failure"
                );
                continue;
            }
        };

        tracing::debug!(
            prefix = %prefix,
            objects = listing.objects.len(),
            containers = listing.containers.len(),
            "Listed container"
        );

        objects.extend(listing.objects.into_iter().filter(|o| !o.is_container));

        // Reverse so the stack pops containers in listing order, keeping the
        // walk deterministic for a deterministic store.
        for container in listing.containers.into_iter().rev() {
            pending.push(container);
        }
    }

    objects
}
