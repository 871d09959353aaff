use crate::schema::{Record, TypeMapping};
use crate::{err, Result};

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, trace};

/// Caches one [`TypeMapping`] per record type.
///
/// Mappings are built on first request and live as long as the registry. A
/// single lock covers the lookup and the build, so concurrent first requests
/// for a type build it once.
#[derive(Default)]
pub struct Registry {
    mappings: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry behind [`crate::mapping`].
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Returns the mapping for `R`, building and caching it if needed.
    ///
    /// A failed build is returned to the caller and not cached.
    pub fn mapping<R: Record>(&self) -> Result<Arc<TypeMapping<R>>> {
        let mut mappings = self.lock();

        if let Some(mapping) = mappings.get(&TypeId::of::<R>()) {
            trace!(ty = type_name::<R>(), "type mapping cache hit");
            return mapping.clone().downcast::<TypeMapping<R>>().map_err(|_| {
                err!(
                    "cached mapping for `{}` has the wrong type",
                    type_name::<R>()
                )
            });
        }

        let mapping = Arc::new(TypeMapping::<R>::build()?);
        debug!(
            ty = type_name::<R>(),
            table = mapping.table_name(),
            fields = mapping.fields().len(),
            "built type mapping"
        );

        mappings.insert(TypeId::of::<R>(), mapping.clone());
        Ok(mapping)
    }

    /// Number of cached mappings.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns `true` if a mapping for `R` has been built.
    pub fn contains<R: Record>(&self) -> bool {
        self.lock().contains_key(&TypeId::of::<R>())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<TypeId, Arc<dyn Any + Send + Sync>>> {
        self.mappings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}
