//! Canonical space registry
//!
//! Spaces are flyweights: for a given coefficient kind and shape there is at
//! most one live space object, and every caller asking for that shape gets
//! the same `Arc`. The registry only holds spaces weakly, so a space is
//! reclaimed once the last vector or matrix referencing it is dropped and a
//! later request builds a fresh one.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::{Arc, OnceLock};

use lattice_memory::cache::CacheKey;
use lattice_memory::{PairKey, WeakCache, WeakCacheConfig, WeakCacheStats};
use tracing::debug;

use crate::error::{AlgebraError, AlgebraResult};
use crate::matrix::{MatrixSpace, MatrixSpaceInner};
use crate::traits::{Coefficient, CoefficientKind, Field, Ring};
use crate::vector::{VectorSpace, VectorSpaceInner};

/// Key of a vector space: `(kind, dimension)`
pub type VectorSpaceKey = PairKey<CoefficientKind, usize>;

/// Key of a matrix space: `(kind, (rows, columns))`
pub type MatrixSpaceKey = PairKey<CoefficientKind, PairKey<usize, usize>>;

type AnySpace = dyn Any + Send + Sync;

static GLOBAL_REGISTRY: OnceLock<SpaceRegistry> = OnceLock::new();

/// Factory handing out canonical vector and matrix spaces.
///
/// Cloning a registry yields a handle onto the same caches.
#[derive(Debug, Clone, Default)]
pub struct SpaceRegistry {
    vector_spaces: WeakCache<VectorSpaceKey, AnySpace>,
    matrix_spaces: WeakCache<MatrixSpaceKey, AnySpace>,
}

impl SpaceRegistry {
    /// Create an empty registry with default cache settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose caches use `config`.
    ///
    /// # Errors
    ///
    /// Fails when the cache configuration is invalid.
    pub fn with_config(config: WeakCacheConfig) -> AlgebraResult<Self> {
        Ok(Self {
            vector_spaces: WeakCache::with_config(config.clone())?,
            matrix_spaces: WeakCache::with_config(config)?,
        })
    }

    /// Process-wide registry used by [`VectorSpace::of`] and [`MatrixSpace::of`]
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(|| {
            Self::with_config(WeakCacheConfig::for_space_registry()).unwrap_or_default()
        })
    }

    /// Canonical vector space of dimension `dim` over `F`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] for a zero dimension.
    pub fn vector_space<F>(&self, dim: usize) -> AlgebraResult<VectorSpace<F>>
    where
        F: Field + Coefficient,
    {
        self.vector_space_of(F::KIND, dim)
    }

    /// Canonical vector space for an explicitly named coefficient kind.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] for a zero dimension and
    /// [`AlgebraError::TypeMismatch`] when `kind` is not the kind of `F`.
    pub fn vector_space_of<F>(&self, kind: CoefficientKind, dim: usize) -> AlgebraResult<VectorSpace<F>>
    where
        F: Field + Coefficient,
    {
        if dim == 0 {
            return Err(AlgebraError::invalid_shape(
                "vector space dimension must be positive",
            ));
        }
        ensure_kind::<F>(kind)?;

        let key = PairKey::of(kind, dim);
        let inner = canonical(&self.vector_spaces, key, || VectorSpaceInner::<F>::new(key))?;
        Ok(VectorSpace::from_inner(inner))
    }

    /// Canonical space of `rows x cols` matrices over `R`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] when either side is zero.
    pub fn matrix_space<R>(&self, rows: usize, cols: usize) -> AlgebraResult<MatrixSpace<R>>
    where
        R: Ring + Coefficient,
    {
        self.matrix_space_of(R::KIND, rows, cols)
    }

    /// Canonical matrix space for an explicitly named coefficient kind.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] when either side is zero and
    /// [`AlgebraError::TypeMismatch`] when `kind` is not the kind of `R`.
    pub fn matrix_space_of<R>(
        &self,
        kind: CoefficientKind,
        rows: usize,
        cols: usize,
    ) -> AlgebraResult<MatrixSpace<R>>
    where
        R: Ring + Coefficient,
    {
        if rows == 0 || cols == 0 {
            return Err(AlgebraError::invalid_shape(format!(
                "matrix shape must be positive, got {rows}x{cols}"
            )));
        }
        ensure_kind::<R>(kind)?;

        let key = PairKey::of(kind, PairKey::of(rows, cols));
        let inner = canonical(&self.matrix_spaces, key, || {
            MatrixSpaceInner::<R>::new(key, self.clone())
        })?;
        Ok(MatrixSpace::from_inner(inner))
    }

    /// Number of vector spaces currently alive
    #[must_use]
    pub fn live_vector_spaces(&self) -> usize {
        self.vector_spaces.live_len()
    }

    /// Number of matrix spaces currently alive
    #[must_use]
    pub fn live_matrix_spaces(&self) -> usize {
        self.matrix_spaces.live_len()
    }

    /// Drop slots of reclaimed spaces, returning how many were removed
    pub fn cleanup(&self) -> usize {
        self.vector_spaces.cleanup() + self.matrix_spaces.cleanup()
    }

    /// Cache statistics as `(vector spaces, matrix spaces)`
    #[must_use]
    pub fn stats(&self) -> (WeakCacheStats, WeakCacheStats) {
        (self.vector_spaces.stats(), self.matrix_spaces.stats())
    }
}

fn ensure_kind<C: Coefficient>(kind: CoefficientKind) -> AlgebraResult<()> {
    if kind == C::KIND {
        Ok(())
    } else {
        Err(AlgebraError::type_mismatch(C::KIND.name(), kind.name()))
    }
}

/// Look up `key`, racing a freshly built space in on a miss. Every caller
/// gets the winner of the race.
fn canonical<K, S>(
    cache: &WeakCache<K, AnySpace>,
    key: K,
    build: impl FnOnce() -> S,
) -> AlgebraResult<Arc<S>>
where
    K: CacheKey + fmt::Display,
    S: Any + Send + Sync,
{
    let mut built: Option<Arc<AnySpace>> = None;
    let space = cache.get_or_insert_with(key.clone(), || {
        let candidate: Arc<AnySpace> = Arc::new(build());
        built = Some(Arc::clone(&candidate));
        candidate
    });

    match built {
        Some(candidate) if Arc::ptr_eq(&candidate, &space) => {
            debug!(%key, "published canonical space");
        }
        Some(_) => debug!(%key, "candidate space lost the race"),
        None => {}
    }

    space.downcast::<S>().map_err(|_| {
        AlgebraError::type_mismatch(
            type_name::<S>(),
            format!("a different space type registered under {key}"),
        )
    })
}
