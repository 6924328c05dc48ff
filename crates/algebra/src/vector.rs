//! Vector spaces over a field and their elements

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{AlgebraError, AlgebraResult};
use crate::space::{SpaceRegistry, VectorSpaceKey};
use crate::traits::{AdditiveGroup, Coefficient, CoefficientKind, Field, ModuleElement, Ring};
use crate::value::Coefficients;

/// Shared state of a canonical vector space
pub(crate) struct VectorSpaceInner<F> {
    key: VectorSpaceKey,
    _coefficients: PhantomData<fn() -> F>,
}

impl<F> VectorSpaceInner<F> {
    pub(crate) fn new(key: VectorSpaceKey) -> Self {
        Self {
            key,
            _coefficients: PhantomData,
        }
    }
}

/// Canonical space `F^dim`.
///
/// Obtained from a [`SpaceRegistry`]; two handles for the same kind and
/// dimension point at the same allocation while either is alive.
pub struct VectorSpace<F> {
    inner: Arc<VectorSpaceInner<F>>,
}

impl<F> VectorSpace<F>
where
    F: Field + Coefficient,
{
    /// Canonical space of dimension `dim` from the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] for a zero dimension.
    pub fn of(dim: usize) -> AlgebraResult<Self> {
        SpaceRegistry::global().vector_space(dim)
    }

    pub(crate) fn from_inner(inner: Arc<VectorSpaceInner<F>>) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        *self.inner.key.second()
    }

    #[must_use]
    pub fn kind(&self) -> CoefficientKind {
        *self.inner.key.first()
    }

    /// Registry key of this space
    #[must_use]
    pub fn key(&self) -> VectorSpaceKey {
        self.inner.key
    }

    /// Whether both handles refer to the same space object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy `coefficients` into a new vector of this space.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::ShapeMismatch`] when the length differs from
    /// the dimension and [`AlgebraError::TypeMismatch`] when a coefficient
    /// reports a different kind.
    pub fn wrap(&self, coefficients: &[F]) -> AlgebraResult<Vector<F>> {
        self.validate(coefficients)?;
        Ok(self.adopt(Box::from(coefficients)))
    }

    fn validate(&self, coefficients: &[F]) -> AlgebraResult<()> {
        if coefficients.len() != self.dim() {
            return Err(AlgebraError::shape_mismatch(
                format!("{} coefficients", self.dim()),
                format!("{} coefficients", coefficients.len()),
            ));
        }
        if let Some(stray) = coefficients.iter().find(|c| c.kind() != self.kind()) {
            return Err(AlgebraError::type_mismatch(
                self.kind().name(),
                stray.kind().name(),
            ));
        }
        Ok(())
    }

    /// Build a vector from coefficients already known to fit this space
    fn adopt(&self, coefficients: Box<[F]>) -> Vector<F> {
        Vector {
            space: self.clone(),
            coefficients: Coefficients::new(coefficients),
        }
    }
}

impl<F> Clone for VectorSpace<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> PartialEq for VectorSpace<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.key == other.inner.key
    }
}

impl<F> Eq for VectorSpace<F> {}

impl<F> Hash for VectorSpace<F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.key.hash(state);
    }
}

impl<F> fmt::Debug for VectorSpace<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorSpace")
            .field("kind", self.inner.key.first())
            .field("dim", self.inner.key.second())
            .finish()
    }
}

impl<F> fmt::Display for VectorSpace<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VectorSpace({}, {})", self.inner.key.second(), self.inner.key.first())
    }
}

/// Immutable element of a [`VectorSpace`]
pub struct Vector<F> {
    space: VectorSpace<F>,
    coefficients: Coefficients<F>,
}

impl<F> Vector<F>
where
    F: Field + Coefficient,
{
    /// Vector whose dimension is the number of coefficients, in the global
    /// registry's space.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] when `coefficients` is empty.
    pub fn from_coefficients(coefficients: Vec<F>) -> AlgebraResult<Self> {
        let space = VectorSpace::of(coefficients.len())?;
        space.validate(&coefficients)?;
        Ok(space.adopt(coefficients.into_boxed_slice()))
    }

    #[must_use]
    pub fn space(&self) -> &VectorSpace<F> {
        &self.space
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.space.dim()
    }

    #[must_use]
    pub fn coefficients(&self) -> &[F] {
        self.coefficients.as_slice()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&F> {
        self.coefficients().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.coefficients().iter()
    }

    /// Component-wise sum.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] when the vectors live in
    /// different spaces.
    pub fn try_add(&self, other: &Self) -> AlgebraResult<Self> {
        self.ensure_same_space(other)?;
        Ok(self.space.adopt(
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| a.add(b))
                .collect(),
        ))
    }

    /// Component-wise difference.
    ///
    /// # Errors
    ///
    /// Same as [`Vector::try_add`].
    pub fn try_subtract(&self, other: &Self) -> AlgebraResult<Self> {
        self.ensure_same_space(other)?;
        self.try_add(&other.negate())
    }

    /// Additive inverse.
    ///
    /// Computed once per vector; negating the result hands back this very
    /// vector's storage.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            space: self.space.clone(),
            coefficients: self.coefficients.negated(AdditiveGroup::negate),
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.iter().all(AdditiveGroup::is_zero)
    }

    #[must_use]
    pub fn scalar_multiply(&self, scalar: &F) -> Self {
        self.space
            .adopt(self.iter().map(|c| scalar.multiply(c)).collect())
    }

    /// Whether both handles share the same storage and polarity
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.coefficients.ptr_eq(&other.coefficients)
    }

    /// Memoized hash of the space key and coefficients
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        self.coefficients.hash_code(&self.space.key())
    }

    fn ensure_same_space(&self, other: &Self) -> AlgebraResult<()> {
        if self.space == other.space {
            Ok(())
        } else {
            Err(AlgebraError::incompatible(format!(
                "{} and {}",
                self.space, other.space
            )))
        }
    }
}

impl<F> ModuleElement<F> for Vector<F>
where
    F: Field + Coefficient,
{
    fn try_add(&self, other: &Self) -> AlgebraResult<Self> {
        Vector::try_add(self, other)
    }

    fn negate(&self) -> Self {
        Vector::negate(self)
    }

    fn is_zero(&self) -> bool {
        Vector::is_zero(self)
    }

    fn scalar_multiply(&self, scalar: &F) -> Self {
        Vector::scalar_multiply(self, scalar)
    }

    fn try_subtract(&self, other: &Self) -> AlgebraResult<Self> {
        Vector::try_subtract(self, other)
    }
}

impl<F> Clone for Vector<F> {
    fn clone(&self) -> Self {
        Self {
            space: self.space.clone(),
            coefficients: self.coefficients.clone(),
        }
    }
}

impl<F> PartialEq for Vector<F>
where
    F: Field + Coefficient,
{
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.space == other.space && self.coefficients() == other.coefficients())
    }
}

impl<F> Eq for Vector<F> where F: Field + Coefficient {}

impl<F> Hash for Vector<F>
where
    F: Field + Coefficient,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<F> fmt::Debug for Vector<F>
where
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("space", &self.space)
            .field("coefficients", &self.coefficients.as_slice())
            .finish()
    }
}

impl<F> fmt::Display for Vector<F>
where
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.coefficients.rendering(|coefficients| {
            let parts: Vec<String> = coefficients.iter().map(ToString::to_string).collect();
            format!("Vector({})", parts.join(", "))
        });
        f.write_str(&rendered)
    }
}

impl<'a, F> IntoIterator for &'a Vector<F>
where
    F: Field + Coefficient,
{
    type Item = &'a F;
    type IntoIter = std::slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
