//! Matrix spaces over a ring and their elements

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::error::{AlgebraError, AlgebraResult};
use crate::space::{MatrixSpaceKey, SpaceRegistry};
use crate::traits::{AdditiveGroup, Coefficient, CoefficientKind, ModuleElement, Ring};
use crate::value::Coefficients;

/// Shared state of a canonical matrix space
pub(crate) struct MatrixSpaceInner<R> {
    key: MatrixSpaceKey,
    /// Registry this space came from; products are looked up there
    registry: SpaceRegistry,
    _coefficients: PhantomData<fn() -> R>,
}

impl<R> MatrixSpaceInner<R> {
    pub(crate) fn new(key: MatrixSpaceKey, registry: SpaceRegistry) -> Self {
        Self {
            key,
            registry,
            _coefficients: PhantomData,
        }
    }
}

/// Canonical space of `rows x columns` matrices over `R`
pub struct MatrixSpace<R> {
    inner: Arc<MatrixSpaceInner<R>>,
}

impl<R> MatrixSpace<R>
where
    R: Ring + Coefficient,
{
    /// Canonical space from the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] when either side is zero.
    pub fn of(rows: usize, cols: usize) -> AlgebraResult<Self> {
        SpaceRegistry::global().matrix_space(rows, cols)
    }

    pub(crate) fn from_inner(inner: Arc<MatrixSpaceInner<R>>) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        *self.inner.key.second().first()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        *self.inner.key.second().second()
    }

    #[must_use]
    pub fn kind(&self) -> CoefficientKind {
        *self.inner.key.first()
    }

    #[must_use]
    pub fn key(&self) -> MatrixSpaceKey {
        self.inner.key
    }

    #[must_use]
    pub fn is_square(&self) -> bool {
        self.row_count() == self.column_count()
    }

    /// Whether both handles refer to the same space object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy `rows` into a new matrix of this space.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::ShapeMismatch`] when the number of rows or the
    /// length of any row differs from the space, and
    /// [`AlgebraError::TypeMismatch`] when a coefficient reports a different
    /// kind.
    pub fn wrap<Row: AsRef<[R]>>(&self, rows: &[Row]) -> AlgebraResult<Matrix<R>> {
        if rows.len() != self.row_count() {
            return Err(AlgebraError::shape_mismatch(
                format!("{} rows", self.row_count()),
                format!("{} rows", rows.len()),
            ));
        }

        let mut entries = Vec::with_capacity(self.row_count() * self.column_count());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != self.column_count() {
                return Err(AlgebraError::shape_mismatch(
                    format!("{} columns", self.column_count()),
                    format!("{} columns in row {index}", row.len()),
                ));
            }
            if let Some(stray) = row.iter().find(|c| c.kind() != self.kind()) {
                return Err(AlgebraError::type_mismatch(
                    self.kind().name(),
                    stray.kind().name(),
                ));
            }
            entries.extend_from_slice(row);
        }

        Ok(self.adopt(entries.into_boxed_slice()))
    }

    /// Build a matrix from row-major entries already known to fit
    fn adopt(&self, entries: Box<[R]>) -> Matrix<R> {
        Matrix {
            space: self.clone(),
            entries: Coefficients::new(entries),
        }
    }

    fn registry(&self) -> &SpaceRegistry {
        &self.inner.registry
    }
}

impl<R> Clone for MatrixSpace<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> PartialEq for MatrixSpace<R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.key == other.inner.key
    }
}

impl<R> Eq for MatrixSpace<R> {}

impl<R> Hash for MatrixSpace<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.key.hash(state);
    }
}

impl<R> fmt::Debug for MatrixSpace<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixSpace")
            .field("kind", self.inner.key.first())
            .field("rows", self.inner.key.second().first())
            .field("cols", self.inner.key.second().second())
            .finish()
    }
}

impl<R> fmt::Display for MatrixSpace<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.inner.key.second();
        write!(
            f,
            "MatrixSpace({}x{}, {})",
            shape.first(),
            shape.second(),
            self.inner.key.first()
        )
    }
}

/// Immutable element of a [`MatrixSpace`], stored row-major
pub struct Matrix<R> {
    space: MatrixSpace<R>,
    entries: Coefficients<R>,
}

impl<R> Matrix<R>
where
    R: Ring + Coefficient,
{
    /// Matrix whose shape is inferred from `rows`, in the global registry's
    /// space.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::InvalidShape`] for no rows or empty rows and
    /// [`AlgebraError::ShapeMismatch`] for ragged rows.
    pub fn from_rows(rows: Vec<Vec<R>>) -> AlgebraResult<Self> {
        let cols = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| AlgebraError::invalid_shape("a matrix needs at least one row"))?;
        MatrixSpace::of(rows.len(), cols)?.wrap(&rows)
    }

    #[must_use]
    pub fn space(&self) -> &MatrixSpace<R> {
        &self.space
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.space.row_count()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.space.column_count()
    }

    /// Entry at row `i`, column `j`
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&R> {
        if i >= self.row_count() || j >= self.column_count() {
            return None;
        }
        self.entries().get(i * self.column_count() + j)
    }

    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[R]> {
        self.rows().nth(i)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, R> {
        self.entries().chunks_exact(self.column_count())
    }

    /// All entries in row-major order
    #[must_use]
    pub fn entries(&self) -> &[R] {
        self.entries.as_slice()
    }

    /// Entry-wise sum.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] when the matrices live
    /// in different spaces.
    pub fn try_add(&self, other: &Self) -> AlgebraResult<Self> {
        self.ensure_same_space(other)?;
        Ok(self.space.adopt(
            self.entries()
                .iter()
                .zip(other.entries())
                .map(|(a, b)| a.add(b))
                .collect(),
        ))
    }

    /// Entry-wise difference.
    ///
    /// # Errors
    ///
    /// Same as [`Matrix::try_add`].
    pub fn try_subtract(&self, other: &Self) -> AlgebraResult<Self> {
        self.ensure_same_space(other)?;
        self.try_add(&other.negate())
    }

    /// Additive inverse; negating twice returns this matrix's own storage
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            space: self.space.clone(),
            entries: self.entries.negated(AdditiveGroup::negate),
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries().iter().all(AdditiveGroup::is_zero)
    }

    #[must_use]
    pub fn scalar_multiply(&self, scalar: &R) -> Self {
        self.space
            .adopt(self.entries().iter().map(|c| scalar.multiply(c)).collect())
    }

    /// Matrix product `self * other`.
    ///
    /// The result lives in the `rows(self) x columns(other)` space of the
    /// registry that produced `self`.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`] when the column count of
    /// `self` differs from the row count of `other`.
    pub fn multiply(&self, other: &Self) -> AlgebraResult<Self> {
        let (rows, inner, cols) = (self.row_count(), self.column_count(), other.column_count());
        if inner != other.row_count() {
            return Err(AlgebraError::incompatible(format!(
                "cannot multiply {}x{} by {}x{}",
                rows,
                inner,
                other.row_count(),
                cols
            )));
        }

        let space = self
            .space
            .registry()
            .matrix_space_of::<R>(self.space.kind(), rows, cols)?;
        trace!(rows, inner, cols, "multiplying matrices");

        let lhs = self.entries();
        let rhs = other.entries();
        let mut product = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                let mut sum = lhs[i * inner].multiply(&rhs[j]);
                for k in 1..inner {
                    sum = sum.add(&lhs[i * inner + k].multiply(&rhs[k * cols + j]));
                }
                product.push(sum);
            }
        }

        Ok(space.adopt(product.into_boxed_slice()))
    }

    /// Whether both handles share the same storage and polarity
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.entries.ptr_eq(&other.entries)
    }

    /// Memoized hash of the space key and entries
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        self.entries.hash_code(&self.space.key())
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

/// One line per row, `[a b c]`, each column right-aligned to its widest cell
fn render<R: fmt::Display>(entries: &[R], cols: usize) -> String {
    let cells: Vec<String> = entries.iter().map(ToString::to_string).collect();
    let widths: Vec<usize> = (0..cols)
        .map(|j| {
            cells
                .iter()
                .skip(j)
                .step_by(cols)
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    cells
        .chunks(cols)
        .map(|row| {
            let padded: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:>width$}"))
                .collect();
            format!("[{}]", padded.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl<R> ModuleElement<R> for Matrix<R>
where
    R: Ring + Coefficient,
{
    fn try_add(&self, other: &Self) -> AlgebraResult<Self> {
        Matrix::try_add(self, other)
    }

    fn negate(&self) -> Self {
        Matrix::negate(self)
    }

    fn is_zero(&self) -> bool {
        Matrix::is_zero(self)
    }

    fn scalar_multiply(&self, scalar: &R) -> Self {
        Matrix::scalar_multiply(self, scalar)
    }

    fn try_subtract(&self, other: &Self) -> AlgebraResult<Self> {
        Matrix::try_subtract(self, other)
    }
}

impl<R> Clone for Matrix<R> {
    fn clone(&self) -> Self {
        Self {
            space: self.space.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<R> PartialEq for Matrix<R>
where
    R: Ring + Coefficient,
{
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.space == other.space && self.entries() == other.entries())
    }
}

impl<R> Eq for Matrix<R> where R: Ring + Coefficient {}

impl<R> Hash for Matrix<R>
where
    R: Ring + Coefficient,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<R> fmt::Debug for Matrix<R>
where
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("space", &self.space)
            .field("entries", &self.entries.as_slice())
            .finish()
    }
}

impl<R> fmt::Display for Matrix<R>
where
    R: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = *self.space.inner.key.second().second();
        let rendered = self.entries.rendering(|entries| render(entries, cols));
        f.write_str(&rendered)
    }
}
