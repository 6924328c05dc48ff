//! Property tests for the field laws of `Rational` and the structural laws
//! of vectors and matrices.

use lattice_algebra::prelude::*;
use proptest::prelude::*;

fn rational() -> impl Strategy<Value = Rational> {
    (-1_000_i64..1_000, 1_i64..1_000).prop_map(|(n, d)| Rational::new(n, d).unwrap())
}

fn nonzero_rational() -> impl Strategy<Value = Rational> {
    rational().prop_filter("non-zero", |q| !q.is_zero())
}

fn rational_coefficients(len: usize) -> impl Strategy<Value = Vec<Rational>> {
    proptest::collection::vec(rational(), len)
}

fn integer_matrix(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<Integer>>> {
    proptest::collection::vec(
        proptest::collection::vec((-50_i64..50).prop_map(Integer::from), cols),
        rows,
    )
}

proptest! {
    #[test]
    fn rational_addition_commutes(a in rational(), b in rational()) {
        prop_assert_eq!(AdditiveGroup::add(&a, &b), AdditiveGroup::add(&b, &a));
    }

    #[test]
    fn rational_multiplication_distributes(a in rational(), b in rational(), c in rational()) {
        let lhs = a.multiply(&AdditiveGroup::add(&b, &c));
        let rhs = AdditiveGroup::add(&a.multiply(&b), &a.multiply(&c));
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn rational_inverse_is_two_sided(a in nonzero_rational()) {
        let inverse = a.invert().unwrap();
        prop_assert!(a.multiply(&inverse).is_one());
        prop_assert_eq!(inverse.invert().unwrap(), a);
    }

    #[test]
    fn rational_stays_reduced(a in rational(), b in nonzero_rational()) {
        let quotient = a.divide(&b).unwrap();
        prop_assert!(quotient.denominator().is_positive());
        prop_assert!(quotient.numerator().gcd(&quotient.denominator()).abs() == Integer::from(1)
            || quotient.is_zero());
    }

    #[test]
    fn rational_display_round_trips_through_parse(a in rational()) {
        prop_assert_eq!(a.to_string().parse::<Rational>().unwrap(), a);
    }

    #[test]
    fn vector_double_negation_is_the_same_value(coefficients in rational_coefficients(4)) {
        let registry = SpaceRegistry::new();
        let x = registry.vector_space::<Rational>(4).unwrap().wrap(&coefficients).unwrap();
        let back = x.negate().negate();
        prop_assert!(back.ptr_eq(&x));
        prop_assert_eq!(back.coefficients().as_ptr(), x.coefficients().as_ptr());
    }

    #[test]
    fn vector_plus_negation_is_zero(coefficients in rational_coefficients(3)) {
        let registry = SpaceRegistry::new();
        let x = registry.vector_space::<Rational>(3).unwrap().wrap(&coefficients).unwrap();
        prop_assert!(x.try_add(&x.negate()).unwrap().is_zero());
    }

    #[test]
    fn equal_keys_give_identical_spaces(rows in 1_usize..6, cols in 1_usize..6) {
        let registry = SpaceRegistry::new();
        let a = registry.matrix_space::<Integer>(rows, cols).unwrap();
        let b = registry.matrix_space::<Integer>(rows, cols).unwrap();
        prop_assert!(a.ptr_eq(&b));
        prop_assert_eq!(a.key(), b.key());
    }

    #[test]
    fn matrix_product_is_associative(
        a in integer_matrix(2, 3),
        b in integer_matrix(3, 2),
        c in integer_matrix(2, 2),
    ) {
        let registry = SpaceRegistry::new();
        let a = registry.matrix_space::<Integer>(2, 3).unwrap().wrap(&a).unwrap();
        let b = registry.matrix_space::<Integer>(3, 2).unwrap().wrap(&b).unwrap();
        let c = registry.matrix_space::<Integer>(2, 2).unwrap().wrap(&c).unwrap();

        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn equal_matrices_hash_equally(entries in integer_matrix(2, 2)) {
        let registry = SpaceRegistry::new();
        let space = registry.matrix_space::<Integer>(2, 2).unwrap();
        let a = space.wrap(&entries).unwrap();
        let b = space.wrap(&entries).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hash_code(), b.hash_code());
    }
}
