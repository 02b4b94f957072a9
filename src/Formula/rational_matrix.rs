//! Exact linear algebra over the rationals: Gauss-Jordan elimination and null
//! space basis of a `DMatrix<BigRational>`. Stoichiometric coefficients must come
//! out as exact integers, so nothing here touches floating point.
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

pub type RationalMatrix = DMatrix<BigRational>;

/// builds a rational matrix from rows of integers
pub fn from_integer_rows(rows: &[Vec<i64>], ncols: usize) -> RationalMatrix {
    DMatrix::from_fn(rows.len(), ncols, |i, j| {
        let value = rows[i].get(j).copied().unwrap_or(0);
        BigRational::from_integer(BigInt::from(value))
    })
}

/// Brings the matrix to reduced row echelon form in place and returns the
/// pivot columns in increasing order.
pub fn reduced_row_echelon(m: &mut RationalMatrix) -> Vec<usize> {
    let (nrows, ncols) = m.shape();
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..ncols {
        if row >= nrows {
            break;
        }
        let Some(pivot_row) = (row..nrows).find(|&r| !m[(r, col)].is_zero()) else {
            continue;
        };
        m.swap_rows(row, pivot_row);
        let pivot = m[(row, col)].clone();
        for j in col..ncols {
            m[(row, j)] = &m[(row, j)] / &pivot;
        }
        for r in 0..nrows {
            if r == row || m[(r, col)].is_zero() {
                continue;
            }
            let factor = m[(r, col)].clone();
            for j in col..ncols {
                let delta = &factor * &m[(row, j)];
                m[(r, j)] -= delta;
            }
        }
        pivots.push(col);
        row += 1;
    }
    pivots
}

pub fn rank(m: &RationalMatrix) -> usize {
    let mut work = m.clone();
    reduced_row_echelon(&mut work).len()
}

/// Basis of the right null space {x : m x = 0}, one vector per free column,
/// each with a 1 in its free position.
pub fn null_space(m: &RationalMatrix) -> Vec<Vec<BigRational>> {
    let ncols = m.ncols();
    let mut rref = m.clone();
    let pivots = reduced_row_echelon(&mut rref);
    let free_columns = (0..ncols).filter(|c| !pivots.contains(c));
    free_columns
        .map(|free| {
            let mut vector = vec![BigRational::zero(); ncols];
            vector[free] = BigRational::one();
            for (pivot_row, &pivot_col) in pivots.iter().enumerate() {
                vector[pivot_col] = -rref[(pivot_row, free)].clone();
            }
            vector
        })
        .collect()
}

/// Scales a rational vector by the LCM of its denominators and divides the
/// result by the GCD of its entries, giving the smallest integer vector with
/// the same direction.
pub fn to_integer_vector(vector: &[BigRational]) -> Vec<BigInt> {
    let lcm = vector
        .iter()
        .fold(BigInt::one(), |acc, x| acc.lcm(x.denom()));
    let scale = BigRational::from_integer(lcm);
    let integers: Vec<BigInt> = vector.iter().map(|x| (x * &scale).to_integer()).collect();
    let gcd = integers.iter().fold(BigInt::zero(), |acc, x| acc.gcd(x));
    if gcd.is_zero() || gcd.is_one() {
        return integers;
    }
    integers.into_iter().map(|x| x / &gcd).collect()
}

/// true if all entries are zero or negative (and at least one is non zero)
pub fn is_non_positive(vector: &[BigInt]) -> bool {
    vector.iter().all(|x| !x.is_positive()) && vector.iter().any(|x| !x.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn test_rref_and_rank() {
        let mut m = from_integer_rows(&[vec![2, 0, -2], vec![0, 2, -1]], 3);
        let pivots = reduced_row_echelon(&mut m);
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(m[(0, 2)], r(-1, 1));
        assert_eq!(m[(1, 2)], r(-1, 2));
        let singular = from_integer_rows(&[vec![1, 2], vec![2, 4]], 2);
        assert_eq!(rank(&singular), 1);
    }

    #[test]
    fn test_null_space_of_water_synthesis() {
        // columns: H2, O2, H2O ; rows: H, O
        let m = from_integer_rows(&[vec![2, 0, -2], vec![0, 2, -1]], 3);
        let basis = null_space(&m);
        assert_eq!(basis.len(), 1);
        assert_eq!(basis[0], vec![r(1, 1), r(1, 2), r(1, 1)]);
        let ints = to_integer_vector(&basis[0]);
        assert_eq!(ints, vec![BigInt::from(2), BigInt::from(1), BigInt::from(2)]);
    }

    #[test]
    fn test_full_rank_has_trivial_null_space() {
        let m = from_integer_rows(&[vec![1, 0], vec![0, 1]], 2);
        assert!(null_space(&m).is_empty());
    }

    #[test]
    fn test_integer_vector_is_reduced() {
        let v = vec![r(4, 1), r(-2, 1), r(6, 1)];
        assert_eq!(
            to_integer_vector(&v),
            vec![BigInt::from(2), BigInt::from(-1), BigInt::from(3)]
        );
        assert!(is_non_positive(&[BigInt::from(-1), BigInt::from(0)]));
        assert!(!is_non_positive(&[BigInt::from(-1), BigInt::from(2)]));
        assert!(!is_non_positive(&[BigInt::from(0)]));
    }
}
