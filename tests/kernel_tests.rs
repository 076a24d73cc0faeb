use gram_engine::arith::gcd_all;
use gram_engine::kernel::{integer_kernel_basis, rank, right_integer_kernel_basis, Echelon};
use gram_engine::matrix::IntMatrix;
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random `rows × cols` matrix whose last `dependent` rows are integer
/// combinations of the others.
fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize, dependent: usize) -> Vec<Vec<i64>> {
    let free = rows - dependent;
    let mut m: Vec<Vec<i64>> = (0..free)
        .map(|_| (0..cols).map(|_| rng.gen_range(-6..=6)).collect())
        .collect();
    for _ in 0..dependent {
        let mut row = vec![0i64; cols];
        for base in m.iter().take(free) {
            let c: i64 = rng.gen_range(-3..=3);
            for (x, b) in row.iter_mut().zip(base) {
                *x += c * b;
            }
        }
        m.push(row);
    }
    m
}

fn float_rank(rows: &[Vec<i64>], cols: usize) -> usize {
    let values: Vec<f64> = rows.iter().flatten().map(|&x| x as f64).collect();
    DMatrix::from_row_slice(rows.len(), cols, &values).rank(1e-9)
}

/// Check the kernel contract on a single input
fn check_kernel(rows: Vec<Vec<i64>>) {
    let num_rows = rows.len();
    let cols = rows.first().map_or(0, Vec::len);
    let expected_rank = float_rank(&rows, cols);
    let m = IntMatrix::from_rows(rows).unwrap();

    assert_eq!(rank(&m), expected_rank, "rank mismatch on {m}");

    let basis = integer_kernel_basis(&m);
    assert_eq!(basis.len(), num_rows - expected_rank, "nullity mismatch on {m}");
    for b in &basis {
        assert_eq!(b.len(), num_rows);
        assert!(
            m.vec_mul(b).unwrap().iter().all(Zero::is_zero),
            "{b:?} does not annihilate {m}"
        );
        assert!(gcd_all(BigInt::zero(), b.iter()).is_one(), "{b:?} is not primitive");
    }

    // basis vectors are linearly independent
    if !basis.is_empty() {
        let stacked = IntMatrix::from_rows(basis).unwrap();
        assert_eq!(rank(&stacked), num_rows - expected_rank);
    }
}

#[test]
fn test_kernel_randomized() {
    let mut rng = StdRng::seed_from_u64(0x6a11);
    for &(rows, cols) in &[(2, 2), (3, 3), (4, 3), (3, 5), (6, 6), (8, 5)] {
        for dependent in 0..rows {
            for _ in 0..5 {
                check_kernel(random_matrix(&mut rng, rows, cols, dependent));
            }
        }
    }
}

#[test]
fn test_symmetric_gram_kernel_is_null_space() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 2..7 {
        // G = Bᵀ B has rank at most the number of rows of B
        let b = random_matrix(&mut rng, n - 1, n, 0);
        let g: Vec<Vec<i64>> = (0..n)
            .map(|i| (0..n).map(|j| b.iter().map(|r| r[i] * r[j]).sum()).collect())
            .collect();
        let g = IntMatrix::from_rows(g).unwrap();
        assert!(g.is_symmetric());

        let basis = integer_kernel_basis(&g);
        assert!(!basis.is_empty());
        for v in &basis {
            assert!(g.mul_vec(v).unwrap().iter().all(Zero::is_zero));
            assert!(g.vec_mul(v).unwrap().iter().all(Zero::is_zero));
        }
    }
}

#[test]
fn test_right_kernel_randomized() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let rows = random_matrix(&mut rng, 3, 5, 1);
        let m = IntMatrix::from_rows(rows).unwrap();
        let basis = right_integer_kernel_basis(&m);
        assert_eq!(basis.len(), 5 - rank(&m));
        for b in &basis {
            assert!(m.mul_vec(b).unwrap().iter().all(Zero::is_zero));
        }
    }
}

#[test]
fn test_full_rank_square() {
    let m = IntMatrix::from_rows(vec![vec![2, -1, 0], vec![-1, 2, -1], vec![0, -1, 2]]).unwrap();
    assert!(integer_kernel_basis(&m).is_empty());
}

#[test]
fn test_zero_rows_sink_to_bottom() {
    let m = IntMatrix::from_rows(vec![vec![1, 2], vec![2, 4], vec![0, 1], vec![3, 7]]).unwrap();
    let echelon = Echelon::new(&m);
    assert_eq!(echelon.rank(), 2);
    assert_eq!(echelon.nullity(), 2);
    let reduced: Vec<bool> = echelon
        .reduced()
        .map(|row| row.iter().all(Zero::is_zero))
        .collect();
    assert_eq!(reduced, vec![false, false, true, true]);
}

#[test]
fn test_coefficient_growth_is_bounded() {
    // entries stay small thanks to content reduction
    let mut rng = StdRng::seed_from_u64(99);
    let rows = random_matrix(&mut rng, 10, 10, 4);
    let m = IntMatrix::from_rows(rows).unwrap();
    let echelon = Echelon::new(&m);
    assert!(echelon.stats().eliminations > 0);
    assert!(echelon.stats().max_bits < 4096);
}
