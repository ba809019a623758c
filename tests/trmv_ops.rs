//! Checked entry points: op(A) selection, in-place products, batched columns, the raw
//! strided form and the faer matrix wrappers.

use approx::assert_relative_eq;
use faer::Mat;
use rand::Rng;
use trimv::{
    trmv_reference, MatView, StorageOrder, Transpose, TriMode, TriangularMatVec, TriangularProduct,
    TrmvError, TrmvOptions, VecView, VecViewMut,
};

fn random_vec(len: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(-5i32..=5) as f64).collect()
}

/// In-place x := op(A) x equals the out-of-place product into a zeroed vector.
#[test]
fn in_place_matches_out_of_place() {
    let n = 26;
    let a = random_vec(n * n);
    let lhs = MatView::col_major(&a, n, n).unwrap();
    for mode in [TriMode::LOWER, TriMode::UNIT_UPPER, TriMode::STRICTLY_LOWER] {
        for trans in [Transpose::NoTrans, Transpose::Trans, Transpose::ConjTrans] {
            let trmv = TriangularMatVec::new(TrmvOptions::new(mode).with_panel_width(5));
            let x0 = random_vec(n);

            let mut expected = vec![0.0; n];
            trmv.apply(trans, lhs, VecView::contiguous(&x0), VecViewMut::contiguous(&mut expected), 1.0)
                .unwrap();

            let mut x = x0.clone();
            trmv.apply_in_place(trans, lhs, VecViewMut::contiguous(&mut x)).unwrap();
            assert_relative_eq!(x.as_slice(), expected.as_slice(), epsilon = 1e-12);
        }
    }
}

/// In-place product on a strided vector leaves the gaps alone.
#[test]
fn in_place_strided_vector() {
    let n = 9;
    let a = random_vec(n * n);
    let lhs = MatView::row_major(&a, n, n).unwrap();
    let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::UPPER).with_panel_width(2));
    let x0 = random_vec(n);
    let mut buf: Vec<f64> = x0.iter().flat_map(|&v| [v, 100.0]).collect();
    trmv.apply_in_place(Transpose::NoTrans, lhs, VecViewMut::new(&mut buf, n, 2).unwrap())
        .unwrap();

    let mut expected = vec![0.0; n];
    trmv_reference(
        trmv.options(),
        lhs,
        VecView::contiguous(&x0),
        VecViewMut::contiguous(&mut expected),
        1.0,
    );
    for i in 0..n {
        assert_relative_eq!(buf[2 * i], expected[i], epsilon = 1e-12);
        assert_eq!(buf[2 * i + 1], 100.0);
    }
}

/// Batched columns equal one kernel call per column, with padded leading dimensions.
#[test]
fn run_columns_matches_per_column_runs() {
    let (rows, cols, k) = (31, 24, 5);
    let (ld_x, ld_res) = (cols + 3, rows + 2);
    let a = random_vec(rows * cols);
    let lhs = MatView::col_major(&a, rows, cols).unwrap();
    let x = random_vec(ld_x * k);
    for mode in [TriMode::LOWER, TriMode::UPPER, TriMode::UNIT_LOWER] {
        let trmv = TriangularMatVec::new(TrmvOptions::new(mode).with_panel_width(8));
        let mut res = vec![0.0; ld_res * k];
        trmv.run_columns(lhs, &x, ld_x, &mut res, ld_res, k, 2.0).unwrap();
        for j in 0..k {
            let mut expected = vec![0.0; rows];
            trmv.run(
                lhs,
                VecView::contiguous(&x[j * ld_x..j * ld_x + cols]),
                VecViewMut::contiguous(&mut expected),
                2.0,
            );
            assert_relative_eq!(&res[j * ld_res..j * ld_res + rows], expected.as_slice(), epsilon = 1e-12);
            assert!(res[j * ld_res + rows..(j + 1) * ld_res].iter().all(|&v| v == 0.0));
        }
    }
}

#[test]
fn run_columns_rejects_small_leading_dimension() {
    let a = vec![1.0; 16];
    let lhs = MatView::col_major(&a, 4, 4).unwrap();
    let x = vec![1.0; 8];
    let mut res = vec![0.0; 8];
    let trmv = TriangularMatVec::default();
    let err = trmv.run_columns(lhs, &x, 3, &mut res, 4, 2, 1.0).unwrap_err();
    assert_eq!(err, TrmvError::StrideTooSmall { stride: 3, extent: 4 });
}

/// The raw slice/stride form agrees with the view form.
#[test]
fn run_strided_matches_views() {
    let (rows, cols, ld) = (12, 12, 15);
    let a = random_vec(ld * cols);
    let x = random_vec(2 * cols);
    let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::STRICTLY_UPPER).with_panel_width(5));

    let mut raw = vec![0.0; rows];
    trmv.run_strided(StorageOrder::ColMajor, rows, cols, &a, ld, &x, 2, &mut raw, 1, 1.0).unwrap();

    let mut viewed = vec![0.0; rows];
    trmv.run(
        MatView::new(&a, rows, cols, ld, StorageOrder::ColMajor).unwrap(),
        VecView::new(&x, cols, 2).unwrap(),
        VecViewMut::contiguous(&mut viewed),
        1.0,
    );
    assert_eq!(raw, viewed);
}

#[test]
fn invalid_options_are_reported() {
    let a = vec![1.0; 4];
    let x = vec![1.0; 2];
    let mut res = vec![0.0; 2];
    let bad_mode = TriangularMatVec::new(TrmvOptions::new(TriMode::UNIT_LOWER | TriMode::ZERO_DIAG));
    let err = bad_mode
        .run_strided(StorageOrder::ColMajor, 2, 2, &a, 2, &x, 1, &mut res, 1, 1.0)
        .unwrap_err();
    assert!(matches!(err, TrmvError::InvalidMode(_)));

    let bad_width = TriangularMatVec::new(TrmvOptions::default().with_panel_width(0));
    let err = bad_width
        .apply(
            Transpose::NoTrans,
            MatView::col_major(&a, 2, 2).unwrap(),
            VecView::contiguous(&x),
            VecViewMut::contiguous(&mut res),
            1.0,
        )
        .unwrap_err();
    assert_eq!(err, TrmvError::ZeroPanelWidth);
    assert_eq!(res, vec![0.0, 0.0]);
}

/// faer matrices: the wrapper agrees with faer's own dense product of the triangle.
#[test]
fn faer_wrapper_matches_dense_product() {
    let (rows, cols) = (14, 10);
    let vals = random_vec(rows * cols);
    let a = Mat::from_fn(rows, cols, |i, j| vals[j * rows + i]);
    let xs = random_vec(cols);
    let xm = Mat::from_fn(cols, 1, |i, _| xs[i]);

    for mode in [TriMode::LOWER, TriMode::UPPER, TriMode::UNIT_LOWER] {
        let tri = Mat::from_fn(rows, cols, |i, j| {
            let keep = if mode.is_lower() { j <= i } else { j >= i };
            if i == j && mode.has_unit_diag() {
                1.0
            } else if keep {
                a[(i, j)]
            } else {
                0.0
            }
        });
        let dense = &tri * &xm;

        let kernel = TriangularMatVec::new(TrmvOptions::new(mode).with_panel_width(3));
        let mut y = vec![0.0; rows];
        a.tri_matvec(&kernel, &xs, &mut y, 1.0).unwrap();
        for i in 0..rows {
            assert_relative_eq!(y[i], dense[(i, 0)], epsilon = 1e-10);
        }
    }
}

/// A rejected in-place product leaves the caller's vector as it was.
#[test]
fn in_place_error_keeps_input() {
    let a = vec![1.0, 2.0, 0.0, 3.0];
    let lhs = MatView::col_major(&a, 2, 2).unwrap();
    for opts in [
        TrmvOptions::default().with_panel_width(0),
        TrmvOptions::new(TriMode::UNIT_LOWER | TriMode::ZERO_DIAG),
        TrmvOptions::new(TriMode::LOWER | TriMode::UPPER),
    ] {
        let trmv = TriangularMatVec::new(opts);
        let mut x = vec![3.0, 4.0];
        assert!(trmv.apply_in_place(Transpose::NoTrans, lhs, VecViewMut::contiguous(&mut x)).is_err());
        assert_eq!(x, vec![3.0, 4.0]);
    }
}
