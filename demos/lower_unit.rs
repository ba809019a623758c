use trimv::{MatView, TriMode, TriangularMatVec, TrmvOptions, VecView, VecViewMut};

fn main() {
    let n = 5;
    // column-major, A(i, j) = i + 1 + 10 * j
    let a: Vec<f64> = (0..n * n).map(|k| ((k % n) + 1 + 10 * (k / n)) as f64).collect();
    let x = vec![1.0; n];
    let mut res = vec![0.0; n];

    let lhs = MatView::col_major(&a, n, n).unwrap();
    let trmv = TriangularMatVec::new(TrmvOptions::new(TriMode::UNIT_LOWER).with_panel_width(2));
    println!("{}", trmv);
    trmv.run(lhs, VecView::contiguous(&x), VecViewMut::contiguous(&mut res), 1.0);
    println!("res = {:?}", res);
}
