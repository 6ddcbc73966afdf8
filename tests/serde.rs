#![cfg(feature = "serde")]

use nlpmodels::{CooMatrix, Counter, Counters, NlpModelMeta, SparseVector};

#[test]
fn roundtrip_counters_json() {
    let mut counters = Counters::new();
    for (k, counter) in Counter::ALL.into_iter().enumerate() {
        for _ in 0..=k {
            counters.increment(counter);
        }
    }

    let json = serde_json::to_string(&counters).unwrap();
    let back: Counters = serde_json::from_str(&json).unwrap();
    assert_eq!(back, counters);
    assert_eq!(back.neval_jhprod, 11);

    let json = serde_json::to_string(&Counter::JtProd).unwrap();
    let counter: Counter = serde_json::from_str(&json).unwrap();
    assert_eq!(counter, Counter::JtProd);
}

#[test]
fn roundtrip_metadata_json() {
    // JSON has no infinities, so every bound is finite here.
    let meta = NlpModelMeta::builder(3)
        .x0(vec![0.5, -1.0, 2.0])
        .bounds(vec![-1.0, 0.0, 1.0], vec![1.0, 0.0, 4.0])
        .constraints(vec![-1.0, 0.0], vec![-1.0, 5.0])
        .y0(vec![0.25, 0.0])
        .lin(vec![1])
        .nnzj(4)
        .nnzh(3)
        .minimize(false)
        .name("bounded")
        .build();

    let json = serde_json::to_string(&meta).unwrap();
    let back: NlpModelMeta<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, meta);
    assert_eq!(back.ifix, vec![1]);
    assert_eq!(back.jfix, vec![0]);
    assert_eq!(back.jrng, vec![1]);
    assert_eq!(back.nln, vec![0]);
    assert!(!back.minimize);
}

#[test]
fn roundtrip_symmetric_matrix_json() {
    let h = CooMatrix::symmetric(3, vec![0, 1, 2, 2], vec![0, 0, 1, 2], vec![4.0, -1.5, 0.5, 2.0]);

    let json = serde_json::to_string(&h).unwrap();
    let back: CooMatrix<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, h);
    assert!(back.symmetric);
    assert_eq!(back.to_dense(), h.to_dense());
    assert_eq!(back.mul_vec(&[1.0, 1.0, 1.0]), h.mul_vec(&[1.0, 1.0, 1.0]));
}

#[test]
fn roundtrip_sparse_vector_json() {
    let v = SparseVector::new(5, vec![1, 4], vec![-2.0, 0.75]);

    let json = serde_json::to_string(&v).unwrap();
    let back: SparseVector<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
    assert_eq!(back.to_dense(), vec![0.0, -2.0, 0.0, 0.0, 0.75]);
}
