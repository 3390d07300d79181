use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_new_checks_length() {
    let a = Array::new(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(a.shape(), &[2, 3]);
    assert_eq!(a.rank(), 2);
    assert_eq!(a.numel(), 6);

    let err = Array::new(vec![1.0f64, 2.0, 3.0], vec![2, 2]).unwrap_err();
    assert_eq!(
        err,
        EzgradError::ArrayCreationError {
            data_len: 3,
            shape: vec![2, 2]
        }
    );
}

#[test]
fn test_creation_helpers() {
    let z = Array::<f64>::zeros(&[2, 2]);
    assert_eq!(z.data(), &[0.0; 4]);
    let o = Array::<f32>::ones(&[3]);
    assert_eq!(o.data(), &[1.0; 3]);
    let s = Array::scalar(2.5f64);
    assert_eq!(s.rank(), 0);
    assert_eq!(s.item(), Some(2.5));

    let r = Array::from_rows(&[vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(r.shape(), &[2, 2]);
    assert!(Array::from_rows(&[vec![1.0f64, 2.0], vec![3.0]]).is_err());
}

#[test]
fn test_randn_is_seeded() {
    let mut rng1 = StdRng::seed_from_u64(7);
    let mut rng2 = StdRng::seed_from_u64(7);
    let a = Array::<f64>::randn(&[4, 3], 0.01, &mut rng1);
    let b = Array::<f64>::randn(&[4, 3], 0.01, &mut rng2);
    assert_eq!(a, b);
    assert_eq!(a.shape(), &[4, 3]);
    assert!(a.data().iter().all(|x| x.abs() < 1.0));
}

#[test]
fn test_get() {
    let a = Array::new(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    assert_eq!(a.get(&[0, 0]), Some(1.0));
    assert_eq!(a.get(&[1, 2]), Some(6.0));
    assert_eq!(a.get(&[2, 0]), None);
    assert_eq!(a.get(&[0]), None);
}

#[test]
fn test_zip_broadcast_row() {
    let m = Array::new(vec![1.0f64, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let row = Array::new(vec![10.0f64, 20.0], vec![1, 2]).unwrap();
    let r = m.zip_broadcast(&row, |a, b| a + b).unwrap();
    assert_eq!(r.data(), &[11.0, 22.0, 13.0, 24.0]);
    assert_eq!(r.shape(), &[2, 2]);
}

#[test]
fn test_zip_broadcast_scalar() {
    let m = Array::new(vec![1.0f64, 2.0, 3.0], vec![3]).unwrap();
    let r = m.zip_broadcast(&Array::scalar(2.0), |a, b| a * b).unwrap();
    assert_eq!(r.data(), &[2.0, 4.0, 6.0]);
}

#[test]
fn test_matmul() {
    let a = Array::new(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let b = Array::new(vec![7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0], vec![3, 2]).unwrap();
    let c = a.matmul(&b).unwrap();
    assert_eq!(c.shape(), &[2, 2]);
    assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_matmul_shape_mismatch() {
    let a = Array::<f64>::ones(&[2, 3]);
    assert!(matches!(
        a.matmul(&a),
        Err(EzgradError::MatmulShapeMismatch { .. })
    ));
    let v = Array::<f64>::ones(&[3]);
    assert!(a.matmul(&v).is_err());
}

#[test]
fn test_transpose() {
    let a = Array::new(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap();
    let t = a.transpose().unwrap();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert!(Array::<f64>::ones(&[3]).transpose().is_err());
}

#[test]
fn test_sum_all_and_contains_zero() {
    let a = Array::new(vec![1.0f64, -2.0, 0.0], vec![3]).unwrap();
    assert_eq!(a.sum_all().item(), Some(-1.0));
    assert!(a.contains_zero());
    assert!(!Array::<f64>::ones(&[2]).contains_zero());
}
