use crate::particles::WorkingVecs;

#[test]
fn test_new_uses_initial_size() {
    let wv = WorkingVecs::new();
    assert_eq!(wv.size(), crate::utils::INITIAL_POOL_SIZE);
    assert!(wv.unit_vec().iter().all(|&v| v == 1.0));
}

#[test]
fn test_never_shrinks() {
    let mut wv = WorkingVecs::with_capacity(50);
    wv.ensure_capacity(10);
    assert_eq!(wv.size(), 50);
}

#[test]
fn test_growth_preserves_values() {
    let mut wv = WorkingVecs::with_capacity(4);
    {
        let b = wv.buffers(4);
        b.v1.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        b.v5.copy_from_slice(&[5.0, 6.0, 7.0, 8.0]);
    }
    wv.ensure_capacity(10);
    assert_eq!(wv.size(), 10);
    assert_eq!(wv.unit_vec().len(), 10);
    assert!(wv.unit_vec().iter().all(|&v| v == 1.0));

    let b = wv.buffers(10);
    assert_eq!(&b.v1[..4], &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(&b.v5[..4], &[5.0, 6.0, 7.0, 8.0]);
}

#[test]
fn test_buffers_are_truncated() {
    let mut wv = WorkingVecs::with_capacity(8);
    let b = wv.buffers(3);
    assert_eq!(b.unit.len(), 3);
    assert_eq!(b.v1.len(), 3);
    assert_eq!(b.v4.len(), 3);

    let b = wv.buffers(20);
    assert_eq!(b.v3.len(), 20);
    assert_eq!(wv.size(), 20);
}
