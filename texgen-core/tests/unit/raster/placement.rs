use super::*;

#[test]
fn determinant_and_degeneracy() {
    assert_eq!(Parallelogram::FULL.determinant(), 1.0);
    let flipped = Parallelogram::new([0.0, 0.0], [0.0, 1.0], [1.0, 0.0]);
    assert_eq!(flipped.determinant(), -1.0);
    assert!(!flipped.is_degenerate(4, 4));

    let sliver = Parallelogram::rect(0.5, 0.5, 0.01, 0.01);
    assert!(sliver.is_degenerate(16, 16));
    assert!(!sliver.is_degenerate(256, 256));

    // exactly a quarter texel is still drawable
    let quarter = Parallelogram::rect(0.0, 0.0, 0.5, 0.5);
    assert!(!quarter.is_degenerate(1, 1));
    assert!(Parallelogram::rect(0.0, 0.0, 0.5, 0.49).is_degenerate(1, 1));

    let collinear = Parallelogram::new([0.0, 0.0], [0.5, 0.5], [0.25, 0.25]);
    assert!(collinear.is_degenerate(1 << 14, 1 << 14));
}
