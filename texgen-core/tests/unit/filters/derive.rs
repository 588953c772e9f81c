use super::*;

#[test]
fn flat_height_field_gives_neutral_outputs() {
    let src = Texture::filled(8, 8, Pixel::splat(12345)).unwrap();
    let mut dst = Texture::new(8, 8).unwrap();

    derive(&mut dst, &src, DeriveOp::Gradient, 3.0).unwrap();
    assert!(dst.pixels().iter().all(|p| *p == Pixel::new(32768, 32768, 0, 0xffff)));

    derive(&mut dst, &src, DeriveOp::Normals, 3.0).unwrap();
    assert!(dst.pixels().iter().all(|p| *p == Pixel::new(32768, 32768, 65535, 0xffff)));
}

#[test]
fn horizontal_ramp_tilts_normals_against_the_slope() {
    // red rises to the right with wrap-around at the last column
    let pixels = (0..16u32)
        .flat_map(|_| (0..16u32).map(|x| Pixel::new((x * 4096) as u16, 0, 0, 0xffff)))
        .collect();
    let src = Texture::from_pixels(16, 16, pixels).unwrap();
    let mut grad = Texture::new(16, 16).unwrap();
    derive(&mut grad, &src, DeriveOp::Gradient, 1.0).unwrap();
    let mut normals = Texture::new(16, 16).unwrap();
    derive(&mut normals, &src, DeriveOp::Normals, 1.0).unwrap();

    let g = grad.at(5, 5);
    assert!(g.r > 32768);
    assert_eq!(g.g, 32768);
    // the wrapped edge sees a large drop
    assert!(grad.at(0, 5).r < 32768);

    let n = normals.at(5, 5);
    assert!(n.r < 32768);
    assert_eq!(n.g, 32768);
    assert!(n.b > 32768 && n.b < 65535);
}

#[test]
fn strength_scales_the_slope() {
    let pixels = (0..64u32).map(|i| Pixel::new(((i % 8) * 1000) as u16, 0, 0, 0xffff)).collect();
    let src = Texture::from_pixels(8, 8, pixels).unwrap();
    let mut weak = Texture::new(8, 8).unwrap();
    let mut strong = Texture::new(8, 8).unwrap();
    derive(&mut weak, &src, DeriveOp::Gradient, 1.0).unwrap();
    derive(&mut strong, &src, DeriveOp::Gradient, 4.0).unwrap();
    let d = |p: Pixel| i32::from(p.r) - 32768;
    assert!(d(strong.at(3, 0)) > 3 * d(weak.at(3, 0)));
    assert!(derive(&mut Texture::new(4, 8).unwrap(), &src, DeriveOp::Normals, 1.0).is_err());
}

#[test]
fn normals_match_single_precision_values() {
    let pixels = (0..16u32)
        .flat_map(|_| (0..16u32).map(|x| Pixel::new((x * 4096) as u16, 0, 0, 0xffff)))
        .collect();
    let src = Texture::from_pixels(16, 16, pixels).unwrap();
    let mut dst = Texture::new(16, 16).unwrap();

    derive(&mut dst, &src, DeriveOp::Normals, 1.0).unwrap();
    assert_eq!(dst.at(5, 9), Pixel::new(30723, 32768, 65472, 0xffff));

    derive(&mut dst, &src, DeriveOp::Normals, 3.0).unwrap();
    assert_eq!(dst.at(5, 9), Pixel::new(26729, 32768, 64974, 0xffff));
}
