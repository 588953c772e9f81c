use super::*;
use crate::foundation::random::Xoshiro;
use crate::generators::gradient::linear_gradient;

fn random_texture(seed: u64) -> Texture {
    let mut rng = Xoshiro::from_seed(seed);
    let pixels = (0..64)
        .map(|_| {
            let a = (rng.next_u64() >> 48) as u16;
            let c = |v: u64| ((v >> 48) % (u64::from(a) + 1)) as u16;
            Pixel::new(c(rng.next_u64()), c(rng.next_u64()), c(rng.next_u64()), a)
        })
        .collect();
    Texture::from_pixels(8, 8, pixels).unwrap()
}

#[test]
fn identity_matrix_copies() {
    let src = random_texture(1);
    let mut dst = Texture::new(8, 8).unwrap();
    color_matrix_transform(&mut dst, &src, &Matrix44::identity(), false).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn coefficients_scale_offset_and_saturate() {
    let src = Texture::filled(2, 2, Pixel::new(20000, 40000, 60000, 65535)).unwrap();
    let m = Matrix44::from_rows([
        [0.5, 0.0, 0.0, 0.0],
        [0.0, 2.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let mut dst = Texture::new(2, 2).unwrap();
    color_matrix_transform(&mut dst, &src, &m, false).unwrap();
    assert_eq!(dst.at(1, 1), Pixel::new(10000, 65535, 0, 65535));

    // column 3 adds a multiple of alpha
    let mut offset = Matrix44::identity();
    offset[(0, 3)] = 0.25;
    color_matrix_transform(&mut dst, &src, &offset, false).unwrap();
    assert_eq!(dst.at(0, 0).r, 20000 + 16384);
}

#[test]
fn premult_clamp_is_optional() {
    let src = Texture::filled(2, 2, Pixel::new(30000, 0, 0, 40000)).unwrap();
    let m = Matrix44::scale(2.0, 1.0, 1.0);
    let mut raw = Texture::new(2, 2).unwrap();
    color_matrix_transform(&mut raw, &src, &m, false).unwrap();
    assert_eq!(raw.at(0, 0).r, 60000);

    let mut clamped = src.clone();
    color_matrix_transform_in_place(&mut clamped, &m, true);
    assert_eq!(clamped.at(0, 0), Pixel::new(40000, 0, 0, 40000));
}

#[test]
fn in_place_matches_copying() {
    let src = random_texture(2);
    let m = Matrix44::rotation_z(0.3) * 0.8;
    let mut a = Texture::new(8, 8).unwrap();
    color_matrix_transform(&mut a, &src, &m, true).unwrap();
    let mut b = src.clone();
    color_matrix_transform_in_place(&mut b, &m, true);
    assert_eq!(a, b);
    assert!(color_matrix_transform(&mut Texture::new(4, 4).unwrap(), &src, &m, true).is_err());
}

#[test]
fn channel_ramps_reproduce_the_input() {
    let map_r = linear_gradient(0xff000000, 0xffff0000).unwrap();
    let map_g = linear_gradient(0xff000000, 0xff00ff00).unwrap();
    let map_b = linear_gradient(0xff000000, 0xff0000ff).unwrap();

    let src = random_texture(3);
    let mut dst = Texture::new(8, 8).unwrap();
    color_remap(&mut dst, &src, &map_r, &map_g, &map_b).unwrap();

    for (o, i) in dst.pixels().iter().zip(src.pixels()) {
        assert_eq!(o.a, i.a);
        if i.a == 0 {
            assert_eq!(o, i);
            continue;
        }
        for (oc, ic) in [(o.r, i.r), (o.g, i.g), (o.b, i.b)] {
            assert!((i32::from(oc) - i32::from(ic)).abs() <= 4, "{o:?} vs {i:?}");
        }
    }
}

#[test]
fn remap_sums_ramp_contributions() {
    // every channel maps to white, so the sum saturates
    let white = linear_gradient(0xffffffff, 0xffffffff).unwrap();
    let src = Texture::filled(2, 2, Pixel::new(1, 2, 3, 0xffff)).unwrap();
    let mut dst = Texture::new(2, 2).unwrap();
    color_remap(&mut dst, &src, &white, &white, &white).unwrap();
    assert_eq!(dst.at(0, 0), Pixel::WHITE);

    let half = Texture::filled(2, 2, Pixel::new(0, 0, 0, 0x8000)).unwrap();
    color_remap(&mut dst, &half, &white, &white, &white).unwrap();
    assert_eq!(dst.at(0, 0), Pixel::splat(0x8000));
}
