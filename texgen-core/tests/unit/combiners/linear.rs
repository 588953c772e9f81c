use super::*;
use crate::foundation::random::Xoshiro;

fn random_texture(seed: u64) -> Texture {
    let mut rng = Xoshiro::from_seed(seed);
    let pixels = (0..64).map(|_| Pixel::from_argb64(rng.next_u64())).collect();
    Texture::from_pixels(8, 8, pixels).unwrap()
}

#[test]
fn unit_weight_copies_input() {
    let src = random_texture(9);
    let mut dst = Texture::new(8, 8).unwrap();
    linear_combine(&mut dst, Pixel::TRANSPARENT, 0.0, &[LinearInput::new(&src, 1.0)]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn constant_term_and_weighted_sum() {
    let mut dst = Texture::new(4, 4).unwrap();
    linear_combine(&mut dst, Pixel::WHITE, 0.5, &[]).unwrap();
    assert_eq!(dst.at(3, 1), Pixel::splat(0x8000));

    let quarter = Texture::filled(4, 4, Pixel::splat(0x4000)).unwrap();
    let inputs = [LinearInput::new(&quarter, 1.5), LinearInput::new(&quarter, 1.5)];
    linear_combine(&mut dst, Pixel::TRANSPARENT, 0.0, &inputs).unwrap();
    assert_eq!(dst.at(0, 0), Pixel::splat(0xc000));
}

#[test]
fn results_clamp_to_channel_range() {
    let white = Texture::filled(4, 4, Pixel::WHITE).unwrap();
    let mut dst = Texture::new(4, 4).unwrap();
    linear_combine(&mut dst, Pixel::WHITE, 1.0, &[LinearInput::new(&white, 3.0)]).unwrap();
    assert_eq!(dst.at(1, 1), Pixel::WHITE);
    linear_combine(&mut dst, Pixel::TRANSPARENT, 0.0, &[LinearInput::new(&white, -1.0)]).unwrap();
    assert_eq!(dst.at(1, 1), Pixel::TRANSPARENT);
}

#[test]
fn shifts_offset_the_lookup() {
    let src = random_texture(10);
    let mut dst = Texture::new(8, 8).unwrap();
    let input = LinearInput {
        shift_u: 0.125,
        shift_v: -0.25,
        ..LinearInput::new(&src, 1.0)
    };
    linear_combine(&mut dst, Pixel::TRANSPARENT, 0.0, &[input]).unwrap();
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(dst.at(x, y), src.at((x + 1) % 8, (y + 6) % 8));
        }
    }
}

#[test]
fn inputs_may_differ_in_size() {
    let small = Texture::filled(2, 2, Pixel::splat(1000)).unwrap();
    let mut dst = Texture::new(16, 8).unwrap();
    let input = LinearInput {
        filter: FilterMode::WRAP_BILINEAR,
        ..LinearInput::new(&small, 2.0)
    };
    linear_combine(&mut dst, Pixel::TRANSPARENT, 0.0, &[input]).unwrap();
    assert!(dst.pixels().iter().all(|&p| p == Pixel::splat(2000)));
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let src = Texture::new(4, 4).unwrap();
    let mut dst = Texture::new(4, 4).unwrap();
    assert!(linear_combine(&mut dst, Pixel::WHITE, 128.0, &[]).is_err());
    assert!(linear_combine(&mut dst, Pixel::WHITE, 0.0, &[LinearInput::new(&src, -200.0)]).is_err());
    let nan = LinearInput {
        shift_v: f32::NAN,
        ..LinearInput::new(&src, 1.0)
    };
    assert!(linear_combine(&mut dst, Pixel::WHITE, 0.0, &[nan]).is_err());

    let many = vec![LinearInput::new(&src, 0.0); MAX_LINEAR_INPUTS + 1];
    assert!(linear_combine(&mut dst, Pixel::WHITE, 0.0, &many).is_err());
    assert!(linear_combine(&mut dst, Pixel::WHITE, 0.0, &many[1..]).is_ok());
}
