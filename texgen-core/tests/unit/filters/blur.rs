use super::*;

fn impulse(w: u32, h: u32, x: u32, y: u32) -> Texture {
    let mut tex = Texture::new(w, h).unwrap();
    *tex.at_mut(x, y) = Pixel::WHITE;
    tex
}

#[test]
fn tiny_kernel_or_zero_order_copies() {
    let src = impulse(16, 16, 3, 5);
    let mut dst = Texture::new(16, 16).unwrap();

    blur(&mut dst, &src, &BlurParams::new(0.0, 0.0, 3)).unwrap();
    assert_eq!(dst, src);

    blur(&mut dst, &src, &BlurParams::new(0.5, 0.5, 0)).unwrap();
    assert_eq!(dst, src);

    // half a pixel or less on a 16 wide texture
    blur(&mut dst, &src, &BlurParams::new(0.06, 0.06, 1)).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn constant_image_is_unchanged() {
    let fill = Pixel::new(1000, 2000, 3000, 4000);
    let src = Texture::filled(32, 16, fill).unwrap();
    let mut dst = Texture::new(32, 16).unwrap();
    for wrap in [Wrap::Repeat, Wrap::Clamp] {
        let params = BlurParams {
            wrap_u: wrap,
            wrap_v: wrap,
            ..BlurParams::new(0.3, 0.7, 3)
        };
        blur(&mut dst, &src, &params).unwrap();
        assert_eq!(dst, src);
    }
}

#[test]
fn impulse_spreads_symmetrically_and_keeps_energy() {
    let src = impulse(16, 16, 8, 8);
    let mut dst = Texture::new(16, 16).unwrap();
    blur(&mut dst, &src, &BlurParams::new(0.25, 0.25, 2)).unwrap();

    for y in 1..16u32 {
        for x in 1..16u32 {
            assert_eq!(dst.at(x, y), dst.at(16 - x, 16 - y), "({x}, {y})");
        }
    }
    assert!(dst.at(8, 8).r < 0x4000);
    assert!(dst.at(11, 8).r > 0);

    let total: i64 = dst.pixels().iter().map(|p| i64::from(p.r)).sum();
    assert!((total - 65535).abs() < 1024, "{total}");
}

#[test]
fn single_pass_weights() {
    // 0.25 on 16 pixels is a half-width of two pixels: taps at +-1 weigh 1, taps at +-2 weigh 1/2
    let src = impulse(16, 1, 8, 0);
    let mut dst = Texture::new(16, 1).unwrap();
    blur(&mut dst, &src, &BlurParams::new(0.25, 0.0, 1)).unwrap();
    let row: Vec<u16> = dst.pixels().iter().map(|p| p.r).collect();
    assert_eq!(&row[5..12], &[0, 8192, 16384, 16384, 16384, 8192, 0]);
}

#[test]
fn edge_mode_controls_wraparound() {
    let src = impulse(16, 1, 0, 0);
    let mut dst = Texture::new(16, 1).unwrap();

    blur(&mut dst, &src, &BlurParams::new(0.25, 0.0, 1)).unwrap();
    assert_eq!(dst.at(15, 0).r, 16384);
    assert_eq!(dst.at(0, 0).r, 16384);

    let clamp = BlurParams {
        wrap_u: Wrap::Clamp,
        ..BlurParams::new(0.25, 0.0, 1)
    };
    blur(&mut dst, &src, &clamp).unwrap();
    assert_eq!(dst.at(15, 0).r, 0);
    // the edge pixel repeats outward and gathers 5/8 of the kernel
    assert_eq!(dst.at(0, 0).r, 40959);
}

#[test]
fn size_mismatch_and_nan_are_rejected() {
    let src = Texture::new(16, 16).unwrap();
    let mut dst = Texture::new(8, 16).unwrap();
    assert!(blur(&mut dst, &src, &BlurParams::new(0.1, 0.1, 1)).is_err());

    let mut tex = Texture::new(16, 16).unwrap();
    assert!(blur_in_place(&mut tex, &BlurParams::new(f32::NAN, 0.1, 1)).is_err());
}

#[test]
fn params_load_from_json() {
    let p: BlurParams = serde_json::from_str(
        r#"{ "size_x": 0.25, "size_y": 0.0, "order": 2, "wrap_u": "clamp", "wrap_v": "repeat" }"#,
    )
    .unwrap();
    assert_eq!(
        p,
        BlurParams {
            wrap_u: Wrap::Clamp,
            ..BlurParams::new(0.25, 0.0, 2)
        }
    );
}
