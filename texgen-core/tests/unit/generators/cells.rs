use super::*;
use crate::foundation::random::Xoshiro;
use crate::generators::gradient::linear_gradient;

fn center(x: f32, y: f32, color: Pixel) -> CellCenter {
    CellCenter { x, y, color }
}

#[test]
fn rejects_too_few_centers() {
    let grad = linear_gradient(0xff000000, 0xffffffff).unwrap();
    let mut dst = Texture::new(8, 8).unwrap();
    assert!(cells(&mut dst, &grad, &[], 1.0, CellMode::Inner).is_err());
    let one = [center(0.5, 0.5, Pixel::WHITE)];
    assert!(cells(&mut dst, &grad, &one, 1.0, CellMode::Outer).is_err());
    assert!(cells(&mut dst, &grad, &one, 1.0, CellMode::Inner).is_ok());
}

#[test]
fn rejects_too_many_centers() {
    let grad = linear_gradient(0xff000000, 0xffffffff).unwrap();
    let mut dst = Texture::new(8, 8).unwrap();
    let mut rng = Xoshiro::from_seed(3);
    let mut centers: Vec<CellCenter> = (0..MAX_CELL_CENTERS)
        .map(|_| center(rng.next_unit_f32(), rng.next_unit_f32(), Pixel::WHITE))
        .collect();
    assert!(cells(&mut dst, &grad, &centers, 1.0, CellMode::Outer).is_ok());

    centers.push(center(0.5, 0.5, Pixel::WHITE));
    let err = cells(&mut dst, &grad, &centers, 1.0, CellMode::Inner).unwrap_err();
    assert!(matches!(err, TexgenError::Validation(_)));
}

#[test]
fn single_center_is_mirror_symmetric_and_darkest_at_center() {
    let grad = linear_gradient(0xff000000, 0xffffffff).unwrap();
    let mut dst = Texture::new(16, 16).unwrap();
    cells(&mut dst, &grad, &[center(0.5, 0.5, Pixel::WHITE)], 1.0, CellMode::Inner).unwrap();

    for y in 0..16 {
        for x in 0..16 {
            assert_eq!(dst.at(x, y), dst.at(15 - x, y));
            assert_eq!(dst.at(x, y), dst.at(x, 15 - y));
        }
    }
    assert!(dst.at(7, 7).r < dst.at(0, 0).r);
    assert!(dst.at(7, 7).r < dst.at(7, 0).r);
}

#[test]
fn nearest_center_color_wins() {
    let red = Pixel::from_argb32(0xffff0000);
    let green = Pixel::from_argb32(0xff00ff00);
    let blue = Pixel::from_argb32(0xff0000ff);
    let centers = [center(0.1, 0.1, red), center(0.6, 0.3, green), center(0.3, 0.8, blue)];
    let white = linear_gradient(0xffffffff, 0xffffffff).unwrap();
    let mut dst = Texture::new(16, 16).unwrap();
    cells(&mut dst, &white, &centers, 1.0, CellMode::Inner).unwrap();

    for y in 0..16 {
        for x in 0..16 {
            let (px, py) = ((x as f32 + 0.5) / 16.0, (y as f32 + 0.5) / 16.0);
            let mut d: Vec<(f32, Pixel)> = centers
                .iter()
                .map(|c| {
                    let dx = (px - c.x).abs().min(1.0 - (px - c.x).abs());
                    let dy = (py - c.y).abs().min(1.0 - (py - c.y).abs());
                    (dx * dx + dy * dy, c.color)
                })
                .collect();
            d.sort_by(|a, b| a.0.total_cmp(&b.0));
            if d[1].0 - d[0].0 < 1e-3 {
                continue;
            }
            assert_eq!(dst.at(x, y), d[0].1, "pixel {x},{y}");
        }
    }
}

#[test]
fn inner_distance_matches_brute_force() {
    let grad = linear_gradient(0xff000000, 0xffffffff).unwrap();
    let mut rng = Xoshiro::from_seed(99);
    let centers: Vec<CellCenter> = (0..12)
        .map(|_| center(rng.next_unit_f32(), rng.next_unit_f32(), Pixel::WHITE))
        .collect();
    let mut dst = Texture::new(32, 32).unwrap();
    cells(&mut dst, &grad, &centers, 2.0, CellMode::Inner).unwrap();

    let fixed: Vec<(i32, i32)> = centers
        .iter()
        .map(|c| {
            (
                ((c.x * SCALE as f32 + 0.5) as i32) & (SCALE - 1),
                ((c.y * SCALE as f32 + 0.5) as i32) & (SCALE - 1),
            )
        })
        .collect();
    let step = SCALE / 32;
    for y in 0..32u32 {
        for x in 0..32u32 {
            let xc = step / 2 + x as i32 * step;
            let yc = step / 2 + y as i32 * step;
            let best = fixed
                .iter()
                .map(|&(cx, cy)| torus_dist2(xc, cx) + torus_dist2(yc, cy))
                .min()
                .unwrap();
            let d0 = (f64::from(best).sqrt() / f64::from(SCALE)) as f32;
            let t = ((d0 * 2.0 * FIXED_ONE as f32) as i32).clamp(0, FIXED_ONE);
            assert_eq!(dst.at(x, y), sample_gradient(&grad, t));
        }
    }
}

#[test]
fn outer_mode_is_bright_on_the_bisector() {
    let grad = linear_gradient(0xff000000, 0xffffffff).unwrap();
    let centers = [
        center(0.25, 0.5, Pixel::WHITE),
        center(0.75, 0.5, Pixel::WHITE),
    ];
    let mut dst = Texture::new(16, 16).unwrap();
    cells(&mut dst, &grad, &centers, 1.0, CellMode::Outer).unwrap();
    // near a center d0 << d1, halfway between them d0 ≈ d1
    assert!(dst.at(4, 8).r < 0x3000);
    assert!(dst.at(8, 8).r > 0xc000);
    assert!(dst.at(0, 8).r > 0xc000);
}
