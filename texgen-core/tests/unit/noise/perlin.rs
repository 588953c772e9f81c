use super::*;

#[test]
fn table_is_a_permutation() {
    let t = PerlinTable::default();
    let mut seen = vec![false; TABLE_SIZE];
    for &v in t.as_slice() {
        assert!(!seen[v as usize]);
        seen[v as usize] = true;
    }
    assert!(seen.iter().all(|s| *s));
    assert_ne!(t.as_slice(), (0..TABLE_SIZE as u16).collect::<Vec<_>>().as_slice());
}

#[test]
fn default_table_entries_are_pinned() {
    let t = PerlinTable::default();
    let pinned = [(0, 75), (1, 238), (2, 254), (3, 1152), (100, 1199), (4095, 849)];
    for (i, want) in pinned {
        assert_eq!(t.p(i), want, "P({i})");
    }
}

#[test]
fn table_is_deterministic_per_seed() {
    assert_eq!(PerlinTable::new(1), PerlinTable::new(1));
    assert_ne!(PerlinTable::new(1), PerlinTable::new(2));
    assert_eq!(PerlinTable::shared(), &PerlinTable::default());
    assert!(std::ptr::eq(PerlinTable::shared(), PerlinTable::shared()));
}

#[test]
fn lookups_wrap() {
    let t = PerlinTable::default();
    assert_eq!(t.p(5), t.p(5 + TABLE_SIZE as i32));
    assert_eq!(t.p(-1), t.p(TABLE_SIZE as i32 - 1));
    assert_eq!(t.shuffle(1, 2, 3), t.p(t.p(t.p(1) + 2) + 3));
}

#[test]
fn fade_and_gradient_basics() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(gradient2(0, 1.0, 1.0), 3.0);
    assert_eq!(gradient2(3, 1.0, 1.0), -3.0);
    assert_eq!(gradient2(9, 0.5, 0.25), gradient2(1, 0.5, 0.25));
}

#[test]
fn value_noise_hits_lattice_values_and_stays_in_range() {
    let t = PerlinTable::default();
    let seed = t.p(123);
    let at_lattice = t.noise2(3 << 16, 5 << 16, 7, 7, seed);
    let expected = t.p(3 + t.p(5) + seed) as f32 / 2047.5 - 1.0;
    assert_eq!(at_lattice, expected);

    let mut rng = Xoshiro::from_seed(3);
    for _ in 0..4096 {
        let x = (rng.next_u64() >> 40) as i32;
        let y = (rng.next_u64() >> 40) as i32;
        let v = t.noise2(x, y, 255, 255, seed);
        assert!((-1.0001..=1.0001).contains(&v));
    }
}

#[test]
fn noise_tiles_with_the_mask() {
    let t = PerlinTable::default();
    let period = 8 << 16;
    for (x, y) in [(12_345, 67_890), (100_000, 3), (0x7_0000, 0x1_8000)] {
        assert_eq!(t.noise2(x, y, 7, 7, 11), t.noise2(x + period, y, 7, 7, 11));
        assert_eq!(t.gnoise2(x, y, 7, 7, 11), t.gnoise2(x, y + period, 7, 7, 11));
    }
}

#[test]
fn gradient_noise_vanishes_on_lattice() {
    let t = PerlinTable::default();
    for i in 0..16 {
        assert_eq!(t.gnoise2(i << 16, (i * 3) << 16, 15, 15, 0), 0.0);
    }
    assert!((0..64).any(|k| t.gnoise2(k * 1000 + 0x4321, 0x1234, 15, 15, 0) != 0.0));
}
