use mandala_garden::layout::{
    find_position, generate_layout, overlapping_pairs, LayoutParams, Ornament, Style,
    AURA_SEED_MAX, MAX_PER_CLASS, PALETTE_LEN, SHAPE_SEED_MAX, SPACING,
};
use mandala_garden::palette::{Palette, Rgb};
use mandala_garden::surface::Point;

const EPS: f32 = 1e-3;

fn rng(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}

#[test]
fn default_layout_on_800x600_matches_size_classes() {
    let palette = Palette::default();
    let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(42));

    assert_eq!(layout.ornaments.len(), 12);
    let spokes: Vec<_> = layout.ornaments.iter().filter(|o| o.style == Style::Spokes).collect();
    let dots: Vec<_> = layout.ornaments.iter().filter(|o| o.style == Style::Dots).collect();
    assert_eq!(spokes.len(), 5);
    assert_eq!(dots.len(), 7);

    for o in &spokes {
        assert!(o.radius >= 54.0 - EPS && o.radius <= 84.0 + EPS, "spokes radius {}", o.radius);
    }
    for o in &dots {
        assert!(o.radius >= 36.0 - EPS && o.radius <= 54.0 + EPS, "dots radius {}", o.radius);
    }
    for o in &layout.ornaments {
        assert_eq!(o.palette.len(), PALETTE_LEN);
        assert!((0.0..SHAPE_SEED_MAX).contains(&o.shape_time));
        assert!((0.0..AURA_SEED_MAX).contains(&o.aura_time));
    }
}

#[test]
fn large_ornaments_come_first() {
    let palette = Palette::default();
    let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(7));
    let styles: Vec<_> = layout.ornaments.iter().map(|o| o.style).collect();
    assert!(styles[..5].iter().all(|s| *s == Style::Spokes));
    assert!(styles[5..].iter().all(|s| *s == Style::Dots));
}

#[test]
fn centers_respect_class_inset() {
    let palette = Palette::default();
    for seed in 0..20 {
        let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(seed));
        for o in &layout.ornaments {
            let border = o.style.margin() + o.radius;
            assert!(o.center.x >= border - EPS && o.center.x <= 800.0 - border + EPS);
            assert!(o.center.y >= border - EPS && o.center.y <= 600.0 - border + EPS);
        }
    }
}

#[test]
fn ornament_palettes_never_use_the_background() {
    let palette = Palette::default();
    for seed in 0..30 {
        let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(seed));
        for o in &layout.ornaments {
            for c in o.palette {
                assert_ne!(c, palette.background());
                assert!(palette.pool().contains(&c));
            }
        }
    }
}

#[test]
fn palette_sampling_covers_the_pool() {
    let palette = Palette::default();
    let mut seen = std::collections::HashSet::new();
    for seed in 0..40 {
        let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(seed));
        for o in &layout.ornaments {
            seen.extend(o.palette.iter().map(|c| (c.r, c.g, c.b)));
        }
    }
    assert_eq!(seen.len(), palette.pool().len());
}

#[test]
fn overlaps_only_appear_with_degraded_placements() {
    let palette = Palette::default();
    let mut violating = 0usize;
    let mut pairs = 0usize;
    for seed in 0..40 {
        let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(seed));
        let bad = overlapping_pairs(&layout.ornaments);
        if layout.degraded == 0 {
            assert_eq!(bad, 0, "seed {seed}: overlap without a degraded placement");
        }
        violating += bad;
        pairs += 66;
    }
    let frac = violating as f32 / pairs as f32;
    assert!(frac < 0.15, "violating pair fraction {frac}");
}

#[test]
fn roomy_canvas_places_everything_exactly() {
    let palette = Palette::default();
    for seed in 0..20 {
        let layout = generate_layout(4000, 600, LayoutParams::default(), &palette, &mut rng(seed));
        assert_eq!(layout.degraded, 0, "seed {seed}");
        assert_eq!(overlapping_pairs(&layout.ornaments), 0);
    }
}

#[test]
fn find_position_reports_exhausted_budget() {
    let blocker = Ornament {
        center: Point::new(200.0, 200.0),
        radius: 50.0,
        palette: [Palette::default().pool()[0]; PALETTE_LEN],
        style: Style::Spokes,
        shape_time: 0.0,
        aura_time: 0.0,
    };

    // The inset leaves the occupied midpoint as the only candidate.
    let p = find_position(10.0, 190.0, &[blocker], 400.0, 400.0, &mut rng(2));
    assert!(!p.exact);
    assert_eq!(p.center, Point::new(200.0, 200.0));
    assert!(p.center.distance(Point::new(200.0, 200.0)) < (10.0 + 50.0) * SPACING);
}

#[test]
fn find_position_is_exact_when_nothing_is_placed() {
    let p = find_position(30.0, 40.0, &[], 800.0, 600.0, &mut rng(9));
    assert!(p.exact);
    assert!(p.center.x >= 70.0 && p.center.x <= 730.0);
    assert!(p.center.y >= 70.0 && p.center.y <= 530.0);
}

#[test]
fn relayout_gives_independent_valid_sets() {
    let palette = Palette::default();
    let mut r = rng(5);
    let a = generate_layout(800, 600, LayoutParams::default(), &palette, &mut r);
    let b = generate_layout(800, 600, LayoutParams::default(), &palette, &mut r);
    assert_eq!(a.ornaments.len(), b.ornaments.len());
    assert_ne!(a.ornaments, b.ornaments);
    for layout in [&a, &b] {
        if layout.degraded == 0 {
            assert_eq!(overlapping_pairs(&layout.ornaments), 0);
        }
    }
}

#[test]
fn same_seed_same_layout() {
    let palette = Palette::default();
    let a = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(77));
    let b = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(77));
    assert_eq!(a.ornaments, b.ornaments);
}

#[test]
fn zero_counts_give_an_empty_layout() {
    let palette = Palette::default();
    let layout = generate_layout(800, 600, LayoutParams::new(0, 0), &palette, &mut rng(3));
    assert!(layout.ornaments.is_empty());
    assert_eq!(layout.degraded, 0);
}

#[test]
fn counts_are_clamped() {
    let params = LayoutParams::new(10_000, 3);
    assert_eq!(params.spokes, MAX_PER_CLASS);
    assert_eq!(params.dots, 3);
}

#[test]
fn tiny_canvas_collapses_to_center_without_panicking() {
    let palette = Palette::default();
    let layout = generate_layout(10, 10, LayoutParams::default(), &palette, &mut rng(4));
    assert_eq!(layout.ornaments.len(), 12);
    for o in &layout.ornaments {
        assert!((o.center.x - 5.0).abs() < EPS && (o.center.y - 5.0).abs() < EPS);
    }
    // Only the first ornament finds the center free.
    assert_eq!(layout.degraded, 11);
}

#[test]
fn zero_sized_canvas_is_treated_as_one_pixel() {
    let palette = Palette::default();
    let layout = generate_layout(0, 0, LayoutParams::new(1, 1), &palette, &mut rng(4));
    assert_eq!(layout.ornaments.len(), 2);
    assert!(layout.ornaments.iter().all(|o| o.radius > 0.0));
}

#[test]
fn custom_pool_feeds_every_ornament_palette() {
    let bg = Rgb::new(1, 2, 3);
    let only = Rgb::new(200, 100, 50);
    let palette = Palette::new(bg, &[only]).expect("non-empty pool");
    assert_eq!(palette.background(), bg);
    assert_eq!(palette.pool(), &[only]);
    assert_eq!(palette.all(), &[bg, only]);

    let layout = generate_layout(800, 600, LayoutParams::default(), &palette, &mut rng(5));
    assert!(layout.ornaments.iter().all(|o| o.palette == [only; PALETTE_LEN]));
}

#[test]
fn empty_pool_is_rejected() {
    assert!(Palette::new(Rgb::new(0, 0, 0), &[]).is_none());
}
