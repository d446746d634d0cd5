use demofx::color::{PaletteKind, Rgb, PALETTE_SIZE};
use demofx::effects::copper::{self, CopperParams};
use demofx::effects::plasma::{Plasma, PlasmaParams};
use demofx::effects::{render_effect, EffectKind, EffectParams};
use demofx::renderer::Canvas;
use proptest::prelude::*;

fn render(kind: EffectKind, params: &EffectParams, w: usize, h: usize, time: f32) -> Canvas {
    let palette = PaletteKind::Rainbow.build(PALETTE_SIZE);
    let mut canvas = Canvas::new(w, h);
    render_effect(&mut canvas, kind, params, &palette, time);
    canvas
}

fn all_opaque(canvas: &Canvas) -> bool {
    canvas.as_bytes().chunks_exact(4).all(|px| px[3] == 255)
}

// ── Determinism and coverage ───────────────────────────────────────────────

#[test]
fn every_effect_is_deterministic() {
    let params = EffectParams::default();
    for &kind in EffectKind::all() {
        let a = render(kind, &params, 48, 30, 2.75);
        let b = render(kind, &params, 48, 30, 2.75);
        assert_eq!(a, b, "{} differs between runs", kind.name());
    }
}

#[test]
fn every_effect_writes_opaque_pixels() {
    for &kind in EffectKind::all() {
        let canvas = render(kind, &EffectParams::default(), 40, 24, 1.0);
        assert!(all_opaque(&canvas), "{} left transparent pixels", kind.name());
    }
}

#[test]
fn degenerate_sizes_do_not_panic() {
    for &kind in EffectKind::all() {
        for (w, h) in [(1, 1), (1, 7), (9, 1), (2, 2)] {
            let canvas = render(kind, &EffectParams::default(), w, h, 0.5);
            assert!(all_opaque(&canvas));
        }
    }
}

#[test]
fn render_overwrites_previous_contents() {
    let palette = PaletteKind::Fire.build(PALETTE_SIZE);
    let params = EffectParams::default();
    for &kind in EffectKind::all() {
        let mut clean = Canvas::new(32, 20);
        render_effect(&mut clean, kind, &params, &palette, 4.0);

        let mut dirty = Canvas::new(32, 20);
        dirty.fill(Rgb::new(200, 10, 90));
        render_effect(&mut dirty, kind, &params, &palette, 4.0);

        assert_eq!(clean, dirty, "{} leaked stale pixels", kind.name());
    }
}

#[test]
fn time_moves_the_image() {
    let params = EffectParams::default();
    for &kind in EffectKind::all() {
        let a = render(kind, &params, 48, 30, 0.0);
        let b = render(kind, &params, 48, 30, 10.0);
        assert_ne!(a, b, "{} is static", kind.name());
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────────

#[test]
fn plasma_origin_is_reproducible() {
    let params = EffectParams {
        plasma: PlasmaParams { x_freq: 6.0, y_freq: 4.0, complexity: 0.7 },
        ..EffectParams::default()
    };
    let palette = PaletteKind::Fire.build(PALETTE_SIZE);

    let mut first = Canvas::new(640, 400);
    render_effect(&mut first, EffectKind::Plasma, &params, &palette, 0.0);
    let mut second = Canvas::new(640, 400);
    render_effect(&mut second, EffectKind::Plasma, &params, &palette, 0.0);

    let expected = palette.color_at(Plasma::new(&params.plasma, 640, 400, 0.0).value(0, 0));
    assert_eq!(first.get_pixel(0, 0), expected);
    assert_eq!(second.get_pixel(0, 0), expected);
}

#[test]
fn copper_bar_center_has_full_intensity() {
    let params = CopperParams { bar_count: 3, ..CopperParams::default() };
    let bars = copper::layout_bars(&params, 400, PALETTE_SIZE, 0.0);
    let centers: Vec<f32> = bars.iter().map(|b| b.center).collect();
    assert_eq!(centers, vec![100.0, 200.0, 300.0]);
    for bar in &bars {
        assert_eq!(bar.intensity(bar.center), 1.0);
    }

    // The rendered center row shows the top of the first bar's palette slice.
    let palette = PaletteKind::Copper.build(PALETTE_SIZE);
    let mut canvas = Canvas::new(4, 400);
    copper::render(&mut canvas, &params, &palette, 0.0);
    let (start, end) = bars[0].slice;
    assert_eq!(canvas.get_pixel(2, 100), palette.get(end - 1));
    assert_eq!(palette.color_in_slice(start, end, 1.0), palette.get(end - 1));
}

// ── Clamping ───────────────────────────────────────────────────────────────

/// One ranged knob: which effect reads it, how to set it, and its bounds.
struct Knob {
    kind: EffectKind,
    name: &'static str,
    set: fn(&mut EffectParams, f64),
    lo: f64,
    hi: f64,
    integer: bool,
}

fn float(kind: EffectKind, name: &'static str, set: fn(&mut EffectParams, f64), lo: f64, hi: f64) -> Knob {
    Knob { kind, name, set, lo, hi, integer: false }
}

fn count(kind: EffectKind, name: &'static str, set: fn(&mut EffectParams, f64), lo: f64, hi: f64) -> Knob {
    Knob { kind, name, set, lo, hi, integer: true }
}

fn knobs() -> Vec<Knob> {
    use EffectKind as K;
    vec![
        float(K::Plasma, "plasma.x_freq", |p, v| p.plasma.x_freq = v as f32, 0.5, 32.0),
        float(K::Plasma, "plasma.y_freq", |p, v| p.plasma.y_freq = v as f32, 0.5, 32.0),
        float(K::Plasma, "plasma.complexity", |p, v| p.plasma.complexity = v as f32, 0.0, 1.0),
        count(K::CopperBars, "copper.bar_count", |p, v| p.copper.bar_count = v as u32, 1.0, 16.0),
        float(K::CopperBars, "copper.bar_height", |p, v| p.copper.bar_height = v as f32, 2.0, 200.0),
        float(K::CopperBars, "copper.amplitude", |p, v| p.copper.amplitude = v as f32, 0.0, 0.5),
        float(K::CopperBars, "copper.speed", |p, v| p.copper.speed = v as f32, 0.0, 10.0),
        float(K::Tunnel, "tunnel.depth", |p, v| p.tunnel.depth = v as f32, 0.05, 4.0),
        float(K::Tunnel, "tunnel.speed", |p, v| p.tunnel.speed = v as f32, 0.0, 10.0),
        count(K::Tunnel, "tunnel.angular_repeats", |p, v| p.tunnel.angular_repeats = v as u32, 1.0, 32.0),
        float(K::Tunnel, "tunnel.center_x", |p, v| p.tunnel.center_x = v as f32, 0.0, 1.0),
        float(K::Tunnel, "tunnel.center_y", |p, v| p.tunnel.center_y = v as f32, 0.0, 1.0),
        count(K::Metaballs, "metaballs.count", |p, v| p.metaballs.count = v as u32, 1.0, 16.0),
        float(K::Metaballs, "metaballs.radius", |p, v| p.metaballs.radius = v as f32, 0.01, 0.5),
        float(K::Metaballs, "metaballs.threshold", |p, v| p.metaballs.threshold = v as f32, 0.1, 8.0),
        float(K::Metaballs, "metaballs.speed", |p, v| p.metaballs.speed = v as f32, 0.0, 10.0),
        float(K::Rotozoomer, "rotozoom.zoom", |p, v| p.rotozoom.zoom = v as f32, 0.1, 8.0),
        float(K::Rotozoomer, "rotozoom.zoom_amount", |p, v| p.rotozoom.zoom_amount = v as f32, 0.0, 4.0),
        float(K::Rotozoomer, "rotozoom.rotation_speed", |p, v| p.rotozoom.rotation_speed = v as f32, -5.0, 5.0),
        float(K::Rotozoomer, "rotozoom.checker_size", |p, v| p.rotozoom.checker_size = v as f32, 2.0, 128.0),
        float(K::Rotozoomer, "rotozoom.plasma_mix", |p, v| p.rotozoom.plasma_mix = v as f32, 0.0, 1.0),
        float(K::Fire, "fire.intensity", |p, v| p.fire.intensity = v as f32, 0.1, 3.0),
        float(K::Fire, "fire.turbulence", |p, v| p.fire.turbulence = v as f32, 0.0, 2.0),
        float(K::Fire, "fire.flicker", |p, v| p.fire.flicker = v as f32, 0.0, 1.0),
        float(K::Fire, "fire.speed", |p, v| p.fire.speed = v as f32, 0.0, 10.0),
        count(K::Ripples, "ripples.sources", |p, v| p.ripples.sources = v as u32, 1.0, 8.0),
        float(K::Ripples, "ripples.wavelength", |p, v| p.ripples.wavelength = v as f32, 0.01, 0.5),
        float(K::Ripples, "ripples.speed", |p, v| p.ripples.speed = v as f32, 0.0, 10.0),
        float(K::Ripples, "ripples.damping", |p, v| p.ripples.damping = v as f32, 0.0, 20.0),
        count(K::Fractal, "fractal.max_iterations", |p, v| p.fractal.max_iterations = v as u32, 8.0, 1024.0),
        float(K::Fractal, "fractal.center_x", |p, v| p.fractal.center_x = v, -2.5, 1.5),
        float(K::Fractal, "fractal.center_y", |p, v| p.fractal.center_y = v, -1.5, 1.5),
        float(K::Fractal, "fractal.zoom", |p, v| p.fractal.zoom = v, 0.25, 1e4),
        float(K::Fractal, "fractal.zoom_speed", |p, v| p.fractal.zoom_speed = v as f32, 0.0, 2.0),
        count(K::Starfield, "starfield.star_count", |p, v| p.starfield.star_count = v as u32, 1.0, 4096.0),
        float(K::Starfield, "starfield.speed", |p, v| p.starfield.speed = v as f32, 0.0, 10.0),
        float(K::Starfield, "starfield.glow_threshold", |p, v| p.starfield.glow_threshold = v as f32, 0.0, 1.0),
        float(K::Twister, "twister.twist", |p, v| p.twister.twist = v as f32, 0.0, 16.0),
        float(K::Twister, "twister.speed", |p, v| p.twister.speed = v as f32, 0.0, 10.0),
        float(K::Twister, "twister.frequency", |p, v| p.twister.frequency = v as f32, 1.0, 32.0),
        count(K::Grid, "grid.cell_size", |p, v| p.grid.cell_size = v as u32, 2.0, 256.0),
        count(K::Grid, "grid.gap", |p, v| p.grid.gap = v as u32, 0.0, 16.0),
        float(K::Grid, "grid.frequency", |p, v| p.grid.frequency = v as f32, 0.1, 16.0),
        float(K::Grid, "grid.speed", |p, v| p.grid.speed = v as f32, 0.0, 10.0),
        float(K::Noise, "noise.scale", |p, v| p.noise.scale = v as f32, 0.5, 64.0),
        float(K::Noise, "noise.speed", |p, v| p.noise.speed = v as f32, 0.0, 10.0),
    ]
}

fn render_knob(knob: &Knob, value: Option<f64>) -> Canvas {
    let mut params = EffectParams::default();
    if let Some(v) = value {
        (knob.set)(&mut params, v);
    }
    render(knob.kind, &params, 32, 24, 1.5)
}

#[test]
fn out_of_range_knobs_render_at_their_bounds() {
    for knob in knobs() {
        let below = knob.lo - 10.0 - knob.lo.abs();
        assert_eq!(
            render_knob(&knob, Some(below)),
            render_knob(&knob, Some(knob.lo)),
            "{}={} should render like {}={}",
            knob.name,
            below,
            knob.name,
            knob.lo
        );
        let above = knob.hi * 10.0 + 10.0;
        assert_eq!(
            render_knob(&knob, Some(above)),
            render_knob(&knob, Some(knob.hi)),
            "{}={} should render like {}={}",
            knob.name,
            above,
            knob.name,
            knob.hi
        );
    }
}

#[test]
fn nan_knobs_render_like_their_defaults() {
    for knob in knobs().iter().filter(|k| !k.integer) {
        assert_eq!(
            render_knob(knob, Some(f64::NAN)),
            render_knob(knob, None),
            "{}=NaN should fall back to its default",
            knob.name
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_excess_renders_like_the_upper_bound(index in 0usize..46, excess in 0.0f64..1.0e5) {
        let all = knobs();
        let knob = &all[index % all.len()];
        prop_assert_eq!(
            render_knob(knob, Some(knob.hi + excess)),
            render_knob(knob, Some(knob.hi))
        );
    }
}
