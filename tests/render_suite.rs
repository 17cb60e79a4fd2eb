use mandala_garden::palette::{Rgb, Rgba};
use mandala_garden::render::{luma_u8, AsciiRenderer, Frame, HalfBlockRenderer, Renderer};
use mandala_garden::surface::{PixelCanvas, Point, Surface};

const RED: Rgba = Rgba { r: 255, g: 0, b: 0, a: 255 };
const BLACK: Rgb = Rgb::new(0, 0, 0);

fn rgb_at(canvas: &PixelCanvas, x: usize, y: usize) -> (u8, u8, u8) {
    let p = canvas.pixel(x, y).expect("pixel in bounds");
    (p.r, p.g, p.b)
}

/// Build a gradient pixel buffer (varies across x).
fn gradient_pixels(w: usize, h: usize) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) * 4;
            let t = (x as f32 / w.max(1) as f32 * 255.0) as u8;
            buf[i] = t;
            buf[i + 1] = 128;
            buf[i + 2] = 255 - t;
            buf[i + 3] = 255;
        }
    }
    buf
}

fn make_frame<'a>(cols: u16, rows: u16, pw: usize, ph: usize, pixels: &'a [u8], sync: bool) -> Frame<'a> {
    Frame {
        term_cols: cols,
        visual_rows: rows,
        pixel_width: pw,
        pixel_height: ph,
        pixels_rgba: pixels,
        hud: "FPS 60.0 | ornaments 12",
        hud_rows: 1,
        sync_updates: sync,
    }
}

#[test]
fn new_canvas_is_opaque_black() {
    let canvas = PixelCanvas::new(4, 3);
    assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
    assert!(canvas.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn zero_size_is_clamped_to_one_pixel() {
    let canvas = PixelCanvas::new(0, 0);
    assert_eq!((canvas.width(), canvas.height()), (1, 1));
}

#[test]
fn clear_fills_every_pixel() {
    let mut canvas = PixelCanvas::new(5, 5);
    canvas.clear(Rgb::new(10, 13, 24));
    assert!(canvas.pixels().chunks_exact(4).all(|px| px == [10, 13, 24, 255]));
}

#[test]
fn fill_circle_covers_inside_only() {
    let mut canvas = PixelCanvas::new(20, 20);
    canvas.clear(BLACK);
    canvas.fill_circle(Point::new(10.0, 10.0), 4.0, RED);
    assert_eq!(rgb_at(&canvas, 10, 10), (255, 0, 0));
    assert_eq!(rgb_at(&canvas, 12, 10), (255, 0, 0));
    assert_eq!(rgb_at(&canvas, 15, 10), (0, 0, 0));
    assert_eq!(rgb_at(&canvas, 0, 0), (0, 0, 0));
}

#[test]
fn stroke_circle_leaves_the_center_empty() {
    let mut canvas = PixelCanvas::new(30, 30);
    canvas.clear(BLACK);
    canvas.stroke_circle(Point::new(15.0, 15.0), 10.0, 2.0, RED);
    assert_eq!(rgb_at(&canvas, 15, 15), (0, 0, 0));
    assert_eq!(rgb_at(&canvas, 24, 15), (255, 0, 0));
    assert_eq!(rgb_at(&canvas, 15, 5), (255, 0, 0));
}

#[test]
fn line_paints_along_the_segment() {
    let mut canvas = PixelCanvas::new(20, 10);
    canvas.clear(BLACK);
    canvas.line(Point::new(2.0, 5.0), Point::new(18.0, 5.0), 2.0, RED);
    for x in 2..18 {
        assert_eq!(rgb_at(&canvas, x, 4), (255, 0, 0), "x={x}");
    }
    assert_eq!(rgb_at(&canvas, 10, 1), (0, 0, 0));
}

#[test]
fn polygon_fills_its_interior() {
    let mut canvas = PixelCanvas::new(10, 10);
    canvas.clear(BLACK);
    let square = [
        Point::new(2.0, 2.0),
        Point::new(8.0, 2.0),
        Point::new(8.0, 8.0),
        Point::new(2.0, 8.0),
    ];
    canvas.fill_polygon(&square, RED);
    assert_eq!(rgb_at(&canvas, 2, 2), (255, 0, 0));
    assert_eq!(rgb_at(&canvas, 7, 7), (255, 0, 0));
    assert_eq!(rgb_at(&canvas, 8, 5), (0, 0, 0));
    assert_eq!(rgb_at(&canvas, 1, 5), (0, 0, 0));
}

#[test]
fn polygon_with_too_few_points_is_ignored() {
    let mut canvas = PixelCanvas::new(4, 4);
    canvas.clear(BLACK);
    canvas.fill_polygon(&[Point::new(0.0, 0.0), Point::new(4.0, 4.0)], RED);
    assert!(canvas.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn translucent_fill_blends_source_over() {
    let mut canvas = PixelCanvas::new(2, 2);
    canvas.clear(Rgb::new(0, 0, 200));
    canvas.fill_rect(0.0, 0.0, 2.0, 2.0, Rgb::new(255, 0, 0).with_alpha(128));
    let px = canvas.pixel(0, 0).unwrap();
    assert_eq!((px.r, px.g, px.b, px.a), (128, 0, 100, 255));
}

#[test]
fn zero_alpha_is_a_no_op() {
    let mut canvas = PixelCanvas::new(3, 3);
    canvas.clear(Rgb::new(1, 2, 3));
    canvas.fill_circle(Point::new(1.5, 1.5), 3.0, Rgb::new(255, 255, 255).with_alpha(0));
    assert!(canvas.pixels().chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn shapes_off_canvas_are_clipped() {
    let mut canvas = PixelCanvas::new(8, 8);
    canvas.clear(BLACK);
    canvas.fill_circle(Point::new(-50.0, -50.0), 10.0, RED);
    canvas.line(Point::new(-10.0, 100.0), Point::new(100.0, 100.0), 4.0, RED);
    canvas.fill_polygon(
        &[Point::new(-5.0, -5.0), Point::new(20.0, -5.0), Point::new(20.0, 1.0)],
        RED,
    );
    canvas.fill_circle(Point::new(4.0, 4.0), f32::NAN, RED);
    canvas.fill_circle(Point::new(7.5, 7.5), 100.0, RED);
    assert_eq!(rgb_at(&canvas, 0, 7), (255, 0, 0));
}

#[test]
fn resize_reallocates_and_resets() {
    let mut canvas = PixelCanvas::new(2, 2);
    canvas.clear(Rgb::new(9, 9, 9));
    canvas.resize(5, 3);
    assert_eq!(canvas.pixels().len(), 5 * 3 * 4);
    assert_eq!(rgb_at(&canvas, 4, 2), (0, 0, 0));
    assert!(canvas.pixel(5, 0).is_none());
}

#[test]
fn halfblock_renders_gradient_frame() {
    let (cols, rows) = (40u16, 4u16);
    let pixels = gradient_pixels(40, 8);
    let frame = make_frame(cols, rows, 40, 8, &pixels, true);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[?2026h"), "missing sync-begin");
    assert!(s.contains("\x1b[?2026l"), "missing sync-end");
    assert!(s.contains("\u{2580}"), "missing half-block char");
    assert!(s.contains("38;2;"), "missing FG escape");
    assert!(s.contains("48;2;"), "missing BG escape");
    assert!(s.contains("ornaments 12"), "HUD text missing");
    assert_eq!(s.matches('\u{2580}').count(), 160);
}

#[test]
fn hud_is_clipped_to_terminal_width() {
    let pixels = gradient_pixels(8, 8);
    let frame = make_frame(8, 4, 8, 8, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[5;1H\x1b[0m\x1b[2KFPS 60.0\x1b[0m"), "HUD row not clipped: {s:?}");
    assert!(!s.contains("ornaments"));

    let mut out = Vec::new();
    AsciiRenderer::new().render(&make_frame(8, 8, 8, 8, &gradient_pixels(8, 8), false), &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("FPS 60.0") && !s.contains("ornaments"));
}

#[test]
fn halfblock_skips_mismatched_geometry() {
    let pixels = gradient_pixels(8, 7);
    let frame = make_frame(8, 4, 8, 7, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn halfblock_without_sync_omits_brackets() {
    let pixels = gradient_pixels(2, 2);
    let frame = make_frame(2, 1, 2, 2, &pixels, false);
    let mut out = Vec::new();
    HalfBlockRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(!s.contains("\x1b[?2026h"));
    assert!(s.contains("\x1b[?7l") && s.contains("\x1b[?7h"));
}

#[test]
fn ascii_renders_solid_frame() {
    let mut canvas = PixelCanvas::new(10, 5);
    canvas.clear(Rgb::new(200, 200, 200));
    let frame = make_frame(10, 5, 10, 5, canvas.pixels(), false);
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    let s = String::from_utf8_lossy(&out);
    assert!(s.contains("\x1b[H"), "missing home cursor");
    assert!(s.contains("38;2;200;200;200"), "missing FG color");
    // Color only changes once for a solid frame.
    assert_eq!(s.matches("38;2;").count(), 1);
}

#[test]
fn ascii_skips_zero_size() {
    let pixels = [0u8; 4];
    let frame = make_frame(0, 0, 0, 0, &pixels, false);
    let mut out = Vec::new();
    AsciiRenderer::new().render(&frame, &mut out).unwrap();
    assert!(out.is_empty());
}

#[test]
fn renderer_names() {
    assert_eq!(AsciiRenderer::new().name(), "ascii");
    assert_eq!(HalfBlockRenderer::new().name(), "halfblock");
}

#[test]
fn luma_weights_green_highest() {
    assert!(luma_u8(0, 255, 0) > luma_u8(255, 0, 0));
    assert!(luma_u8(255, 0, 0) > luma_u8(0, 0, 255));
    assert_eq!(luma_u8(255, 255, 255), 255);
}
