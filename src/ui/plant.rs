//! Paints a [`PlantState`] with the egui painter.

use crate::growth::{
    sway, Bloom, ExtraFlower, ExtraPlant, LeafPair, PlantState, Rgb, CANVAS_HEIGHT, CANVAS_WIDTH,
    PETAL_GOLD,
};
use crate::theme::Theme;
use egui::{vec2, Color32, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui};

const CURVE_SEGMENTS: usize = 12;
const LEAF_OPACITY: f64 = 0.9;
const STEM_WIDTH: f64 = 4.0;

type Point = (f64, f64);

pub fn color32(rgb: Rgb) -> Color32 {
    color32_alpha(rgb, 1.0)
}

pub fn color32_alpha(rgb: Rgb, alpha: f64) -> Color32 {
    let channel = |value: f64| value.round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(
        channel(rgb.r),
        channel(rgb.g),
        channel(rgb.b),
        channel(alpha.clamp(0.0, 1.0) * 255.0),
    )
}

/// Maps the 200×250 plant canvas into a screen rect, preserving aspect ratio.
#[derive(Debug, Clone, Copy)]
struct Canvas {
    origin: Pos2,
    scale: f32,
}

impl Canvas {
    fn fit(rect: Rect) -> Self {
        let scale = (rect.width() / CANVAS_WIDTH as f32).min(rect.height() / CANVAS_HEIGHT as f32);
        let size = vec2(CANVAS_WIDTH as f32 * scale, CANVAS_HEIGHT as f32 * scale);
        Self {
            origin: rect.center() - size / 2.0,
            scale,
        }
    }

    fn pos(&self, (x, y): Point) -> Pos2 {
        self.origin + vec2(x as f32 * self.scale, y as f32 * self.scale)
    }

    fn len(&self, value: f64) -> f32 {
        value as f32 * self.scale
    }

    fn polygon(&self, painter: &Painter, points: &[Point], fill: Color32) {
        let points = points.iter().map(|point| self.pos(*point)).collect();
        painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
    }
}

fn rotate((x, y): Point, (cx, cy): Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (dx, dy) = (x - cx, y - cy);
    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
}

fn cubic(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    (
        a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
        a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
    )
}

fn quadratic(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    (
        u * u * p0.0 + 2.0 * u * t * p1.0 + t * t * p2.0,
        u * u * p0.1 + 2.0 * u * t * p1.1 + t * t * p2.1,
    )
}

/// Closed outline of two cubic curves: `start` to `tip` along `out`, back along `back`.
fn lens(start: Point, out: [Point; 2], tip: Point, back: [Point; 2]) -> Vec<Point> {
    let mut points = Vec::with_capacity(CURVE_SEGMENTS * 2);
    for step in 0..CURVE_SEGMENTS {
        let t = step as f64 / CURVE_SEGMENTS as f64;
        points.push(cubic(start, out[0], out[1], tip, t));
    }
    for step in 0..CURVE_SEGMENTS {
        let t = step as f64 / CURVE_SEGMENTS as f64;
        points.push(cubic(tip, back[0], back[1], start, t));
    }
    points
}

/// One leaf growing from `(x, y)`; `side` is -1 for left and 1 for right.
fn leaf_outline(x: f64, y: f64, size: f64, side: f64) -> Vec<Point> {
    let at = |dx: f64, dy: f64| (x + side * dx * size, y + dy * size);
    lens(
        (x, y),
        [at(15.0, -10.0), at(30.0, -8.0)],
        at(35.0, 0.0),
        [at(30.0, 8.0), at(15.0, 10.0)],
    )
}

fn petal_outline(center: Point, size: f64, rotation: f64) -> Vec<Point> {
    let origin = (0.0, 0.0);
    lens(
        origin,
        [(5.0 + size, -2.0), (10.0 + size, -4.0)],
        (15.0 + size, 0.0),
        [(10.0 + size, 4.0), (5.0 + size, 2.0)],
    )
    .into_iter()
    .map(|point| {
        let (x, y) = rotate(point, origin, rotation);
        (center.0 + x, center.1 + y)
    })
    .collect()
}

pub fn paint_plant(ui: &mut Ui, state: &PlantState, seconds: f64, theme: &Theme) -> Response {
    let width = ui.available_width();
    let height = (width * CANVAS_HEIGHT as f32 / CANVAS_WIDTH as f32).min(ui.available_height());
    let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
    let canvas = Canvas::fit(response.rect);

    paint_pot(&painter, &canvas, theme);
    for plant in &state.extra_plants {
        paint_extra_plant(&painter, &canvas, plant, state.color);
    }
    paint_stem(&painter, &canvas, state, seconds);
    for pair in &state.leaves {
        paint_leaf_pair(&painter, &canvas, pair, state.color);
    }
    if let Some(bloom) = &state.bloom {
        paint_bloom(&painter, &canvas, bloom);
    }
    for flower in &state.extra_flowers {
        paint_extra_flower(&painter, &canvas, flower, state.color);
    }

    response
}

fn paint_pot(painter: &Painter, canvas: &Canvas, theme: &Theme) {
    let outer = [(50.0, 170.0), (150.0, 170.0), (175.0, 120.0), (25.0, 120.0)];
    let inner = [(55.0, 170.0), (145.0, 170.0), (165.0, 130.0), (35.0, 130.0)];
    canvas.polygon(painter, &outer, theme.pot_outer);
    canvas.polygon(painter, &inner, theme.pot_inner);
}

fn paint_stem(painter: &Painter, canvas: &Canvas, state: &PlantState, seconds: f64) {
    let offset = sway::sway_offset(state.health, seconds);
    let base = state.stem_base;
    let tip = (state.stem_tip.0 + offset * 0.5, state.stem_tip.1);
    let control = (base.0 + offset, base.1 - state.health / 2.0);

    let points = (0..=CURVE_SEGMENTS)
        .map(|step| {
            let t = step as f64 / CURVE_SEGMENTS as f64;
            canvas.pos(quadratic(base, control, tip, t))
        })
        .collect();
    painter.add(Shape::line(
        points,
        Stroke::new(canvas.len(STEM_WIDTH), color32(state.color)),
    ));
}

fn paint_leaf_pair(painter: &Painter, canvas: &Canvas, pair: &LeafPair, color: Rgb) {
    let fill = color32_alpha(color, LEAF_OPACITY);
    let pivot = (100.0, pair.y);
    for (side, rotation) in [(-1.0, pair.rotation), (1.0, -pair.rotation)] {
        let outline: Vec<Point> = leaf_outline(pivot.0, pivot.1, pair.size, side)
            .into_iter()
            .map(|point| rotate(point, pivot, rotation))
            .collect();
        canvas.polygon(painter, &outline, fill);
    }
}

fn paint_bloom(painter: &Painter, canvas: &Canvas, bloom: &Bloom) {
    let alpha = 0.6 + 0.4 * bloom.progress;
    for layer in &bloom.layers {
        let fill = color32_alpha(layer.color, alpha);
        for rotation in layer.rotations() {
            canvas.polygon(painter, &petal_outline(bloom.center, bloom.size, rotation), fill);
        }
    }

    painter.circle_filled(
        canvas.pos(bloom.center),
        canvas.len(bloom.center_radius),
        color32(crate::growth::BLOOM_CENTER),
    );
    for seed in &bloom.seeds {
        painter.circle_filled(
            canvas.pos((bloom.center.0 + seed.x, bloom.center.1 + seed.y)),
            canvas.len(seed.radius),
            color32(crate::growth::BLOOM_SEED),
        );
    }
}

fn paint_extra_plant(painter: &Painter, canvas: &Canvas, plant: &ExtraPlant, color: Rgb) {
    let height = 40.0 * plant.scale * plant.progress;
    let base = (plant.x, 120.0);
    let top = (plant.x, 120.0 - height);
    painter.line_segment(
        [canvas.pos(base), canvas.pos(top)],
        Stroke::new(canvas.len(2.0 * plant.scale), color32(color)),
    );

    let fill = color32_alpha(color, LEAF_OPACITY);
    let leaf_size = 0.4 * plant.scale * plant.progress;
    for side in [-1.0, 1.0] {
        canvas.polygon(painter, &leaf_outline(top.0, top.1 + height * 0.3, leaf_size, side), fill);
    }
}

fn paint_extra_flower(painter: &Painter, canvas: &Canvas, flower: &ExtraFlower, stem: Rgb) {
    if flower.progress <= 0.0 {
        return;
    }
    let height = 14.0 * flower.progress;
    let head = (flower.x, 120.0 - height);
    painter.line_segment(
        [canvas.pos((flower.x, 120.0)), canvas.pos(head)],
        Stroke::new(canvas.len(1.5), color32(stem)),
    );

    let petal_radius = 2.5 * flower.progress;
    for i in 0..5 {
        let angle = (i as f64 * 72.0).to_radians();
        let petal = (
            head.0 + angle.cos() * petal_radius,
            head.1 + angle.sin() * petal_radius,
        );
        painter.circle_filled(canvas.pos(petal), canvas.len(petal_radius), color32(flower.color));
    }
    painter.circle_filled(canvas.pos(head), canvas.len(petal_radius * 0.6), color32(PETAL_GOLD));
}
