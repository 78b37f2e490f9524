//! Maps plant health to drawing parameters.
//!
//! Everything here is a pure function of health in `[0, 100]`. Geometry is in
//! a 200×250 canvas with the stem rooted at `(100, 120)`; the shell scales it
//! to the panel. Time-driven motion lives in [`sway`].

pub mod sway;

pub const CANVAS_WIDTH: f64 = 200.0;
pub const CANVAS_HEIGHT: f64 = 250.0;
pub const STEM_BASE: (f64, f64) = (100.0, 120.0);

pub const BLOOM_THRESHOLD: f64 = 55.0;
pub const SWAY_THRESHOLD: f64 = 70.0;
pub const EXTRAS_THRESHOLD: f64 = 80.0;
pub const MAX_EXTRA_PLANTS: usize = 6;
pub const MAX_EXTRA_FLOWERS: usize = 10;

const LEAF_HEIGHT_CAP: f64 = BLOOM_THRESHOLD;
const BLOOM_GROWTH_RATE: f64 = 0.6;
const MAX_BLOOM_SIZE: f64 = (100.0 - BLOOM_THRESHOLD) * BLOOM_GROWTH_RATE;
const PETALS_PER_LAYER: usize = 12;
const SEED_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    #[cfg(test)]
    pub fn distance(self, other: Rgb) -> f64 {
        ((self.r - other.r).powi(2) + (self.g - other.g).powi(2) + (self.b - other.b).powi(2))
            .sqrt()
    }
}

pub const WILTED_BROWN: Rgb = Rgb::new(139.0, 69.0, 19.0);
pub const HEALTHY_GREEN: Rgb = Rgb::new(76.0, 175.0, 80.0);
pub const PETAL_GOLD: Rgb = Rgb::new(255.0, 215.0, 0.0);
pub const PETAL_AMBER: Rgb = Rgb::new(255.0, 160.0, 0.0);
pub const BLOOM_CENTER: Rgb = Rgb::new(121.0, 85.0, 72.0);
pub const BLOOM_SEED: Rgb = Rgb::new(62.0, 39.0, 35.0);

pub const FLOWER_PALETTE: [Rgb; MAX_EXTRA_FLOWERS] = [
    Rgb::new(255.0, 105.0, 180.0),
    Rgb::new(147.0, 112.0, 219.0),
    Rgb::new(255.0, 99.0, 71.0),
    Rgb::new(65.0, 105.0, 225.0),
    Rgb::new(255.0, 69.0, 0.0),
    Rgb::new(186.0, 85.0, 211.0),
    Rgb::new(255.0, 20.0, 147.0),
    Rgb::new(30.0, 144.0, 255.0),
    Rgb::new(255.0, 140.0, 0.0),
    Rgb::new(138.0, 43.0, 226.0),
];

// Stands in for per-frame randomness so the background plants never jump.
const PLANT_JITTER: [f64; MAX_EXTRA_PLANTS] = [0.35, 0.8, 0.15, 0.6, 0.95, 0.45];

fn normalize(health: f64) -> f64 {
    if health.is_nan() {
        return 0.0;
    }
    health.clamp(0.0, 100.0)
}

pub fn leaf_color(health: f64) -> Rgb {
    WILTED_BROWN.lerp(HEALTHY_GREEN, normalize(health) / 100.0)
}

/// Distance from the stem base to its tip.
pub fn stem_length(health: f64) -> f64 {
    normalize(health)
}

pub fn stem_tip(health: f64) -> (f64, f64) {
    (STEM_BASE.0, STEM_BASE.1 - stem_length(health))
}

/// A mirrored pair of leaves attached to the stem at height `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafPair {
    pub y: f64,
    /// Rotation of the left leaf in degrees; the right leaf uses the negation.
    pub rotation: f64,
    pub size: f64,
}

pub fn leaves(health: f64) -> [LeafPair; 2] {
    let anchor = normalize(health).min(LEAF_HEIGHT_CAP);
    let leaf = |i: usize| {
        let phase = i as f64;
        LeafPair {
            y: STEM_BASE.1 - anchor * (phase + 1.0) / 3.0,
            rotation: (phase * 0.5).sin() * 15.0,
            size: 0.7 + (phase * 1.5).sin() * 0.2,
        }
    };
    [leaf(0), leaf(1)]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalLayer {
    pub count: usize,
    /// Rotation of the first petal in degrees.
    pub offset: f64,
    /// Angle between neighbouring petals in degrees.
    pub spacing: f64,
    pub color: Rgb,
}

impl PetalLayer {
    pub fn rotations(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |i| self.offset + i as f64 * self.spacing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// The sunflower at the stem tip. Offsets are relative to [`Bloom::center`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bloom {
    pub center: (f64, f64),
    /// Extra petal length beyond the base petal shape.
    pub size: f64,
    pub center_radius: f64,
    /// Eased growth from 0 at the threshold to 1 at full health.
    pub progress: f64,
    pub layers: [PetalLayer; 2],
    pub seeds: Vec<Seed>,
}

pub fn bloom_visible(health: f64) -> bool {
    normalize(health) >= BLOOM_THRESHOLD
}

pub fn bloom_size(health: f64) -> f64 {
    if !bloom_visible(health) {
        return 0.0;
    }
    ((normalize(health) - BLOOM_THRESHOLD) * BLOOM_GROWTH_RATE).min(MAX_BLOOM_SIZE)
}

pub fn bloom_progress(health: f64) -> f64 {
    if !bloom_visible(health) {
        return 0.0;
    }
    ((normalize(health) - BLOOM_THRESHOLD) / (100.0 - BLOOM_THRESHOLD)).powf(0.8)
}

pub fn bloom(health: f64) -> Option<Bloom> {
    if !bloom_visible(health) {
        return None;
    }
    let size = bloom_size(health);
    let seeds = (0..SEED_COUNT)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::FRAC_PI_4;
            Seed {
                x: angle.cos() * 4.0,
                y: angle.sin() * 4.0,
                radius: 1.5,
            }
        })
        .collect();

    Some(Bloom {
        center: stem_tip(health),
        size,
        center_radius: 8.0 + size * 0.3,
        progress: bloom_progress(health),
        layers: [
            PetalLayer {
                count: PETALS_PER_LAYER,
                offset: 0.0,
                spacing: 30.0,
                color: PETAL_GOLD,
            },
            PetalLayer {
                count: PETALS_PER_LAYER,
                offset: 15.0,
                spacing: 30.0,
                color: PETAL_AMBER,
            },
        ],
        seeds,
    })
}

pub fn sway_enabled(health: f64) -> bool {
    normalize(health) >= SWAY_THRESHOLD
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraPlant {
    pub x: f64,
    pub scale: f64,
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraFlower {
    pub x: f64,
    pub color: Rgb,
    pub progress: f64,
}

fn extras_count(health: f64, step: f64, cap: usize) -> usize {
    let health = normalize(health);
    if health < EXTRAS_THRESHOLD {
        return 0;
    }
    (((health - EXTRAS_THRESHOLD) / step).floor() as usize).min(cap)
}

pub fn additional_plants(health: f64) -> Vec<ExtraPlant> {
    let count = extras_count(health, 3.0, MAX_EXTRA_PLANTS);
    let progress = (normalize(health) - EXTRAS_THRESHOLD) / (100.0 - EXTRAS_THRESHOLD);
    (0..count)
        .map(|i| {
            let jitter = PLANT_JITTER[i];
            ExtraPlant {
                x: 40.0 + (i as f64 * 1.5).sin() * 60.0 + jitter * 20.0,
                scale: 0.6 + PLANT_JITTER[(i + 3) % MAX_EXTRA_PLANTS] * 0.3,
                progress,
            }
        })
        .collect()
}

pub fn additional_flowers(health: f64) -> Vec<ExtraFlower> {
    let health = normalize(health);
    let count = extras_count(health, 2.0, MAX_EXTRA_FLOWERS);
    (0..count)
        .map(|i| ExtraFlower {
            x: 30.0 + i as f64 * 15.0,
            color: FLOWER_PALETTE[i],
            progress: ((health - EXTRAS_THRESHOLD - i as f64 * 2.0) / 10.0).clamp(0.0, 1.0),
        })
        .collect()
}

/// Everything the shell needs to draw the plant at one health value.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantState {
    pub health: f64,
    pub color: Rgb,
    pub stem_base: (f64, f64),
    pub stem_tip: (f64, f64),
    pub leaves: [LeafPair; 2],
    pub bloom: Option<Bloom>,
    pub sway: bool,
    pub extra_plants: Vec<ExtraPlant>,
    pub extra_flowers: Vec<ExtraFlower>,
}

impl PlantState {
    pub fn from_health(health: f64) -> Self {
        let health = normalize(health);
        Self {
            health,
            color: leaf_color(health),
            stem_base: STEM_BASE,
            stem_tip: stem_tip(health),
            leaves: leaves(health),
            bloom: bloom(health),
            sway: sway_enabled(health),
            extra_plants: additional_plants(health),
            extra_flowers: additional_flowers(health),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_color_hits_both_anchors() {
        assert_eq!(leaf_color(0.0), WILTED_BROWN);
        assert_eq!(leaf_color(100.0), HEALTHY_GREEN);
        let mid = leaf_color(50.0);
        assert_eq!(mid, Rgb::new(107.5, 122.0, 49.5));
    }

    #[test]
    fn leaf_color_moves_monotonically_toward_green() {
        let mut previous = leaf_color(0.0);
        for step in 1..=100 {
            let current = leaf_color(step as f64);
            assert!(current.r < previous.r);
            assert!(current.g > previous.g);
            assert!(current.b > previous.b);
            assert!(current.distance(WILTED_BROWN) > previous.distance(WILTED_BROWN));
            assert!(current.distance(HEALTHY_GREEN) < previous.distance(HEALTHY_GREEN));
            previous = current;
        }
    }

    #[test]
    fn stem_grows_with_health() {
        assert_eq!(stem_length(0.0), 0.0);
        assert_eq!(stem_length(42.0), 42.0);
        assert_eq!(stem_tip(80.0), (100.0, 40.0));
        assert!(stem_length(30.0) < stem_length(31.0));
    }

    #[test]
    fn leaves_stop_climbing_past_bloom_threshold() {
        assert_eq!(leaves(55.0), leaves(100.0));
        assert_ne!(leaves(40.0), leaves(55.0));

        let [lower, upper] = leaves(30.0);
        assert_eq!(lower.y, 110.0);
        assert_eq!(upper.y, 100.0);
        assert_eq!(lower.rotation, 0.0);
        assert_eq!(lower.size, 0.7);
        assert!(upper.rotation > 0.0);
        assert!(upper.size > lower.size);
    }

    #[test]
    fn bloom_appears_at_threshold() {
        assert!(!bloom_visible(54.0));
        assert!(!bloom_visible(54.99));
        assert!(bloom_visible(55.0));
        assert!(bloom(54.0).is_none());

        let flower = bloom(55.0).expect("bloom at threshold");
        assert_eq!(flower.size, 0.0);
        assert_eq!(flower.center_radius, 8.0);
        assert_eq!(flower.progress, 0.0);
        assert_eq!(flower.center, (100.0, 65.0));
    }

    #[test]
    fn bloom_grows_and_caps() {
        let flower = bloom(100.0).expect("bloom at full health");
        assert!((flower.size - 27.0).abs() < 1e-9);
        assert!((flower.center_radius - 16.1).abs() < 1e-9);
        assert!((flower.progress - 1.0).abs() < 1e-9);
        assert!(bloom_size(70.0) < bloom_size(85.0));
        assert!(bloom_size(150.0) <= 27.0 + 1e-9);
    }

    #[test]
    fn bloom_has_two_offset_layers_of_twelve() {
        let flower = bloom(75.0).expect("bloom");
        assert_eq!(flower.layers[0].count, 12);
        assert_eq!(flower.layers[1].count, 12);
        assert_eq!(flower.layers[0].color, PETAL_GOLD);
        assert_eq!(flower.layers[1].color, PETAL_AMBER);
        let base: Vec<f64> = flower.layers[0].rotations().collect();
        let offset: Vec<f64> = flower.layers[1].rotations().collect();
        assert_eq!(base[1], 30.0);
        assert_eq!(offset[0], 15.0);
        assert_eq!(offset[11], 345.0);
        assert_eq!(flower.seeds.len(), 8);
    }

    #[test]
    fn sway_starts_at_seventy() {
        assert!(!sway_enabled(69.9));
        assert!(sway_enabled(70.0));
    }

    #[test]
    fn extras_unlock_at_eighty_and_cap() {
        assert!(additional_plants(79.0).is_empty());
        assert!(additional_flowers(79.0).is_empty());
        assert!(additional_plants(80.0).is_empty());
        assert_eq!(additional_plants(83.0).len(), 1);
        assert_eq!(additional_plants(100.0).len(), 6);
        assert_eq!(additional_flowers(82.0).len(), 1);
        assert_eq!(additional_flowers(100.0).len(), 10);
        assert_eq!(additional_plants(500.0).len(), 6);
    }

    #[test]
    fn extras_are_deterministic() {
        assert_eq!(additional_plants(97.0), additional_plants(97.0));
        let flowers = additional_flowers(100.0);
        assert_eq!(flowers[0].x, 30.0);
        assert_eq!(flowers[9].x, 165.0);
        assert_eq!(flowers[3].color, FLOWER_PALETTE[3]);
        assert_eq!(flowers[0].progress, 1.0);
        assert_eq!(flowers[9].progress, 0.2);
    }

    #[test]
    fn extra_plants_share_growth_progress() {
        let plants = additional_plants(90.0);
        assert_eq!(plants.len(), 3);
        assert!(plants.iter().all(|plant| plant.progress == 0.5));
        assert!(plants.iter().all(|plant| (0.6..=0.9).contains(&plant.scale)));
    }

    #[test]
    fn out_of_range_health_is_clamped() {
        assert_eq!(PlantState::from_health(-10.0), PlantState::from_health(0.0));
        assert_eq!(PlantState::from_health(f64::NAN), PlantState::from_health(0.0));
        assert_eq!(PlantState::from_health(130.0), PlantState::from_health(100.0));
    }

    #[test]
    fn plant_state_collects_every_layer() {
        let state = PlantState::from_health(100.0);
        assert_eq!(state.stem_tip, (100.0, 20.0));
        assert!(state.bloom.is_some());
        assert!(state.sway);
        assert_eq!(state.extra_plants.len(), 6);
        assert_eq!(state.extra_flowers.len(), 10);

        let wilted = PlantState::from_health(10.0);
        assert!(wilted.bloom.is_none());
        assert!(!wilted.sway);
        assert!(wilted.extra_plants.is_empty());
    }
}
