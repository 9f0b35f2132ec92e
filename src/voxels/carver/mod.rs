//! # River Carver
//!
//! An L-system that wanders a turtle through a freshly generated zone and
//! carves capsule-shaped channels into it. Each zone gets its own random start
//! point, heading and liquid (water, or occasionally lava).
//!
//! ## Grammar
//!
//! The axiom `FX` is rewritten [`crate::config::CarverConfig::iterations`]
//! times with the rules in [`RIVER_GRAMMAR`]. Only `F`, `[`, `]`, `+` and `-`
//! mean anything to the turtle (see [`TurtleAction`]); the other symbols only
//! steer the expansion.
//!
//! ## Carving
//!
//! Each advance carves every cell within `radius` of the segment it walks:
//!
//! * cells at or below the liquid level are filled with the zone's liquid
//! * cells between the liquid level and the segment height are emptied
//! * at the segment height, the whole column above is emptied, opening the
//!   channel to the sky
//!
//! A segment whose end leaves the zone is skipped and the turtle stays put, so
//! a zone's carve never writes into its neighbors.

pub mod turtle;

use cgmath::{InnerSpace, Point3, Vector3};
use log::{debug, trace};
use noise::{NoiseFn, Perlin};
use phf::phf_map;

use crate::config::CarverConfig;
use crate::error::WorldError;

use super::block::block_type::BlockType;
use super::coords::{zone_origin, CHUNK_HEIGHT, ZONE_WIDTH};
use super::terrain::Terrain;
pub use turtle::{Turtle, TurtleAction};

/// Rewrite rules of the river grammar.
pub static RIVER_GRAMMAR: phf::Map<char, &'static str> = phf_map! {
    'X' => "F+[+++F-F+X-FFX]--FF++F+FX",
    'F' => "F-B",
    'B' => "XX",
};

/// Start string of the river grammar.
pub const RIVER_AXIOM: &str = "FX";

/// Start points are kept this far from every zone edge.
const START_MARGIN: f32 = 8.0;

/// World-space frequency of the rotation jitter noise.
const JITTER_FREQUENCY: f64 = 0.173;

/// Rewrites `axiom` `iterations` times. Symbols without a rule are copied.
pub fn expand(axiom: &str, iterations: usize) -> String {
    let mut current = axiom.to_string();
    for _ in 0..iterations {
        let mut next = String::with_capacity(current.len() * 4);
        for symbol in current.chars() {
            match RIVER_GRAMMAR.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        current = next;
    }
    current
}

/// Horizontal extent of one zone, max exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ZoneBounds {
    /// Lowest x column inside the zone.
    pub min_x: i32,
    /// Lowest z column inside the zone.
    pub min_z: i32,
    /// First x column past the zone.
    pub max_x: i32,
    /// First z column past the zone.
    pub max_z: i32,
}

impl ZoneBounds {
    /// The bounds of the zone containing world column `(x, z)`.
    pub fn containing(x: i32, z: i32) -> Self {
        let (min_x, min_z) = zone_origin(x, z);
        ZoneBounds {
            min_x,
            min_z,
            max_x: min_x + ZONE_WIDTH,
            max_z: min_z + ZONE_WIDTH,
        }
    }

    /// `true` when the point's column lies in the zone.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x as f32 && x < self.max_x as f32 && z >= self.min_z as f32 && z < self.max_z as f32
    }
}

/// What a single advance did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// The capsule was carved and the turtle moved to the segment end.
    Carved,
    /// The segment would leave the zone; nothing was written.
    OutsideZone,
}

/// Totals of one zone's carving pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CarveSummary {
    /// Water or lava, picked once per zone.
    pub liquid: BlockType,
    /// Advances that carved.
    pub segments_carved: usize,
    /// Advances dropped for leaving the zone.
    pub segments_skipped: usize,
}

/// Signed distance from `p` to the capsule around segment `a`-`b`.
pub fn capsule_distance(p: Point3<f32>, a: Point3<f32>, b: Point3<f32>, radius: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let len2 = ba.magnitude2();
    let h = if len2 > 0.0 {
        (pa.dot(ba) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (pa - ba * h).magnitude() - radius
}

/// Carves rivers and lava channels into generated zones.
///
/// The grammar is expanded once at construction; every zone replays the same
/// action list from its own seeded start.
#[derive(Clone, Debug)]
pub struct RiverCarver {
    config: CarverConfig,
    world_seed: u64,
    program: Vec<TurtleAction>,
}

impl RiverCarver {
    /// Expands the river grammar once; every zone replays the same program.
    pub fn new(config: CarverConfig, world_seed: u64) -> Self {
        let program = expand(RIVER_AXIOM, config.iterations)
            .chars()
            .filter_map(TurtleAction::from_symbol)
            .collect();
        RiverCarver {
            config,
            world_seed,
            program,
        }
    }

    /// The carver's tuning.
    pub fn config(&self) -> &CarverConfig {
        &self.config
    }

    /// The interpreted actions, in order.
    pub fn program(&self) -> &[TurtleAction] {
        &self.program
    }

    /// Seed of the zone whose lower-left column is `(origin_x, origin_z)`.
    pub fn zone_seed(&self, origin_x: i32, origin_z: i32) -> u64 {
        let zx = origin_x.div_euclid(ZONE_WIDTH) as i64;
        let zz = origin_z.div_euclid(ZONE_WIDTH) as i64;
        self.world_seed
            .wrapping_add(zx.wrapping_mul(341_873_128_712) as u64)
            .wrapping_add(zz.wrapping_mul(132_897_987_541) as u64)
    }

    fn start_turtle(&self, rng: &mut fastrand::Rng, bounds: &ZoneBounds) -> Turtle {
        let span = ZONE_WIDTH as f32 - 2.0 * START_MARGIN;
        let position = Point3::new(
            bounds.min_x as f32 + START_MARGIN + rng.f32() * span,
            self.config.center_height,
            bounds.min_z as f32 + START_MARGIN + rng.f32() * span,
        );
        let heading = rng.f32() * std::f32::consts::TAU;
        Turtle::new(
            position,
            Vector3::new(heading.sin(), 0.0, heading.cos()),
            self.config.step_length,
            self.config.radius,
        )
    }

    fn turn_angle(&self, jitter: &Perlin, turtle: &Turtle) -> f32 {
        let p = turtle.position;
        let sample = jitter.get([
            p.x as f64 * JITTER_FREQUENCY,
            p.y as f64 * JITTER_FREQUENCY,
            p.z as f64 * JITTER_FREQUENCY,
        ]) as f32;
        self.config.rotation_degrees + self.config.jitter_degrees * sample
    }

    /// Runs the grammar over the zone containing `(origin_x, origin_z)`.
    ///
    /// Columns without a chunk are left alone.
    pub fn carve_zone(
        &self,
        terrain: &mut Terrain,
        origin_x: i32,
        origin_z: i32,
    ) -> Result<CarveSummary, WorldError> {
        let bounds = ZoneBounds::containing(origin_x, origin_z);
        let seed = self.zone_seed(bounds.min_x, bounds.min_z);
        let mut rng = fastrand::Rng::with_seed(seed);
        let jitter = Perlin::new(seed as u32);

        let liquid = if rng.f32() < self.config.lava_chance {
            BlockType::LAVA
        } else {
            BlockType::WATER
        };

        let mut turtle = self.start_turtle(&mut rng, &bounds);
        let mut stack: Vec<Turtle> = Vec::new();
        let mut summary = CarveSummary {
            liquid,
            segments_carved: 0,
            segments_skipped: 0,
        };

        for action in &self.program {
            match action {
                TurtleAction::Advance => {
                    if turtle.new_branch {
                        turtle.taper(self.config.branch_taper, self.config.min_radius);
                    }
                    match self.carve_segment(terrain, &bounds, &turtle, liquid)? {
                        SegmentOutcome::Carved => {
                            turtle.position = turtle.segment_end();
                            summary.segments_carved += 1;
                        }
                        SegmentOutcome::OutsideZone => {
                            trace!("Skipped segment leaving zone at {:?}", turtle.position);
                            summary.segments_skipped += 1;
                        }
                    }
                }
                TurtleAction::Push => stack.push(turtle),
                TurtleAction::Pop => {
                    if let Some(saved) = stack.pop() {
                        turtle = saved;
                        turtle.new_branch = true;
                    }
                }
                TurtleAction::RotateLeft => {
                    let angle = self.turn_angle(&jitter, &turtle);
                    turtle.rotate_y(angle);
                }
                TurtleAction::RotateRight => {
                    let angle = self.turn_angle(&jitter, &turtle);
                    turtle.rotate_y(-angle);
                }
            }
        }

        debug!(
            "Carved zone ({}, {}) with {:?}: {} segments, {} skipped",
            bounds.min_x, bounds.min_z, liquid, summary.segments_carved, summary.segments_skipped
        );
        Ok(summary)
    }

    /// Carves the capsule the turtle's next advance sweeps.
    ///
    /// Does nothing if the segment's end leaves `bounds`. The turtle is not moved.
    pub fn carve_segment(
        &self,
        terrain: &mut Terrain,
        bounds: &ZoneBounds,
        turtle: &Turtle,
        liquid: BlockType,
    ) -> Result<SegmentOutcome, WorldError> {
        let a = turtle.position;
        let b = turtle.segment_end();
        if !bounds.contains(b.x, b.z) {
            return Ok(SegmentOutcome::OutsideZone);
        }

        let r = turtle.radius;
        let center_y = a.y.floor() as i32;
        let liquid_level = self.config.liquid_level;

        let x0 = ((a.x.min(b.x) - r).floor() as i32).max(bounds.min_x);
        let x1 = ((a.x.max(b.x) + r).ceil() as i32).min(bounds.max_x - 1);
        let z0 = ((a.z.min(b.z) - r).floor() as i32).max(bounds.min_z);
        let z1 = ((a.z.max(b.z) + r).ceil() as i32).min(bounds.max_z - 1);
        let y0 = ((center_y as f32 - r).floor() as i32).max(0);
        let y1 = center_y.min(CHUNK_HEIGHT - 1);

        for x in x0..=x1 {
            for z in z0..=z1 {
                if !terrain.has_chunk_at(x, z) {
                    continue;
                }
                for y in y0..=y1 {
                    let p = Point3::new(x as f32, y as f32, z as f32);
                    if capsule_distance(p, a, b, r) > 0.0 {
                        continue;
                    }
                    if y <= liquid_level {
                        terrain.set_block_at(x, y, z, liquid)?;
                    } else if y < center_y {
                        terrain.set_block_at(x, y, z, BlockType::EMPTY)?;
                    } else {
                        for above in y..CHUNK_HEIGHT {
                            terrain.set_block_at(x, above, z, BlockType::EMPTY)?;
                        }
                    }
                }
            }
        }

        Ok(SegmentOutcome::Carved)
    }
}
