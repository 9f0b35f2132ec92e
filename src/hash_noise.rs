//! # Hash Noise
//!
//! Deterministic, stateless 2-D noise functions used by the terrain generator.
//! Every function here is a pure function of its input coordinate: the same
//! input always produces a bit-identical output, which is what lets chunk
//! generation run on any worker thread in any order.
//!
//! ## Building Blocks
//!
//! * [`random1`] / [`random2`] - `fract(sin(dot(..)))` hashes of a lattice point
//! * [`value_noise`] - bilinear interpolation of [`random1`] with a smoothstep fade
//! * [`fbm`] - two octaves of value noise
//! * [`perlin`] - gradient noise built from four quintic surflets
//! * [`worley`] - cellular noise (second minus first nearest distance), warped by [`fbm`]
//!
//! ## Performance Considerations
//!
//! The functions are small and branch-light; the generator calls several of
//! them per column, never per cell.

use cgmath::{dot, Vector2};

/// Returns the fractional part of `x`, always in `[0, 1)`.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep between `edge0` and `edge1`, clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn fract2(v: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(fract(v.x), fract(v.y))
}

fn floor2(v: Vector2<f32>) -> Vector2<f32> {
    Vector2::new(v.x.floor(), v.y.floor())
}

/// Hashes a 2-D point to a scalar in `[0, 1)`.
pub fn random1(p: Vector2<f32>) -> f32 {
    fract((dot(p, Vector2::new(127.1, 311.7))).sin() * 43758.5453)
}

/// Hashes a 2-D point to a vector with both components in `[0, 1)`.
pub fn random2(p: Vector2<f32>) -> Vector2<f32> {
    let s = Vector2::new(
        dot(p, Vector2::new(127.1, 311.7)),
        dot(p, Vector2::new(269.5, 183.3)),
    );
    Vector2::new(
        fract(s.x.sin() * 43758.5453),
        fract(s.y.sin() * 43758.5453),
    )
}

/// Smoothly interpolated lattice noise in `[0, 1)`.
pub fn value_noise(p: Vector2<f32>) -> f32 {
    let cell = floor2(p);
    let f = fract2(p);

    let a = random1(cell);
    let b = random1(cell + Vector2::new(1.0, 0.0));
    let c = random1(cell + Vector2::new(0.0, 1.0));
    let d = random1(cell + Vector2::new(1.0, 1.0));

    let u = Vector2::new(f.x * f.x * (3.0 - 2.0 * f.x), f.y * f.y * (3.0 - 2.0 * f.y));
    mix(mix(a, b, u.x), mix(c, d, u.x), u.y)
}

/// Fractal sum of two value-noise octaves.
///
/// The first octave samples at frequency 8 with amplitude 0.5; each further
/// octave doubles the frequency and halves the amplitude.
pub fn fbm(p: Vector2<f32>) -> f32 {
    const OCTAVES: usize = 2;

    let mut total = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 8.0;
    for _ in 0..OCTAVES {
        total += value_noise(p * frequency) * amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    total
}

/// Quintic falloff `1 - 6t^5 + 15t^4 - 10t^3`, 1 at the lattice point and 0 one cell away.
#[inline]
fn falloff(t: f32) -> f32 {
    let t = t.abs();
    1.0 - 6.0 * t.powi(5) + 15.0 * t.powi(4) - 10.0 * t.powi(3)
}

/// Contribution of one lattice corner to [`perlin`].
pub fn surflet(p: Vector2<f32>, grid_point: Vector2<f32>) -> f32 {
    let diff = p - grid_point;
    let gradient = random2(grid_point) * 2.0 - Vector2::new(1.0, 1.0);
    dot(diff, gradient) * falloff(diff.x) * falloff(diff.y)
}

/// Gradient noise: the sum of the four surflets of the cell containing `p`.
///
/// The result is zero on every lattice point.
pub fn perlin(p: Vector2<f32>) -> f32 {
    let cell = floor2(p);
    let mut total = 0.0;
    for dx in 0..=1 {
        for dy in 0..=1 {
            total += surflet(p, cell + Vector2::new(dx as f32, dy as f32));
        }
    }
    total
}

/// Cellular noise shaped into ridged plateaus.
///
/// The input is scaled and warped by [`fbm`], then the gap between the nearest
/// and second-nearest feature point (squared distances over the 3x3 cell
/// neighborhood) is thresholded, and a little [`fbm`] detail is mixed back in.
pub fn worley(p: Vector2<f32>) -> f32 {
    const RIDGE_THRESHOLD: f32 = 0.175;

    let uv = p * 1.5;
    let warp = fbm(uv / 4.0) * 0.25;
    let uv = uv + Vector2::new(warp, warp);
    let uv_cell = floor2(uv);
    let uv_fract = fract2(uv);

    // Squared distances beyond one cell are ignored.
    let mut nearest = 1.0;
    let mut second = 1.0;
    for y in -1..=1 {
        for x in -1..=1 {
            let neighbor = Vector2::new(x as f32, y as f32);
            let point = random2(uv_cell + neighbor);
            let diff = neighbor + point - uv_fract;
            let dist = dot(diff, diff);
            if dist < nearest {
                second = nearest;
                nearest = dist;
            } else if dist < second {
                second = dist;
            }
        }
    }

    let ridge = (second - nearest - RIDGE_THRESHOLD).max(0.0) / (1.0 - RIDGE_THRESHOLD);
    ridge * 0.75 + 0.25 * fbm(uv)
}
