//! Picking, removing and placing blocks from a viewpoint.

use cgmath::{InnerSpace, Point3, Vector3};
use log::debug;

use crate::error::WorldError;
use crate::voxels::block::{block_side::BlockSide, block_type::BlockType};
use crate::voxels::terrain::Terrain;

use super::grid_march::{grid_march, BlockQuery, MarchResult};

/// How far a player can reach to edit blocks.
pub const DEFAULT_REACH: f32 = 3.0;

/// A block under the crosshair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockTarget {
    /// The targeted block.
    pub cell: Point3<i32>,
    /// Where the view ray enters the block.
    pub hit_point: Point3<f32>,
    /// Distance from the eye to `hit_point`.
    pub distance: f32,
    /// The face the view ray entered through.
    pub side: BlockSide,
}

/// Finds the first block within `reach` along `look`.
///
/// # Errors
/// - [`WorldError::DegenerateRay`] if `look` is zero
/// - [`WorldError::NoChunk`] if the ray leaves the allocated world first
pub fn target_block(
    eye: Point3<f32>,
    look: Vector3<f32>,
    reach: f32,
    world: &impl BlockQuery,
) -> Result<Option<BlockTarget>, WorldError> {
    if look.magnitude2() == 0.0 {
        return Err(WorldError::DegenerateRay);
    }
    let dir = look.normalize();
    Ok(match grid_march(eye, dir * reach, world)? {
        MarchResult::Hit {
            cell,
            distance,
            side,
        } => Some(BlockTarget {
            cell,
            hit_point: eye + dir * distance,
            distance,
            side,
        }),
        MarchResult::Miss { .. } => None,
    })
}

/// The unit offset from `cell` toward the face `hit_point` lies on.
///
/// The axis where the hit point is farthest from the cell center wins; ties
/// go to x, then y.
pub fn placement_offset(cell: Point3<i32>, hit_point: Point3<f32>) -> Vector3<i32> {
    let center = Point3::new(
        cell.x as f32 + 0.5,
        cell.y as f32 + 0.5,
        cell.z as f32 + 0.5,
    );
    let d = hit_point - center;
    let (ax, ay, az) = (d.x.abs(), d.y.abs(), d.z.abs());

    let signum = |v: f32| if v < 0.0 { -1 } else { 1 };
    if ax >= ay && ax >= az {
        Vector3::new(signum(d.x), 0, 0)
    } else if ay >= az {
        Vector3::new(0, signum(d.y), 0)
    } else {
        Vector3::new(0, 0, signum(d.z))
    }
}

/// Clears the targeted block.
///
/// # Returns
/// The block that was removed.
pub fn remove_target(terrain: &mut Terrain, target: &BlockTarget) -> Result<BlockType, WorldError> {
    let Point3 { x, y, z } = target.cell;
    let removed = terrain.block_at(x, y, z)?;
    terrain.set_block_at(x, y, z, BlockType::EMPTY)?;
    debug!("Removed {removed:?} at {:?}", target.cell);
    Ok(removed)
}

/// Places `block_type` in the cell in front of the targeted face.
///
/// # Returns
/// The cell that was written.
pub fn place_against(
    terrain: &mut Terrain,
    target: &BlockTarget,
    block_type: BlockType,
) -> Result<Point3<i32>, WorldError> {
    let cell = target.cell + placement_offset(target.cell, target.hit_point);
    terrain.set_block_at(cell.x, cell.y, cell.z, block_type)?;
    debug!("Placed {block_type:?} at {cell:?}");
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_points_out_of_the_hit_face() {
        let cell = Point3::new(2, 5, -3);
        assert_eq!(placement_offset(cell, Point3::new(2.0, 5.5, -2.5)), Vector3::new(-1, 0, 0));
        assert_eq!(placement_offset(cell, Point3::new(2.4, 6.0, -2.6)), Vector3::new(0, 1, 0));
        assert_eq!(placement_offset(cell, Point3::new(2.5, 5.2, -3.0)), Vector3::new(0, 0, -1));
    }

    #[test]
    fn offset_matches_the_entered_side() {
        for side in BlockSide::all() {
            let offset = side.offset();
            let cell = Point3::new(0, 10, 0);
            let hit = Point3::new(
                0.5 + offset.x as f32 * 0.5,
                10.5 + offset.y as f32 * 0.5,
                0.5 + offset.z as f32 * 0.5,
            );
            assert_eq!(placement_offset(cell, hit), offset, "{side:?}");
        }
    }
}
