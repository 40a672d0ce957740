//! GPU-ready snapshots handed to the rendering collaborator

use crate::mechanics::{Placement, SystemLayout};
use crate::motion::WorldPositions;
use crate::object::Classification;
use crate::system::StarSystem;

/// Body instance for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub body_type: u32,
    pub _padding: [f32; 3],
}

/// Belt or ring annulus for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BeltInstance {
    pub center: [f32; 3],
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// Radians
    pub inclination: f32,
    pub body_type: u32,
    pub _padding: f32,
}

pub fn body_type_code(classification: Classification) -> u32 {
    match classification {
        Classification::Star => 0,
        Classification::Planet => 1,
        Classification::DwarfPlanet => 2,
        Classification::Moon => 3,
        Classification::Asteroid => 4,
        Classification::Belt => 5,
        Classification::Ring => 6,
        Classification::Barycenter => 7,
        Classification::Other => 8,
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    pub bodies: Vec<BodyInstance>,
    pub belts: Vec<BeltInstance>,
}

impl FrameSnapshot {
    pub fn build(system: &StarSystem, layout: &SystemLayout, positions: &WorldPositions<'_>) -> Self {
        let mut snapshot = Self::default();
        for (node, object) in system.objects().iter().enumerate() {
            let (Some(result), Some(position)) = (layout.result(node), positions.get(node)) else {
                continue;
            };
            let position = position.as_vec3().to_array();
            let body_type = body_type_code(object.classification);
            match result.placement {
                Placement::Belt(belt) => snapshot.belts.push(BeltInstance {
                    center: position,
                    inner_radius: belt.inner_radius as f32,
                    outer_radius: belt.outer_radius as f32,
                    inclination: object.orbit.inclination().to_radians() as f32,
                    body_type,
                    _padding: 0.0,
                }),
                _ if object.classification.has_body() => snapshot.bodies.push(BodyInstance {
                    position,
                    radius: result.visual_radius as f32,
                    body_type,
                    _padding: [0.0; 3],
                }),
                _ => {}
            }
        }
        snapshot
    }

    pub fn body_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.bodies)
    }

    pub fn belt_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.belts)
    }
}
