use nalgebra::Matrix4;

use crate::skinning::VertexWeights;

/// Deformation data of a skinned mesh: one influence set per vertex and one
/// bind-pose matrix per bone-list slot.
///
/// Each bind pose transforms world space into the bound bone's rest-pose
/// local space. `bind_poses` is parallel to the renderer's bone list and must
/// stay the same length as it at all times; reductions always produce a new
/// mesh value instead of mutating this one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkinnedMesh {
    pub vertex_weights: Vec<VertexWeights>,
    pub bind_poses: Vec<Matrix4<f32>>,
}

impl SkinnedMesh {
    pub fn new(vertex_weights: Vec<VertexWeights>, bind_poses: Vec<Matrix4<f32>>) -> Self {
        Self {
            vertex_weights,
            bind_poses,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_weights.len()
    }

    /// Number of bone-list slots this mesh is bound to.
    pub fn bone_slot_count(&self) -> usize {
        self.bind_poses.len()
    }
}
