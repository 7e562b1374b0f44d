use bytemuck::NoUninit;
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, NoUninit)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Rectangle spanned by two half-axis vectors around `center`.
    /// `uv_repeat` tiles the texture across the quad (sampler wraps).
    pub fn quad(center: Vec3, half_u: Vec3, half_v: Vec3, normal: Vec3, uv_repeat: f32) -> Self {
        let n = normal.to_array();
        let corner = |su: f32, sv: f32| (center + half_u * su + half_v * sv).to_array();

        let vertices = vec![
            Vertex { pos: corner(-1.0, -1.0), normal: n, uv: [0.0, uv_repeat] },
            Vertex { pos: corner(1.0, -1.0), normal: n, uv: [uv_repeat, uv_repeat] },
            Vertex { pos: corner(1.0, 1.0), normal: n, uv: [uv_repeat, 0.0] },
            Vertex { pos: corner(-1.0, 1.0), normal: n, uv: [0.0, 0.0] },
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];

        Mesh { vertices, indices }
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_corners() {
        let mesh = Mesh::quad(
            Vec3::new(0.0, 0.0, -20.0),
            Vec3::new(25.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::Z,
            1.0,
        );
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices[0].pos, [-25.0, -10.0, -20.0]);
        assert_eq!(mesh.vertices[2].pos, [25.0, 10.0, -20.0]);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn test_quad_uv_repeat() {
        let mesh = Mesh::quad(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, 8.0);
        assert_eq!(mesh.vertices[1].uv, [8.0, 8.0]);
        assert_eq!(mesh.vertices[3].uv, [0.0, 0.0]);
    }
}
