//! Fixed 2D view onto the simulation domain

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// View uniform for GPU (matches `View` in points.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ViewUniform {
    pub point_color: [f32; 4],
    pub scale: [f32; 2],
    pub extent: f32,
    pub _padding: f32,
}

/// Maps the square domain `[0, extent]²` onto the largest centered square
/// of the surface, so particles keep their aspect when the window resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub extent: f32,
    pub aspect: f32,
}

impl View {
    pub fn new(extent: f32, width: u32, height: u32) -> Self {
        let mut view = Self {
            extent,
            aspect: 1.0,
        };
        view.resize(width, height);
        view
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Per-axis NDC scale that letterboxes the domain
    pub fn scale(&self) -> Vec2 {
        if self.aspect >= 1.0 {
            Vec2::new(1.0 / self.aspect, 1.0)
        } else {
            Vec2::new(1.0, self.aspect)
        }
    }

    pub fn to_uniform(&self, point_color: [f32; 4]) -> ViewUniform {
        ViewUniform {
            point_color,
            scale: self.scale().to_array(),
            extent: self.extent,
            _padding: 0.0,
        }
    }
}
