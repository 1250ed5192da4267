//! Point lights that the input handler can nudge around at runtime.

use glam::Vec3;

/// An attenuated point light with Phong colour terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl PointLight {
    /// A light with the usual ~50 unit attenuation range and colour scaled
    /// into ambient (0.2), diffuse (0.5) and specular (1.0) terms.
    pub fn new(position: impl Into<Vec3>, color: impl Into<Vec3>) -> Self {
        let color = color.into();
        Self {
            position: position.into(),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            ambient: color * 0.2,
            diffuse: color * 0.5,
            specular: color,
        }
    }
}

/// The lights in a scene, in selection order.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSet {
    lights: Vec<PointLight>,
}

impl Default for LightSet {
    /// White, red, green and blue lights scattered in front of the origin.
    fn default() -> Self {
        Self::new(vec![
            PointLight::new(Vec3::new(-0.7, -0.2, 2.0), Vec3::ONE),
            PointLight::new(Vec3::new(-1.9, -0.8, 1.0), Vec3::X),
            PointLight::new(Vec3::new(-2.6, -1.3, 1.2), Vec3::Y),
            PointLight::new(Vec3::new(-0.1, -0.5, 1.1), Vec3::Z),
        ])
    }
}

impl LightSet {
    pub fn new(lights: Vec<PointLight>) -> Self {
        Self { lights }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PointLight> {
        self.lights.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PointLight> {
        self.lights.get_mut(index)
    }

    /// Shift every light by the same offset.
    pub fn offset_all(&mut self, offset: Vec3) {
        for light in &mut self.lights {
            light.position += offset;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }
}
