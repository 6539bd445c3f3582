//! Surface materials and colors.

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode a `0xRRGGBB` sRGB color into linear space.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Encode back to sRGB for targets that are shown as-is.
    pub fn to_srgb(self) -> Self {
        Self::new(linear_to_srgb(self.r), linear_to_srgb(self.g), linear_to_srgb(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c < 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(0.416_666_66) - 0.055
    }
}

/// Lighting model evaluated by the mesh shader. The discriminant is the
/// value of the `u_shading` uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Shading {
    Unlit = 0,
    Lambert = 1,
    Phong = 2,
    Normal = 3,
    Toon = 4,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Basic { color: Color, wireframe: bool },
    Lambert { color: Color },
    Phong { color: Color, specular: Color, shininess: f32 },
    Normal,
    Toon { color: Color },
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Material::Basic {
            color,
            wireframe: false,
        }
    }

    /// The five variants shown side by side in the material gallery, top to
    /// bottom.
    pub fn gallery() -> [Material; 5] {
        [
            Material::Basic {
                color: Color::WHITE,
                wireframe: true,
            },
            Material::basic(Color::WHITE),
            Material::Lambert {
                color: Color::WHITE,
            },
            Material::Phong {
                color: Color::WHITE,
                specular: Color::WHITE,
                shininess: 30.0,
            },
            Material::Normal,
        ]
    }

    pub fn shading(&self) -> Shading {
        match self {
            Material::Basic { .. } => Shading::Unlit,
            Material::Lambert { .. } => Shading::Lambert,
            Material::Phong { .. } => Shading::Phong,
            Material::Normal => Shading::Normal,
            Material::Toon { .. } => Shading::Toon,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Material::Basic { color, .. }
            | Material::Lambert { color }
            | Material::Phong { color, .. }
            | Material::Toon { color } => color,
            Material::Normal => Color::WHITE,
        }
    }

    pub fn wireframe(&self) -> bool {
        matches!(self, Material::Basic { wireframe: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decodes_to_linear() {
        let green = Color::from_hex(0x00ff00);
        assert_eq!((green.r, green.b), (0.0, 0.0));
        assert!((green.g - 1.0).abs() < 1e-5);
        let mid = Color::from_hex(0x808080);
        assert!((mid.r - 0.2158).abs() < 1e-3);
        assert_eq!(mid.r, mid.b);
        assert!((mid.to_srgb().r - 128.0 / 255.0).abs() < 1e-4);
    }

    #[test]
    fn gallery_covers_every_surface_model_but_toon() {
        let shading: Vec<_> = Material::gallery().iter().map(Material::shading).collect();
        assert_eq!(
            shading,
            [
                Shading::Unlit,
                Shading::Unlit,
                Shading::Lambert,
                Shading::Phong,
                Shading::Normal
            ]
        );
        assert!(Material::gallery()[0].wireframe());
        assert!(!Material::gallery()[1].wireframe());
    }
}
