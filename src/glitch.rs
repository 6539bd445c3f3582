//! Digital glitch timing.
//!
//! Most frames pass through untouched. Every `interval` frames (a random
//! count in 120..=240) a strong glitch fires and a new interval is drawn;
//! during the first fifth of each interval a weaker jitter plays.

use std::f32::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Side length of the square displacement map.
pub const DISPLACEMENT_SIZE: usize = 64;

/// Column width of the strip distortion.
pub const COLUMN_SIZE: f32 = 0.05;

/// Values fed to the glitch shader for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlitchUniforms {
    pub bypass: bool,
    pub amount: f32,
    pub angle: f32,
    pub seed: f32,
    pub seed_x: f32,
    pub seed_y: f32,
    pub distortion_x: f32,
    pub distortion_y: f32,
    pub column_size: f32,
}

pub struct GlitchState {
    rng: ChaCha8Rng,
    frame: u32,
    interval: u32,
    /// Glitch on every frame.
    pub wild: bool,
    uniforms: GlitchUniforms,
}

impl GlitchState {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let interval = rng.random_range(120..=240);
        Self {
            rng,
            frame: 0,
            interval,
            wild: false,
            uniforms: GlitchUniforms {
                column_size: COLUMN_SIZE,
                ..GlitchUniforms::default()
            },
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// RGBA noise texture sampled by the shader to displace pixels.
    pub fn displacement_map(&mut self) -> Vec<u8> {
        let mut pixels = vec![0u8; DISPLACEMENT_SIZE * DISPLACEMENT_SIZE * 4];
        for texel in pixels.chunks_exact_mut(4) {
            let value: u8 = self.rng.random();
            texel.copy_from_slice(&[value, value, value, 255]);
        }
        pixels
    }

    /// Advance one rendered frame and return the uniforms to draw it with.
    pub fn advance(&mut self) -> GlitchUniforms {
        let u = &mut self.uniforms;
        u.seed = self.rng.random::<f32>();
        u.bypass = false;

        let phase = self.frame % self.interval;
        if phase == 0 || self.wild {
            u.amount = self.rng.random::<f32>() / 30.0;
            u.angle = self.rng.random_range(-PI..=PI);
            u.seed_x = self.rng.random_range(-1.0..=1.0);
            u.seed_y = self.rng.random_range(-1.0..=1.0);
            u.distortion_x = self.rng.random_range(0.0..=1.0);
            u.distortion_y = self.rng.random_range(0.0..=1.0);
            self.frame = 0;
            self.interval = self.rng.random_range(120..=240);
        } else if phase * 5 < self.interval {
            u.amount = self.rng.random::<f32>() / 90.0;
            u.angle = self.rng.random_range(-PI..=PI);
            u.distortion_x = self.rng.random_range(0.0..=1.0);
            u.distortion_y = self.rng.random_range(0.0..=1.0);
            u.seed_x = self.rng.random_range(-0.3..=0.3);
            u.seed_y = self.rng.random_range(-0.3..=0.3);
        } else {
            u.bypass = true;
        }
        self.frame += 1;
        *u
    }
}
