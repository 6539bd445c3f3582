//! Post-processing pass chain.
//!
//! The composer owns the pass list and decides, frame by frame, which
//! offscreen buffer each enabled pass reads and writes. GPU work is left to
//! the caller, which executes the returned [`FramePlan`] step by step.

use crate::glitch::{GlitchState, GlitchUniforms};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassId(usize);

/// Film grain noise blended over the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmGrain {
    pub strength: f32,
    pub speed: f32,
    pub time: f32,
}

impl FilmGrain {
    pub fn new(strength: f32, speed: f32) -> Self {
        Self {
            strength,
            speed,
            time: 0.0,
        }
    }
}

pub enum PassKind {
    /// Draw the scene.
    Scene,
    FilmGrain(FilmGrain),
    Glitch(GlitchState),
    /// Linear to sRGB conversion for display.
    Output,
}

impl PassKind {
    fn name(&self) -> &'static str {
        match self {
            PassKind::Scene => "scene",
            PassKind::FilmGrain(_) => "film-grain",
            PassKind::Glitch(_) => "glitch",
            PassKind::Output => "output",
        }
    }
}

struct PassSlot {
    kind: PassKind,
    enabled: bool,
}

/// One of the two ping-pong render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Offscreen(Buffer),
    Screen,
}

/// What a step draws, with the uniforms captured for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Draw the scene. `encode_srgb` is set when nothing downstream converts
    /// the output for display.
    Scene { encode_srgb: bool },
    FilmGrain { strength: f32, time: f32 },
    Glitch(GlitchUniforms),
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassStep {
    pub pass: PassId,
    pub effect: Effect,
    /// Buffer sampled by a fullscreen effect; `None` for the scene pass.
    pub source: Option<Buffer>,
    pub destination: Destination,
}

pub type FramePlan = Vec<PassStep>;

#[derive(Default)]
pub struct Composer {
    passes: Vec<PassSlot>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A composer that only draws the scene straight to the screen.
    pub fn direct() -> Self {
        let mut composer = Self::new();
        composer.add_pass(PassKind::Scene);
        composer
    }

    pub fn add_pass(&mut self, kind: PassKind) -> PassId {
        log::debug!("composer: adding {} pass", kind.name());
        self.passes.push(PassSlot {
            kind,
            enabled: true,
        });
        PassId(self.passes.len() - 1)
    }

    pub fn set_enabled(&mut self, id: PassId, enabled: bool) {
        if let Some(slot) = self.passes.get_mut(id.0) {
            if slot.enabled != enabled {
                log::info!(
                    "{} pass {}",
                    slot.kind.name(),
                    if enabled { "enabled" } else { "disabled" }
                );
            }
            slot.enabled = enabled;
        }
    }

    pub fn is_enabled(&self, id: PassId) -> bool {
        self.passes.get(id.0).is_some_and(|slot| slot.enabled)
    }

    pub fn pass(&self, id: PassId) -> Option<&PassKind> {
        self.passes.get(id.0).map(|slot| &slot.kind)
    }

    pub fn pass_mut(&mut self, id: PassId) -> Option<&mut PassKind> {
        self.passes.get_mut(id.0).map(|slot| &mut slot.kind)
    }

    /// Whether any enabled pass needs offscreen buffers.
    pub fn needs_targets(&self) -> bool {
        self.passes.iter().filter(|slot| slot.enabled).count() > 1
    }

    /// Time-based updates. Runs for every pass, enabled or not.
    pub fn update(&mut self, delta: f32) {
        for slot in &mut self.passes {
            if let PassKind::FilmGrain(grain) = &mut slot.kind {
                grain.time += delta * grain.speed;
            }
        }
    }

    /// Lay out this frame's steps. The last enabled pass draws to the
    /// screen; the scene pass fills the read buffer without swapping; every
    /// other pass reads the read buffer, writes the write buffer, then swaps.
    pub fn plan(&mut self) -> FramePlan {
        let last_enabled = self.passes.iter().rposition(|slot| slot.enabled);
        let mut read = Buffer::A;
        let mut write = Buffer::B;
        let mut steps = Vec::with_capacity(self.passes.len());

        for (index, slot) in self.passes.iter_mut().enumerate() {
            if !slot.enabled {
                continue;
            }
            let to_screen = Some(index) == last_enabled;
            let pass = PassId(index);

            let effect = match &mut slot.kind {
                PassKind::Scene => {
                    steps.push(PassStep {
                        pass,
                        effect: Effect::Scene {
                            encode_srgb: to_screen,
                        },
                        source: None,
                        destination: if to_screen {
                            Destination::Screen
                        } else {
                            Destination::Offscreen(read)
                        },
                    });
                    continue;
                }
                PassKind::FilmGrain(grain) => Effect::FilmGrain {
                    strength: grain.strength,
                    time: grain.time,
                },
                PassKind::Glitch(state) => Effect::Glitch(state.advance()),
                PassKind::Output => Effect::Output,
            };
            steps.push(PassStep {
                pass,
                effect,
                source: Some(read),
                destination: if to_screen {
                    Destination::Screen
                } else {
                    Destination::Offscreen(write)
                },
            });
            std::mem::swap(&mut read, &mut write);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Composer, PassId, PassId) {
        let mut composer = Composer::new();
        composer.add_pass(PassKind::Scene);
        let grain = composer.add_pass(PassKind::FilmGrain(FilmGrain::new(0.1, 0.05)));
        let glitch = composer.add_pass(PassKind::Glitch(GlitchState::new(3)));
        composer.add_pass(PassKind::Output);
        (composer, grain, glitch)
    }

    fn routes(plan: &FramePlan) -> Vec<(Option<Buffer>, Destination)> {
        plan.iter().map(|s| (s.source, s.destination)).collect()
    }

    #[test]
    fn full_chain_ping_pongs_and_ends_on_screen() {
        let (mut composer, _, _) = chain();
        let plan = composer.plan();
        assert_eq!(
            routes(&plan),
            vec![
                (None, Destination::Offscreen(Buffer::A)),
                (Some(Buffer::A), Destination::Offscreen(Buffer::B)),
                (Some(Buffer::B), Destination::Offscreen(Buffer::A)),
                (Some(Buffer::A), Destination::Screen),
            ]
        );
        assert_eq!(plan[0].effect, Effect::Scene { encode_srgb: false });
        assert_eq!(plan[3].effect, Effect::Output);
    }

    #[test]
    fn disabled_passes_are_skipped() {
        let (mut composer, grain, glitch) = chain();
        composer.set_enabled(grain, false);
        composer.set_enabled(glitch, false);
        assert_eq!(
            routes(&composer.plan()),
            vec![
                (None, Destination::Offscreen(Buffer::A)),
                (Some(Buffer::A), Destination::Screen),
            ]
        );
    }

    #[test]
    fn direct_composer_encodes_in_the_scene_pass() {
        let mut composer = Composer::direct();
        assert!(!composer.needs_targets());
        let plan = composer.plan();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].effect, Effect::Scene { encode_srgb: true });
        assert_eq!(plan[0].destination, Destination::Screen);
    }

    #[test]
    fn grain_time_advances_even_while_disabled() {
        let (mut composer, grain, _) = chain();
        composer.set_enabled(grain, false);
        composer.update(2.0);
        match composer.pass(grain) {
            Some(PassKind::FilmGrain(g)) => assert!((g.time - 0.1).abs() < 1e-6),
            _ => panic!("expected film grain pass"),
        }
    }

    #[test]
    fn toggle_applies_to_next_plan_only() {
        let (mut composer, _, glitch) = chain();
        let before = composer.plan();
        composer.set_enabled(glitch, false);
        let after = composer.plan();
        assert!(before.iter().any(|s| s.pass == glitch));
        assert!(after.iter().all(|s| s.pass != glitch));
        assert_eq!(before.len(), 4);
        assert!(!composer.is_enabled(glitch));
    }
}
