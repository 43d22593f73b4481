//! Time-based property interpolation for section and companion animations.

use glam::Vec3;
use smallvec::SmallVec;

/// Easing curves, named after their gsap counterparts (`power1` is
/// quadratic, `power2` is cubic).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1Out,
    Power2InOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenTarget {
    SectionRotation(usize),
    CompanionPosition,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    /// Relative: the target accumulates `delta` over the tween.
    By(Vec3),
    /// Absolute: the target is driven from `from` to `to`.
    To { from: Vec3, to: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub target: TweenTarget,
    pub duration: f32,
    pub ease: Ease,
    elapsed: f32,
    stepped: bool,
    motion: Motion,
}

impl Tween {
    pub fn rotate_by(section: usize, delta: Vec3, duration: f32, ease: Ease) -> Self {
        Self {
            target: TweenTarget::SectionRotation(section),
            duration,
            ease,
            elapsed: 0.0,
            stepped: false,
            motion: Motion::By(delta),
        }
    }

    pub fn move_to(from: Vec3, to: Vec3, duration: f32, ease: Ease) -> Self {
        Self {
            target: TweenTarget::CompanionPosition,
            duration,
            ease,
            elapsed: 0.0,
            stepped: false,
            motion: Motion::To { from, to },
        }
    }

    #[inline]
    fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.ease.apply(elapsed / self.duration)
        }
    }

    fn step(&mut self, dt: f32) -> Change {
        let before = if self.stepped {
            self.progress(self.elapsed)
        } else {
            0.0
        };
        self.stepped = true;
        self.elapsed += dt.max(0.0);
        let after = self.progress(self.elapsed);
        match self.motion {
            Motion::By(delta) => Change::Add(delta * (after - before)),
            Motion::To { from, to } => Change::Set(from.lerp(to, after)),
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.stepped && self.elapsed >= self.duration
    }

    #[inline]
    fn is_absolute(&self) -> bool {
        matches!(self.motion, Motion::To { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Change {
    Add(Vec3),
    Set(Vec3),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub target: TweenTarget,
    pub change: Change,
}

/// Active tweens, advanced once per frame.
#[derive(Debug, Default)]
pub struct Tweens {
    active: SmallVec<[Tween; 4]>,
}

impl Tweens {
    /// Queue a tween. Relative tweens stack with anything already running;
    /// an absolute tween replaces earlier absolute tweens on the same target.
    pub fn start(&mut self, tween: Tween) {
        if tween.is_absolute() {
            self.active
                .retain(|t| !(t.is_absolute() && t.target == tween.target));
        }
        self.active.push(tween);
    }

    pub fn advance(&mut self, dt: f32) -> SmallVec<[TweenStep; 4]> {
        let steps = self
            .active
            .iter_mut()
            .map(|t| TweenStep {
                target: t.target,
                change: t.step(dt),
            })
            .collect();
        self.active.retain(|t| !t.is_finished());
        steps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = TweenTarget> + '_ {
        self.active.iter().map(|t| t.target)
    }
}
