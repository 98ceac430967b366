use itemview::EPSILON;

use crate::{Easing, Tween, abs};

/// Inputs that scale the overshoot animation duration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvershootConfig {
    /// Height of the indicator in pixels. Zero makes every animation instantaneous.
    pub indicator_height: f32,
    /// Pixels per second. A non-positive speed writes the overshoot directly.
    pub speed: f32,
}

/// Animates the overshoot indicator amount.
///
/// An animation towards a non-zero amount ("on") cannot be interrupted: a request to animate off
/// while it runs is remembered and started once it finishes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvershootAnimator {
    tween: Option<Tween>,
    animating_on: bool,
    animate_off_pending: bool,
    in_animation: bool,
}

impl OvershootAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn is_animating_on(&self) -> bool {
        self.animating_on
    }

    /// Whether an animation owns the overshoot value; direct writes must wait.
    pub fn in_animation(&self) -> bool {
        self.in_animation
    }

    pub fn animate_off_pending(&self) -> bool {
        self.animate_off_pending
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Requests an animation from `current` to `amount`.
    ///
    /// With `animate_back`, the indicator returns to zero after reaching `amount`. Returns a value
    /// the caller must write immediately; an instantaneous request (zero speed, zero indicator
    /// height or nothing left to travel) is never animated.
    pub fn animate_to(
        &mut self,
        current: f32,
        amount: f32,
        animate_back: bool,
        config: OvershootConfig,
        now_ms: u64,
    ) -> Option<f32> {
        let on = abs(amount) > EPSILON;
        self.animate_off_pending = animate_back || (!on && self.animating_on);
        if self.animating_on {
            itrace!(amount, "overshoot: on-animation running, deferring");
            return None;
        }
        let duration_ms = if config.speed <= EPSILON {
            0
        } else {
            let remaining = if on { 1.0 - abs(current) } else { abs(current) };
            let seconds = config.indicator_height * remaining / config.speed;
            (seconds * 1000.0) as u64
        };

        if duration_ms == 0 {
            self.tween = None;
            self.in_animation = false;
            self.animating_on = false;
            if animate_back {
                self.animate_off_pending = false;
                if let Some(direct) = self.animate_to(amount, 0.0, false, config, now_ms) {
                    return Some(direct);
                }
            }
            return Some(amount);
        }

        self.in_animation = true;
        self.animating_on = on;
        self.tween = Some(Tween::new(current, amount, now_ms, duration_ms, Easing::Linear));
        itrace!(current, amount, duration_ms, animate_back, "overshoot: animate");
        None
    }

    /// Advances the animation. Returns the overshoot value to write, if any.
    pub fn tick(&mut self, config: OvershootConfig, now_ms: u64) -> Option<f32> {
        let tween = self.tween?;
        let value = tween.sample(now_ms);
        if !tween.is_done(now_ms) {
            return Some(value);
        }

        self.tween = None;
        self.animating_on = false;
        // Cleared first so a follow-up off-animation keeps ownership of the value.
        self.in_animation = false;
        if self.animate_off_pending {
            if let Some(direct) = self.animate_to(value, 0.0, false, config, now_ms) {
                return Some(direct);
            }
        }
        Some(value)
    }
}
