//! Single-slot camera transition state machine.
//!
//! The animator is either idle or holds exactly one transition record.
//! Starting a new transition while one is running discards the old record
//! immediately (last-write-wins, no queueing). Ticking takes elapsed time
//! as an explicit input so tests and headless callers stay deterministic;
//! ticking while idle is a safe no-op.

use glam::Vec3;

use super::Camera;
use crate::util::easing::EasingFunction;

/// Where a transition should take the camera.
///
/// `eye` of `None` means "keep the current offset between camera and
/// target", so the orbit recenters without changing zoom or facing. `up`
/// of `None` leaves the up vector untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraGoal {
    /// Orbit target at the end of the transition.
    pub target: Vec3,
    /// Eye position at the end, or `None` to preserve the eye-target
    /// offset.
    pub eye: Option<Vec3>,
    /// Up vector at the end, or `None` to leave it unchanged.
    pub up: Option<Vec3>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    from_target: Vec3,
    to_target: Vec3,
    from_eye: Vec3,
    to_eye: Option<Vec3>,
    from_up: Vec3,
    to_up: Option<Vec3>,
    elapsed: f32,
    duration: f32,
}

/// Interpolating state machine driving smooth camera transitions.
#[derive(Debug, Default)]
pub struct CameraAnimator {
    active: Option<ActiveTransition>,
    easing: EasingFunction,
}

impl CameraAnimator {
    /// Create an idle animator with the default easing curve.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a transition from the camera's current state toward `goal`
    /// over `duration` seconds. Supersedes any running transition.
    pub fn start(&mut self, camera: &Camera, goal: CameraGoal, duration: f32) {
        self.active = Some(ActiveTransition {
            from_target: camera.target,
            to_target: goal.target,
            from_eye: camera.eye,
            to_eye: goal.eye,
            from_up: camera.up,
            to_up: goal.up,
            elapsed: 0.0,
            duration,
        });
    }

    /// Drop any running transition, leaving the camera where it is.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Advance the running transition by `dt` seconds and write the
    /// interpolated state into `camera`. Returns whether the camera
    /// changed; idle ticks return false. A non-positive duration snaps to
    /// the goal on the first tick.
    pub fn tick(&mut self, dt: f32, camera: &mut Camera) -> bool {
        let easing = self.easing;
        let Some(tr) = self.active.as_mut() else {
            return false;
        };

        tr.elapsed += dt.max(0.0);
        let fraction = if tr.duration > 0.0 {
            (tr.elapsed / tr.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = easing.evaluate(fraction);

        camera.target = tr.from_target.lerp(tr.to_target, eased);
        camera.eye = match tr.to_eye {
            Some(to_eye) => tr.from_eye.lerp(to_eye, eased),
            // Preserve the original eye-target offset while the orbit
            // recenters.
            None => camera.target + (tr.from_eye - tr.from_target),
        };
        if let Some(to_up) = tr.to_up {
            camera.up = tr.from_up.lerp(to_up, eased).normalize_or(tr.from_up);
        }

        if fraction >= 1.0 {
            self.active = None;
        }
        true
    }
}
