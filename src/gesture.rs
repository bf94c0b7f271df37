//! Swipe-to-favorite gesture state machine.
//!
//! One instance per visible card. Raw drag samples update only this
//! ephemeral state; the favorites store is touched by the caller, and only
//! after the commit animation finishes. The machine is pure: time comes in
//! through `tick(dt)`, so the whole thing is testable without a clock.

/// Rightward displacement fraction of the viewport width that commits.
pub const COMMIT_THRESHOLD_RATIO: f32 = 0.3;

/// Rotation at a full viewport-width of horizontal displacement, degrees.
pub const MAX_ROTATION_DEGREES: f32 = 30.0;

/// Duration of the commit fly-out animation, seconds.
pub const COMMIT_DURATION_SECS: f32 = 0.3;

/// How far past the viewport edge the card flies out on commit.
const COMMIT_EXIT_RATIO: f32 = 1.2;

// Spring constants for the snap-back animation, per-second units.
const SPRING_STIFFNESS: f32 = 170.0;
const SPRING_DAMPING: f32 = 18.0;

// Rest detection: offset in logical pixels, velocity in px/s.
const SETTLE_OFFSET_EPS: f32 = 0.5;
const SETTLE_VELOCITY_EPS: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Dragging,
    Committing,
    SnappingBack,
}

/// Outcome of releasing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Commit,
    SnapBack,
}

/// Result of advancing the animations by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to animate (Idle or Dragging).
    Still,
    /// An animation is in flight; redraw.
    Animating,
    /// The commit fly-out just finished; favorite the movie and drop the card.
    Committed,
    /// The snap-back just came to rest; phase is Idle again.
    Settled,
}

#[derive(Debug, Clone)]
pub struct SwipeGesture {
    phase: Phase,
    offset: (f32, f32),
    velocity: (f32, f32),
    /// Offset at the moment of commit, start of the fly-out interpolation.
    commit_from: (f32, f32),
    /// Fly-out destination, past the right viewport edge.
    commit_to: (f32, f32),
    commit_elapsed: f32,
    opacity: f32,
}

impl SwipeGesture {
    pub fn new() -> Self {
        SwipeGesture {
            phase: Phase::Idle,
            offset: (0.0, 0.0),
            velocity: (0.0, 0.0),
            commit_from: (0.0, 0.0),
            commit_to: (0.0, 0.0),
            commit_elapsed: 0.0,
            opacity: 1.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Rotation in degrees, linear in horizontal displacement: zero at the
    /// origin, ±30° at ±`viewport_width`.
    pub fn rotation(&self, viewport_width: f32) -> f32 {
        if viewport_width <= 0.0 {
            return 0.0;
        }
        self.offset.0 / viewport_width * MAX_ROTATION_DEGREES
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, Phase::Committing | Phase::SnappingBack)
    }

    /// Feed a raw drag sample. Accepted only while Idle or Dragging; once
    /// an exit animation runs the card no longer follows the pointer.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        match self.phase {
            Phase::Idle | Phase::Dragging => {
                self.phase = Phase::Dragging;
                self.offset = (x, y);
            }
            Phase::Committing | Phase::SnappingBack => {}
        }
    }

    /// End the drag. Commits only on a rightward displacement at or past
    /// the threshold; everything else snaps back.
    pub fn release(&mut self, viewport_width: f32) -> Release {
        if self.phase != Phase::Dragging {
            return Release::SnapBack;
        }
        if self.offset.0 >= COMMIT_THRESHOLD_RATIO * viewport_width {
            self.phase = Phase::Committing;
            self.commit_elapsed = 0.0;
            self.commit_from = self.offset;
            self.commit_to = (COMMIT_EXIT_RATIO * viewport_width, self.offset.1);
            Release::Commit
        } else {
            self.phase = Phase::SnappingBack;
            self.velocity = (0.0, 0.0);
            Release::SnapBack
        }
    }

    /// Advance animations by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Tick {
        match self.phase {
            Phase::Idle | Phase::Dragging => Tick::Still,
            Phase::Committing => self.tick_commit(dt),
            Phase::SnappingBack => self.tick_snap_back(dt),
        }
    }

    fn tick_commit(&mut self, dt: f32) -> Tick {
        self.commit_elapsed += dt;
        let t = (self.commit_elapsed / COMMIT_DURATION_SECS).min(1.0);
        self.offset = (
            lerp(self.commit_from.0, self.commit_to.0, t),
            lerp(self.commit_from.1, self.commit_to.1, t),
        );
        self.opacity = 1.0 - t;
        if t >= 1.0 {
            Tick::Committed
        } else {
            Tick::Animating
        }
    }

    fn tick_snap_back(&mut self, dt: f32) -> Tick {
        // Damped spring toward the origin, semi-implicit Euler. Large dt
        // (a stalled frame) is split so the integration stays stable.
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(1.0 / 60.0);
            remaining -= step;

            let (x, y) = self.offset;
            let (vx, vy) = self.velocity;
            let ax = -SPRING_STIFFNESS * x - SPRING_DAMPING * vx;
            let ay = -SPRING_STIFFNESS * y - SPRING_DAMPING * vy;
            self.velocity = (vx + ax * step, vy + ay * step);
            self.offset = (x + self.velocity.0 * step, y + self.velocity.1 * step);
        }

        let at_rest = self.offset.0.abs() < SETTLE_OFFSET_EPS
            && self.offset.1.abs() < SETTLE_OFFSET_EPS
            && self.velocity.0.abs() < SETTLE_VELOCITY_EPS
            && self.velocity.1.abs() < SETTLE_VELOCITY_EPS;
        if at_rest {
            self.offset = (0.0, 0.0);
            self.velocity = (0.0, 0.0);
            self.phase = Phase::Idle;
            Tick::Settled
        } else {
            Tick::Animating
        }
    }
}

impl Default for SwipeGesture {
    fn default() -> Self {
        SwipeGesture::new()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 400.0;
    const FRAME: f32 = 1.0 / 60.0;

    fn dragged_to(x: f32) -> SwipeGesture {
        let mut g = SwipeGesture::new();
        g.drag_to(x, 0.0);
        g
    }

    #[test]
    fn starts_idle_at_origin() {
        let g = SwipeGesture::new();
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.offset(), (0.0, 0.0));
        assert_eq!(g.opacity(), 1.0);
    }

    #[test]
    fn first_drag_sample_enters_dragging() {
        let mut g = SwipeGesture::new();
        g.drag_to(5.0, -2.0);
        assert_eq!(g.phase(), Phase::Dragging);
        assert_eq!(g.offset(), (5.0, -2.0));
    }

    #[test]
    fn release_at_exact_threshold_commits() {
        let mut g = dragged_to(0.3 * W);
        assert_eq!(g.release(W), Release::Commit);
        assert_eq!(g.phase(), Phase::Committing);
    }

    #[test]
    fn release_just_under_threshold_snaps_back() {
        let mut g = dragged_to(0.29 * W);
        assert_eq!(g.release(W), Release::SnapBack);
        assert_eq!(g.phase(), Phase::SnappingBack);
    }

    #[test]
    fn leftward_release_never_commits() {
        let mut g = dragged_to(-0.9 * W);
        assert_eq!(g.release(W), Release::SnapBack);
    }

    #[test]
    fn release_without_drag_is_a_snap_back_noop() {
        let mut g = SwipeGesture::new();
        assert_eq!(g.release(W), Release::SnapBack);
        assert_eq!(g.phase(), Phase::Idle);
    }

    #[test]
    fn rotation_is_linear_in_horizontal_offset() {
        let mut g = SwipeGesture::new();
        assert_eq!(g.rotation(W), 0.0);

        g.drag_to(W, 0.0);
        assert!((g.rotation(W) - 30.0).abs() < 1e-4);

        g.drag_to(-W, 0.0);
        assert!((g.rotation(W) + 30.0).abs() < 1e-4);

        g.drag_to(W / 2.0, 0.0);
        assert!((g.rotation(W) - 15.0).abs() < 1e-4);
    }

    #[test]
    fn vertical_offset_does_not_rotate() {
        let mut g = SwipeGesture::new();
        g.drag_to(0.0, 120.0);
        assert_eq!(g.rotation(W), 0.0);
    }

    #[test]
    fn commit_finishes_after_300ms_and_fades_out() {
        let mut g = dragged_to(0.5 * W);
        g.release(W);

        let mut committed = 0;
        let mut elapsed = 0.0;
        while elapsed < 1.0 {
            match g.tick(FRAME) {
                Tick::Committed => {
                    committed += 1;
                    break;
                }
                Tick::Animating => {}
                other => panic!("unexpected tick result: {other:?}"),
            }
            elapsed += FRAME;
        }
        assert_eq!(committed, 1);
        // 300ms at 60fps is 18 frames; allow one frame of quantization.
        assert!(elapsed <= COMMIT_DURATION_SECS + FRAME, "took {elapsed}s");
        assert_eq!(g.opacity(), 0.0);
        assert!(g.offset().0 >= 1.2 * W - 1e-3);
    }

    #[test]
    fn commit_ignores_further_drag_samples() {
        let mut g = dragged_to(0.5 * W);
        g.release(W);
        let before = g.offset();
        g.drag_to(0.0, 0.0);
        assert_eq!(g.offset(), before);
        assert_eq!(g.phase(), Phase::Committing);
    }

    #[test]
    fn snap_back_settles_at_origin_and_returns_to_idle() {
        let mut g = dragged_to(0.25 * W);
        g.release(W);

        let mut settled = false;
        for _ in 0..600 {
            if g.tick(FRAME) == Tick::Settled {
                settled = true;
                break;
            }
        }
        assert!(settled, "spring never settled");
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.offset(), (0.0, 0.0));
        assert_eq!(g.opacity(), 1.0);
    }

    #[test]
    fn snap_back_survives_a_stalled_frame() {
        let mut g = dragged_to(0.2 * W);
        g.release(W);
        // One long dt must not blow the integration up.
        g.tick(0.5);
        assert!(g.offset().0.abs() < 0.3 * W);
    }

    #[test]
    fn tick_while_idle_is_still() {
        let mut g = SwipeGesture::new();
        assert_eq!(g.tick(FRAME), Tick::Still);
    }
}
