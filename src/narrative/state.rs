//! Navigation State Management
//!
//! Owns the current scene, the timeline memory index, and the transition
//! debounce lock. Raw wheel and touch gestures are filtered into
//! single-step requests; anything arriving while a transition is in
//! flight is dropped, not queued.

use super::scene::Scene;

/// Wheel deltas below this magnitude are treated as scroll noise
pub const WHEEL_THRESHOLD: f32 = 30.0;
/// Touch swipes shorter than this many pixels are ignored
pub const SWIPE_THRESHOLD: f32 = 50.0;
/// Lock duration for a memory step inside the timeline (seconds)
pub const MEMORY_LOCK_SECS: f32 = 0.8;
/// Lock duration for a scene change (seconds)
pub const SCENE_LOCK_SECS: f32 = 1.0;

/// What a navigation request did, so the shell can trigger side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Request dropped: locked, at a boundary, or terminal scene
    Ignored,
    /// Moved one memory within the timeline
    MemoryStep,
    /// Crossed into an adjacent scene
    SceneChange,
}

impl NavOutcome {
    pub fn accepted(self) -> bool {
        self != NavOutcome::Ignored
    }
}

/// Narrative position with transition lock and animation clock
pub struct NarrativeState {
    /// Current scene
    scene: Scene,
    /// Selected memory within the timeline scene
    memory_index: usize,
    /// Number of memories in the timeline
    memory_count: usize,
    /// Direction of the last transition (-1, 0, +1), presentation only
    direction: i32,
    /// Seconds remaining on the transition lock (0 = unlocked)
    lock_timer: f32,
    /// Duration the current lock started from (for enter animations)
    lock_total: f32,
    /// Time accumulator for animations (in seconds)
    time: f32,
}

impl NarrativeState {
    /// Create a new state at the hero scene
    pub fn new(memory_count: usize) -> Self {
        Self {
            scene: Scene::Hero,
            memory_index: 0,
            memory_count,
            direction: 0,
            lock_timer: 0.0,
            lock_total: 0.0,
            time: 0.0,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn memory_index(&self) -> usize {
        self.memory_index
    }

    pub fn memory_count(&self) -> usize {
        self.memory_count
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Whether a transition lock is currently held
    pub fn is_transitioning(&self) -> bool {
        self.lock_timer > 0.0
    }

    /// Progress of the current transition, 0.0 (just started) to 1.0 (settled)
    pub fn transition_progress(&self) -> f32 {
        if self.lock_total <= 0.0 {
            return 1.0;
        }
        1.0 - (self.lock_timer / self.lock_total).clamp(0.0, 1.0)
    }

    /// Advance animations and count the lock down (call once per frame).
    /// The lock always runs to zero and always clears, regardless of
    /// which scene is current when it elapses.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        if self.lock_timer > 0.0 {
            self.lock_timer = (self.lock_timer - dt).max(0.0);
        }
    }

    fn arm_lock(&mut self, secs: f32) {
        self.lock_timer = secs;
        self.lock_total = secs;
    }

    /// Attempt to move one step in `delta`'s direction (+1 forward, -1 back).
    ///
    /// Inside the timeline the memory index moves first; only at its
    /// boundary does the request fall through to a scene change. Gestures
    /// never enter or leave the celebration scene.
    pub fn request_navigate(&mut self, delta: i32) -> NavOutcome {
        if self.is_transitioning() || delta == 0 {
            return NavOutcome::Ignored;
        }

        if self.scene == Scene::Timeline {
            if delta > 0 {
                if self.memory_index < self.memory_count.saturating_sub(1) {
                    self.memory_index += 1;
                    self.arm_lock(MEMORY_LOCK_SECS);
                    return NavOutcome::MemoryStep;
                }
            } else if self.memory_index > 0 {
                self.memory_index -= 1;
                self.arm_lock(MEMORY_LOCK_SECS);
                return NavOutcome::MemoryStep;
            }
        }

        if self.scene == Scene::Celebration {
            return NavOutcome::Ignored;
        }
        let next = match self.scene.offset(delta) {
            // The celebration scene is reached through accept, never gestures
            Some(next) if next != Scene::Celebration => next,
            _ => return NavOutcome::Ignored,
        };

        // Re-entering the timeline backward resumes at the last memory
        if next == Scene::Timeline {
            self.memory_index = if delta < 0 {
                self.memory_count.saturating_sub(1)
            } else {
                0
            };
        }

        self.direction = delta;
        self.scene = next;
        self.arm_lock(SCENE_LOCK_SECS);
        log::debug!("scene -> {}", next.name());
        NavOutcome::SceneChange
    }

    /// Jump to the celebration scene. Does not consult or arm the
    /// transition lock; the caller fires the success effect itself.
    pub fn request_accept(&mut self) {
        self.direction = 1;
        self.scene = Scene::Celebration;
        log::debug!("scene -> {} (accepted)", self.scene.name());
    }

    /// Restart the narrative from the top. Valid from any scene.
    pub fn request_replay(&mut self) {
        self.direction = -1;
        self.scene = Scene::Hero;
        self.memory_index = 0;
        log::debug!("scene -> {} (replay)", self.scene.name());
    }
}

/// Filter a raw wheel delta into a navigation step.
/// Positive delta (scrolling down) advances the narrative.
pub fn wheel_step(delta: f32) -> Option<i32> {
    if delta.abs() < WHEEL_THRESHOLD {
        return None;
    }
    Some(if delta > 0.0 { 1 } else { -1 })
}

/// Tracks one touch from press to release and resolves it into a step
#[derive(Default)]
pub struct SwipeTracker {
    start_y: Option<f32>,
}

impl SwipeTracker {
    pub fn begin(&mut self, y: f32) {
        self.start_y = Some(y);
    }

    /// Resolve the gesture on release. A finger moving up the screen
    /// (content advancing) yields +1.
    pub fn finish(&mut self, y: f32) -> Option<i32> {
        let start = self.start_y.take()?;
        let delta = start - y;
        if delta.abs() <= SWIPE_THRESHOLD {
            return None;
        }
        Some(if delta > 0.0 { 1 } else { -1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMORIES: usize = 12;

    fn settled(state: &mut NarrativeState) {
        state.update(SCENE_LOCK_SECS + 0.1);
    }

    #[test]
    fn test_three_steps_reach_proposal() {
        // A single-memory timeline is always at its boundary, so three
        // forward steps walk hero -> timeline -> reasons -> proposal
        let mut state = NarrativeState::new(1);
        for expected in [Scene::Timeline, Scene::Reasons, Scene::Proposal] {
            assert_eq!(state.request_navigate(1), NavOutcome::SceneChange);
            assert_eq!(state.scene(), expected);
            settled(&mut state);
        }
    }

    #[test]
    fn test_full_walk_through_timeline() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_navigate(1);
        settled(&mut state);
        for i in 1..MEMORIES {
            assert_eq!(state.request_navigate(1), NavOutcome::MemoryStep);
            assert_eq!(state.memory_index(), i);
            settled(&mut state);
        }
        assert_eq!(state.request_navigate(1), NavOutcome::SceneChange);
        assert_eq!(state.scene(), Scene::Reasons);
    }

    #[test]
    fn test_gestures_never_leave_range() {
        let mut state = NarrativeState::new(1);
        assert_eq!(state.request_navigate(-1), NavOutcome::Ignored);
        assert_eq!(state.scene(), Scene::Hero);

        // Spamming forward stops at the proposal, never the celebration
        for _ in 0..20 {
            state.request_navigate(1);
            settled(&mut state);
        }
        assert_eq!(state.scene(), Scene::Proposal);
        assert_eq!(state.request_navigate(1), NavOutcome::Ignored);
    }

    #[test]
    fn test_celebration_is_terminal() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_accept();
        settled(&mut state);
        assert_eq!(state.request_navigate(1), NavOutcome::Ignored);
        assert_eq!(state.request_navigate(-1), NavOutcome::Ignored);
        assert_eq!(state.scene(), Scene::Celebration);
    }

    #[test]
    fn test_locked_requests_are_dropped() {
        let mut state = NarrativeState::new(MEMORIES);
        assert_eq!(state.request_navigate(1), NavOutcome::SceneChange);
        assert!(state.is_transitioning());

        let index = state.memory_index();
        assert_eq!(state.request_navigate(1), NavOutcome::Ignored);
        assert_eq!(state.scene(), Scene::Timeline);
        assert_eq!(state.memory_index(), index);
    }

    #[test]
    fn test_lock_clears_after_timeout() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_navigate(1);
        state.update(0.5);
        assert!(state.is_transitioning());
        state.update(0.6);
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_memory_step_uses_shorter_lock() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_navigate(1);
        settled(&mut state);

        assert_eq!(state.request_navigate(1), NavOutcome::MemoryStep);
        state.update(0.9);
        assert!(!state.is_transitioning());

        // A scene change is still locked at the same elapsed time
        let mut state = NarrativeState::new(MEMORIES);
        state.request_navigate(1);
        state.update(0.9);
        assert!(state.is_transitioning());
    }

    #[test]
    fn test_timeline_entry_indices() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_navigate(1);
        assert_eq!(state.scene(), Scene::Timeline);
        assert_eq!(state.memory_index(), 0);
        settled(&mut state);

        // Leave forward (walk to the end first), then re-enter backward
        for _ in 0..MEMORIES - 1 {
            assert_eq!(state.request_navigate(1), NavOutcome::MemoryStep);
            settled(&mut state);
        }
        assert_eq!(state.request_navigate(1), NavOutcome::SceneChange);
        assert_eq!(state.scene(), Scene::Reasons);
        settled(&mut state);

        assert_eq!(state.request_navigate(-1), NavOutcome::SceneChange);
        assert_eq!(state.scene(), Scene::Timeline);
        assert_eq!(state.memory_index(), MEMORIES - 1);
    }

    #[test]
    fn test_timeline_boundary_falls_through_to_scene() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_navigate(1);
        settled(&mut state);
        assert_eq!(state.memory_index(), 0);

        assert_eq!(state.request_navigate(-1), NavOutcome::SceneChange);
        assert_eq!(state.scene(), Scene::Hero);
        assert_eq!(state.memory_index(), 0);
    }

    #[test]
    fn test_accept_ignores_lock() {
        let mut state = NarrativeState::new(1);
        state.request_navigate(1);
        settled(&mut state);
        state.request_navigate(1);
        settled(&mut state);
        state.request_navigate(1);
        assert_eq!(state.scene(), Scene::Proposal);
        assert!(state.is_transitioning());

        state.request_accept();
        assert_eq!(state.scene(), Scene::Celebration);
        assert_eq!(state.direction(), 1);

        // The pending unlock still fires and simply clears the flag
        settled(&mut state);
        assert!(!state.is_transitioning());
        assert_eq!(state.scene(), Scene::Celebration);
    }

    #[test]
    fn test_replay_from_any_scene() {
        let mut state = NarrativeState::new(MEMORIES);
        state.request_accept();
        state.request_replay();
        assert_eq!(state.scene(), Scene::Hero);
        assert_eq!(state.memory_index(), 0);
        assert_eq!(state.direction(), -1);
    }

    #[test]
    fn test_wheel_filter() {
        assert_eq!(wheel_step(0.0), None);
        assert_eq!(wheel_step(29.9), None);
        assert_eq!(wheel_step(-12.0), None);
        assert_eq!(wheel_step(30.0), Some(1));
        assert_eq!(wheel_step(120.0), Some(1));
        assert_eq!(wheel_step(-64.0), Some(-1));
    }

    #[test]
    fn test_swipe_filter() {
        let mut swipe = SwipeTracker::default();
        // Release without a press resolves to nothing
        assert_eq!(swipe.finish(100.0), None);

        swipe.begin(400.0);
        assert_eq!(swipe.finish(380.0), None);

        // Finger moving up the screen advances
        swipe.begin(400.0);
        assert_eq!(swipe.finish(320.0), Some(1));

        swipe.begin(200.0);
        assert_eq!(swipe.finish(300.0), Some(-1));
    }
}
