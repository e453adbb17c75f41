//! Playback clock for animations.

/// What happens once an animation's time passes its duration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tiling {
    /// Stop at the end.
    #[default]
    Clamp,
    /// Start over from the beginning.
    Repeat,
    /// Play backwards to the beginning, then forward again.
    Mirror,
}

/// Maps wall clock time to an animation's local time.
///
/// The clock is driven by [`set_time`](Animator::set_time), typically with the
/// current time in seconds on every frame. The first time set after creation or
/// after a [`rewind`](Animator::rewind) becomes the start of the animation.
///
/// ```
/// use vellum_extra::animator::{Animator, Tiling};
///
/// let mut animator = Animator::new(2.0);
/// animator.set_tiling(Tiling::Mirror);
/// animator.set_time(10.0);
/// animator.set_time(13.0);
/// assert_eq!(animator.time(), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Animator {
    start_time: Option<f64>,
    current_time: f64,
    speed: f64,
    duration: f64,
    tiling: Tiling,
    running: bool,
}

impl Default for Animator {
    fn default() -> Self {
        Animator::new(1.0)
    }
}

impl Animator {
    pub fn new(duration: f64) -> Self {
        debug_assert!(duration > 0.0);
        Animator {
            start_time: None,
            current_time: 0.0,
            speed: 1.0,
            duration,
            tiling: Tiling::Clamp,
            running: false,
        }
    }

    #[inline]
    pub fn tiling(&self) -> Tiling {
        self.tiling
    }

    #[inline]
    pub fn set_tiling(&mut self, tiling: Tiling) {
        self.tiling = tiling;
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        debug_assert!(duration > 0.0);
        self.duration = duration;
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Makes the next time set the start of the animation.
    pub fn rewind(&mut self) {
        self.start_time = None;
    }

    /// Sets the current clock time, in seconds.
    pub fn set_time(&mut self, secs: f64) {
        debug_assert!(secs >= 0.0);
        if self.start_time.is_none() {
            self.start_time = Some(secs);
        }
        self.current_time = secs;
    }

    /// The animation's local time, in `[0, duration]`.
    pub fn time(&self) -> f64 {
        let start = self.start_time.unwrap_or(self.current_time);
        let rel = (self.current_time - start) * self.speed;
        let d = self.duration;
        match self.tiling {
            Tiling::Clamp => rel.max(0.0).min(d),
            Tiling::Repeat => rel % d,
            Tiling::Mirror => {
                let rel = rel % (d * 2.0);
                if rel > d {
                    2.0 * d - rel
                } else {
                    rel
                }
            }
        }
    }

    /// The local time as a fraction of the duration.
    pub fn percent_time(&self) -> f64 {
        self.time() / self.duration
    }

    /// Whether a clamped animation reached its end.
    pub fn is_finished(&self) -> bool {
        self.tiling == Tiling::Clamp && self.time() == self.duration
    }
}

#[test]
fn clamp() {
    let mut animator = Animator::new(2.0);
    assert_eq!(animator.time(), 0.0);

    animator.set_time(5.0);
    assert_eq!(animator.time(), 0.0);
    animator.set_time(6.0);
    assert_eq!(animator.time(), 1.0);
    assert_eq!(animator.percent_time(), 0.5);
    assert!(!animator.is_finished());

    animator.set_time(9.0);
    assert_eq!(animator.time(), 2.0);
    assert!(animator.is_finished());

    animator.rewind();
    animator.set_time(20.0);
    assert_eq!(animator.time(), 0.0);
}

#[test]
fn repeat_and_mirror() {
    let mut animator = Animator::new(2.0);
    animator.set_tiling(Tiling::Repeat);
    animator.set_time(1.0);
    animator.set_time(6.5);
    assert_eq!(animator.time(), 1.5);
    assert!(!animator.is_finished());

    animator.set_tiling(Tiling::Mirror);
    // 5.5 % 4 = 1.5
    assert_eq!(animator.time(), 1.5);
    animator.set_time(8.0);
    // 7 % 4 = 3, mirrored to 1
    assert_eq!(animator.time(), 1.0);
}

#[test]
fn speed() {
    let mut animator = Animator::new(10.0);
    animator.set_speed(2.0);
    animator.set_time(1.0);
    animator.set_time(3.0);
    assert_eq!(animator.time(), 4.0);
}

#[test]
fn run_state() {
    let mut animator = Animator::default();
    assert!(!animator.is_running());
    animator.run();
    assert!(animator.is_running());
    animator.toggle();
    assert!(!animator.is_running());
    animator.toggle();
    animator.stop();
    assert!(!animator.is_running());
}
