//! Exponential smoothing of the drag-derived zoom target.
//!
//! The raw target jumps with every touch-move; applying it directly makes the
//! zoom feel stepped. The trajectory filter approaches the target by a fixed
//! fraction per animation frame and remembers the last value actually pushed
//! to the host, so a frame that changes nothing can skip the projection work.

/// Smoothed zoom trajectory between the drag-derived target and the host map
#[derive(Debug, Clone)]
pub struct ZoomTrajectory {
    desired: f64,
    eased: f64,
    applied: f64,
    ease_alpha: f64,
    epsilon: f64,
}

impl ZoomTrajectory {
    /// `ease_alpha` in (0, 1]: higher is snappier, lower is smoother.
    pub fn new(ease_alpha: f64, epsilon: f64) -> Self {
        Self {
            desired: 0.0,
            eased: 0.0,
            applied: 0.0,
            ease_alpha,
            epsilon,
        }
    }

    /// Restart the trajectory at a known zoom level
    pub fn begin(&mut self, zoom: f64) {
        self.desired = zoom;
        self.eased = zoom;
        self.applied = zoom;
    }

    /// Move the target; the eased value follows on subsequent ticks
    pub fn retarget(&mut self, desired: f64) {
        self.desired = desired;
    }

    /// Advance the eased value one frame toward the target.
    ///
    /// Snaps onto the target once inside the convergence band so the
    /// trajectory settles in a bounded number of frames instead of chasing
    /// the exponential tail forever.
    pub fn tick(&mut self) {
        self.eased += (self.desired - self.eased) * self.ease_alpha;
        if (self.desired - self.eased).abs() <= self.epsilon {
            self.eased = self.desired;
        }
    }

    /// True when the eased value has drifted far enough from what the host
    /// last saw to be worth re-projecting.
    pub fn needs_apply(&self) -> bool {
        (self.eased - self.applied).abs() > self.epsilon
    }

    /// Record that the current eased value reached the host
    pub fn mark_applied(&mut self) {
        self.applied = self.eased;
    }

    /// True once eased and applied values both sit on the target
    pub fn settled(&self) -> bool {
        (self.eased - self.desired).abs() <= self.epsilon
            && (self.applied - self.eased).abs() <= self.epsilon
    }

    /// Snap everything onto the target, bypassing easing
    pub fn finish(&mut self) {
        self.eased = self.desired;
        self.applied = self.desired;
    }

    pub fn desired(&self) -> f64 {
        self.desired
    }

    pub fn eased(&self) -> f64 {
        self.eased
    }

    pub fn applied(&self) -> f64 {
        self.applied
    }
}
