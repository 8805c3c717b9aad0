use std::fmt;

use glam::Vec3;

/// Unique identifier for a squad member (or the leader).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Reserved identifier for the team leader.
    pub const LEADER: Self = Self(0);

    #[inline]
    pub const fn is_leader(self) -> bool {
        self.0 == Self::LEADER.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a hostile as reported by perception.
///
/// This is a lookup key, never an owner: a destroyed hostile simply stops
/// resolving through [`PerceptionOracle::locate`](crate::env::PerceptionOracle::locate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hostile#{}", self.0)
    }
}

/// Discrete simulation step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub<u64> for Tick {
    type Output = Tick;
    fn sub(self, rhs: u64) -> Tick {
        Tick(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulation time for one tick: step counter, elapsed seconds, and the step
/// length in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    pub tick: Tick,
    pub now: f32,
    pub delta: f32,
}

impl Clock {
    pub fn start(delta: f32) -> Self {
        Self {
            tick: Tick::ZERO,
            now: 0.0,
            delta,
        }
    }

    /// Returns the clock one step later.
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            tick: self.tick + 1,
            now: self.now + self.delta,
            delta: self.delta,
        }
    }
}

/// Position plus heading around the vertical axis.
///
/// `yaw` is in radians; zero faces +Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        yaw: 0.0,
    };

    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Rotates toward `target` on the horizontal plane by fraction `t` of the
    /// remaining angle. The resulting yaw lies in `[-PI, PI)`.
    pub fn turn_towards(&mut self, target: Vec3, t: f32) {
        let dir = target - self.position;
        if dir.x == 0.0 && dir.z == 0.0 {
            return;
        }
        let yaw = wrap_angle(self.yaw);
        let diff = wrap_angle(dir.x.atan2(dir.z) - yaw);
        self.yaw = wrap_angle(yaw + diff * t.clamp(0.0, 1.0));
    }
}

#[inline]
fn wrap_angle(angle: f32) -> f32 {
    (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI
}

/// Integer resource meter (e.g., magazine ammo) tracked per agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Fraction remaining; an empty-capacity meter reports 0.
    pub fn ratio(&self) -> f32 {
        if self.maximum == 0 {
            0.0
        } else {
            self.current as f32 / self.maximum as f32
        }
    }

    /// Spends one unit; returns false if nothing was left.
    pub fn consume(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }
}
