//! Interface categories
//!
//! Every interface a plugin offers belongs to exactly one category. The
//! string form of a category names its output directory and its rst
//! labels, and it is also the sort key for the interfaces index.

use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Category of capability an interface provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceType {
    /// Collision checking engine
    CollisionChecker,
    /// Robot controller
    Controller,
    /// Inverse kinematics solver
    IkSolver,
    /// Kinematic body
    KinBody,
    /// Physics engine
    PhysicsEngine,
    /// Motion or grasp planner
    Planner,
    /// Problem instance (module hosting commands)
    ProblemInstance,
    /// Robot
    Robot,
    /// Sensor
    Sensor,
    /// Sensor system
    SensorSystem,
    /// Simulator
    Simulator,
    /// Trajectory
    Trajectory,
    /// Viewer
    Viewer,
}

impl InterfaceType {
    /// Every interface type, in sorted order
    pub const ALL: [InterfaceType; 13] = [
        InterfaceType::CollisionChecker,
        InterfaceType::Controller,
        InterfaceType::IkSolver,
        InterfaceType::KinBody,
        InterfaceType::PhysicsEngine,
        InterfaceType::Planner,
        InterfaceType::ProblemInstance,
        InterfaceType::Robot,
        InterfaceType::Sensor,
        InterfaceType::SensorSystem,
        InterfaceType::Simulator,
        InterfaceType::Trajectory,
        InterfaceType::Viewer,
    ];

    /// Get the string form used for labels and paths
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceType::CollisionChecker => "CollisionChecker",
            InterfaceType::Controller => "Controller",
            InterfaceType::IkSolver => "IkSolver",
            InterfaceType::KinBody => "KinBody",
            InterfaceType::PhysicsEngine => "PhysicsEngine",
            InterfaceType::Planner => "Planner",
            InterfaceType::ProblemInstance => "ProblemInstance",
            InterfaceType::Robot => "Robot",
            InterfaceType::Sensor => "Sensor",
            InterfaceType::SensorSystem => "SensorSystem",
            InterfaceType::Simulator => "Simulator",
            InterfaceType::Trajectory => "Trajectory",
            InterfaceType::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Ord for InterfaceType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for InterfaceType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Error returned when a string names no interface type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interface type: {0}")]
pub struct UnknownInterfaceType(pub String);

impl FromStr for InterfaceType {
    type Err = UnknownInterfaceType;

    /// Case-insensitive; `_` and `-` separators are ignored so that
    /// `ik_solver`, `iksolver` and `IkSolver` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        InterfaceType::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownInterfaceType(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for InterfaceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
