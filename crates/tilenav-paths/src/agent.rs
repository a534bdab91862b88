//! Agent classes and the keys blocking maps are cached under.

/// How an agent moves across terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Propulsion {
    Wheeled,
    Tracked,
    Legged,
    HalfTracked,
    Hover,
    Lift,
    Propeller,
}

/// The kind of terrain a propulsion can traverse. Propulsions in the same
/// domain see the same blocking tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Land,
    Air,
    Water,
    /// Land and water.
    Amphibious,
}

impl Propulsion {
    /// The traversal domain of this propulsion.
    pub const fn domain(self) -> Domain {
        match self {
            Self::Lift => Domain::Air,
            Self::Propeller => Domain::Water,
            Self::Hover => Domain::Amphibious,
            Self::Wheeled | Self::Tracked | Self::Legged | Self::HalfTracked => Domain::Land,
        }
    }
}

/// Why the agent is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    /// Plain movement. Computer-controlled agents avoid threatened tiles.
    #[default]
    Move,
    /// Moving to attack; enemy structures are passable targets.
    Attack,
    /// Moving while treating every structure as an obstacle.
    Block,
}

/// Everything about an agent that influences which tiles block it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentClass {
    pub propulsion: Propulsion,
    pub owner: u8,
    pub move_type: MoveType,
}

impl AgentClass {
    #[inline]
    pub const fn new(propulsion: Propulsion, owner: u8, move_type: MoveType) -> Self {
        Self {
            propulsion,
            owner,
            move_type,
        }
    }
}

/// Cache key of a blocking map: the agent class plus the tick it was
/// built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockingKey {
    pub game_time: u32,
    pub class: AgentClass,
}

impl BlockingKey {
    #[inline]
    pub const fn new(game_time: u32, class: AgentClass) -> Self {
        Self { game_time, class }
    }

    /// Whether a map built for `self` can serve a request for `other`.
    ///
    /// Both keys must belong to the same tick and propulsion domain. Air
    /// units ignore owner and move type; everything else must also match
    /// on both.
    pub fn is_equivalent(&self, other: &BlockingKey) -> bool {
        if self.game_time != other.game_time {
            return false;
        }
        let domain = self.class.propulsion.domain();
        if domain != other.class.propulsion.domain() {
            return false;
        }
        if domain == Domain::Air {
            return true;
        }
        self.class.owner == other.class.owner && self.class.move_type == other.class.move_type
    }
}
