//! Physical actions a graph can plot.

use serde::{Deserialize, Serialize};

/// Kind of result plotted on the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Axial force.
    Axial,
    /// Shear force.
    Shear,
    /// Bending moment.
    Moment,
    /// Vertical deflection.
    Deflection,
    /// Lateral (X) deflection.
    XDeflection,
    /// Rotation.
    Rotation,
    /// Flexural stress at a stress location.
    Stress,
    /// Concentrated support reaction.
    Reaction,
    /// Load rating factor.
    LoadRating,
    /// Principal tensile stress in the web.
    PrincipalWebStress,
}

impl ActionKind {
    /// Every action, in declaration order.
    pub const ALL: [ActionKind; 10] = [
        Self::Axial,
        Self::Shear,
        Self::Moment,
        Self::Deflection,
        Self::XDeflection,
        Self::Rotation,
        Self::Stress,
        Self::Reaction,
        Self::LoadRating,
        Self::PrincipalWebStress,
    ];

    const fn slot(self) -> usize {
        self as usize
    }

    /// Parse an action from its display name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "axial" => Some(Self::Axial),
            "shear" => Some(Self::Shear),
            "moment" => Some(Self::Moment),
            "deflection" => Some(Self::Deflection),
            "xdeflection" | "deflection x" => Some(Self::XDeflection),
            "rotation" => Some(Self::Rotation),
            "stress" => Some(Self::Stress),
            "reaction" => Some(Self::Reaction),
            "loadrating" | "rating factor" => Some(Self::LoadRating),
            "webstress" | "web stress" => Some(Self::PrincipalWebStress),
            _ => None,
        }
    }

    /// True for actions whose plots fan out per stress location.
    pub fn is_stress(self) -> bool {
        matches!(self, Self::Stress | Self::PrincipalWebStress)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Axial => "Axial",
            Self::Shear => "Shear",
            Self::Moment => "Moment",
            Self::Deflection => "Deflection",
            Self::XDeflection => "Deflection X",
            Self::Rotation => "Rotation",
            Self::Stress => "Stress",
            Self::Reaction => "Reaction",
            Self::LoadRating => "Rating Factor",
            Self::PrincipalWebStress => "Web Stress",
        };
        f.write_str(name)
    }
}

const ACTION_COUNT: usize = ActionKind::ALL.len();

/// Fixed-size set of [`ActionKind`]s, one membership flag per action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSet([bool; ACTION_COUNT]);

impl ActionSet {
    /// No actions.
    pub const EMPTY: Self = Self([false; ACTION_COUNT]);

    /// The standard product-load actions (no lateral deflection, no rating).
    pub const STANDARD: Self = Self::EMPTY
        .with(ActionKind::Axial)
        .with(ActionKind::Shear)
        .with(ActionKind::Moment)
        .with(ActionKind::Deflection)
        .with(ActionKind::Rotation)
        .with(ActionKind::Stress)
        .with(ActionKind::Reaction);

    /// Standard actions without reactions.
    pub const STANDARD_NO_REACTION: Self = Self::STANDARD.without(ActionKind::Reaction);

    /// Standard actions plus lateral deflection.
    pub const STANDARD_WITH_X: Self = Self::STANDARD.with(ActionKind::XDeflection);

    /// Forces, reactions and stress.
    pub const FORCE_STRESS: Self = Self::EMPTY
        .with(ActionKind::Axial)
        .with(ActionKind::Shear)
        .with(ActionKind::Moment)
        .with(ActionKind::Stress)
        .with(ActionKind::Reaction);

    /// Forces, reactions and displacements.
    pub const FORCE_DEFLECTION: Self = Self::EMPTY
        .with(ActionKind::Axial)
        .with(ActionKind::Shear)
        .with(ActionKind::Moment)
        .with(ActionKind::Deflection)
        .with(ActionKind::Rotation)
        .with(ActionKind::Reaction);

    /// Moment and shear.
    pub const MOMENT_SHEAR: Self = Self::EMPTY.with(ActionKind::Moment).with(ActionKind::Shear);

    /// A set holding exactly one action.
    pub const fn only(action: ActionKind) -> Self {
        Self::EMPTY.with(action)
    }

    /// Copy of this set with `action` added.
    pub const fn with(self, action: ActionKind) -> Self {
        let mut flags = self.0;
        flags[action.slot()] = true;
        Self(flags)
    }

    /// Copy of this set with `action` removed.
    pub const fn without(self, action: ActionKind) -> Self {
        let mut flags = self.0;
        flags[action.slot()] = false;
        Self(flags)
    }

    /// Union of two sets.
    pub const fn union(self, other: Self) -> Self {
        let mut flags = self.0;
        let mut i = 0;
        while i < ACTION_COUNT {
            flags[i] = flags[i] || other.0[i];
            i += 1;
        }
        Self(flags)
    }

    /// Membership test.
    pub const fn contains(self, action: ActionKind) -> bool {
        self.0[action.slot()]
    }

    /// True if no actions are present.
    pub const fn is_empty(self) -> bool {
        let mut i = 0;
        while i < ACTION_COUNT {
            if self.0[i] {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Actions in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
