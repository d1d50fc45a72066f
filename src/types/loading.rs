//! Load identifiers: product loads, combinations, live loads, limit states.

use serde::{Deserialize, Serialize};

/// Individual product (dead/prestress/time-dependent) load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductLoadType {
    /// Girder self-weight.
    Girder,
    /// Pretensioning.
    Pretension,
    /// Construction load.
    Construction,
    /// Diaphragms.
    Diaphragm,
    /// Cast deck slab.
    Slab,
    /// Haunch (slab pad).
    SlabPad,
    /// Stay-in-place deck panels.
    SlabPanel,
    /// Shear key.
    ShearKey,
    /// Longitudinal joint.
    LongitudinalJoint,
    /// Post-tensioning primary effects.
    PostTensioning,
    /// Post-tensioning secondary effects.
    SecondaryEffects,
    /// Traffic barrier.
    TrafficBarrier,
    /// Sidewalk.
    Sidewalk,
    /// Overlay.
    Overlay,
    /// Creep (time-step analysis).
    Creep,
    /// Shrinkage (time-step analysis).
    Shrinkage,
    /// Relaxation (time-step analysis).
    Relaxation,
    /// User-defined DC.
    UserDC,
    /// User-defined DW.
    UserDW,
    /// User-defined live load with impact.
    UserLLIM,
}

impl ProductLoadType {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Girder => "Girder",
            Self::Pretension => "Pretension",
            Self::Construction => "Construction",
            Self::Diaphragm => "Diaphragm",
            Self::Slab => "Slab",
            Self::SlabPad => "Haunch",
            Self::SlabPanel => "Slab Panel",
            Self::ShearKey => "Shear Key",
            Self::LongitudinalJoint => "Longitudinal Joint",
            Self::PostTensioning => "Post-Tensioning",
            Self::SecondaryEffects => "Secondary Effects",
            Self::TrafficBarrier => "Traffic Barrier",
            Self::Sidewalk => "Sidewalk",
            Self::Overlay => "Overlay",
            Self::Creep => "Creep",
            Self::Shrinkage => "Shrinkage",
            Self::Relaxation => "Relaxation",
            Self::UserDC => "User DC",
            Self::UserDW => "User DW",
            Self::UserLLIM => "User LL+IM",
        }
    }
}

impl std::fmt::Display for ProductLoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Load combination (sum of product loads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CombinedLoadType {
    /// Dead load, components.
    DC,
    /// Dead load, wearing surface.
    DW,
    /// Creep.
    CR,
    /// Shrinkage.
    SH,
    /// Relaxation.
    RE,
    /// Secondary prestress.
    PS,
}

impl std::fmt::Display for CombinedLoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DC => "DC",
            Self::DW => "DW",
            Self::CR => "CR",
            Self::SH => "SH",
            Self::RE => "RE",
            Self::PS => "PS",
        };
        f.write_str(name)
    }
}

/// Live load model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LiveLoadType {
    /// Design live load.
    Design,
    /// Fatigue live load.
    Fatigue,
    /// Permit live load.
    Permit,
    /// Pedestrian load.
    Pedestrian,
    /// Legal load rating, routine commercial traffic.
    LegalRoutine,
    /// Legal load rating, specialized hauling vehicles.
    LegalSpecial,
    /// Legal load rating, emergency vehicles.
    LegalEmergency,
    /// Permit load rating, routine.
    PermitRoutine,
    /// Permit load rating, special.
    PermitSpecial,
}

impl LiveLoadType {
    /// Name used as the prefix of per-vehicle graph names.
    pub fn base_name(self) -> &'static str {
        match self {
            Self::Design => "Design",
            Self::Fatigue => "Fatigue",
            Self::Permit => "Permit",
            Self::Pedestrian => "Pedestrian",
            Self::LegalRoutine => "Legal Rating (Routine)",
            Self::LegalSpecial => "Legal Rating (Special)",
            Self::LegalEmergency => "Legal Rating (Emergency)",
            Self::PermitRoutine => "Permit Rating (Routine)",
            Self::PermitSpecial => "Permit Rating (Special)",
        }
    }
}

impl std::fmt::Display for LiveLoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.base_name())
    }
}

/// Design or rating limit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum LimitState {
    ServiceI,
    ServiceIA,
    ServiceIII,
    StrengthI,
    StrengthII,
    FatigueI,
    StrengthIInventory,
    StrengthIOperating,
    StrengthILegalRoutine,
    StrengthILegalSpecial,
    StrengthILegalEmergency,
    StrengthIIPermitRoutine,
    StrengthIIPermitSpecial,
    ServiceIIIInventory,
    ServiceIIIOperating,
    ServiceIIILegalRoutine,
    ServiceIIILegalSpecial,
    ServiceIIILegalEmergency,
    ServiceIPermitRoutine,
    ServiceIPermitSpecial,
}

impl std::fmt::Display for LimitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ServiceI => "Service I",
            Self::ServiceIA => "Service IA",
            Self::ServiceIII => "Service III",
            Self::StrengthI => "Strength I",
            Self::StrengthII => "Strength II",
            Self::FatigueI => "Fatigue I",
            Self::StrengthIInventory => "Strength I (Inventory)",
            Self::StrengthIOperating => "Strength I (Operating)",
            Self::StrengthILegalRoutine => "Strength I (Legal Routine)",
            Self::StrengthILegalSpecial => "Strength I (Legal Special)",
            Self::StrengthILegalEmergency => "Strength I (Legal Emergency)",
            Self::StrengthIIPermitRoutine => "Strength II (Routine Permit)",
            Self::StrengthIIPermitSpecial => "Strength II (Special Permit)",
            Self::ServiceIIIInventory => "Service III (Inventory)",
            Self::ServiceIIIOperating => "Service III (Operating)",
            Self::ServiceIIILegalRoutine => "Service III (Legal Routine)",
            Self::ServiceIIILegalSpecial => "Service III (Legal Special)",
            Self::ServiceIIILegalEmergency => "Service III (Legal Emergency)",
            Self::ServiceIPermitRoutine => "Service I (Routine Permit)",
            Self::ServiceIPermitSpecial => "Service I (Special Permit)",
        };
        f.write_str(name)
    }
}

/// Load rating type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingType {
    /// Design load rating, inventory level.
    DesignInventory,
    /// Design load rating, operating level.
    DesignOperating,
    /// Legal load rating, routine.
    LegalRoutine,
    /// Legal load rating, special.
    LegalSpecial,
    /// Legal load rating, emergency.
    LegalEmergency,
    /// Permit load rating, routine.
    PermitRoutine,
    /// Permit load rating, special.
    PermitSpecial,
}

impl RatingType {
    /// Every rating type, in rating order.
    pub const ALL: [RatingType; 7] = [
        Self::DesignInventory,
        Self::DesignOperating,
        Self::LegalRoutine,
        Self::LegalSpecial,
        Self::LegalEmergency,
        Self::PermitRoutine,
        Self::PermitSpecial,
    ];

    /// Live load model rated by this rating type.
    pub fn live_load_type(self) -> LiveLoadType {
        match self {
            Self::DesignInventory | Self::DesignOperating => LiveLoadType::Design,
            Self::LegalRoutine => LiveLoadType::LegalRoutine,
            Self::LegalSpecial => LiveLoadType::LegalSpecial,
            Self::LegalEmergency => LiveLoadType::LegalEmergency,
            Self::PermitRoutine => LiveLoadType::PermitRoutine,
            Self::PermitSpecial => LiveLoadType::PermitSpecial,
        }
    }

    /// Strength limit state used for moment and shear rating.
    pub fn strength_limit_state(self) -> LimitState {
        match self {
            Self::DesignInventory => LimitState::StrengthIInventory,
            Self::DesignOperating => LimitState::StrengthIOperating,
            Self::LegalRoutine => LimitState::StrengthILegalRoutine,
            Self::LegalSpecial => LimitState::StrengthILegalSpecial,
            Self::LegalEmergency => LimitState::StrengthILegalEmergency,
            Self::PermitRoutine => LimitState::StrengthIIPermitRoutine,
            Self::PermitSpecial => LimitState::StrengthIIPermitSpecial,
        }
    }

    /// Service limit state used for stress rating.
    pub fn service_limit_state(self) -> LimitState {
        match self {
            Self::DesignInventory => LimitState::ServiceIIIInventory,
            Self::DesignOperating => LimitState::ServiceIIIOperating,
            Self::LegalRoutine => LimitState::ServiceIIILegalRoutine,
            Self::LegalSpecial => LimitState::ServiceIIILegalSpecial,
            Self::LegalEmergency => LimitState::ServiceIIILegalEmergency,
            Self::PermitRoutine => LimitState::ServiceIPermitRoutine,
            Self::PermitSpecial => LimitState::ServiceIPermitSpecial,
        }
    }

    /// Label used in rating graph names.
    pub fn label(self) -> &'static str {
        match self {
            Self::DesignInventory => "Inventory",
            Self::DesignOperating => "Operating",
            other => other.live_load_type().base_name(),
        }
    }

    /// True for the two design rating levels.
    pub fn is_design(self) -> bool {
        matches!(self, Self::DesignInventory | Self::DesignOperating)
    }
}

/// Action being rated by a rating-factor graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RatingAction {
    /// Flexure.
    Moment,
    /// Shear.
    Shear,
    /// Service stress.
    Stress,
}

impl std::fmt::Display for RatingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Moment => write!(f, "Moment"),
            Self::Shear => write!(f, "Shear"),
            Self::Stress => write!(f, "Stress"),
        }
    }
}
