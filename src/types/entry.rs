//! Graph catalog entries.
//!
//! A [`GraphEntry`] describes one plottable quantity: what kind of result it
//! is, which load it selects, and the intervals and actions it applies to.
//! The kind and the load selector are always constructed together, so an
//! entry can never be read through the wrong selector arm.

use serde::{Deserialize, Serialize};

use super::action::{ActionKind, ActionSet};
use super::interval::{IntervalFilter, IntervalSet};
use super::loading::{CombinedLoadType, LimitState, LiveLoadType, ProductLoadType, RatingAction};

/// Caller-assigned entry identifier, unique within one catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(pub u32);

impl GraphId {
    /// Create a new graph id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for GraphId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of plottable quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    /// Individual product load.
    Product,
    /// Load combination.
    Combined,
    /// Live load envelope (LL+IM).
    LiveLoad,
    /// Response to a single vehicle of a live load model.
    VehicularLiveLoad {
        /// Index of the vehicle within its live load model.
        vehicle: usize,
    },
    /// Limit state envelope.
    LimitState,
    /// Limit state demand used in a specification check.
    Demand,
    /// Allowable value for a specification check.
    Allowable,
    /// Nominal resistance.
    Capacity,
    /// Minimum required resistance.
    MinCapacity,
    /// Load rating factor.
    Rating {
        /// Action being rated.
        action: RatingAction,
        /// Rated vehicle, or `None` for the governing envelope.
        vehicle: Option<usize>,
    },
    /// Web shear stress component.
    WebShearStress,
    /// Web axial stress component.
    WebAxialStress,
    /// Principal web stress demand.
    PrincipalWebStressDemand,
    /// Principal web stress limit.
    PrincipalWebStressLimit,
    /// Stresses caused by deck shrinkage.
    DeckShrinkage,
}

impl GraphKind {
    /// True if `selector` is a legal load selector for this kind.
    pub fn accepts(&self, selector: &LoadSelector) -> bool {
        match self {
            Self::Product => matches!(selector, LoadSelector::Product(_)),
            Self::Combined => matches!(selector, LoadSelector::Combined(_)),
            Self::LiveLoad | Self::VehicularLiveLoad { .. } => {
                matches!(selector, LoadSelector::LiveLoad(_))
            }
            Self::LimitState
            | Self::Demand
            | Self::Allowable
            | Self::Capacity
            | Self::MinCapacity
            | Self::Rating { .. }
            | Self::PrincipalWebStressDemand
            | Self::PrincipalWebStressLimit => matches!(selector, LoadSelector::LimitState(_)),
            Self::WebShearStress | Self::WebAxialStress => matches!(
                selector,
                LoadSelector::Product(_) | LoadSelector::LiveLoad(_) | LoadSelector::LimitState(_)
            ),
            Self::DeckShrinkage => {
                matches!(selector, LoadSelector::Product(ProductLoadType::Shrinkage))
            }
        }
    }

    /// Kinds whose reactions are always drawn as a min/max pair.
    pub fn is_bound_pair(&self) -> bool {
        matches!(
            self,
            Self::LimitState
                | Self::Demand
                | Self::Allowable
                | Self::Capacity
                | Self::MinCapacity
                | Self::LiveLoad
                | Self::VehicularLiveLoad { .. }
        )
    }

    /// Kinds drawn as a heavier reference line.
    pub fn is_limit_line(&self) -> bool {
        matches!(self, Self::Allowable | Self::Capacity)
    }

    /// Live load kinds, which only exist once live load is applied.
    pub fn is_live_load(&self) -> bool {
        matches!(self, Self::LiveLoad | Self::VehicularLiveLoad { .. })
    }
}

/// The load an entry plots. Exactly one arm is populated and it always
/// agrees with the entry's [`GraphKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoadSelector {
    /// A limit state.
    LimitState(LimitState),
    /// A load combination.
    Combined(CombinedLoadType),
    /// A product load.
    Product(ProductLoadType),
    /// A live load model.
    LiveLoad(LiveLoadType),
}

/// Entry construction error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntryError {
    /// The selector arm does not belong to the kind.
    #[error("Load selector {selector:?} is not valid for graph kind {kind:?}")]
    SelectorMismatch {
        /// Requested kind.
        kind: GraphKind,
        /// Offending selector.
        selector: LoadSelector,
    },
}

/// One plottable quantity in the catalog.
///
/// Entries are immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEntry {
    id: GraphId,
    name: String,
    kind: GraphKind,
    selector: LoadSelector,
    intervals: IntervalSet,
    actions: ActionSet,
}

impl GraphEntry {
    /// Build an entry, checking that `selector` agrees with `kind`.
    pub fn try_new(
        id: GraphId,
        name: impl Into<String>,
        kind: GraphKind,
        selector: LoadSelector,
        intervals: IntervalSet,
        actions: ActionSet,
    ) -> Result<Self, EntryError> {
        if !kind.accepts(&selector) {
            return Err(EntryError::SelectorMismatch { kind, selector });
        }
        Ok(Self {
            id,
            name: name.into(),
            kind,
            selector,
            intervals,
            actions,
        })
    }

    /// Product load entry.
    pub fn product(
        id: GraphId,
        name: impl Into<String>,
        load: ProductLoadType,
        intervals: IntervalSet,
        actions: ActionSet,
    ) -> Self {
        Self::raw(id, name, GraphKind::Product, LoadSelector::Product(load), intervals, actions)
    }

    /// Load combination entry.
    pub fn combined(
        id: GraphId,
        name: impl Into<String>,
        load: CombinedLoadType,
        intervals: IntervalSet,
        actions: ActionSet,
    ) -> Self {
        Self::raw(id, name, GraphKind::Combined, LoadSelector::Combined(load), intervals, actions)
    }

    /// Live load envelope entry, or a single-vehicle entry when `vehicle` is set.
    pub fn live_load(
        id: GraphId,
        name: impl Into<String>,
        load: LiveLoadType,
        vehicle: Option<usize>,
        intervals: IntervalSet,
        actions: ActionSet,
    ) -> Self {
        let kind = match vehicle {
            Some(vehicle) => GraphKind::VehicularLiveLoad { vehicle },
            None => GraphKind::LiveLoad,
        };
        Self::raw(id, name, kind, LoadSelector::LiveLoad(load), intervals, actions)
    }

    /// Limit state family entry (envelope, demand, allowable, capacity, ...).
    ///
    /// Returns an error if `kind` is not a limit-state kind.
    pub fn limit_state(
        id: GraphId,
        name: impl Into<String>,
        kind: GraphKind,
        limit_state: LimitState,
        intervals: IntervalSet,
        actions: ActionSet,
    ) -> Result<Self, EntryError> {
        Self::try_new(id, name, kind, LoadSelector::LimitState(limit_state), intervals, actions)
    }

    /// Load rating factor entry. The action set is derived from `action`.
    pub fn rating(
        id: GraphId,
        name: impl Into<String>,
        limit_state: LimitState,
        action: RatingAction,
        vehicle: Option<usize>,
        intervals: IntervalSet,
    ) -> Self {
        Self::raw(
            id,
            name,
            GraphKind::Rating { action, vehicle },
            LoadSelector::LimitState(limit_state),
            intervals,
            ActionSet::only(ActionKind::LoadRating),
        )
    }

    /// Deck shrinkage stress entry.
    pub fn deck_shrinkage(id: GraphId, name: impl Into<String>, intervals: IntervalSet) -> Self {
        Self::raw(
            id,
            name,
            GraphKind::DeckShrinkage,
            LoadSelector::Product(ProductLoadType::Shrinkage),
            intervals,
            ActionSet::only(ActionKind::Stress),
        )
    }

    fn raw(
        id: GraphId,
        name: impl Into<String>,
        kind: GraphKind,
        selector: LoadSelector,
        intervals: IntervalSet,
        actions: ActionSet,
    ) -> Self {
        debug_assert!(kind.accepts(&selector));
        Self {
            id,
            name: name.into(),
            kind,
            selector,
            intervals,
            actions,
        }
    }

    /// Entry id.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Display name (not unique).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry kind.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Load selector.
    pub fn selector(&self) -> LoadSelector {
        self.selector
    }

    /// Intervals this entry applies to.
    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }

    /// Actions this entry can plot.
    pub fn actions(&self) -> ActionSet {
        self.actions
    }

    /// Catalog query predicate.
    pub fn matches(&self, interval: IntervalFilter, action: ActionKind) -> bool {
        self.actions.contains(action) && interval.matches(&self.intervals)
    }

    /// Copy of this entry with more intervals.
    pub fn with_intervals<I: IntoIterator<Item = super::IntervalIndex>>(mut self, extra: I) -> Self {
        self.intervals.extend(extra);
        self
    }
}
