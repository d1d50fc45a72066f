//! Catalog population from bridge metadata.
//!
//! ## Algorithm
//!
//! 1. Read the timeline and features of the girder (pedestrian, sidewalk and
//!    shear key flags are OR-ed over the whole girder line)
//! 2. Derive the interval sets: all (release..end), live load, load rating,
//!    railing system, spec check (without release)
//! 3. Add entries in a fixed order with sequential ids starting at zero:
//!    product loads, live loads, ratings, combinations, live load envelopes,
//!    limit states and capacities, demand/limit pairs, web stress
//!
//! The order fixes both the ids and the default selection, so two builds
//! over the same metadata produce identical catalogs.

use crate::source::BridgeMetadata;
use crate::types::{
    ActionKind, ActionSet, BridgeFeatures, CombinedLoadType, EntryError, GirderKey, GraphEntry,
    GraphId, GraphKind, GroupSelection, IntervalIndex, IntervalSet, IntervalTimeline, LimitState,
    LiveLoadType, ProductLoadType, RatingAction, RatingType, WebStressCheck,
};

use super::{CatalogError, GraphCatalog};

/// Vehicle name used as a placeholder when a live load model has no vehicles.
pub const NO_LIVE_LOAD_DEFINED: &str = "No Live Load Defined";

/// Error type for catalog rebuilds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RebuildError {
    /// Bridge metadata lookup failed.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Catalog insertion failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Entry construction failed.
    #[error(transparent)]
    Entry(#[from] EntryError),
}

impl RebuildError {
    /// Create from a metadata error.
    pub fn from_metadata<E: std::error::Error>(e: E) -> Self {
        Self::Metadata(e.to_string())
    }
}

/// Merge the temporary support removal intervals at or after `loading` into
/// `base`.
///
/// The result is ascending and free of duplicates.
pub fn add_ts_removal_intervals(
    loading: IntervalIndex,
    base: &IntervalSet,
    ts_removals: &[IntervalIndex],
) -> IntervalSet {
    let mut merged = base.clone();
    merged.extend(ts_removals.iter().copied().filter(|tsr| loading <= *tsr));
    merged
}

/// Interval sets shared by many entries.
struct IntervalSets {
    all: IntervalSet,
    all_with_tsr: IntervalSet,
    live_load: IntervalSet,
    rating: IntervalSet,
    railing: IntervalSet,
    allowable: IntervalSet,
}

impl IntervalSets {
    fn new(timeline: &IntervalTimeline) -> Self {
        let n = timeline.interval_count;
        let all = IntervalSet::range(timeline.release, n);
        let all_with_tsr =
            add_ts_removal_intervals(timeline.release, &all, &timeline.temporary_support_removals);
        Self {
            all,
            all_with_tsr,
            live_load: IntervalSet::range(timeline.live_load, n),
            rating: IntervalSet::range(timeline.load_rating, n),
            railing: IntervalSet::range(timeline.railing_system, n),
            // Release stresses are checked against casting yard limits, which
            // have no catalog entry.
            allowable: timeline
                .spec_check_intervals
                .iter()
                .copied()
                .filter(|i| *i != timeline.release)
                .collect(),
        }
    }
}

/// Builds the catalog for one girder.
///
/// Ids are assigned sequentially in population order.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: GraphCatalog,
    next_id: u32,
}

impl CatalogBuilder {
    /// Populate a catalog from bridge metadata.
    pub fn build<M: BridgeMetadata>(
        metadata: &M,
        girder: GirderKey,
    ) -> Result<GraphCatalog, RebuildError> {
        let timeline = metadata.timeline(girder).map_err(RebuildError::from_metadata)?;
        let mut features = metadata.features(girder).map_err(RebuildError::from_metadata)?;

        let line = metadata
            .girder_line(girder.girder, GroupSelection::All)
            .map_err(RebuildError::from_metadata)?;
        for key in line.into_iter().filter(|k| *k != girder) {
            let other = metadata.features(key).map_err(RebuildError::from_metadata)?;
            features.pedestrian_load |= other.pedestrian_load;
            features.sidewalk |= other.sidewalk;
            features.shear_key |= other.shear_key;
        }

        let sets = IntervalSets::new(&timeline);
        let mut builder = Self::default();
        builder.product_loads(&features, &sets)?;
        builder.live_loads(&features, &sets)?;
        builder.ratings(&features, &sets)?;
        builder.combinations(&features, &sets)?;
        builder.live_load_envelopes(&features, &sets)?;
        builder.limit_states(&features, &sets)?;
        builder.demand_and_limits(&features, &sets)?;
        builder.web_stress(&features, &sets)?;
        builder.rating_demand_and_limits(&features, &sets)?;

        tracing::debug!(%girder, entries = builder.catalog.len(), "Graph catalog populated");
        Ok(builder.catalog)
    }

    fn next_id(&mut self) -> GraphId {
        let id = GraphId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, entry: GraphEntry) -> Result<(), RebuildError> {
        self.catalog.add_entry(entry)?;
        Ok(())
    }

    fn product(
        &mut self,
        load: ProductLoadType,
        intervals: &IntervalSet,
        actions: ActionSet,
    ) -> Result<(), RebuildError> {
        let id = self.next_id();
        self.push(GraphEntry::product(id, load.name(), load, intervals.clone(), actions))
    }

    fn limit_state(
        &mut self,
        name: impl Into<String>,
        kind: GraphKind,
        limit_state: LimitState,
        intervals: &IntervalSet,
        actions: ActionSet,
    ) -> Result<(), RebuildError> {
        let id = self.next_id();
        let entry = GraphEntry::limit_state(id, name, kind, limit_state, intervals.clone(), actions)?;
        self.push(entry)
    }

    fn live_load(
        &mut self,
        name: impl Into<String>,
        load: LiveLoadType,
        vehicle: Option<usize>,
        intervals: &IntervalSet,
        actions: ActionSet,
    ) -> Result<(), RebuildError> {
        let id = self.next_id();
        self.push(GraphEntry::live_load(id, name, load, vehicle, intervals.clone(), actions))
    }

    fn product_loads(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        let actions = ActionSet::STANDARD_WITH_X;

        self.product(ProductLoadType::Girder, &sets.all, actions)?;
        self.product(ProductLoadType::Pretension, &sets.all, actions)?;
        if f.construction_load {
            self.product(ProductLoadType::Construction, &sets.all, actions)?;
        }
        self.product(ProductLoadType::Diaphragm, &sets.all_with_tsr, actions)?;
        if f.has_deck {
            self.product(ProductLoadType::Slab, &sets.all_with_tsr, actions)?;
            self.product(ProductLoadType::SlabPad, &sets.all_with_tsr, actions)?;
        }
        if f.deck_panels {
            self.product(ProductLoadType::SlabPanel, &sets.all_with_tsr, actions)?;
        }
        if f.shear_key {
            self.product(ProductLoadType::ShearKey, &sets.all_with_tsr, actions)?;
        }
        if f.longitudinal_joint {
            self.product(ProductLoadType::LongitudinalJoint, &sets.all_with_tsr, actions)?;
        }
        if f.deck_shrinkage {
            let id = self.next_id();
            self.push(GraphEntry::deck_shrinkage(id, "Deck Shrinkage", sets.railing.clone()))?;
        }
        if f.spliced {
            self.product(ProductLoadType::PostTensioning, &sets.all, actions)?;
            self.product(
                ProductLoadType::SecondaryEffects,
                &sets.all,
                ActionSet::FORCE_STRESS.with(ActionKind::XDeflection),
            )?;
        }
        self.product(ProductLoadType::TrafficBarrier, &sets.all, actions)?;
        if f.sidewalk {
            self.product(ProductLoadType::Sidewalk, &sets.all, actions)?;
        }
        self.product(ProductLoadType::Overlay, &sets.all, actions)?;
        if f.time_step {
            self.product(ProductLoadType::Creep, &sets.all, actions)?;
            self.product(ProductLoadType::Shrinkage, &sets.all, actions)?;
            self.product(ProductLoadType::Relaxation, &sets.all, actions)?;
        }
        self.product(ProductLoadType::UserDC, &sets.all, actions)?;
        self.product(ProductLoadType::UserDW, &sets.all, actions)?;
        self.product(ProductLoadType::UserLLIM, &sets.all, actions)
    }

    fn live_loads(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        let mut models = vec![LiveLoadType::Design, LiveLoadType::Fatigue];
        if f.permit_live_load {
            models.push(LiveLoadType::Permit);
        }

        for model in models {
            let actions = match model {
                LiveLoadType::Permit => ActionSet::FORCE_DEFLECTION,
                _ => ActionSet::STANDARD,
            };
            let base = model.base_name();
            for (vehicle, name) in defined_vehicles(f, model) {
                self.live_load(format!("{base} - {name}"), model, Some(vehicle), &sets.live_load, actions)?;
            }
            self.live_load(format!("{base} - LL+IM"), model, None, &sets.live_load, ActionSet::STANDARD)?;
        }
        Ok(())
    }

    fn rating_factors(
        &mut self,
        prefix: &str,
        options: &crate::types::RatingOptions,
        vehicle: Option<usize>,
        intervals: &IntervalSet,
    ) -> Result<(), RebuildError> {
        let rating = options.rating;
        let mut rated = vec![(RatingAction::Moment, rating.strength_limit_state())];
        if options.rate_for_shear {
            rated.push((RatingAction::Shear, rating.strength_limit_state()));
        }
        if options.rate_for_stress {
            rated.push((RatingAction::Stress, rating.service_limit_state()));
        }
        for (action, limit_state) in rated {
            let id = self.next_id();
            let name = format!("{prefix}, {action}");
            self.push(GraphEntry::rating(id, name, limit_state, action, vehicle, intervals.clone()))?;
        }
        Ok(())
    }

    fn ratings(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        for rating in RatingType::ALL {
            let Some(options) = f.rating(rating).copied() else {
                continue;
            };
            let model = rating.live_load_type();
            let label = rating.label();

            self.rating_factors(label, &options, None, &sets.rating)?;

            for (vehicle, name) in defined_vehicles(f, model) {
                let prefix = format!("{label} - {name}");
                self.live_load(prefix.clone(), model, Some(vehicle), &sets.rating, ActionSet::STANDARD)?;
                self.rating_factors(&prefix, &options, Some(vehicle), &sets.rating)?;
            }

            if !rating.is_design() {
                let name = format!("{} - LL+IM", model.base_name());
                self.live_load(name, model, None, &sets.rating, ActionSet::STANDARD)?;
            }
        }
        Ok(())
    }

    fn combinations(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        let mut loads = vec![CombinedLoadType::DC, CombinedLoadType::DW];
        if f.time_step {
            loads.extend([
                CombinedLoadType::CR,
                CombinedLoadType::SH,
                CombinedLoadType::RE,
                CombinedLoadType::PS,
            ]);
        }
        for load in loads {
            let id = self.next_id();
            self.push(GraphEntry::combined(
                id,
                load.to_string(),
                load,
                sets.all.clone(),
                ActionSet::STANDARD_WITH_X,
            ))?;
        }
        Ok(())
    }

    fn live_load_envelopes(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        if f.pedestrian_load {
            self.live_load("PL", LiveLoadType::Pedestrian, None, &sets.live_load, ActionSet::STANDARD_WITH_X)?;
        }
        self.live_load("LL+IM (Design)", LiveLoadType::Design, None, &sets.live_load, ActionSet::STANDARD)?;
        if f.fatigue_limit_state {
            self.live_load("LL+IM (Fatigue)", LiveLoadType::Fatigue, None, &sets.live_load, ActionSet::STANDARD)?;
        }
        if f.permit_live_load {
            self.live_load("LL+IM (Permit)", LiveLoadType::Permit, None, &sets.live_load, ActionSet::STANDARD)?;
        }
        for rating in RatingType::ALL.into_iter().filter(|r| !r.is_design()) {
            if f.rating(rating).is_none() {
                continue;
            }
            let name = format!("LL+IM ({})", envelope_label(rating));
            self.live_load(name, rating.live_load_type(), None, &sets.rating, ActionSet::STANDARD)?;
        }
        Ok(())
    }

    fn limit_states(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        let stress = ActionSet::only(ActionKind::Stress);
        let shear = ActionSet::only(ActionKind::Shear);

        self.limit_state(
            "Service I (Design)",
            GraphKind::LimitState,
            LimitState::ServiceI,
            &sets.all,
            ActionSet::STANDARD_NO_REACTION.with(ActionKind::XDeflection),
        )?;
        if !f.fatigue_limit_state {
            self.limit_state("Service IA (Design)", GraphKind::LimitState, LimitState::ServiceIA, &sets.live_load, stress)?;
        }
        self.limit_state(
            "Service III (Design)",
            GraphKind::LimitState,
            LimitState::ServiceIII,
            &sets.live_load,
            stress.with(ActionKind::Shear),
        )?;
        self.limit_state(
            "Strength I (Design)",
            GraphKind::LimitState,
            LimitState::StrengthI,
            &sets.live_load,
            ActionSet::MOMENT_SHEAR,
        )?;
        self.limit_state(
            "Strength I Capacity (Design)",
            GraphKind::Capacity,
            LimitState::StrengthI,
            &sets.live_load,
            shear,
        )?;
        if f.fatigue_limit_state {
            self.limit_state("Fatigue I", GraphKind::LimitState, LimitState::FatigueI, &sets.live_load, stress)?;
        }
        if f.strength_ii {
            self.limit_state(
                "Strength II (Permit)",
                GraphKind::LimitState,
                LimitState::StrengthII,
                &sets.live_load,
                ActionSet::MOMENT_SHEAR,
            )?;
            self.limit_state(
                "Strength II Capacity (Permit)",
                GraphKind::Capacity,
                LimitState::StrengthII,
                &sets.live_load,
                shear,
            )?;
        }

        for rating in RatingType::ALL {
            if f.rating(rating).is_none() {
                continue;
            }
            let base = match rating {
                RatingType::PermitRoutine | RatingType::PermitSpecial => "Strength II",
                _ => "Strength I",
            };
            let label = rating_label(rating);
            let limit_state = rating.strength_limit_state();
            self.limit_state(
                format!("{base} ({label})"),
                GraphKind::LimitState,
                limit_state,
                &sets.rating,
                ActionSet::MOMENT_SHEAR,
            )?;
            self.limit_state(
                format!("{base} Capacity ({label})"),
                GraphKind::Capacity,
                limit_state,
                &sets.rating,
                shear,
            )?;
        }

        let moment = ActionSet::only(ActionKind::Moment);
        self.limit_state("Moment Capacity", GraphKind::Capacity, LimitState::StrengthI, &sets.live_load, moment)?;
        self.limit_state("Min Moment Capacity", GraphKind::MinCapacity, LimitState::StrengthI, &sets.live_load, moment)
    }

    fn demand_and_limit(
        &mut self,
        name: &str,
        suffix: &str,
        limit_state: LimitState,
        intervals: &IntervalSet,
    ) -> Result<(), RebuildError> {
        let stress = ActionSet::only(ActionKind::Stress);
        self.limit_state(format!("{name} Demand{suffix}"), GraphKind::Demand, limit_state, intervals, stress)?;
        self.limit_state(format!("{name} Limit{suffix}"), GraphKind::Allowable, limit_state, intervals, stress)
    }

    fn demand_and_limits(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        self.limit_state(
            "Service I Demand (Design)",
            GraphKind::Demand,
            LimitState::ServiceI,
            &sets.all,
            ActionSet::only(ActionKind::Stress)
                .with(ActionKind::Deflection)
                .with(ActionKind::XDeflection),
        )?;
        self.limit_state(
            "Service I Limit (Design)",
            GraphKind::Allowable,
            LimitState::ServiceI,
            &sets.allowable,
            ActionSet::only(ActionKind::Stress),
        )?;
        if !f.fatigue_limit_state {
            self.demand_and_limit("Service IA", " (Design)", LimitState::ServiceIA, &sets.live_load)?;
        }
        self.demand_and_limit("Service III", " (Design)", LimitState::ServiceIII, &sets.live_load)
    }

    fn web_stress(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        let Some(check) = f.web_stress_check else {
            return Ok(());
        };
        let web = ActionSet::only(ActionKind::PrincipalWebStress);

        if check == WebStressCheck::TimeStep {
            let loads = web_stress_product_loads(f);
            for (kind, suffix) in [(GraphKind::WebShearStress, "Shear"), (GraphKind::WebAxialStress, "Axial")] {
                for (load, tsr) in &loads {
                    let intervals = if *tsr { &sets.all_with_tsr } else { &sets.all };
                    let id = self.next_id();
                    let entry = GraphEntry::try_new(
                        id,
                        format!("{} - {suffix}", load.name()),
                        kind,
                        crate::types::LoadSelector::Product(*load),
                        intervals.clone(),
                        web,
                    )?;
                    self.push(entry)?;
                }
            }
            for (kind, name) in [
                (GraphKind::WebShearStress, "LL+IM Web Shear Stress (Design)"),
                (GraphKind::WebAxialStress, "LL+IM Web Axial Stress (Design)"),
            ] {
                let id = self.next_id();
                let entry = GraphEntry::try_new(
                    id,
                    name,
                    kind,
                    crate::types::LoadSelector::LiveLoad(LiveLoadType::Design),
                    sets.live_load.clone(),
                    web,
                )?;
                self.push(entry)?;
            }
        }

        for (kind, name) in [
            (GraphKind::WebShearStress, "Service III Web Shear Stress (Design)"),
            (GraphKind::WebAxialStress, "Service III Web Axial Stress (Design)"),
            (GraphKind::PrincipalWebStressDemand, "Service III Principal Stress Demand (Design)"),
            (GraphKind::PrincipalWebStressLimit, "Service III Principal Stress Limit (Design)"),
        ] {
            self.limit_state(name, kind, LimitState::ServiceIII, &sets.live_load, web)?;
        }
        Ok(())
    }

    fn rating_demand_and_limits(&mut self, f: &BridgeFeatures, sets: &IntervalSets) -> Result<(), RebuildError> {
        if f.fatigue_limit_state {
            self.demand_and_limit("Fatigue I", "", LimitState::FatigueI, &sets.live_load)?;
        }
        for rating in [
            RatingType::DesignInventory,
            RatingType::LegalRoutine,
            RatingType::LegalSpecial,
            RatingType::LegalEmergency,
        ] {
            if f.rating(rating).is_none() {
                continue;
            }
            let suffix = format!(" ({})", rating_label(rating));
            self.demand_and_limit("Service III", &suffix, rating.service_limit_state(), &sets.rating)?;
        }
        Ok(())
    }
}

/// Vehicles of a live load model with their vehicle index, skipping the
/// placeholder. Indices count the placeholder.
fn defined_vehicles(f: &BridgeFeatures, model: LiveLoadType) -> Vec<(usize, String)> {
    f.vehicle_names(model)
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() != NO_LIVE_LOAD_DEFINED)
        .map(|(i, name)| (i, name.clone()))
        .collect()
}

/// Product loads with web stress entries, and whether each one also
/// applies at temporary support removal.
fn web_stress_product_loads(f: &BridgeFeatures) -> Vec<(ProductLoadType, bool)> {
    let mut loads = vec![
        (ProductLoadType::Girder, false),
        (ProductLoadType::Pretension, false),
        (ProductLoadType::Diaphragm, true),
    ];
    if f.has_deck {
        loads.push((ProductLoadType::Slab, true));
        loads.push((ProductLoadType::SlabPad, true));
    }
    if f.spliced {
        loads.push((ProductLoadType::PostTensioning, false));
        loads.push((ProductLoadType::SecondaryEffects, false));
    }
    loads.push((ProductLoadType::TrafficBarrier, false));
    if f.sidewalk {
        loads.push((ProductLoadType::Sidewalk, false));
    }
    loads.extend([
        (ProductLoadType::Overlay, false),
        (ProductLoadType::Creep, false),
        (ProductLoadType::Shrinkage, false),
        (ProductLoadType::Relaxation, false),
        (ProductLoadType::UserDC, false),
        (ProductLoadType::UserDW, false),
        (ProductLoadType::UserLLIM, false),
    ]);
    loads
}

fn rating_label(rating: RatingType) -> &'static str {
    match rating {
        RatingType::DesignInventory => "Design Rating, Inventory",
        RatingType::DesignOperating => "Design Rating, Operating",
        RatingType::LegalRoutine => "Legal Rating, Routine",
        RatingType::LegalSpecial => "Legal Rating, Special",
        RatingType::LegalEmergency => "Legal Rating, Emergency",
        RatingType::PermitRoutine => "Routine Permit Rating",
        RatingType::PermitSpecial => "Special Permit Rating",
    }
}

fn envelope_label(rating: RatingType) -> &'static str {
    match rating {
        RatingType::PermitRoutine => "Permit Rating, Routine",
        RatingType::PermitSpecial => "Permit Rating, Special",
        other => rating_label(other),
    }
}
