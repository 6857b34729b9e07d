use std::collections::BTreeMap;

use engine_tiers::primitives::FloatCurve;
use engine_tiers::{
    Family, FundsLedger, GameMode, TechLevel, TechRegistry, TechState, TransactionReason, Treasury,
};

fn level(entry_cost: f64, tech: Option<&str>) -> TechLevel {
    TechLevel {
        tech_required: tech.map(str::to_string),
        entry_cost,
        max_thrust: 100.0,
        isp: FloatCurve::from_points(&[(0.0, 340.0), (1.0, 300.0)]),
        max_ignitions: 5,
        mass: 1.0,
        cost: 1000.0,
        tool_cost: 5000.0,
        burn_time: 300.0,
    }
}

fn three_tiers(tier1_tech: Option<&str>) -> Family {
    Family::new(
        'U',
        "unlock ladder",
        BTreeMap::new(),
        0.2,
        vec![
            level(0.0, None),
            level(100.0, tier1_tech),
            level(300.0, None),
        ],
    )
    .expect("family")
}

#[test]
fn full_unlock_pays_every_entry_cost() {
    let mut family = three_tiers(None);
    let registry = TechState::new(GameMode::Career);
    let mut treasury = Treasury::unlimited();

    assert_eq!(family.unlock_cost(2), 400.0);
    family.unlock(2, &registry, &mut treasury);

    assert_eq!(family.unlocked_count(), 3);
    assert_eq!(treasury.total_spent(), 400.0);
    assert!(
        treasury
            .transactions()
            .iter()
            .all(|t| t.reason == TransactionReason::RnDPartPurchase)
    );
}

#[test]
fn missing_tech_stops_after_ungated_tiers() {
    let mut family = three_tiers(Some("advancedRocketry"));
    let registry = TechState::new(GameMode::Career);
    let mut treasury = Treasury::new(1_000.0);

    family.unlock(2, &registry, &mut treasury);

    assert_eq!(family.unlocked_count(), 1);
    assert_eq!(treasury.total_spent(), 0.0);
    assert_eq!(treasury.funds(), 1_000.0);
}

#[test]
fn insufficient_funds_keep_prior_progress() {
    let mut family = three_tiers(None);
    let registry = TechState::new(GameMode::Career);
    let mut treasury = Treasury::new(250.0);

    family.unlock(2, &registry, &mut treasury);

    assert_eq!(family.unlocked_count(), 2);
    assert_eq!(treasury.total_spent(), 100.0);
    assert_eq!(treasury.funds(), 150.0);
    assert_eq!(family.unlock_cost(2), 300.0);
}

#[test]
fn unlocking_an_unlocked_tier_is_a_no_op() {
    let mut family = three_tiers(None).with_unlocked(2);
    let registry = TechState::new(GameMode::Career);
    let mut treasury = Treasury::new(10_000.0);

    assert_eq!(family.unlock_cost(0), 0.0);
    assert_eq!(family.unlock_cost(1), 0.0);
    family.unlock(1, &registry, &mut treasury);

    assert_eq!(family.unlocked_count(), 2);
    assert!(treasury.transactions().is_empty());
}

#[test]
fn out_of_range_unlock_does_nothing() {
    let mut family = three_tiers(None);
    let registry = TechState::new(GameMode::Career);
    let mut treasury = Treasury::unlimited();

    assert!(family.unlock_cost(3).is_nan());
    assert!(family.unlock_cost(-1).is_nan());
    family.unlock(3, &registry, &mut treasury);
    family.unlock(-1, &registry, &mut treasury);

    assert_eq!(family.unlocked_count(), 0);
    assert!(treasury.transactions().is_empty());
}

#[test]
fn researching_tech_resumes_progress() {
    let mut family = three_tiers(Some("advancedRocketry"));
    let mut registry = TechState::new(GameMode::Career);
    let mut treasury = Treasury::unlimited();

    family.unlock(2, &registry, &mut treasury);
    assert_eq!(family.unlocked_count(), 1);
    assert_eq!(family.unlock_cost(2), 400.0);

    registry.research("advancedRocketry");
    family.unlock(2, &registry, &mut treasury);
    assert_eq!(family.unlocked_count(), 3);
    assert_eq!(treasury.total_spent(), 400.0);
}

#[test]
fn preview_matches_what_unlock_spends() {
    for unlocked in 0..3 {
        for target in 0..3 {
            let mut family = three_tiers(None).with_unlocked(unlocked);
            let registry = TechState::new(GameMode::Career);
            let mut treasury = Treasury::unlimited();
            let preview = family.unlock_cost(target);
            family.unlock(target, &registry, &mut treasury);
            assert_eq!(preview, treasury.total_spent(), "{unlocked} -> {target}");
        }
    }
}

/// Registry that only ever answers through the trait object.
struct Everything;

impl TechRegistry for Everything {
    fn game_mode(&self) -> GameMode {
        GameMode::Career
    }

    fn is_available(&self, _tech: &str) -> bool {
        true
    }
}

#[test]
fn capabilities_work_as_trait_objects() {
    let mut family = three_tiers(Some("anything"));
    let registry: &dyn TechRegistry = &Everything;
    let mut treasury = Treasury::new(500.0);
    let ledger: &mut dyn FundsLedger = &mut treasury;

    family.unlock(2, registry, ledger);

    assert_eq!(family.unlocked_count(), 3);
    assert_eq!(treasury.funds(), 100.0);
}
