use engine_tiers::Catalog;

fn rel_close(actual: f64, expected: f64) -> bool {
    ((actual - expected) / expected).abs() < 1e-5
}

#[test]
fn mass_follows_power_law_on_every_tier() {
    let catalog = Catalog::load("configs/families").expect("families");
    for family in catalog.families() {
        for (index, level) in family.tech_levels().iter().enumerate() {
            let tier = index as i32;
            for ratio in [0.25, 0.6, 1.0, 1.7] {
                let thrust = level.max_thrust * ratio;
                let expected = level.mass * (thrust / level.max_thrust).powf(0.8);
                assert!(
                    rel_close(family.mass(tier, thrust), expected),
                    "{} tier {} at {} kN",
                    family.letter(),
                    tier,
                    thrust
                );
            }
        }
    }
}

#[test]
fn reference_thrust_is_a_fixed_point_of_scale() {
    let catalog = Catalog::load("configs/families").expect("families");
    for family in catalog.families() {
        for tier in 0..family.tier_count() as i32 {
            let thrust = family.max_thrust(tier);
            assert_eq!(family.scale_factor(tier, thrust), 1.0);
            assert!(rel_close(family.mass(tier, thrust), family.max_mass(tier)));
            assert!(rel_close(
                family.cost(tier, thrust, family.max_ignitions(tier)),
                family.max_cost(tier)
            ));
        }
    }
}

#[test]
fn cost_is_monotone_in_thrust_and_ignitions() {
    let catalog = Catalog::load("configs/families").expect("families");
    let kerolox = catalog.family('K').expect("kerolox");
    let tier = 2;
    let max = kerolox.max_thrust(tier);

    let mut previous = 0.0;
    for step in 1..=20 {
        let thrust = max * step as f64 / 10.0;
        let cost = kerolox.cost(tier, thrust, 3);
        let tooling = kerolox.tool_cost(tier, thrust, 3);
        assert!(cost >= previous, "cost fell at {thrust} kN");
        assert!(tooling >= 0.0);
        previous = cost;
    }

    let (mut previous_cost, mut previous_tooling) = (0.0, 0.0);
    for ignitions in 0..12 {
        let cost = kerolox.cost(tier, max, ignitions);
        let tooling = kerolox.tool_cost(tier, max, ignitions);
        assert!(cost >= previous_cost, "cost fell at {ignitions} ignitions");
        assert!(tooling >= previous_tooling, "tool cost fell at {ignitions} ignitions");
        previous_cost = cost;
        previous_tooling = tooling;
    }
}

#[test]
fn cost_exponents_match_formula() {
    let catalog = Catalog::load("configs/families").expect("families");
    let hypergolic = catalog.family('H').expect("hypergolic");
    let level = &hypergolic.tech_levels()[0];
    let thrust = 15.0;
    let rated = (4.0 + 1.0) / (level.max_ignitions as f64 + 1.0);
    let factor = (thrust / level.max_thrust).powf(1.2) * rated.powf(0.2);
    assert!(rel_close(hypergolic.cost(0, thrust, 4), factor * level.cost));
    assert!(rel_close(hypergolic.tool_cost(0, thrust, 4), factor * level.tool_cost));
    assert!(rel_close(
        hypergolic.scale_factor(0, thrust),
        (thrust / level.max_thrust).sqrt()
    ));
}
