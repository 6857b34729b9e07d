use std::fs;

use engine_tiers::config::load_families;
use engine_tiers::{Catalog, CatalogError, GameMode, ProgressSnapshot, TechState, Treasury};

#[test]
fn shipped_families_load_in_file_order() {
    let catalog = Catalog::load("configs/families").expect("families");
    let letters: Vec<char> = catalog.families().iter().map(|f| f.letter()).collect();
    assert_eq!(letters, vec!['H', 'K', 'S']);

    let solid = catalog.family('S').expect("solid");
    assert_eq!(solid.tier_count(), 1);
    assert_eq!(solid.max_ignitions(0), 0);
    assert_eq!(solid.min_throttle(), 1.0);
    assert!(catalog.family('Q').is_none());
}

#[test]
fn single_toml_file_loads_one_family() {
    let configs = load_families("configs/families/kerolox.toml").expect("kerolox");
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].tech_levels.len(), 3);
}

#[test]
fn yaml_catalog_loads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("families.yaml");
    fs::write(
        &path,
        r#"
- letter: M
  description: Methalox
  Propellants: { LqdMethane: 0.22, LqdOxygen: 0.78 }
  minTf: 0.4
  TechLevel:
    - maxThrust: 200.0
      isp: [[0.0, 350.0], [1.0, 310.0]]
      maxIgnitions: 4
      mass: 1.4
      cost: 700.0
      toolCost: 5000.0
      burnTime: 300.0
"#,
    )
    .expect("write yaml");

    let catalog = Catalog::load(&path).expect("yaml catalog");
    let methalox = catalog.family('M').expect("methalox");
    assert_eq!(methalox.isp_vac(0), 350.0);
    assert!((methalox.min_thrust(0) - 80.0).abs() < 1e-9);
}

#[test]
fn duplicate_letters_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = fs::read_to_string("configs/families/solid.toml").expect("solid");
    fs::write(dir.path().join("a.toml"), &source).expect("write a");
    fs::write(dir.path().join("b.toml"), &source).expect("write b");

    assert!(matches!(
        Catalog::load(dir.path()),
        Err(CatalogError::DuplicateLetter('S'))
    ));
}

#[test]
fn invalid_family_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = fs::read_to_string("configs/families/solid.toml").expect("solid");
    let broken = source.replace("maxThrust = 250.0", "maxThrust = -250.0");
    fs::write(dir.path().join("solid.toml"), broken).expect("write");

    assert!(matches!(
        Catalog::load(dir.path()),
        Err(CatalogError::Family(_))
    ));
}

#[test]
fn missing_required_field_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = fs::read_to_string("configs/families/solid.toml").expect("solid");
    let broken = source.replace("toolCost = 800.0", "");
    fs::write(dir.path().join("solid.toml"), broken).expect("write");

    assert!(matches!(
        Catalog::load(dir.path()),
        Err(CatalogError::Config(_))
    ));
}

#[test]
fn progress_survives_a_save_and_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let progress_path = dir.path().join("progress.json");

    let mut catalog = Catalog::load("configs/families").expect("families");
    let registry = TechState::with_researched(GameMode::Career, ["basicRocketry"]);
    let mut treasury = Treasury::new(10_000.0);
    catalog
        .family_mut('K')
        .expect("kerolox")
        .unlock(2, &registry, &mut treasury);
    assert_eq!(treasury.total_spent(), 4_000.0);

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.unlocked_for('K'), 2);
    snapshot.write(&progress_path).expect("write progress");

    let restored = ProgressSnapshot::read(&progress_path).expect("read progress");
    assert_eq!(restored, snapshot);
    let reloaded = Catalog::load_with_progress("configs/families", &restored).expect("reload");
    let kerolox = reloaded.family('K').expect("kerolox");
    assert_eq!(kerolox.unlocked_count(), 2);
    assert_eq!(kerolox.unlock_cost(2), 12_000.0);
    assert_eq!(reloaded.family('H').expect("hypergolic").unlocked_count(), 0);
}

#[test]
fn missing_progress_file_is_a_fresh_start() {
    let dir = tempfile::tempdir().expect("tempdir");
    let snapshot = ProgressSnapshot::read(dir.path().join("none.json")).expect("fresh");
    assert_eq!(snapshot, ProgressSnapshot::default());
    assert_eq!(snapshot.unlocked_for('K'), 0);
}
