use std::fs;
use std::path::Path;

use mapforge::ForgeError;
use mapforge::catalog::{Catalog, generate_catalog};

fn seed(dir: &Path) {
    fs::write(
        dir.join("rulesmd.ini"),
        "; rules\n[#include]\n1=rulesext.ini\n\n[VehicleTypes]\n0=HTNK\n1=MTNK\n1=MTNK\n+=Mig-Wh\n\n[Warheads]\n0=AP\n\n[Junk\nthis line is junk\n",
    )
    .expect("rules");
    fs::write(
        dir.join("rulesext.ini"),
        "[VehicleTypes]\n+=YTNK\n+=HTNK\n\n[BuildingTypes]\n0=NAHAND\n1=GAWEAP\n",
    )
    .expect("rules ext");
    fs::write(dir.join("evamd.ini"), "[DialogList]\n0=EVA_ConstructionComplete\n").expect("eva");
    fs::write(dir.join("soundmd.ini"), "[SoundList]\n0=GenericClick\n1=120mmFire\n").expect("sound");
}

#[test]
fn lists_follow_includes_and_auto_keys() {
    let dir = tempfile::tempdir().expect("temp dir");
    seed(dir.path());
    let catalog = Catalog::load(dir.path(), "md").expect("load");

    let vehicles = catalog.list("vehicle_types").expect("vehicles");
    assert_eq!(vehicles.names, vec!["HTNK", "MTNK", "Mig-Wh", "YTNK"]);
    let buildings = catalog.list("building_types").expect("buildings");
    assert_eq!(buildings.names, vec!["NAHAND", "GAWEAP"]);
    assert!(catalog.list("animations").is_some_and(|l| l.names.is_empty()));
    assert_eq!(
        catalog.list("eva").map(|l| l.names.clone()),
        Some(vec!["EVA_ConstructionComplete".to_string()])
    );
}

#[test]
fn generated_source_has_one_module_per_list() {
    let dir = tempfile::tempdir().expect("temp dir");
    seed(dir.path());
    let dest = dir.path().join("gen").join("catalog.rs");
    generate_catalog(dir.path(), &dest, "md").expect("generate");
    let code = fs::read_to_string(&dest).expect("written");

    assert!(code.contains("pub mod vehicle_types {"));
    assert!(code.contains("    pub const HTNK: i32 = 0;"));
    assert!(code.contains("    /// `Mig-Wh`\n    pub const MIG_WH: i32 = 2;"));
    assert!(code.contains("    pub const _120MMFIRE: i32 = 1;"));
    assert!(code.contains("pub mod sounds {"));
    assert!(code.contains("pub const NAMES: &[&str] = &[\"NAHAND\", \"GAWEAP\"];"));
}

#[test]
fn missing_source_file_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    seed(dir.path());
    fs::remove_file(dir.path().join("soundmd.ini")).expect("remove");
    match Catalog::load(dir.path(), "md") {
        Err(ForgeError::FileNotFound(path)) => assert!(path.ends_with("soundmd.ini")),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}
