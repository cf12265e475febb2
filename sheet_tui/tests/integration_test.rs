//! Integration test: Fill every page -> Calculate -> Save -> Reload -> Summarize
//!
//! This test walks the same path a session takes: form text goes into the
//! page snapshots, the calculators read it, and the saved files bring it back.

use sheet_core::buff::aggregate_snapshot;
use sheet_core::combat::{resolve_snapshot, DamageBranch, DamageResult};
use sheet_core::config::default_config;
use sheet_core::profile::{summary_text, validate_profile, ProfileField, ProfileSummary};
use sheet_core::storage::{
    AttackRecord, CalcSnapshot, DamageSnapshot, FileStore, PageKey, ProfileSnapshot,
    ResistanceRecord, SnapshotStore,
};
use sheet_core::types::{DamageEffect, DamageElement};
use std::fs;
use std::path::PathBuf;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn print_results(results: &[DamageResult]) {
    for (i, result) in results.iter().enumerate() {
        println!(
            "  Attack {}: {:.2} ({} damage) = {}",
            i + 1,
            result.damage,
            result.branch,
            result.formula
        );
    }
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sheet_it_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn damage_page() -> DamageSnapshot {
    let mut kinetic = AttackRecord {
        value: "100".to_string(),
        damage_type: DamageElement::Kinetic,
        ..Default::default()
    };
    kinetic.resistances.push(ResistanceRecord::new("20", "10"));

    let mut true_hit = AttackRecord {
        value: "100".to_string(),
        resistance: "0.5".to_string(),
        ..Default::default()
    };
    true_hit.toggle_effect(DamageEffect::TrueDamage);
    true_hit.resistances.push(ResistanceRecord::new("50", "30"));

    let mut blocked_pierce = AttackRecord {
        value: "100".to_string(),
        resistance: String::new(),
        ..Default::default()
    };
    blocked_pierce.toggle_effect(DamageEffect::PierceDamage);
    blocked_pierce.defense.anti_pierce = true;
    blocked_pierce.resistances.push(ResistanceRecord::new("50", "30"));

    DamageSnapshot {
        attack_count: 3,
        attacks: vec![kinetic, true_hit, blocked_pierce],
    }
}

fn calc_page() -> CalcSnapshot {
    let mut calc = CalcSnapshot {
        base_value: "100".to_string(),
        buff_debuff_count: "2".to_string(),
        ..Default::default()
    };
    calc.buffs.insert(CalcSnapshot::percent_key(1), "50".to_string());
    calc.buffs.insert(CalcSnapshot::fixed_key(1), "10".to_string());
    calc.buffs.insert(CalcSnapshot::percent_key(2), "-50".to_string());
    calc.buffs.insert(CalcSnapshot::fixed_key(2), "-30".to_string());
    calc
}

fn profile_page() -> ProfileSnapshot {
    let mut profile = ProfileSnapshot::default();
    for (field, value) in [
        (ProfileField::Name, "Mira"),
        (ProfileField::Day, "16"),
        (ProfileField::Month, "7"),
        (ProfileField::Year, "950"),
        (ProfileField::Gender, "female"),
        (ProfileField::Race, "human"),
        (ProfileField::Class, "tanker"),
        (ProfileField::Total, "100"),
        (ProfileField::Hp, "20"),
        (ProfileField::Spd, "10"),
        (ProfileField::Ref, "10"),
        (ProfileField::Pow, "30"),
        (ProfileField::Def, "30"),
        (ProfileField::Kinetic, "0.5"),
        (ProfileField::Pressure, "1.5"),
        (ProfileField::Force, "1"),
    ] {
        profile.set(field, value);
    }
    profile
}

#[test]
fn test_full_session_flow() {
    let config = default_config();
    let dir = temp_dir("session");

    // =========================================================================
    // STEP 1: Damage page
    // =========================================================================
    separator("STEP 1: Resolving Attacks");

    let damage = damage_page();
    let results = resolve_snapshot(&damage);
    print_results(&results);

    assert_eq!(results.len(), 3);
    // (100 * 80% - 10) * 1
    assert_eq!(results[0].branch, DamageBranch::Normal);
    assert!((results[0].damage - 70.0).abs() < 1e-9);
    // (100 - 30) * max(0.5, 1)
    assert_eq!(results[1].branch, DamageBranch::True);
    assert!((results[1].damage - 70.0).abs() < 1e-9);
    // Anti pierce falls back to the normal formula
    assert_eq!(results[2].branch, DamageBranch::Normal);
    assert!((results[2].damage - 20.0).abs() < 1e-9);

    // =========================================================================
    // STEP 2: Buff page
    // =========================================================================
    separator("STEP 2: Aggregating Buffs");

    let calc = calc_page();
    let buffs = aggregate_snapshot(&calc);
    println!("  {}", buffs.steps);

    assert!((buffs.after_percent - 75.0).abs() < 1e-9);
    assert!((buffs.final_value - 55.0).abs() < 1e-9);
    assert!(!buffs.show_warning);

    // =========================================================================
    // STEP 3: Profile page
    // =========================================================================
    separator("STEP 3: Validating Profile");

    let profile = profile_page();
    let report = validate_profile(&profile, &config.rules);
    for message in &report.messages {
        println!("  {:?} {}: {}", message.severity, message.field, message.text);
    }
    println!("  {}", report.unused_text());
    println!("  Resistance {}", report.resistance_text());

    assert!(report.valid, "unexpected messages: {:?}", report.messages);
    assert_eq!(report.unused, 0);
    assert_eq!(report.resistance_text(), "Total: 3.00");

    // =========================================================================
    // STEP 4: Save and reload
    // =========================================================================
    separator("STEP 4: Saving Pages");

    let mut store = FileStore::new(&dir);
    store.save(&damage).expect("save damage");
    store.save(&calc).expect("save calc");
    store.save(&profile).expect("save profile");

    for key in PageKey::all() {
        println!("  Wrote {}", store.path_for(*key).display());
        assert!(store.path_for(*key).exists());
    }

    let reopened = FileStore::new(&dir);
    let damage_back: DamageSnapshot = reopened.load();
    let calc_back: CalcSnapshot = reopened.load();
    let profile_back: ProfileSnapshot = reopened.load();

    assert_eq!(damage_back, damage);
    assert_eq!(calc_back, calc);
    assert_eq!(profile_back, profile);
    assert_eq!(resolve_snapshot(&damage_back), results);

    // =========================================================================
    // STEP 5: Summary
    // =========================================================================
    separator("STEP 5: Profile Summary");

    let text = summary_text(&profile_back);
    println!("{}", text);

    assert!(text.contains("Name: Mira"));
    assert!(text.contains("Birth date: 16/7/950 (Age: 28)"));
    assert!(text.contains("Gender: Female"));
    assert!(text.contains("Class: Tanker"));
    assert!(text.contains("Real HP: 160"));
    assert!(text.contains("Max skill and attack range: 50 m"));
    assert!(text.contains("Push resistance: 150 kg"));
    assert!(!text.contains("Shield push resistance"));
    assert!(text.contains("Kinetic: 0.50 - 50% less Kinetic damage taken"));

    let summary = ProfileSummary::from_snapshot(&profile_back);
    assert_eq!(summary.carry_weight, 160);
    assert_eq!(summary.reaction_speed, 20);

    // =========================================================================
    // STEP 6: Clearing
    // =========================================================================
    separator("STEP 6: Clearing Pages");

    let mut store = reopened;
    store.clear(PageKey::Damage).expect("clear damage");
    let cleared: DamageSnapshot = store.load();
    let cleared_results = resolve_snapshot(&cleared);
    println!("  Damage page back to {} blank attack", cleared_results.len());

    assert_eq!(cleared_results.len(), 1);
    assert!(cleared_results[0].damage.abs() < f64::EPSILON);
    // Other pages are untouched
    let calc_after: CalcSnapshot = store.load();
    assert_eq!(calc_after, calc);

    let _ = fs::remove_dir_all(&dir);
    println!("\n  Test passed successfully!");
}

#[test]
fn test_hand_edited_files_fall_back_per_field() {
    separator("Loading Hand-Edited Files");

    let dir = temp_dir("hand_edited");
    fs::create_dir_all(&dir).expect("create dir");
    let store = FileStore::new(&dir);

    // Numbers where text is expected, an unknown element and a bad count
    fs::write(
        store.path_for(PageKey::Damage),
        r#"{"attackCount": "two", "attacks": [{"value": 80, "damageType": "Plasma"}]}"#,
    )
    .expect("write damage");
    fs::write(store.path_for(PageKey::Calc), "not json at all").expect("write calc");

    let damage: DamageSnapshot = store.load();
    println!("  {:?}", damage);
    assert_eq!(damage.attack_count, 1);
    assert_eq!(damage.attacks[0].value, "80");
    assert_eq!(damage.attacks[0].damage_type, DamageElement::None);

    let results = resolve_snapshot(&damage);
    assert!((results[0].damage - 80.0).abs() < 1e-9);

    let calc: CalcSnapshot = store.load();
    assert_eq!(calc, CalcSnapshot::default());
    assert!((aggregate_snapshot(&calc).final_value).abs() < f64::EPSILON);

    let _ = fs::remove_dir_all(&dir);
}
