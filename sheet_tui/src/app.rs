//! Application state

use crate::guide::Guide;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sheet_core::buff::{aggregate_snapshot, BuffResult};
use sheet_core::combat::{resolve_snapshot, DamageResult};
use sheet_core::config::SheetConfig;
use sheet_core::profile::{
    build_random_profile, validate_profile, ProfileField, ProfileForm, ProfileSummary,
    ValidationReport,
};
use sheet_core::storage::{
    AttackRecord, CalcSnapshot, DamageSnapshot, FileStore, PageKey, PageSnapshot,
    ResistanceRecord, SnapshotStore, MAX_ROWS,
};
use sheet_core::types::DamageEffect;
use std::fs;
use std::path::PathBuf;

/// File the profile summary is exported to, inside the data directory
pub const SUMMARY_FILE: &str = "profile_summary.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Damage,
    Buffs,
    Profile,
    Guide,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Damage, Tab::Buffs, Tab::Profile, Tab::Guide, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Damage => "Damage",
            Tab::Buffs => "Buffs",
            Tab::Profile => "Profile",
            Tab::Guide => "Guide",
            Tab::Help => "Help",
        }
    }
}

/// A focusable row of the damage page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageRow {
    Value(usize),
    Element(usize),
    TrueDamage(usize),
    PierceDamage(usize),
    AntiTrue(usize),
    AntiPierce(usize),
    Multiplier(usize),
    /// (attack, resistance row)
    ResistancePercent(usize, usize),
    ResistanceFixed(usize, usize),
}

impl DamageRow {
    /// Index of the attack the row belongs to
    pub fn attack(&self) -> usize {
        match *self {
            DamageRow::Value(a)
            | DamageRow::Element(a)
            | DamageRow::TrueDamage(a)
            | DamageRow::PierceDamage(a)
            | DamageRow::AntiTrue(a)
            | DamageRow::AntiPierce(a)
            | DamageRow::Multiplier(a)
            | DamageRow::ResistancePercent(a, _)
            | DamageRow::ResistanceFixed(a, _) => a,
        }
    }
}

/// A focusable row of the buffs page; modifier rows count from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcRow {
    Base,
    Count,
    Percent(usize),
    Fixed(usize),
}

/// Characters a number field accepts
fn accepts_numeric(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

pub struct App {
    pub current_tab: Tab,
    pub config: SheetConfig,
    store: FileStore,
    // Damage page
    pub damage: DamageSnapshot,
    pub damage_results: Vec<DamageResult>,
    pub damage_cursor: usize,
    // Buffs page
    pub calc: CalcSnapshot,
    pub buff_result: BuffResult,
    pub calc_cursor: usize,
    // Profile page
    pub profile: ProfileForm,
    pub report: ValidationReport,
    pub summary: ProfileSummary,
    pub profile_cursor: usize,
    // Guide page
    pub guide: Guide,
    pub guide_cursor: usize,
    /// Last action feedback shown in the footer
    pub status: Option<String>,
    rng: StdRng,
}

impl App {
    pub fn new(config: SheetConfig, store: FileStore) -> Self {
        let damage = store.load::<DamageSnapshot>().normalized();
        let calc: CalcSnapshot = store.load();
        let profile = ProfileForm::new(store.load());

        let guide = Guide::from_config(config.guide.content_dir.as_deref(), config.guide.single_open);

        let report = validate_profile(&profile.snapshot, &config.rules);
        let summary = ProfileSummary::from_snapshot(&profile.snapshot);

        log::info!("Loaded sheet data from {}", store.dir().display());

        App {
            current_tab: Tab::Damage,
            damage_results: resolve_snapshot(&damage),
            damage,
            damage_cursor: 0,
            buff_result: aggregate_snapshot(&calc),
            calc,
            calc_cursor: 0,
            report,
            summary,
            profile,
            profile_cursor: 0,
            guide,
            guide_cursor: 0,
            status: None,
            config,
            store,
            rng: StdRng::from_entropy(),
        }
    }

    /// Use a fixed seed for random profiles
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn data_dir(&self) -> &std::path::Path {
        self.store.dir()
    }

    // ---------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    fn row_count(&self) -> usize {
        match self.current_tab {
            Tab::Damage => self.damage_rows().len(),
            Tab::Buffs => self.calc_rows().len(),
            Tab::Profile => ProfileField::all().len(),
            Tab::Guide => self.guide.sections.len(),
            Tab::Help => 0,
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        match self.current_tab {
            Tab::Damage => Some(&mut self.damage_cursor),
            Tab::Buffs => Some(&mut self.calc_cursor),
            Tab::Profile => Some(&mut self.profile_cursor),
            Tab::Guide => Some(&mut self.guide_cursor),
            Tab::Help => None,
        }
    }

    pub fn on_up(&mut self) {
        if let Some(cursor) = self.cursor_mut() {
            if *cursor > 0 {
                *cursor -= 1;
            }
        }
    }

    pub fn on_down(&mut self) {
        let count = self.row_count();
        if let Some(cursor) = self.cursor_mut() {
            if *cursor + 1 < count {
                *cursor += 1;
            }
        }
    }

    fn clamp_cursor(&mut self) {
        let count = self.row_count();
        if let Some(cursor) = self.cursor_mut() {
            *cursor = (*cursor).min(count.saturating_sub(1));
        }
    }

    pub fn on_left(&mut self) {
        self.cycle_choice(false);
    }

    pub fn on_right(&mut self) {
        self.cycle_choice(true);
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Guide => self.guide.toggle(self.guide_cursor),
            Tab::Damage if self.focused_is_checkbox() => self.toggle_focused_checkbox(),
            _ => self.on_down(),
        }
    }

    // ---------------------------------------------------------------
    // Rows and focus
    // ---------------------------------------------------------------

    pub fn damage_rows(&self) -> Vec<DamageRow> {
        let mut rows = Vec::new();
        for (a, record) in self.damage.attacks.iter().enumerate() {
            rows.extend([
                DamageRow::Value(a),
                DamageRow::Element(a),
                DamageRow::TrueDamage(a),
                DamageRow::PierceDamage(a),
                DamageRow::AntiTrue(a),
                DamageRow::AntiPierce(a),
                DamageRow::Multiplier(a),
            ]);
            for r in 0..record.resistances.len() {
                rows.push(DamageRow::ResistancePercent(a, r));
                rows.push(DamageRow::ResistanceFixed(a, r));
            }
        }
        rows
    }

    pub fn focused_damage_row(&self) -> Option<DamageRow> {
        self.damage_rows().get(self.damage_cursor).copied()
    }

    pub fn calc_rows(&self) -> Vec<CalcRow> {
        let mut rows = vec![CalcRow::Base, CalcRow::Count];
        for i in 1..=self.calc.count() {
            rows.push(CalcRow::Percent(i));
            rows.push(CalcRow::Fixed(i));
        }
        rows
    }

    pub fn focused_calc_row(&self) -> Option<CalcRow> {
        self.calc_rows().get(self.calc_cursor).copied()
    }

    pub fn focused_profile_field(&self) -> Option<ProfileField> {
        ProfileField::all().get(self.profile_cursor).copied()
    }

    fn focused_is_checkbox(&self) -> bool {
        matches!(
            self.focused_damage_row(),
            Some(
                DamageRow::TrueDamage(_)
                    | DamageRow::PierceDamage(_)
                    | DamageRow::AntiTrue(_)
                    | DamageRow::AntiPierce(_)
            )
        )
    }

    /// Text of the focused input and whether it only takes numbers
    fn focused_text_mut(&mut self) -> Option<(&mut String, bool)> {
        match self.current_tab {
            Tab::Damage => {
                let row = self.focused_damage_row()?;
                let record = self.damage.attacks.get_mut(row.attack())?;
                match row {
                    DamageRow::Value(_) => Some((&mut record.value, true)),
                    DamageRow::Multiplier(_) => Some((&mut record.resistance, true)),
                    DamageRow::ResistancePercent(_, r) => {
                        Some((&mut record.resistances.get_mut(r)?.percent, true))
                    }
                    DamageRow::ResistanceFixed(_, r) => {
                        Some((&mut record.resistances.get_mut(r)?.fixed, true))
                    }
                    _ => None,
                }
            }
            Tab::Buffs => {
                let row = self.focused_calc_row()?;
                let text = match row {
                    CalcRow::Base => &mut self.calc.base_value,
                    CalcRow::Count => &mut self.calc.buff_debuff_count,
                    CalcRow::Percent(i) => self
                        .calc
                        .buffs
                        .entry(CalcSnapshot::percent_key(i))
                        .or_default(),
                    CalcRow::Fixed(i) => self
                        .calc
                        .buffs
                        .entry(CalcSnapshot::fixed_key(i))
                        .or_default(),
                };
                Some((text, true))
            }
            Tab::Profile => {
                let field = self.focused_profile_field()?;
                if field.options().is_some() {
                    return None;
                }
                Some((self.profile.snapshot.get_mut(field), field.is_numeric()))
            }
            Tab::Guide | Tab::Help => None,
        }
    }

    // ---------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------

    /// Type a character into the focused field
    pub fn on_char(&mut self, c: char) {
        if c == ' ' {
            match self.current_tab {
                Tab::Guide => {
                    self.guide.toggle(self.guide_cursor);
                    return;
                }
                Tab::Damage if self.focused_is_checkbox() => {
                    self.toggle_focused_checkbox();
                    return;
                }
                _ => {}
            }
        }

        let edited = match self.focused_text_mut() {
            Some((text, numeric)) if !numeric || accepts_numeric(c) => {
                text.push(c);
                true
            }
            _ => false,
        };
        if edited {
            self.after_edit();
        }
    }

    pub fn on_backspace(&mut self) {
        let edited = match self.focused_text_mut() {
            Some((text, _)) => text.pop().is_some(),
            None => false,
        };
        if edited {
            self.after_edit();
        }
    }

    fn toggle_focused_checkbox(&mut self) {
        let Some(row) = self.focused_damage_row() else {
            return;
        };
        let Some(record) = self.damage.attacks.get_mut(row.attack()) else {
            return;
        };
        match row {
            DamageRow::TrueDamage(_) => record.toggle_effect(DamageEffect::TrueDamage),
            DamageRow::PierceDamage(_) => record.toggle_effect(DamageEffect::PierceDamage),
            DamageRow::AntiTrue(_) => record.defense.anti_true = !record.defense.anti_true,
            DamageRow::AntiPierce(_) => record.defense.anti_pierce = !record.defense.anti_pierce,
            _ => return,
        }
        self.after_edit();
    }

    fn cycle_choice(&mut self, forward: bool) {
        match self.current_tab {
            Tab::Damage => {
                let Some(DamageRow::Element(a)) = self.focused_damage_row() else {
                    return;
                };
                if let Some(record) = self.damage.attacks.get_mut(a) {
                    record.damage_type = if forward {
                        record.damage_type.next()
                    } else {
                        record.damage_type.prev()
                    };
                    self.after_edit();
                }
            }
            Tab::Profile => {
                let Some(field) = self.focused_profile_field() else {
                    return;
                };
                let Some(options) = field.options() else {
                    return;
                };
                let current = self.profile.get(field);
                let next = match options.iter().position(|o| o.value == current) {
                    Some(i) if forward => (i + 1) % options.len(),
                    Some(i) => (i + options.len() - 1) % options.len(),
                    None if forward => 0,
                    None => options.len() - 1,
                };
                self.profile.set(field, options[next].value);
                self.after_edit();
            }
            _ => {}
        }
    }

    /// Recompute the current page and save it
    fn after_edit(&mut self) {
        match self.current_tab {
            Tab::Damage => {
                self.recompute_damage();
                persist(&mut self.store, &self.damage, &mut self.status);
            }
            Tab::Buffs => {
                self.recompute_calc();
                self.clamp_cursor();
                persist(&mut self.store, &self.calc, &mut self.status);
            }
            Tab::Profile => {
                self.recompute_profile();
                persist(&mut self.store, &self.profile.snapshot, &mut self.status);
            }
            Tab::Guide | Tab::Help => {}
        }
    }

    fn recompute_damage(&mut self) {
        self.damage_results = resolve_snapshot(&self.damage);
    }

    fn recompute_calc(&mut self) {
        self.buff_result = aggregate_snapshot(&self.calc);
    }

    fn recompute_profile(&mut self) {
        self.report = validate_profile(&self.profile.snapshot, &self.config.rules);
        self.summary = ProfileSummary::from_snapshot(&self.profile.snapshot);
    }

    // ---------------------------------------------------------------
    // Page actions
    // ---------------------------------------------------------------

    /// Add an attack (damage page) or a modifier row (buffs page)
    pub fn add_row(&mut self) {
        match self.current_tab {
            Tab::Damage => {
                if self.damage.attacks.len() >= MAX_ROWS {
                    self.status = Some(format!("At most {} attacks", MAX_ROWS));
                    return;
                }
                self.damage.attacks.push(AttackRecord::default());
                self.damage.attack_count = self.damage.attacks.len();
                self.status = Some(format!("Attack {} added", self.damage.attack_count));
                self.after_edit();
            }
            Tab::Buffs => {
                if self.calc.count() >= MAX_ROWS {
                    self.status = Some(format!("At most {} modifier rows", MAX_ROWS));
                    return;
                }
                let count = self.calc.count() + 1;
                self.calc.buff_debuff_count = count.to_string();
                self.after_edit();
            }
            _ => {}
        }
    }

    /// Add a resistance row to the focused attack
    pub fn add_defense(&mut self) {
        if self.current_tab != Tab::Damage {
            return;
        }
        let attack = self
            .focused_damage_row()
            .map(|r| r.attack())
            .unwrap_or(0);
        if let Some(record) = self.damage.attacks.get_mut(attack) {
            record.resistances.push(ResistanceRecord::default());
            self.after_edit();
        }
    }

    /// Remove the resistance row under the cursor
    pub fn remove_defense(&mut self) {
        if self.current_tab != Tab::Damage {
            return;
        }
        let (a, r) = match self.focused_damage_row() {
            Some(DamageRow::ResistancePercent(a, r)) | Some(DamageRow::ResistanceFixed(a, r)) => {
                (a, r)
            }
            _ => {
                self.status = Some("Select a defense row to remove".to_string());
                return;
            }
        };
        if let Some(record) = self.damage.attacks.get_mut(a) {
            if r < record.resistances.len() {
                record.resistances.remove(r);
            }
        }
        self.clamp_cursor();
        self.after_edit();
    }

    /// Clear the current page
    pub fn clear_page(&mut self) {
        match self.current_tab {
            Tab::Damage => {
                clear(&mut self.store, PageKey::Damage, &mut self.status);
                self.damage = DamageSnapshot::default().normalized();
                self.damage_cursor = 0;
                self.recompute_damage();
            }
            Tab::Buffs => {
                clear(&mut self.store, PageKey::Calc, &mut self.status);
                self.calc = CalcSnapshot::default();
                self.calc_cursor = 0;
                self.recompute_calc();
            }
            Tab::Profile => self.reset_profile(),
            Tab::Guide | Tab::Help => {}
        }
    }

    /// Blank the profile, keeping the old text undoable
    pub fn reset_profile(&mut self) {
        self.profile.reset();
        clear(&mut self.store, PageKey::Profile, &mut self.status);
        self.recompute_profile();
        self.status = Some("Profile reset".to_string());
    }

    pub fn undo_profile(&mut self) {
        if self.profile.undo() {
            self.recompute_profile();
            persist(&mut self.store, &self.profile.snapshot, &mut self.status);
            self.status = Some("Profile restored".to_string());
        } else {
            self.status = Some("Nothing to undo".to_string());
        }
    }

    /// Fill the profile with a random valid character
    pub fn build_profile(&mut self) {
        let built = build_random_profile(&mut self.rng);
        self.profile.replace(built);
        self.recompute_profile();
        persist(&mut self.store, &self.profile.snapshot, &mut self.status);
        self.status = Some(format!("Built {}", self.profile.snapshot.name));
    }

    pub fn save_profile(&mut self) {
        self.status = None;
        persist(&mut self.store, &self.profile.snapshot, &mut self.status);
        if self.status.is_none() {
            self.status = Some("Profile saved".to_string());
        }
    }

    /// Write the summary text next to the snapshots
    pub fn export_summary(&mut self) -> Option<PathBuf> {
        let path = self.store.dir().join(SUMMARY_FILE);
        let result = fs::create_dir_all(self.store.dir())
            .and_then(|_| fs::write(&path, self.summary.to_text()));
        match result {
            Ok(()) => {
                log::info!("Exported profile summary to {}", path.display());
                self.status = Some(format!("Summary written to {}", path.display()));
                Some(path)
            }
            Err(e) => {
                log::error!("Failed to export summary: {}", e);
                self.status = Some(format!("Export failed: {}", e));
                None
            }
        }
    }
}

fn persist<T: PageSnapshot>(store: &mut FileStore, snapshot: &T, status: &mut Option<String>) {
    if let Err(e) = store.save(snapshot) {
        log::error!("Failed to save {}: {}", T::PAGE, e);
        *status = Some(format!("Save failed: {}", e));
    }
}

fn clear(store: &mut FileStore, key: PageKey, status: &mut Option<String>) {
    if let Err(e) = store.clear(key) {
        log::error!("Failed to clear {}: {}", key, e);
        *status = Some(format!("Clear failed: {}", e));
    }
}
