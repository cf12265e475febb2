//! Page snapshots - The raw text of every form, as persisted
//!
//! Fields hold exactly what was typed. Numbers, booleans and `null` found in
//! a stored file are read back as their text form so that older saves that
//! wrote bare numbers still load.

use crate::calendar::BirthDate;
use crate::combat::Attack;
use crate::defense::Defense;
use crate::input::{integer_or, nonzero_number_or, number_or, parse_integer};
use crate::profile::{ProfileField, ResistanceTriple, StatAllocation};
use crate::types::{DamageEffect, DamageElement, Modifier, ResistanceEntry};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Most attack rows or modifier rows a page holds
pub const MAX_ROWS: usize = 100;

fn text_from_value<E: serde::de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(E::custom(format!("expected text, found {}", other))),
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text_from_value(Value::deserialize(deserializer)?)
}

fn text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    BTreeMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(k, v)| Ok((k, text_from_value(v)?)))
        .collect()
}

fn count_from_text<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let text = text_or_number(deserializer)?;
    Ok(parse_integer(&text).unwrap_or(1).clamp(0, MAX_ROWS as i64) as usize)
}

fn lenient_element<'de, D>(deserializer: D) -> Result<DamageElement, D::Error>
where
    D: Deserializer<'de>,
{
    let text = text_or_number(deserializer)?;
    Ok(DamageElement::all()
        .iter()
        .copied()
        .find(|e| e.name() == text)
        .unwrap_or_default())
}

fn lenient_effects<'de, D>(deserializer: D) -> Result<Vec<DamageEffect>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|v| serde_json::from_value::<DamageEffect>(v).ok())
        .collect())
}

fn one() -> String {
    "1".to_string()
}

fn zero() -> String {
    "0".to_string()
}

fn default_attack_count() -> usize {
    1
}

/// One row of a defense list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResistanceRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub percent: String,
    #[serde(deserialize_with = "text_or_number")]
    pub fixed: String,
}

impl ResistanceRecord {
    pub fn new(percent: &str, fixed: &str) -> Self {
        ResistanceRecord {
            percent: percent.to_string(),
            fixed: fixed.to_string(),
        }
    }

    pub fn entry(&self) -> ResistanceEntry {
        ResistanceEntry::new(number_or(&self.percent, 0.0), number_or(&self.fixed, 0.0))
    }
}

/// Defender flags that cancel attacker effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AntiFlags {
    pub anti_true: bool,
    pub anti_pierce: bool,
}

/// Form state of one attack and the defense it hits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttackRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub value: String,
    #[serde(deserialize_with = "lenient_element")]
    pub damage_type: DamageElement,
    #[serde(deserialize_with = "lenient_effects")]
    pub effect: Vec<DamageEffect>,
    pub defense: AntiFlags,
    /// Resistance multiplier text
    #[serde(deserialize_with = "text_or_number")]
    pub resistance: String,
    pub resistances: Vec<ResistanceRecord>,
}

impl Default for AttackRecord {
    fn default() -> Self {
        AttackRecord {
            value: zero(),
            damage_type: DamageElement::None,
            effect: Vec::new(),
            defense: AntiFlags::default(),
            resistance: one(),
            resistances: Vec::new(),
        }
    }
}

impl AttackRecord {
    /// Read the attack side of the row
    pub fn attack(&self) -> Attack {
        Attack::new(number_or(&self.value, 0.0))
            .with_element(self.damage_type)
            .with_effects(&self.effect)
    }

    /// Read the defense side of the row
    pub fn defense(&self) -> Defense {
        Defense {
            resistances: self.resistances.iter().map(ResistanceRecord::entry).collect(),
            multiplier: nonzero_number_or(&self.resistance, 1.0),
            anti_true: self.defense.anti_true,
            anti_pierce: self.defense.anti_pierce,
        }
    }

    pub fn has_effect(&self, effect: DamageEffect) -> bool {
        self.effect.contains(&effect)
    }

    /// Switch an effect on or off, keeping the stored order stable
    pub fn toggle_effect(&mut self, effect: DamageEffect) {
        if self.has_effect(effect) {
            self.effect.retain(|e| *e != effect);
        } else {
            self.effect.push(effect);
            self.effect.sort_by_key(|e| match e {
                DamageEffect::TrueDamage => 0,
                DamageEffect::PierceDamage => 1,
            });
        }
    }
}

/// The damage calculator page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageSnapshot {
    #[serde(deserialize_with = "count_from_text")]
    pub attack_count: usize,
    pub attacks: Vec<AttackRecord>,
}

impl Default for DamageSnapshot {
    fn default() -> Self {
        DamageSnapshot {
            attack_count: default_attack_count(),
            attacks: Vec::new(),
        }
    }
}

impl DamageSnapshot {
    /// Copy with exactly `attack_count` rows (between one and
    /// [`MAX_ROWS`]), padding with blank attacks
    pub fn normalized(&self) -> DamageSnapshot {
        let count = self.attack_count.clamp(1, MAX_ROWS);
        let mut attacks = self.attacks.clone();
        attacks.truncate(count);
        attacks.resize_with(count, AttackRecord::default);
        DamageSnapshot {
            attack_count: count,
            attacks,
        }
    }
}

/// The buff/debuff calculator page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcSnapshot {
    #[serde(deserialize_with = "text_or_number")]
    pub base_value: String,
    #[serde(deserialize_with = "text_or_number")]
    pub buff_debuff_count: String,
    /// `percentValueN` / `fixedValueN` keyed field text
    #[serde(deserialize_with = "text_map")]
    pub buffs: BTreeMap<String, String>,
}

impl Default for CalcSnapshot {
    fn default() -> Self {
        CalcSnapshot {
            base_value: zero(),
            buff_debuff_count: zero(),
            buffs: BTreeMap::new(),
        }
    }
}

impl CalcSnapshot {
    pub fn percent_key(index: usize) -> String {
        format!("percentValue{}", index)
    }

    pub fn fixed_key(index: usize) -> String {
        format!("fixedValue{}", index)
    }

    pub fn base(&self) -> f64 {
        number_or(&self.base_value, 0.0)
    }

    /// Number of modifier rows; negative counts read as zero and large ones
    /// stop at [`MAX_ROWS`]
    pub fn count(&self) -> usize {
        integer_or(&self.buff_debuff_count, 0).clamp(0, MAX_ROWS as i64) as usize
    }

    fn buff_text(&self, key: &str) -> &str {
        self.buffs.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn percent_text(&self, index: usize) -> &str {
        self.buff_text(&Self::percent_key(index))
    }

    pub fn fixed_text(&self, index: usize) -> &str {
        self.buff_text(&Self::fixed_key(index))
    }

    /// Modifiers 1..=count in order
    pub fn modifiers(&self) -> Vec<Modifier> {
        (1..=self.count())
            .map(|i| {
                Modifier::new(
                    number_or(self.percent_text(i), 0.0),
                    number_or(self.fixed_text(i), 0.0),
                )
            })
            .collect()
    }
}

/// The character profile page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSnapshot {
    #[serde(deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub day: String,
    #[serde(deserialize_with = "text_or_number")]
    pub month: String,
    #[serde(deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(deserialize_with = "text_or_number")]
    pub gender: String,
    #[serde(deserialize_with = "text_or_number")]
    pub race: String,
    #[serde(deserialize_with = "text_or_number")]
    pub bio: String,
    #[serde(deserialize_with = "text_or_number")]
    pub class: String,
    #[serde(deserialize_with = "text_or_number")]
    pub total: String,
    #[serde(deserialize_with = "text_or_number")]
    pub hp: String,
    #[serde(deserialize_with = "text_or_number")]
    pub spd: String,
    #[serde(rename = "ref", deserialize_with = "text_or_number")]
    pub reflex: String,
    #[serde(deserialize_with = "text_or_number")]
    pub pow: String,
    #[serde(deserialize_with = "text_or_number")]
    pub def: String,
    #[serde(deserialize_with = "text_or_number")]
    pub grd: String,
    #[serde(deserialize_with = "text_or_number")]
    pub vit: String,
    #[serde(deserialize_with = "text_or_number")]
    pub inf: String,
    #[serde(deserialize_with = "text_or_number")]
    pub kinetic: String,
    #[serde(deserialize_with = "text_or_number")]
    pub pressure: String,
    #[serde(deserialize_with = "text_or_number")]
    pub force: String,
}

impl ProfileSnapshot {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Day => &self.day,
            ProfileField::Month => &self.month,
            ProfileField::Year => &self.year,
            ProfileField::Gender => &self.gender,
            ProfileField::Race => &self.race,
            ProfileField::Bio => &self.bio,
            ProfileField::Class => &self.class,
            ProfileField::Total => &self.total,
            ProfileField::Hp => &self.hp,
            ProfileField::Spd => &self.spd,
            ProfileField::Ref => &self.reflex,
            ProfileField::Pow => &self.pow,
            ProfileField::Def => &self.def,
            ProfileField::Grd => &self.grd,
            ProfileField::Vit => &self.vit,
            ProfileField::Inf => &self.inf,
            ProfileField::Kinetic => &self.kinetic,
            ProfileField::Pressure => &self.pressure,
            ProfileField::Force => &self.force,
        }
    }

    pub fn get_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Day => &mut self.day,
            ProfileField::Month => &mut self.month,
            ProfileField::Year => &mut self.year,
            ProfileField::Gender => &mut self.gender,
            ProfileField::Race => &mut self.race,
            ProfileField::Bio => &mut self.bio,
            ProfileField::Class => &mut self.class,
            ProfileField::Total => &mut self.total,
            ProfileField::Hp => &mut self.hp,
            ProfileField::Spd => &mut self.spd,
            ProfileField::Ref => &mut self.reflex,
            ProfileField::Pow => &mut self.pow,
            ProfileField::Def => &mut self.def,
            ProfileField::Grd => &mut self.grd,
            ProfileField::Vit => &mut self.vit,
            ProfileField::Inf => &mut self.inf,
            ProfileField::Kinetic => &mut self.kinetic,
            ProfileField::Pressure => &mut self.pressure,
            ProfileField::Force => &mut self.force,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    fn int(&self, field: ProfileField) -> i64 {
        integer_or(self.get(field), 0)
    }

    /// Stat pool as typed, blanks read as zero
    pub fn allocation(&self) -> StatAllocation {
        StatAllocation {
            total: self.int(ProfileField::Total),
            hp: self.int(ProfileField::Hp),
            spd: self.int(ProfileField::Spd),
            reflex: self.int(ProfileField::Ref),
            pow: self.int(ProfileField::Pow),
            def: self.int(ProfileField::Def),
            grd: self.int(ProfileField::Grd),
            vit: self.int(ProfileField::Vit),
            inf: self.int(ProfileField::Inf),
        }
    }

    /// Resistances with blanks read as `default`
    pub fn resistances_or(&self, default: f64) -> ResistanceTriple {
        ResistanceTriple::new(
            number_or(&self.kinetic, default),
            number_or(&self.pressure, default),
            number_or(&self.force, default),
        )
    }

    /// Resistances with blanks and zeros read as neutral (1)
    pub fn resistances_or_neutral(&self) -> ResistanceTriple {
        ResistanceTriple::new(
            nonzero_number_or(&self.kinetic, 1.0),
            nonzero_number_or(&self.pressure, 1.0),
            nonzero_number_or(&self.force, 1.0),
        )
    }

    /// Birth date as typed, blanks read as zero
    pub fn birth_date(&self) -> BirthDate {
        BirthDate::new(
            self.int(ProfileField::Year),
            self.int(ProfileField::Month),
            self.int(ProfileField::Day),
        )
    }

    /// Birth date, only when all three parts were filled in
    pub fn entered_birth_date(&self) -> Option<BirthDate> {
        let entered = [&self.day, &self.month, &self.year]
            .iter()
            .all(|s| !s.trim().is_empty());
        entered.then(|| self.birth_date())
    }
}
