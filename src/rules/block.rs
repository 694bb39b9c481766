//! Rule block extraction from template annotations.
//!
//! Combatant templates carry free-text annotations. Rule lines live in
//! blocks tagged with the skill they apply to:
//!
//! ```text
//! <skill-ai Fire I>
//! boost 3 when enemy.state is Frozen
//! target 2x .hp lowest
//! </skill-ai>
//! ```
//!
//! The tag names a skill by numeric id or by case-insensitive name. Blocks
//! for the same skill are concatenated in source order.
//!
//! ## Example
//!
//! ```
//! use skill_ai::core::{Registry, SkillId};
//! use skill_ai::rules::RuleCache;
//!
//! let registry = Registry::new().with_skill(SkillId::new(9), "Fire I");
//! let note = "<skill-ai fire i>\nboost 2 when self.hp high\n</skill-ai>";
//!
//! let cache = RuleCache::parse(note, &registry).unwrap();
//! assert_eq!(cache.lines(SkillId::new(9)), ["boost 2 when self.hp high"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Catalogue, SkillId};

use super::error::AuthoringError;
use super::rule::SkillRules;

static RE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<skill-ai\s+([^>]+?)\s*>").unwrap());

static RE_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</skill-ai\s*>").unwrap());

/// Raw rule lines per skill, for one combatant template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleCache {
    entries: FxHashMap<SkillId, SmallVec<[String; 4]>>,
}

impl RuleCache {
    /// Extract every `<skill-ai>` block from an annotation.
    ///
    /// Fails on the first skill name the catalogue cannot resolve. A block
    /// missing its closing tag ends where the next block opens.
    pub fn parse(annotation: &str, catalogue: &dyn Catalogue) -> Result<Self, AuthoringError> {
        let mut cache = RuleCache::default();
        let opens: Vec<_> = RE_OPEN.captures_iter(annotation).collect();

        for (i, caps) in opens.iter().enumerate() {
            let reference = caps[1].trim();
            let skill = resolve_skill(reference, catalogue)?;

            let start = caps.get(0).map_or(0, |m| m.end());
            let end = opens
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(annotation.len(), |m| m.start());
            let window = &annotation[start..end];
            let body = match RE_CLOSE.find(window) {
                Some(close) => &window[..close.start()],
                None => {
                    warn!(%skill, reference, "skill-ai block is missing its closing tag");
                    window
                }
            };

            let entry = cache.entries.entry(skill).or_default();
            let before = entry.len();
            entry.extend(
                body.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(String::from),
            );
            debug!(%skill, reference, lines = entry.len() - before, "captured skill-ai block");
        }

        Ok(cache)
    }

    /// Rule lines for a skill, empty if it has none.
    #[must_use]
    pub fn lines(&self, skill: SkillId) -> &[String] {
        self.entries
            .get(&skill)
            .map(|lines| lines.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn contains(&self, skill: SkillId) -> bool {
        self.entries.contains_key(&skill)
    }

    /// Number of skills with rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over skills and their lines, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillId, &[String])> {
        self.entries.iter().map(|(id, lines)| (*id, lines.as_slice()))
    }

    /// Parse every skill's lines into rules.
    pub fn compile(&self, catalogue: &dyn Catalogue) -> Result<CompiledRuleCache, AuthoringError> {
        let mut skills = FxHashMap::default();
        for (skill, lines) in self.iter() {
            skills.insert(skill, SkillRules::compile(lines, catalogue)?);
        }
        Ok(CompiledRuleCache { skills })
    }
}

fn resolve_skill(reference: &str, catalogue: &dyn Catalogue) -> Result<SkillId, AuthoringError> {
    if let Ok(id) = reference.parse::<u32>() {
        return Ok(SkillId::new(id));
    }
    catalogue
        .skill_id(reference)
        .ok_or_else(|| AuthoringError::UnknownSkill(reference.to_string()))
}

/// Parsed rules per skill, for one combatant template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledRuleCache {
    skills: FxHashMap<SkillId, SkillRules>,
}

impl CompiledRuleCache {
    #[must_use]
    pub fn get(&self, skill: SkillId) -> Option<&SkillRules> {
        self.skills.get(&skill)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
