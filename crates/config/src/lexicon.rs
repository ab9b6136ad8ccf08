//! Word-list and affix-rule loading
//!
//! Each list comes from its configured file or, when no path is set, from
//! the built-in list in [`crate::constants`]. Everything is loaded once at
//! startup.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use tagasuri_core::{AffixRule, AffixRuleTable, Lexicon, WordList};

use crate::constants::{affixes, words};
use crate::settings::FilterSettings;
use crate::ConfigError;

/// Built-in lists only
pub fn builtin_lexicon() -> Lexicon {
    Lexicon {
        native: WordList::new(words::NATIVE),
        foreign: WordList::new(words::FOREIGN),
        disallowed: WordList::new(words::DISALLOWED),
        affixes: default_affix_rules(),
    }
}

/// Load every list named in the filter settings
pub fn load_lexicon(filters: &FilterSettings) -> Result<Lexicon, ConfigError> {
    let lexicon = Lexicon {
        native: load_word_list(filters.native_words_path.as_deref(), words::NATIVE)?,
        foreign: load_word_list(filters.foreign_words_path.as_deref(), words::FOREIGN)?,
        disallowed: load_word_list(filters.disallowed_words_path.as_deref(), words::DISALLOWED)?,
        affixes: load_affix_rules(filters.affix_rules_path.as_deref())?,
    };

    tracing::info!(
        native = lexicon.native.len(),
        foreign = lexicon.foreign.len(),
        disallowed = lexicon.disallowed.len(),
        affix_rules = lexicon.affixes.len(),
        "Lexicon loaded"
    );

    Ok(lexicon)
}

/// Load a newline-delimited word list, or the built-in one when `path` is unset
pub fn load_word_list(path: Option<&str>, builtin: &[&str]) -> Result<WordList, ConfigError> {
    let Some(path) = path else {
        return Ok(WordList::new(builtin));
    };

    let content = read_file(path)?;
    let list = WordList::parse(&content);
    if list.is_empty() {
        tracing::warn!(path, "Word list file is empty");
    }
    tracing::debug!(path, words = list.len(), "Loaded word list");
    Ok(list)
}

#[derive(Debug, Deserialize)]
struct AffixRulesFile {
    rules: Vec<AffixRule>,
}

/// Load the affix rule table from YAML, or the built-in table when `path` is unset
///
/// ```yaml
/// rules:
///   - prefix: mag
///     vowel_exemplars: [mag-text]
///     consonant_exemplars: [maganda]
/// ```
pub fn load_affix_rules(path: Option<&str>) -> Result<AffixRuleTable, ConfigError> {
    let Some(path) = path else {
        return Ok(default_affix_rules());
    };

    let content = read_file(path)?;
    let file: AffixRulesFile = serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path, e)))?;

    let table = AffixRuleTable::new(file.rules);
    if table.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "filters.affix_rules_path".to_string(),
            message: format!("{} defines no rules", path),
        });
    }
    tracing::debug!(path, rules = table.len(), "Loaded affix rules");
    Ok(table)
}

/// Built-in Filipino affix table
pub fn default_affix_rules() -> AffixRuleTable {
    AffixRuleTable::new(
        affixes::RULES
            .iter()
            .map(|(prefix, vowel, consonant)| {
                AffixRule::new(prefix, vowel.iter(), consonant.iter())
            })
            .collect(),
    )
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    if !Path::new(path).is_file() {
        return Err(ConfigError::FileNotFound(path.to_string()));
    }
    fs::read_to_string(path).map_err(|e| ConfigError::ParseError(format!("{}: {}", path, e)))
}
