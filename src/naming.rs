//! Clip naming schemes.
//!
//! Blender action names (`Walk_Action.001`, `idle loop`, ...) are cleaned up
//! and rewritten into one of the studio conventions:
//!
//! | Scheme | `Jump_Attack` becomes |
//! |---|---|
//! | `artist` | `Owen_JumpAttack` |
//! | `legacy` | `jump_attack_l` |
//! | `hierarchical` | `owen.state.jump.attack.loop` |
//! | `semantic` | `OwenJumpAttackLoop` |
//!
//! Conversion is total: any input yields some output, including empty
//! names. Two different clips may map to the same output name; that is not
//! detected here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Substrings Blender adds to action names that carry no meaning.
const NOISE_WORDS: [&str; 2] = ["Action", "action"];

/// Duplicate-suffix markers Blender appends to copied actions.
const DUPLICATE_SUFFIXES: [&str; 2] = [".001", ".000"];

/// Target naming convention for exported clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum NamingScheme {
    /// `Owen_PascalCase`
    #[default]
    Artist,
    /// `lowercase_with_suffix_l`
    Legacy,
    /// `owen.state.dotted.path.loop`
    Hierarchical,
    /// `OwenPascalCaseLoop`
    Semantic,
}

impl NamingScheme {
    /// Every scheme, in CLI order.
    pub const ALL: [NamingScheme; 4] = [
        NamingScheme::Artist,
        NamingScheme::Legacy,
        NamingScheme::Hierarchical,
        NamingScheme::Semantic,
    ];

    /// Lowercase identifier used on the command line and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            NamingScheme::Artist => "artist",
            NamingScheme::Legacy => "legacy",
            NamingScheme::Hierarchical => "hierarchical",
            NamingScheme::Semantic => "semantic",
        }
    }

    /// Convert a raw clip name under this scheme.
    pub fn apply(self, raw: &str) -> String {
        let name = preprocess(raw);
        match self {
            NamingScheme::Artist => format!("Owen_{}", pascal_join(&name)),
            NamingScheme::Legacy => {
                let mut lower = name.to_lowercase();
                if !(lower.ends_with("_l") || lower.ends_with("_s")) {
                    lower.push_str("_l");
                }
                lower
            }
            NamingScheme::Hierarchical => {
                let lower = name.to_lowercase();
                let joined = segments(&lower).collect::<Vec<_>>().join(".");
                format!("owen.state.{joined}.loop")
            }
            NamingScheme::Semantic => format!("Owen{}Loop", pascal_join(&name)),
        }
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a scheme name is not one of [`NamingScheme::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown naming scheme '{0}' (expected artist, legacy, hierarchical or semantic)")]
pub struct UnknownScheme(pub String);

impl FromStr for NamingScheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamingScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

/// Convert a clip name under a scheme given by name.
///
/// Unknown scheme names fall back to the preprocessed name, without error.
pub fn convert(raw: &str, scheme: &str) -> String {
    match scheme.parse::<NamingScheme>() {
        Ok(scheme) => scheme.apply(raw),
        Err(_) => preprocess(raw),
    }
}

/// Clean a raw Blender action name before any scheme is applied.
///
/// Trims whitespace, turns spaces into underscores, then strips every
/// `Action`/`action` and `.001`/`.000` occurrence, in that order.
pub fn preprocess(raw: &str) -> String {
    let mut name = raw.trim().replace(' ', "_");
    for noise in NOISE_WORDS.iter().chain(DUPLICATE_SUFFIXES.iter()) {
        name = name.replace(*noise, "");
    }
    name
}

/// Non-empty `_`-separated segments.
fn segments(name: &str) -> impl Iterator<Item = &str> {
    name.split('_').filter(|part| !part.is_empty())
}

fn pascal_join(name: &str) -> String {
    segments(name).map(capitalize).collect()
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
