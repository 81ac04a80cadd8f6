//! Field-name policies.

use serde::{Deserialize, Serialize};

/// How declared field names are written to JSON keys.
///
/// Only schema field names are transformed. Keys of free-form maps are data
/// and are always written verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldNaming {
    /// Keys are the declared names (`BirthDate`).
    #[default]
    Verbatim,
    /// Leading capitals are lowered (`BirthDate` -> `birthDate`, `ID` -> `id`).
    LowerCamel,
}

impl FieldNaming {
    pub fn apply(self, name: &str) -> String {
        match self {
            FieldNaming::Verbatim => name.to_string(),
            FieldNaming::LowerCamel => lower_camel(name),
        }
    }
}

/// Lower the leading run of capitals, keeping the last one of a run that is
/// followed by a lowercase letter (`URLValue` -> `urlValue`).
pub fn lower_camel(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if !chars.first().is_some_and(|c| c.is_uppercase()) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    let mut lowering = true;
    for (i, &c) in chars.iter().enumerate() {
        if lowering && i > 0 {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if !c.is_uppercase() || next_is_lower {
                lowering = false;
            }
        }
        if lowering {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Case-insensitive key comparison.
pub fn keys_match_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
