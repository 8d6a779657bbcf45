//! Static carrier reference list and free-text carrier resolution.
//!
//! The upstream carriers schema is not queried live; the list below mirrors
//! the carriers the service supports. Resolution maps free-form CSV input
//! ("한진", "cj", a canonical id, …) to a canonical carrier.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: &'static str,
    pub name: &'static str,
    pub display_name: &'static str,
    pub is_enabled: bool,
}

/// The `dev.track.dummy` entry is resolvable (the "test"/"테스트" aliases
/// point at it) but disabled, so it never shows up in the carriers listing.
pub const CARRIERS: &[Carrier] = &[
    Carrier {
        id: "kr.cjlogistics",
        name: "CJ대한통운",
        display_name: "CJ대한통운",
        is_enabled: true,
    },
    Carrier {
        id: "kr.hanjin",
        name: "한진택배",
        display_name: "한진택배",
        is_enabled: true,
    },
    Carrier {
        id: "kr.lotte",
        name: "롯데택배",
        display_name: "롯데택배",
        is_enabled: true,
    },
    Carrier {
        id: "kr.epost",
        name: "우체국택배",
        display_name: "우체국택배",
        is_enabled: true,
    },
    Carrier {
        id: "kr.logen",
        name: "로젠택배",
        display_name: "로젠택배",
        is_enabled: true,
    },
    Carrier {
        id: "kr.kdexp",
        name: "경동택배",
        display_name: "경동택배",
        is_enabled: true,
    },
    Carrier {
        id: "dev.track.dummy",
        name: "테스트 택배",
        display_name: "테스트 택배",
        is_enabled: false,
    },
];

/// Known abbreviations and alternate spellings, checked in order.
/// A key contained anywhere in the input wins, so order matters here —
/// keep the table as-is rather than sorting it.
const ALIASES: &[(&str, &str)] = &[
    ("cj", "kr.cjlogistics"),
    ("씨제이", "kr.cjlogistics"),
    ("대한통운", "kr.cjlogistics"),
    ("한진", "kr.hanjin"),
    ("hanjin", "kr.hanjin"),
    ("롯데", "kr.lotte"),
    ("lotte", "kr.lotte"),
    ("우체국", "kr.epost"),
    ("epost", "kr.epost"),
    ("로젠", "kr.logen"),
    ("logen", "kr.logen"),
    ("경동", "kr.kdexp"),
    ("kdexp", "kr.kdexp"),
    ("테스트", "dev.track.dummy"),
    ("test", "dev.track.dummy"),
];

/// Look up a carrier by its canonical id.
pub fn find_by_id(id: &str) -> Option<&'static Carrier> {
    CARRIERS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// Carriers exposed by the listing endpoint.
pub fn enabled() -> impl Iterator<Item = &'static Carrier> {
    CARRIERS.iter().filter(|c| c.is_enabled)
}

/// Resolve free-form carrier text to a canonical carrier.
///
/// Matching order (first match wins):
///   1. exact case-insensitive match on the canonical id;
///   2. substring containment against the display name, either direction;
///   3. alias-table lookup.
///
/// The substring pass runs before the alias table and can shadow an intended
/// alias match for ambiguous input; this precedence is part of the contract.
pub fn resolve(free_text: &str) -> Option<&'static Carrier> {
    let input = free_text.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    if let Some(carrier) = CARRIERS.iter().find(|c| c.id == input) {
        return Some(carrier);
    }

    if let Some(carrier) = CARRIERS.iter().find(|c| {
        let display = c.display_name.to_lowercase();
        display.contains(&input) || input.contains(&display)
    }) {
        return Some(carrier);
    }

    ALIASES
        .iter()
        .find(|(alias, _)| input.contains(alias))
        .and_then(|(_, id)| find_by_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_id_case_insensitively() {
        assert_eq!(resolve("kr.hanjin").unwrap().id, "kr.hanjin");
        assert_eq!(resolve("KR.Hanjin").unwrap().id, "kr.hanjin");
    }

    #[test]
    fn resolution_is_idempotent() {
        let first = resolve("kr.cjlogistics").unwrap();
        let second = resolve("kr.cjlogistics").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.display_name, second.display_name);
    }

    #[test]
    fn resolves_korean_short_name_via_display_name() {
        // "한진" is a substring of the display name "한진택배"
        assert_eq!(resolve("한진").unwrap().id, "kr.hanjin");
        assert_eq!(resolve("한진택배").unwrap().id, "kr.hanjin");
    }

    #[test]
    fn resolves_english_abbreviations() {
        assert_eq!(resolve("cj").unwrap().id, "kr.cjlogistics");
        assert_eq!(resolve("hanjin").unwrap().id, "kr.hanjin");
        assert_eq!(resolve("lotte").unwrap().id, "kr.lotte");
    }

    #[test]
    fn resolves_test_alias_to_dummy_carrier() {
        let carrier = resolve("테스트").unwrap();
        assert_eq!(carrier.id, "dev.track.dummy");
        assert!(!carrier.is_enabled);
        assert_eq!(resolve("test").unwrap().id, "dev.track.dummy");
    }

    #[test]
    fn unknown_carrier_yields_none() {
        assert!(resolve("doesNotExist").is_none());
        assert!(resolve("").is_none());
        assert!(resolve("   ").is_none());
    }

    #[test]
    fn dummy_carrier_is_hidden_from_listing() {
        assert!(enabled().all(|c| c.id != "dev.track.dummy"));
        assert_eq!(enabled().count(), 6);
    }
}
