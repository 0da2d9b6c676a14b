//! Random `adjective-noun` names for games started without one.

use rand::Rng;
use rand::seq::SliceRandom;

const ADJECTIVES: &[&str] = &[
    "rusty", "narrow", "golden", "foggy", "express", "northern", "grand", "steam", "silent",
    "iron", "midland", "coastal", "royal", "crooked", "electric", "hidden", "eastern", "private",
    "bankrupt", "frosty",
];

const NOUNS: &[&str] = &[
    "trains", "junction", "viaduct", "tender", "signal", "terminus", "gauge", "tunnel",
    "ferry", "harbour", "engine", "siding", "coupling", "railway", "boiler", "turntable",
    "mail", "station", "charter", "dividend",
];

/// Pick one adjective and one noun with `rng`.
pub fn generate_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or("new");
    let noun = NOUNS.choose(rng).copied().unwrap_or("game");
    format!("{adjective}-{noun}")
}

pub fn generate_name() -> String {
    generate_name_with(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_names_are_lowercase_adjective_noun() {
        for _ in 0..50 {
            let name = generate_name();
            let (adjective, noun) = name.split_once('-').unwrap();
            assert!(ADJECTIVES.contains(&adjective));
            assert!(NOUNS.contains(&noun));
            assert_eq!(name, name.to_lowercase());
        }
    }

    #[test]
    fn test_seeded_names_repeat() {
        let first = generate_name_with(&mut StdRng::seed_from_u64(18));
        let second = generate_name_with(&mut StdRng::seed_from_u64(18));
        assert_eq!(first, second);
    }
}
