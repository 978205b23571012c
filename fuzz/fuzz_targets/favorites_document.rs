// this_file: fuzz/fuzz_targets/favorites_document.rs

#![no_main]

use fontsel_core::FavoriteSet;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(set) = FavoriteSet::from_json(data) {
        // Parsed documents never hold duplicates and survive a rewrite
        let names: Vec<&str> = set.iter().collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), names.len());

        let json = set.to_json().unwrap();
        let reparsed = FavoriteSet::from_json(json.as_bytes()).unwrap();
        assert_eq!(reparsed, set);
    }
});
