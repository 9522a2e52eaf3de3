#![no_main]

use hdseed_core::{ChildIndex, DerivationPath, HARDENED_OFFSET};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must never panic the parser
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(path) = text.parse::<DerivationPath>() {
            // Round-trip through the canonical form
            let canonical = path.to_string();
            let reparsed: DerivationPath = canonical.parse().unwrap();
            assert_eq!(path, reparsed);
            assert!(canonical.starts_with('m'));
        }
    }

    // Build from raw components
    let num_components = data.first().map(|b| (b % 8) as usize).unwrap_or(0);
    if data.len() >= 1 + num_components * 4 {
        let components: Vec<ChildIndex> = (0..num_components)
            .map(|i| {
                let offset = 1 + i * 4;
                ChildIndex::from(u32::from_le_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]))
            })
            .collect();

        let path = DerivationPath::new(components);
        assert_eq!(path.depth(), num_components);
        for (component, value) in path.components().iter().zip(path.values()) {
            assert_eq!(component.is_hardened(), value >= HARDENED_OFFSET);
        }

        let reparsed: DerivationPath = path.to_string().parse().unwrap();
        assert_eq!(path, reparsed);
    }
});
