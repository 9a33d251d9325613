//! Static era catalog and canned content.
//!
//! The catalog is built once on first access and never mutated. Every era
//! name accepted anywhere in the system must resolve through [`find_era`].

use std::sync::LazyLock;

use retrovision_types::{Deconstruction, Era, GenerationResult, Simulation};

/// Era selected on a fresh input form.
pub const DEFAULT_ERA: &str = "Victorian Era";

/// Suggestions offered under the invention field.
pub const POPULAR_INVENTIONS: [&str; 5] =
    ["Smartphone", "Airplane", "Computer", "Telescope", "Steam Engine"];

/// Placeholder image used by the canned example.
const EXAMPLE_IMAGE_URL: &str =
    "https://placehold.co/1024x1024/f8f5f0/443B35?text=AI+Generated+Image";

static ERAS: LazyLock<Vec<Era>> = LazyLock::new(|| {
    vec![
        era(
            "Ancient Era",
            "3000 BCE – 500 CE",
            "Using stone, bronze, and early metallurgy.",
            ["Clay tablet computers", "Bronze gear calculators", "Pyramid power networks"],
        ),
        era(
            "Medieval Era",
            "500 – 1500 CE",
            "Leveraging mechanical precision and craftsmanship.",
            ["Monastery data networks", "Illuminated screen scrolls", "Clockwork phones"],
        ),
        era(
            "Renaissance Era",
            "1400 – 1700 CE",
            "Combining art, science, and engineering innovation.",
            ["Da Vinci flying machines", "Optical communication", "Gear-based computation"],
        ),
        era(
            "Industrial Revolution",
            "1760 – 1840",
            "Harnessing steam power and mass production.",
            ["Steam-powered networks", "Telegraph computers", "Factory automation"],
        ),
        era(
            "Victorian Era",
            "1837 – 1901",
            "Merging precision engineering with electricity.",
            ["Pneumatic networks", "Mechanical brains", "Electric carriages"],
        ),
        era(
            "Early 20th Century",
            "1900 – 1950",
            "Early electronics and radio technology.",
            ["Vacuum tube computers", "Radio smartphones", "Mechanical television"],
        ),
    ]
});

fn era(name: &str, range: &str, description: &str, inventions: [&str; 3]) -> Era {
    Era {
        name: name.to_owned(),
        display_range: range.to_owned(),
        description: description.to_owned(),
        sample_inventions: inventions.iter().map(|s| (*s).to_owned()).collect(),
    }
}

/// All eras in chronological order.
pub fn eras() -> &'static [Era] {
    &ERAS
}

/// Look up an era by its exact name.
pub fn find_era(name: &str) -> Option<&'static Era> {
    ERAS.iter().find(|e| e.name == name)
}

/// Whether `name` is a catalog era.
pub fn is_known_era(name: &str) -> bool {
    find_era(name).is_some()
}

/// The fixed result shown by "view example".
///
/// Built fresh on every call so callers can never observe each other's
/// modifications.
pub fn example_result() -> GenerationResult {
    GenerationResult {
        invention: "Smartphone".to_owned(),
        era: DEFAULT_ERA.to_owned(),
        deconstruction: Deconstruction {
            materials: [
                "Polished mahogany".to_owned(),
                "Brass fittings".to_owned(),
                "Glass vacuum tubes".to_owned(),
                "Gutta-percha".to_owned(),
            ],
            concepts: [
                "Analytical Engine".to_owned(),
                "Telegraphy".to_owned(),
                "Clockwork automation".to_owned(),
                "Magic lantern".to_owned(),
            ],
        },
        simulations: vec![Simulation {
            name: "The Telegraph-Phone Apparatus".to_owned(),
            description: "A brass and mahogany communication device combining telegraph \
                technology with early telephonic principles. Features a mechanical keyboard, \
                pneumatic message tubes, and a viewing aperture with adjustable lenses."
                .to_owned(),
        }],
        narrative: "In an age of steam and steel, the 'Telegraph-Phone Apparatus' emerged as \
            a marvel of personal communication..."
            .to_owned(),
        image_url: EXAMPLE_IMAGE_URL.to_owned(),
        image_generated: true,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_has_six_unique_eras() {
        let names: BTreeSet<&str> = eras().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(eras().len(), 6);
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn default_era_is_in_catalog() {
        assert!(is_known_era(DEFAULT_ERA));
    }

    #[test]
    fn every_era_has_metadata() {
        for era in eras() {
            assert!(!era.display_range.is_empty(), "{} has no range", era.name);
            assert!(!era.description.is_empty(), "{} has no description", era.name);
            assert_eq!(era.sample_inventions.len(), 3, "{}", era.name);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert!(find_era("Medieval Era").is_some());
        assert!(find_era("medieval era").is_none());
        assert!(find_era("Space Age").is_none());
    }

    #[test]
    fn example_result_is_stable() {
        let first = example_result();
        let second = example_result();
        assert_eq!(first, second);
        assert_eq!(first.invention, "Smartphone");
        assert!(is_known_era(&first.era));
        assert!(first.image_generated);
        assert!(!first.simulations.is_empty());
    }
}
