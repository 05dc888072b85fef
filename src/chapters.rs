//! Canonical chapter metadata for the IC Joshi miscellaneous question sets.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterMeta {
    pub source_title: &'static str,
    pub slug: &'static str,
    pub title: &'static str,
}

pub const CHAPTERS: &[ChapterMeta] = &[
    ChapterMeta {
        source_title: "MISCELLANEOUS QUESTIONS",
        slug: "miscellaneous-questions",
        title: "Miscellaneous Questions",
    },
    ChapterMeta {
        source_title: "ADDITIONAL QUESTIONS - 1",
        slug: "additional-questions-1",
        title: "Additional Questions - 1",
    },
    ChapterMeta {
        source_title: "ADDITIONAL QUESTIONS - 2",
        slug: "additional-questions-2",
        title: "Additional Questions - 2",
    },
    ChapterMeta {
        source_title: "QUESTIONS ON MET SERVICES FOR AVIATION",
        slug: "questions-on-met-services-for-aviation",
        title: "Questions on Met Services for Aviation",
    },
    ChapterMeta {
        source_title: "QUESTIONS ON METEOROLOGICAL AND BRIEFING",
        slug: "questions-on-meteorological-and-briefing",
        title: "Questions on Meteorological and Briefing",
    },
    ChapterMeta {
        source_title: "QUESTIONS ON GENERAL CIRCULATION",
        slug: "questions-on-general-circulation",
        title: "Questions on General Circulation",
    },
    ChapterMeta {
        source_title: "QUESTIONS ON METAR and SPECI",
        slug: "questions-on-metar-and-speci",
        title: "Questions on METAR and SPECI",
    },
    ChapterMeta {
        source_title: "QUESTIONS ON STATION MODEL",
        slug: "questions-on-station-model",
        title: "Questions on Station Model",
    },
    // Source titles keep the book's spelling.
    ChapterMeta {
        source_title: "AVATION WEATHER FORCAST",
        slug: "aviation-weather-forecast",
        title: "Aviation Weather Forecast",
    },
    ChapterMeta {
        source_title: "AVATION WEATHER FORCAST (2)",
        slug: "aviation-weather-forecast-2",
        title: "Aviation Weather Forecast (2)",
    },
];

pub const PRACTICE_FILE_PREFIX: &str = "ic-joshi-";

/// Exact, case-sensitive lookup on the trimmed source title.
pub fn resolve(source_title: &str) -> Option<&'static ChapterMeta> {
    let title = source_title.trim();
    CHAPTERS.iter().find(|meta| meta.source_title == title)
}

pub fn practice_file_name(slug: &str) -> String {
    format!("{PRACTICE_FILE_PREFIX}{slug}.json")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::normalize::slugify;

    #[test]
    fn resolve_matches_exact_source_title() {
        let meta = resolve("QUESTIONS ON METAR and SPECI").expect("known chapter");
        assert_eq!(meta.slug, "questions-on-metar-and-speci");
        assert_eq!(meta.title, "Questions on METAR and SPECI");
    }

    #[test]
    fn resolve_ignores_surrounding_whitespace_only() {
        assert!(resolve("  MISCELLANEOUS QUESTIONS\n").is_some());
        assert!(resolve("Miscellaneous Questions").is_none());
        assert!(resolve("QUESTIONS ON METAR AND SPECI").is_none());
        assert!(resolve("").is_none());
    }

    #[test]
    fn slugs_are_unique_and_already_canonical() {
        let mut seen = HashSet::new();
        for meta in CHAPTERS {
            assert!(seen.insert(meta.slug), "duplicate slug {}", meta.slug);
            assert_eq!(slugify(meta.slug), meta.slug);
        }
    }

    #[test]
    fn practice_file_name_uses_book_prefix() {
        assert_eq!(
            practice_file_name("additional-questions-1"),
            "ic-joshi-additional-questions-1.json"
        );
    }
}
