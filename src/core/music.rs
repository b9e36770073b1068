use crate::models::domain::{VenueTag, WeatherReading};

/// Fallback genres used to pad short lists, in padding order
const FALLBACK_GENRES: [&str; 3] = ["Pop Essentials", "Daily Mix", "Top Hits"];

/// Recommend exactly three music genres for a venue visit.
///
/// Weather picks the base triple, the dominant venue tag refines it, and a
/// strong vibe overrides the whole selection. The result is deduplicated
/// and padded from the fallback list so it always has three entries.
pub fn music_recommendations(
    weather: &WeatherReading,
    vibe: &str,
    tags: &[VenueTag],
) -> Vec<String> {
    let w = weather.condition.to_lowercase();
    let v = vibe.to_lowercase();

    let is_cafe = tags.contains(&VenueTag::Cafe);
    let is_park = tags.iter().any(VenueTag::is_outdoor);
    let is_bar = tags.contains(&VenueTag::Bar);
    let is_gym = tags.contains(&VenueTag::Sport) || tags.contains(&VenueTag::Gym);

    let base: [&str; 3] = if w.contains("rain") || w.contains("drizzle") {
        if is_cafe {
            ["Lo-fi Beats", "Jazz Piano", "Acoustic Rain"]
        } else if is_bar {
            ["Smooth Jazz", "Blues", "Neo Soul"]
        } else {
            ["Melancholy Indie", "Ambient Electronic", "Chillstep"]
        }
    } else if w.contains("clear") || w.contains("sun") {
        if is_park {
            ["Indie Pop", "Acoustic Folk", "Sunny Vibes"]
        } else if is_gym {
            ["High Tempo pop", "Electronic Dance", "Workout Mix"]
        } else {
            ["Upbeat Pop", "Summer Hits", "Feel Good"]
        }
    } else {
        ["Chill Hop", "Modern Rock", "Alternative"]
    };

    // Strong vibes override the weather pick entirely
    let picks: [&str; 3] = if v.contains("party") || v.contains("energetic") {
        ["EDM", "Top 40 Remixes", "House"]
    } else if v.contains("romantic") {
        ["R&B", "Slow Jams", "Love Ballads"]
    } else if v.contains("focus") || v.contains("work") {
        ["Classical", "Instrumental", "White Noise"]
    } else {
        base
    };

    let mut recs: Vec<String> = Vec::with_capacity(3);
    for pick in picks {
        if !recs.iter().any(|r| r == pick) {
            recs.push(pick.to_string());
        }
    }
    for fallback in FALLBACK_GENRES {
        if recs.len() >= 3 {
            break;
        }
        if !recs.iter().any(|r| r == fallback) {
            recs.push(fallback.to_string());
        }
    }
    recs.truncate(3);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(condition: &str) -> WeatherReading {
        WeatherReading {
            temp_c: 18.0,
            condition: condition.to_string(),
            description: String::new(),
        }
    }

    fn assert_three_unique(recs: &[String]) {
        assert_eq!(recs.len(), 3);
        for (i, a) in recs.iter().enumerate() {
            for b in recs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_rainy_cafe_triple() {
        let recs = music_recommendations(&reading("Rain"), "Chill", &[VenueTag::Cafe]);
        assert_eq!(recs, vec!["Lo-fi Beats", "Jazz Piano", "Acoustic Rain"]);
    }

    #[test]
    fn test_rainy_bar_differs_from_cafe() {
        let bar = music_recommendations(&reading("Drizzle"), "", &[VenueTag::Bar]);
        assert_eq!(bar, vec!["Smooth Jazz", "Blues", "Neo Soul"]);
    }

    #[test]
    fn test_sunny_buckets() {
        let park = music_recommendations(&reading("Clear"), "", &[VenueTag::Park]);
        assert_eq!(park, vec!["Indie Pop", "Acoustic Folk", "Sunny Vibes"]);

        let gym = music_recommendations(&reading("Clear"), "", &[VenueTag::Sport]);
        assert_eq!(gym, vec!["High Tempo pop", "Electronic Dance", "Workout Mix"]);

        let other = music_recommendations(&reading("Sunny"), "", &[]);
        assert_eq!(other, vec!["Upbeat Pop", "Summer Hits", "Feel Good"]);
    }

    #[test]
    fn test_cloudy_default_triple() {
        let recs = music_recommendations(&reading("Clouds"), "", &[VenueTag::Museum]);
        assert_eq!(recs, vec!["Chill Hop", "Modern Rock", "Alternative"]);
    }

    #[test]
    fn test_vibe_overrides_weather() {
        let party = music_recommendations(&reading("Rain"), "Party night", &[VenueTag::Cafe]);
        assert_eq!(party, vec!["EDM", "Top 40 Remixes", "House"]);

        let focus = music_recommendations(&reading("Clear"), "Deep Work", &[VenueTag::Park]);
        assert_eq!(focus, vec!["Classical", "Instrumental", "White Noise"]);

        let romantic = music_recommendations(&reading("Clouds"), "Romantic", &[]);
        assert_eq!(romantic, vec!["R&B", "Slow Jams", "Love Ballads"]);
    }

    #[test]
    fn test_always_three_unique_entries() {
        let weathers = ["Rain", "Clear", "Clouds", "Snow", ""];
        let vibes = ["", "Party", "romantic", "work", "Chill"];
        let tag_sets: [&[VenueTag]; 3] = [&[], &[VenueTag::Cafe], &[VenueTag::Park, VenueTag::Bar]];
        for w in weathers {
            for v in vibes {
                for tags in tag_sets {
                    let recs = music_recommendations(&reading(w), v, tags);
                    assert_three_unique(&recs);
                }
            }
        }
    }
}
