use std::collections::BTreeSet;

use crate::models::domain::{VenueTag, WeatherReading};

/// Build the packing list for a venue visit.
///
/// Works on the unreduced weather reading: the exact condition string and
/// temperature both matter here, not just the three-way category the
/// scorer uses. The result is a set, so overlapping rules collapse.
pub fn packing_list(weather: &WeatherReading, vibe: &str, tags: &[VenueTag]) -> BTreeSet<String> {
    let mut items: BTreeSet<&str> = BTreeSet::from(["Smartphone", "Wallet"]);

    let cond = weather.condition.to_lowercase();
    if cond.contains("rain") || cond.contains("drizzle") {
        items.extend(["Umbrella", "Rain Jacket"]);
    }
    if cond.contains("clear") || cond.contains("sun") {
        items.extend(["Sunglasses", "Sunscreen"]);
    }
    if weather.temp_c < 10.0 {
        items.extend(["Warm Coat", "Gloves"]);
    }
    if weather.temp_c > 25.0 {
        items.extend(["Water Bottle", "Deodorant"]);
    }

    let v = vibe.to_lowercase();
    let sporty = tags.contains(&VenueTag::Sport) || tags.iter().any(VenueTag::is_outdoor);

    if v.contains("active") || sporty {
        items.extend(["Walking Shoes", "Towel"]);
    }
    if v.contains("chill") || tags.contains(&VenueTag::Cafe) {
        items.extend(["Book/Kindle", "Headphones"]);
    }
    if v.contains("work") || tags.contains(&VenueTag::Coworking) {
        items.extend(["Laptop", "Charger"]);
    }
    if v.contains("romantic") {
        items.insert("Mints");
    }
    if tags.contains(&VenueTag::Museum) {
        items.insert("Student ID");
    }

    items.into_iter().map(String::from).collect()
}
