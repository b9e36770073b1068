//! Static lookup tables: vibe/budget to provider category filters, and
//! venue tags to placeholder imagery.

use crate::models::domain::{BudgetTier, VenueTag};

/// Categories used when the free-tier restriction empties the set
const FREE_TIER_DEFAULTS: [&str; 2] = ["leisure.park", "tourism.sights"];

/// Map a vibe preference and budget tier to the comma-joined category
/// filter string expected by the venue search provider.
pub fn categories_for_vibe(vibe: &str, budget: BudgetTier) -> String {
    let v = vibe.to_lowercase();

    let mut categories: Vec<&str> = if v.contains("active") || v.contains("sport") {
        vec!["sport", "leisure.park", "entertainment.activity_park"]
    } else if v.contains("chill") || v.contains("relax") {
        vec!["catering.cafe", "commercial.books", "leisure.park"]
    } else if v.contains("culture") || v.contains("art") {
        vec!["entertainment.museum", "entertainment.culture"]
    } else if v.contains("night") || v.contains("fun") {
        vec!["entertainment", "catering.bar", "catering.restaurant"]
    } else if v.contains("romantic") {
        vec!["catering.restaurant", "leisure.park", "tourism.sights"]
    } else {
        vec!["catering.cafe", "leisure.park"]
    };

    match budget {
        BudgetTier::Free => {
            // Free tier keeps only categories that cost nothing to enter
            categories.retain(|c| {
                c.contains("park") || c.contains("culture") || c.contains("sights")
            });
            if categories.is_empty() {
                categories = FREE_TIER_DEFAULTS.to_vec();
            }
        }
        BudgetTier::Premium => {
            if !categories.contains(&"catering.restaurant") {
                categories.push("catering.restaurant");
            }
        }
        BudgetTier::Budget => {}
    }

    categories.join(",")
}

/// Placeholder image for a venue, chosen by tag priority (first match wins)
pub fn placeholder_image(tags: &[VenueTag]) -> &'static str {
    if tags.contains(&VenueTag::Cafe) {
        "https://images.unsplash.com/photo-1554118811-1e0d58224f24?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    } else if tags.iter().any(VenueTag::is_outdoor) {
        "https://images.unsplash.com/photo-1496425745709-5f92975952f6?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    } else if tags.contains(&VenueTag::Museum) || tags.contains(&VenueTag::Culture) {
        "https://images.unsplash.com/photo-1503152398395-d8a22e821c74?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    } else if tags.contains(&VenueTag::Bar) {
        "https://images.unsplash.com/photo-1514362545857-3bc1654f783b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    } else if tags.contains(&VenueTag::Restaurant) {
        "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    } else if tags.contains(&VenueTag::Gym) || tags.contains(&VenueTag::Sport) {
        "https://images.unsplash.com/photo-1534438327276-14e5300c3a48?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    } else {
        "https://images.unsplash.com/photo-1542291026-7eec264c27ff?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
    }
}
