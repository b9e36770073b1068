use serde::{Deserialize, Serialize};

/// Fallback time budget (minutes) when the request value does not parse
pub const DEFAULT_TIME_BUDGET_MIN: u32 = 60;

/// Resolved geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Raw weather reading as returned by the weather provider
///
/// The packing-list and music generators consume this unreduced form
/// (exact condition string and temperature); the scorer only sees the
/// reduced [`WeatherKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temp_c: f64,
    pub condition: String,
    #[serde(default)]
    pub description: String,
}

impl WeatherReading {
    /// Fixed default substituted whenever the weather provider fails
    pub fn fallback() -> Self {
        Self {
            temp_c: 20.0,
            condition: "Clear".to_string(),
            description: "unknown".to_string(),
        }
    }

    /// Human-facing summary, e.g. "Clear, 20°C"
    pub fn summary(&self) -> String {
        format!("{}, {}°C", self.condition, self.temp_c as i64)
    }
}

/// Canonical weather category produced from a raw condition label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Rainy,
    Sunny,
    Cloudy,
}

impl WeatherKind {
    /// Reduce a raw condition label ("Rain", "Clear", "Clouds", ...) to a
    /// canonical category. Total over all inputs: unknown labels fall
    /// through to `Cloudy`.
    pub fn from_condition(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("rain") {
            Self::Rainy
        } else if l.contains("clear") || l.contains("sun") {
            Self::Sunny
        } else {
            Self::Cloudy
        }
    }

    /// Token used by the type predictor's weather encoder
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Rainy => "rainy",
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
        }
    }

    pub fn is_precipitation(self) -> bool {
        matches!(self, Self::Rainy)
    }
}

/// Budget tier stated by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Free,
    Budget,
    Premium,
}

impl BudgetTier {
    /// Parse a budget label; absent, empty or unknown labels default to
    /// `Budget`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("free") => Self::Free,
            Some("premium") => Self::Premium,
            _ => Self::Budget,
        }
    }
}

/// Closed vocabulary of venue category tags
///
/// Raw provider categories ("catering.cafe.coffee_shop") are parsed into
/// this vocabulary once at the decode boundary; the scoring core only does
/// exact membership tests. Unrecognized labels are preserved in `Other` so
/// new provider categories degrade to "no adjustment" instead of being
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueTag {
    Cafe,
    Restaurant,
    Bar,
    Park,
    ActivityPark,
    Museum,
    Culture,
    Sights,
    Gym,
    Sport,
    Coworking,
    Books,
    Entertainment,
    Other(String),
}

impl VenueTag {
    /// Parse one raw provider category.
    ///
    /// Segments are scanned most-specific-first so nested labels like
    /// "entertainment.activity_park" resolve to the specific tag rather
    /// than the parent group.
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim().to_lowercase();
        for segment in tag.rsplit('.') {
            match segment {
                "cafe" => return Self::Cafe,
                "restaurant" => return Self::Restaurant,
                "bar" | "pub" => return Self::Bar,
                "park" => return Self::Park,
                "activity_park" => return Self::ActivityPark,
                "museum" => return Self::Museum,
                "culture" => return Self::Culture,
                "sights" => return Self::Sights,
                "gym" | "fitness" => return Self::Gym,
                "sport" => return Self::Sport,
                "coworking" => return Self::Coworking,
                "books" => return Self::Books,
                "entertainment" => return Self::Entertainment,
                _ => {}
            }
        }
        Self::Other(tag)
    }

    /// Parse a full provider category list
    pub fn parse_all(raw: &[String]) -> Vec<Self> {
        raw.iter().map(|c| Self::parse(c)).collect()
    }

    /// Tags that describe open-air venues
    pub fn is_outdoor(&self) -> bool {
        matches!(self, Self::Park | Self::ActivityPark)
    }

    /// Tags that qualify for the free-tier bonus
    pub fn is_free_friendly(&self) -> bool {
        matches!(self, Self::Park | Self::ActivityPark | Self::Culture)
    }
}

/// Venue type vocabulary of the statistical type predictor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Cafe,
    Park,
    Museum,
    Restaurant,
}

impl VenueType {
    /// Parse a model class label; anything outside the vocabulary is `None`
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "cafe" => Some(Self::Cafe),
            "park" => Some(Self::Park),
            "museum" => Some(Self::Museum),
            "restaurant" => Some(Self::Restaurant),
            _ => None,
        }
    }

    /// The canonical category tag this type corresponds to
    pub fn tag(self) -> VenueTag {
        match self {
            Self::Cafe => VenueTag::Cafe,
            Self::Park => VenueTag::Park,
            Self::Museum => VenueTag::Museum,
            Self::Restaurant => VenueTag::Restaurant,
        }
    }

    /// Lower-case label used in reason strings and the feedback log
    pub fn label(self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Park => "park",
            Self::Museum => "museum",
            Self::Restaurant => "restaurant",
        }
    }
}

/// One raw candidate venue returned by the search provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    /// Distance from the resolved coordinates, in meters
    pub distance_m: f64,
    pub tags: Vec<VenueTag>,
}

impl Venue {
    pub fn has_tag(&self, tag: &VenueTag) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_outdoor(&self) -> bool {
        self.tags.iter().any(VenueTag::is_outdoor)
    }

    pub fn is_free_friendly(&self) -> bool {
        self.tags.iter().any(VenueTag::is_free_friendly)
    }
}

/// Immutable per-request scoring context
#[derive(Debug, Clone)]
pub struct RecommendContext {
    pub coords: Coordinates,
    /// Time budget in minutes
    pub time_available_min: u32,
    /// Free-text vibe preference as stated by the user
    pub vibe: String,
    pub budget: BudgetTier,
}

impl RecommendContext {
    pub fn new(coords: Coordinates, time_raw: &str, vibe: &str, budget_label: Option<&str>) -> Self {
        Self {
            coords,
            time_available_min: parse_time_budget(time_raw),
            vibe: vibe.to_string(),
            budget: BudgetTier::from_label(budget_label),
        }
    }
}

/// Parse a raw time budget; non-numeric input defaults to 60 minutes
pub fn parse_time_budget(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(DEFAULT_TIME_BUDGET_MIN)
}

/// A candidate after scoring, with derived artifacts attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredVenue {
    pub name: String,
    pub distance_m: f64,
    pub tags: Vec<VenueTag>,
    /// Final score, clamped to the configured bounds
    pub score: i32,
    /// All reasons in adjustment order; callers surface at most two
    pub reasons: Vec<String>,
    pub packing_list: Vec<String>,
    /// Exactly three entries
    pub music: Vec<String>,
}

/// A saved favorite venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub name: String,
    pub location: String,
    pub score: i32,
}

/// One recorded search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub location: String,
    pub vibe: String,
    pub date: chrono::DateTime<chrono::Utc>,
}
