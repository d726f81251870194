/// Chrome icon shown next to the search input.
pub const SEARCH_ASSET: &str = "assets/search.png";
/// Chrome icon for the humidity block.
pub const HUMIDITY_ASSET: &str = "assets/humidity.png";
/// Chrome icon for the wind block.
pub const WIND_ASSET: &str = "assets/wind.png";

/// Display category selected from a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconRef {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl IconRef {
    /// Map an OpenWeather icon code (e.g. `"10d"`) to a category.
    /// Codes outside the table fall back to [`IconRef::Clear`].
    pub fn from_condition_code(code: &str) -> Self {
        match code {
            "01d" | "01n" => IconRef::Clear,
            "02d" | "02n" | "03d" | "03n" => IconRef::Cloud,
            "04d" | "04n" => IconRef::Drizzle,
            "09d" | "09n" | "10d" | "10n" => IconRef::Rain,
            "13d" | "13n" => IconRef::Snow,
            _ => IconRef::Clear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconRef::Clear => "clear",
            IconRef::Cloud => "cloud",
            IconRef::Drizzle => "drizzle",
            IconRef::Rain => "rain",
            IconRef::Snow => "snow",
        }
    }

    /// Local image asset for this category.
    pub fn asset(&self) -> &'static str {
        match self {
            IconRef::Clear => "assets/clear.png",
            IconRef::Cloud => "assets/cloud.png",
            IconRef::Drizzle => "assets/drizzle.png",
            IconRef::Rain => "assets/rain.png",
            IconRef::Snow => "assets/snow.png",
        }
    }

    /// Terminal stand-in for the image asset.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconRef::Clear => "☀",
            IconRef::Cloud => "☁",
            IconRef::Drizzle => "🌦",
            IconRef::Rain => "🌧",
            IconRef::Snow => "❄",
        }
    }

    pub const fn all() -> &'static [IconRef] {
        &[IconRef::Clear, IconRef::Cloud, IconRef::Drizzle, IconRef::Rain, IconRef::Snow]
    }
}

impl std::fmt::Display for IconRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flat display model produced by a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Degrees Celsius, floored.
    pub temperature: i32,
    pub humidity: u8,
    pub wind_speed: f64,
    pub location: String,
    pub icon: IconRef,
}
