//! Pure projection of widget state onto a printable view.

use std::fmt;

use crate::{
    model::{HUMIDITY_ASSET, IconRef, SEARCH_ASSET, WIND_ASSET},
    widget::WeatherWidget,
};

const PLACEHOLDER: &str = "Search...";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub search: SearchBar,
    pub error: Option<String>,
    pub panel: Option<Panel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchBar {
    pub draft: String,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub icon: IconRef,
    pub temperature: String,
    pub location: String,
    pub humidity: Stat,
    pub wind: Stat,
}

/// One labelled reading under the main panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub icon: &'static str,
    pub value: String,
    pub label: &'static str,
}

pub fn view(widget: &WeatherWidget) -> View {
    let panel = widget.report().map(|r| Panel {
        icon: r.icon,
        temperature: format!("{}°C", r.temperature),
        location: r.location.clone(),
        humidity: Stat {
            icon: HUMIDITY_ASSET,
            value: format!("{}%", r.humidity),
            label: "Humidity",
        },
        wind: Stat {
            icon: WIND_ASSET,
            value: format!("{} KM/hr", r.wind_speed),
            label: "Wind Speed",
        },
    });

    View {
        search: SearchBar {
            draft: widget.draft().to_string(),
            icon: SEARCH_ASSET,
        },
        error: widget.error().filter(|e| !e.is_empty()).map(str::to_string),
        panel,
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.search.draft.is_empty() {
            writeln!(f, "[ {PLACEHOLDER:<24} ] 🔍")?;
        } else {
            writeln!(f, "[ {:<24} ] 🔍", self.search.draft)?;
        }

        if let Some(error) = &self.error {
            writeln!(f, "! {error}")?;
        }

        if let Some(panel) = &self.panel {
            writeln!(f)?;
            writeln!(f, "    {}  {}", panel.icon.glyph(), panel.temperature)?;
            writeln!(f, "    {}", panel.location)?;
            writeln!(f)?;
            writeln!(
                f,
                "    💧 {} {}    🌬 {} {}",
                panel.humidity.value, panel.humidity.label, panel.wind.value, panel.wind.label
            )?;
        }

        Ok(())
    }
}
