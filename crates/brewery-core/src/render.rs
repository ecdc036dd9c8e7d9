//! Page rendering: a pure projection of [`ViewState`] onto a view port.
//!
//! [`project`] derives a [`PageView`] from the state without touching it.
//! [`paint`] pushes a [`PageView`] through a [`ViewPort`], which is the
//! only side-effect channel. The port is injected so the pipeline can be
//! driven by a terminal, a browser bridge, or a test recorder.

use brewery_types::{BreweryRecord, StatusStyle};

use crate::state::ViewState;

/// Text shown in place of the list when no region has been chosen.
pub const NO_REGION_PLACEHOLDER: &str = "No state selected";

/// Phone text for breweries without a listed number.
const MISSING_PHONE: &str = "N/A";

/// The rendering surface the controller draws on.
pub trait ViewPort {
    /// Replace the heading text.
    fn set_heading(&mut self, heading: &str);
    /// Replace the status banner text and style.
    fn set_status(&mut self, label: &str, style: StatusStyle);
    /// Remove every list entry, placeholder included.
    fn clear_list(&mut self);
    /// Append one brewery entry to the list.
    fn append_card(&mut self, card: &BreweryCard);
    /// Show a message in place of list entries.
    fn show_placeholder(&mut self, message: &str);
    /// Replace the city checkbox list.
    fn set_city_options(&mut self, options: &[CityOption]);
}

/// One brewery as it appears in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreweryCard {
    /// Brewery name.
    pub name: String,
    /// Wire name of the brewery type.
    pub brewery_type: String,
    /// Street line; empty when the directory has none.
    pub street: String,
    /// `"{city}, {postal_code}"`.
    pub locality: String,
    /// Phone number or `N/A`.
    pub phone: String,
    /// Website link target, when listed.
    pub website_url: Option<String>,
}

impl From<&BreweryRecord> for BreweryCard {
    fn from(brewery: &BreweryRecord) -> Self {
        Self {
            name: brewery.name.clone(),
            brewery_type: brewery.brewery_type.to_string(),
            street: brewery.street.clone().unwrap_or_default(),
            locality: format!("{}, {}", brewery.city, brewery.postal_code),
            phone: brewery
                .phone
                .clone()
                .unwrap_or_else(|| MISSING_PHONE.to_owned()),
            website_url: brewery.website_url.clone(),
        }
    }
}

/// A city checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityOption {
    /// City label.
    pub name: String,
    /// Whether the checkbox is ticked.
    pub checked: bool,
}

/// The list area: either entries or a placeholder message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// No region selected.
    Placeholder(String),
    /// Breweries passing the city filter.
    Cards(Vec<BreweryCard>),
}

/// Everything a port needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Page heading.
    pub heading: String,
    /// Status banner text.
    pub status_label: String,
    /// Status banner style.
    pub status_style: StatusStyle,
    /// The list area.
    pub list: ListView,
    /// City checkboxes, sorted by name.
    pub cities: Vec<CityOption>,
}

impl ListView {
    /// Number of breweries listed.
    pub const fn card_count(&self) -> usize {
        match self {
            Self::Placeholder(_) => 0,
            Self::Cards(cards) => cards.len(),
        }
    }
}

impl PageView {
    /// Number of breweries in the list area.
    pub const fn displayed_count(&self) -> usize {
        self.list.card_count()
    }
}

/// Heading for the current region and type filter.
pub fn heading(state: &ViewState) -> String {
    let mut heading = String::from("List of Breweries");
    if !state.selected_region.is_empty() {
        heading.push_str(&format!(" for '{}'", state.selected_region));
    }
    if let Some(brewery_type) = state.type_filter {
        heading.push_str(&format!(" [type='{brewery_type}']"));
    }
    heading
}

/// Status banner text, with live counts once results are settled.
pub fn status_label(state: &ViewState, displayed: usize) -> String {
    let label = state.status.label();
    if state.status.is_settled() && !state.entities().is_empty() {
        format!(
            "{label} [{displayed} breweries, {} cities]",
            state.shown_city_count()
        )
    } else {
        label
    }
}

/// Derive the page from the state.
pub fn project(state: &ViewState) -> PageView {
    let list = if state.selected_region.is_empty() {
        ListView::Placeholder(NO_REGION_PLACEHOLDER.to_owned())
    } else {
        ListView::Cards(state.displayed().map(BreweryCard::from).collect())
    };

    let displayed = list.card_count();

    let cities = state
        .city_options()
        .iter()
        .map(|city| CityOption {
            name: city.clone(),
            checked: state.is_city_checked(city),
        })
        .collect();

    PageView {
        heading: heading(state),
        status_label: status_label(state, displayed),
        status_style: state.status.style(),
        list,
        cities,
    }
}

/// Draw a page on a port, replacing whatever was there.
pub fn paint(view: &PageView, port: &mut impl ViewPort) {
    port.set_heading(&view.heading);
    port.set_status(&view.status_label, view.status_style);
    port.clear_list();
    match &view.list {
        ListView::Placeholder(message) => port.show_placeholder(message),
        ListView::Cards(cards) => {
            for card in cards {
                port.append_card(card);
            }
        }
    }
    port.set_city_options(&view.cities);
}

/// Project the state, draw it, and record how many breweries are shown.
pub fn render(state: &mut ViewState, port: &mut impl ViewPort) -> PageView {
    let view = project(state);
    paint(&view, port);
    state.displayed_count = view.displayed_count();
    view
}

#[cfg(test)]
mod tests {
    use brewery_types::{BreweryType, StatusValue};

    use super::*;

    fn brewery(name: &str, brewery_type: BreweryType, city: &str) -> BreweryRecord {
        BreweryRecord {
            name: name.to_owned(),
            brewery_type,
            street: Some("1 Main St".to_owned()),
            city: city.to_owned(),
            postal_code: "43215".to_owned(),
            phone: None,
            website_url: Some("http://example.com".to_owned()),
        }
    }

    fn ohio_done() -> ViewState {
        let mut state = ViewState::new();
        state.selected_region = "OH".to_owned();
        state.set_entities(vec![
            brewery("Land-Grant", BreweryType::Micro, "Columbus"),
            brewery("Seventh Son", BreweryType::Micro, "Columbus"),
            brewery("Great Lakes", BreweryType::Brewpub, "Cleveland"),
        ]);
        state.status = StatusValue::Done;
        state
    }

    #[test]
    fn heading_reflects_region_and_type() {
        let mut state = ViewState::new();
        assert_eq!(heading(&state), "List of Breweries");
        state.selected_region = "OH".to_owned();
        assert_eq!(heading(&state), "List of Breweries for 'OH'");
        state.type_filter = Some(BreweryType::Brewpub);
        assert_eq!(heading(&state), "List of Breweries for 'OH' [type='brewpub']");
    }

    #[test]
    fn no_region_shows_placeholder() {
        let view = project(&ViewState::new());
        assert_eq!(
            view.list,
            ListView::Placeholder(NO_REGION_PLACEHOLDER.to_owned())
        );
        assert_eq!(view.displayed_count(), 0);
        assert_eq!(view.status_label, "Idle");
        assert_eq!(view.status_style, StatusStyle::Neutral);
    }

    #[test]
    fn done_label_carries_counts() {
        let mut state = ohio_done();
        let view = project(&state);
        assert_eq!(view.status_label, "Done [3 breweries, 2 cities]");
        assert_eq!(view.status_style, StatusStyle::Done);

        state.toggle_city("Cleveland", false);
        let view = project(&state);
        assert_eq!(view.displayed_count(), 2);
        assert!(view.status_label.contains("[2 breweries, 1 cities]"));
    }

    #[test]
    fn in_flight_label_has_no_counts() {
        let mut state = ohio_done();
        state.status = StatusValue::Fetching;
        assert_eq!(project(&state).status_label, "Fetching breweries...");
    }

    #[test]
    fn card_fills_missing_fields() {
        let mut record = brewery("Great Lakes", BreweryType::Brewpub, "Cleveland");
        record.street = None;
        record.website_url = None;
        let card = BreweryCard::from(&record);
        assert_eq!(card.street, "");
        assert_eq!(card.phone, "N/A");
        assert_eq!(card.locality, "Cleveland, 43215");
        assert_eq!(card.brewery_type, "brewpub");
        assert_eq!(card.website_url, None);
    }

    #[test]
    fn city_checkboxes_track_filter() {
        let mut state = ohio_done();
        state.toggle_city("Columbus", true);
        let view = project(&state);
        assert_eq!(
            view.cities,
            vec![
                CityOption {
                    name: "Cleveland".to_owned(),
                    checked: false
                },
                CityOption {
                    name: "Columbus".to_owned(),
                    checked: true
                },
            ]
        );
    }
}
