//! Dropdown selector for choosing a country.

use crate::state::AppState;
use dioxus::prelude::*;
use pma_dataset::Metric;

#[derive(Props, Clone, PartialEq)]
pub struct CountrySelectorProps {
    /// Metric whose primary dataset supplies the country list.
    #[props(default = Metric::Pm25)]
    pub source_metric: Metric,
}

/// Country dropdown fed by the loaded datasets.
#[component]
pub fn CountrySelector(props: CountrySelectorProps) -> Element {
    let mut state = use_context::<AppState>();

    let countries: Vec<String> = match state.store.read().as_ref() {
        Some(store) => store.countries(props.source_metric),
        None => Vec::new(),
    };
    let selected = state.selection.read().country.clone().unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        let country = if value.is_empty() { None } else { Some(value) };
        state.selection.write().select_country(country);
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "country-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Country: "
            }
            select {
                id: "country-select",
                onchange: on_change,
                option {
                    value: "",
                    selected: selected.is_empty(),
                    "Select a country"
                }
                for country in countries.iter() {
                    option {
                        value: "{country}",
                        selected: *country == selected,
                        "{country}"
                    }
                }
            }
        }
    }
}
