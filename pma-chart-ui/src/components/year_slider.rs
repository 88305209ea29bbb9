//! Range slider snapping to the common-year set.

use crate::state::AppState;
use dioxus::prelude::*;
use pma_dataset::Metric;

#[derive(Props, Clone, PartialEq)]
pub struct YearSliderProps {
    /// Metrics whose common years are intersected to form the slider
    /// range. Empty means "the currently selected metric".
    #[props(default = Vec::new())]
    pub metrics: Vec<Metric>,
}

/// Year slider over the common years of the relevant metrics.
///
/// The slider value is an index into the common-year list, so it can only
/// ever land on years every required dataset actually has.
#[component]
pub fn YearSlider(props: YearSliderProps) -> Element {
    let mut state = use_context::<AppState>();

    let years: Vec<i32> = match state.store.read().as_ref() {
        Some(store) => {
            let metrics = if props.metrics.is_empty() {
                vec![state.selection.read().metric]
            } else {
                props.metrics.clone()
            };
            let mut iter = metrics.iter();
            let first = iter
                .next()
                .map(|m| store.common_years(*m))
                .unwrap_or_default();
            iter.fold(first, |acc, m| {
                let other = store.common_years(*m);
                acc.into_iter().filter(|y| other.contains(y)).collect()
            })
        }
        None => Vec::new(),
    };

    if years.is_empty() {
        return rsx! {
            div {
                style: "margin: 8px 0; color: #94a3b8;",
                "No overlapping years available"
            }
        };
    }

    let first_year = *years.first().unwrap();
    let last_year = *years.last().unwrap();
    let selected = state.selection.read().year.unwrap_or(last_year);
    let index = years.iter().position(|&y| y == selected).unwrap_or(years.len() - 1);
    let max_index = years.len() - 1;

    let years_for_input = years.clone();
    let on_input = move |evt: Event<FormData>| {
        if let Ok(i) = evt.value().parse::<usize>() {
            if let Some(&year) = years_for_input.get(i) {
                state.selection.write().select_year(year);
            }
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Year: {selected}"
            }
            input {
                r#type: "range",
                min: "0",
                max: "{max_index}",
                value: "{index}",
                style: "flex: 1; max-width: 420px;",
                oninput: on_input,
            }
            span {
                style: "color: #94a3b8; font-size: 12px;",
                "{first_year}–{last_year}"
            }
        }
    }
}
