//! Dropdown selector for choosing the displayed metric.

use crate::state::AppState;
use dioxus::prelude::*;
use pma_dataset::Metric;

fn option_label(metric: Metric) -> String {
    if metric.unit().is_empty() {
        metric.label().to_string()
    } else {
        format!("{} ({})", metric.label(), metric.unit())
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct MetricSelectorProps {
    /// Metrics offered in the dropdown; defaults to all of them.
    #[props(default = Metric::ALL.to_vec())]
    pub metrics: Vec<Metric>,
}

/// Metric dropdown. Updates the shared selection on change; apps react to
/// the selection signal to refetch/redraw.
#[component]
pub fn MetricSelector(props: MetricSelectorProps) -> Element {
    let mut state = use_context::<AppState>();
    let selected = state.selection.read().metric;

    let on_change = move |evt: Event<FormData>| {
        if let Ok(metric) = evt.value().parse::<Metric>() {
            state.selection.write().select_metric(metric);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "metric-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Metric: "
            }
            select {
                id: "metric-select",
                onchange: on_change,
                for metric in props.metrics.iter() {
                    option {
                        value: metric.id(),
                        selected: *metric == selected,
                        {option_label(*metric)}
                    }
                }
            }
        }
    }
}
