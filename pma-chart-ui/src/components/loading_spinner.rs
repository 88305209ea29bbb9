//! Loading spinner component.

use dioxus::prelude::*;

/// Simple loading indicator shown while datasets are in flight.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #94a3b8;",
            "Loading datasets..."
        }
    }
}
