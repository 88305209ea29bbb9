//! The interaction state machine shared by all interactive charts.

/// Chart lifecycle: `Loading` until the datasets for the current selection
/// resolve, then `Empty` or `Ready`, with `Hovering` layered on top of
/// `Ready` while the pointer is over an entity. Any dataset-changing input
/// returns to `Loading`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartPhase {
    Loading,
    Empty,
    Ready,
    Hovering(String),
}

impl ChartPhase {
    /// A load finished: `Ready` if the selection has data, `Empty` if the
    /// common-year intersection or the selection's lookups came up dry.
    pub fn on_load_finished(&mut self, has_data: bool) {
        *self = if has_data {
            ChartPhase::Ready
        } else {
            ChartPhase::Empty
        };
    }

    /// Pointer entered an entity. Only meaningful once the chart is
    /// interactive; ignored while loading or empty.
    pub fn on_pointer_enter(&mut self, entity: &str) {
        if matches!(self, ChartPhase::Ready | ChartPhase::Hovering(_)) {
            *self = ChartPhase::Hovering(entity.to_string());
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if matches!(self, ChartPhase::Hovering(_)) {
            *self = ChartPhase::Ready;
        }
    }

    /// A dataset-changing input (year, metric, country, dataset) arrived.
    pub fn on_input_change(&mut self) {
        *self = ChartPhase::Loading;
    }

    pub fn hovered_entity(&self) -> Option<&str> {
        match self {
            ChartPhase::Hovering(entity) => Some(entity),
            _ => None,
        }
    }
}

impl Default for ChartPhase {
    fn default() -> Self {
        ChartPhase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_resolves_to_ready_or_empty() {
        let mut phase = ChartPhase::default();
        phase.on_load_finished(true);
        assert_eq!(phase, ChartPhase::Ready);

        let mut phase = ChartPhase::Loading;
        phase.on_load_finished(false);
        assert_eq!(phase, ChartPhase::Empty);
    }

    #[test]
    fn hover_cycles_between_ready_and_hovering() {
        let mut phase = ChartPhase::Ready;
        phase.on_pointer_enter("Numeria");
        assert_eq!(phase.hovered_entity(), Some("Numeria"));
        // Moving straight onto a neighboring entity re-targets the hover.
        phase.on_pointer_enter("Borduria");
        assert_eq!(phase.hovered_entity(), Some("Borduria"));
        phase.on_pointer_leave();
        assert_eq!(phase, ChartPhase::Ready);
    }

    #[test]
    fn hover_is_ignored_until_interactive() {
        let mut phase = ChartPhase::Loading;
        phase.on_pointer_enter("Numeria");
        assert_eq!(phase, ChartPhase::Loading);

        let mut phase = ChartPhase::Empty;
        phase.on_pointer_enter("Numeria");
        assert_eq!(phase, ChartPhase::Empty);
    }

    #[test]
    fn any_state_returns_to_loading_on_input_change() {
        for mut phase in [
            ChartPhase::Loading,
            ChartPhase::Empty,
            ChartPhase::Ready,
            ChartPhase::Hovering("Numeria".to_string()),
        ] {
            phase.on_input_change();
            assert_eq!(phase, ChartPhase::Loading);
        }
    }
}
