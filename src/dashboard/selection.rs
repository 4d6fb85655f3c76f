use service::MeasurementId;

/// Single source of truth for the currently selected measurement, written by
/// either view, read by both. Selecting never reloads data; it only changes
/// how the current result set is projected.
///
/// A selection pointing at a measurement absent from the current page stays
/// set: it simply renders unhighlighted until that id reappears. Pagination
/// never clears it silently.
#[derive(Debug, Default)]
pub struct SelectionLink {
    selected: Option<MeasurementId>,
}

impl SelectionLink {
    pub fn select(&mut self, id: MeasurementId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_overwrites_regardless_of_prior_value() {
        let mut selection = SelectionLink::default();
        selection.select("m1".to_string());
        selection.select("m2".to_string());

        assert_eq!(selection.selected(), Some("m2"));
    }

    #[test]
    fn clear_resets_to_none() {
        let mut selection = SelectionLink::default();
        selection.select("m1".to_string());
        selection.clear();

        assert_eq!(selection.selected(), None);
    }
}
