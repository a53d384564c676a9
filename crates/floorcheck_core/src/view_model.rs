use crate::{CalculationResult, PreviewImage, SessionState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    /// True while the upload is in flight; drives the loading overlay.
    pub loading: bool,
    pub preview: Option<PreviewImage>,
    pub result: Option<ResultView>,
    pub error: Option<String>,
    pub can_reset: bool,
    /// False while loading: both drop zone and file picker are disabled.
    pub selection_enabled: bool,
    pub dirty: bool,
}

/// Result figures preformatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub square_foot_text: String,
    pub variance_text: String,
}

impl ResultView {
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            square_foot_text: format!("{:.2} sq ft", result.square_foot),
            variance_text: format!("{:.2}", result.variance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResultView;
    use crate::CalculationResult;

    #[test]
    fn result_fields_are_formatted_to_two_decimals() {
        let view = ResultView::from_result(&CalculationResult {
            square_foot: 523.4,
            variance: 0.02,
        });
        assert_eq!(view.square_foot_text, "523.40 sq ft");
        assert_eq!(view.variance_text, "0.02");
    }

    #[test]
    fn whole_numbers_keep_trailing_zeroes() {
        let view = ResultView::from_result(&CalculationResult {
            square_foot: 1200.0,
            variance: 0.0,
        });
        assert_eq!(view.square_foot_text, "1200.00 sq ft");
        assert_eq!(view.variance_text, "0.00");
    }
}
