use crate::session::Department;

/// Outcome of the main-menu routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Department(Department),
    /// No digit pressed and no keyword matched (or no input at all).
    NoMatch,
}

const SALES_KEYWORDS: &[&str] = &["sales", "estimate", "inspection", "roof replacement"];
const SERVICE_KEYWORDS: &[&str] = &["service", "leak", "repair", "storm"];

/// Decide the department from menu input.
///
/// Keypad digits take priority over speech when both are present: 1 routes
/// to Sales, 2 to Service, any other digit to Billing. Speech is matched by
/// substring against the keyword tables. Anything unmatched is `NoMatch`;
/// the caller of this function applies the configured fallback (route to
/// Billing, or re-prompt the menu).
pub fn route_menu(digits: Option<&str>, speech: Option<&str>) -> RouteDecision {
    if let Some(digits) = digits.map(str::trim).filter(|d| !d.is_empty()) {
        return RouteDecision::Department(match digits {
            "1" => Department::Sales,
            "2" => Department::Service,
            _ => Department::Billing,
        });
    }

    if let Some(speech) = speech.map(str::trim).filter(|s| !s.is_empty()) {
        let lowered = speech.to_lowercase();
        if SALES_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return RouteDecision::Department(Department::Sales);
        }
        if SERVICE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            return RouteDecision::Department(Department::Service);
        }
    }

    RouteDecision::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_one_routes_to_sales() {
        assert_eq!(
            route_menu(Some("1"), None),
            RouteDecision::Department(Department::Sales)
        );
    }

    #[test]
    fn test_digit_two_routes_to_service() {
        assert_eq!(
            route_menu(Some("2"), None),
            RouteDecision::Department(Department::Service)
        );
    }

    #[test]
    fn test_other_digit_routes_to_billing() {
        assert_eq!(
            route_menu(Some("9"), None),
            RouteDecision::Department(Department::Billing)
        );
    }

    #[test]
    fn test_digits_take_priority_over_speech() {
        assert_eq!(
            route_menu(Some("2"), Some("I need an estimate")),
            RouteDecision::Department(Department::Service)
        );
    }

    #[test]
    fn test_estimate_speech_routes_to_sales() {
        assert_eq!(
            route_menu(None, Some("I need an estimate")),
            RouteDecision::Department(Department::Sales)
        );
    }

    #[test]
    fn test_leaking_speech_routes_to_service() {
        assert_eq!(
            route_menu(None, Some("my roof is leaking")),
            RouteDecision::Department(Department::Service)
        );
    }

    #[test]
    fn test_speech_matching_is_case_insensitive() {
        assert_eq!(
            route_menu(None, Some("ROOF REPLACEMENT please")),
            RouteDecision::Department(Department::Sales)
        );
    }

    #[test]
    fn test_unmatched_speech_is_no_match() {
        assert_eq!(
            route_menu(None, Some("I'd like to order a pizza")),
            RouteDecision::NoMatch
        );
    }

    #[test]
    fn test_empty_input_is_no_match() {
        assert_eq!(route_menu(None, None), RouteDecision::NoMatch);
        assert_eq!(route_menu(Some("  "), Some("")), RouteDecision::NoMatch);
    }
}
