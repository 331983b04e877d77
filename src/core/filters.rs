use crate::models::{Atm, Network};

/// Check if an ATM accepts at least one of the requested networks
///
/// An empty request matches nothing.
#[inline]
pub fn matches_networks(atm: &Atm, networks: &[Network]) -> bool {
    atm.networks.iter().any(|network| networks.contains(network))
}

/// Check if an ATM offers at least one of the requested services
///
/// No-op when nothing is requested.
#[inline]
pub fn matches_services(atm: &Atm, services: &[String]) -> bool {
    services.is_empty() || services.iter().any(|service| atm.services.contains(service))
}

/// Check if an ATM dispenses at least one of the requested denominations
///
/// No-op when nothing is requested. ATMs without cash data never match an
/// active filter.
#[inline]
pub fn matches_cash(atm: &Atm, denominations: &[String]) -> bool {
    if denominations.is_empty() {
        return true;
    }

    match &atm.available_cash {
        Some(cash) => denominations.iter().any(|denomination| cash.contains(denomination)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn create_test_atm(networks: Vec<Network>, services: &[&str], cash: Option<&[&str]>) -> Atm {
        Atm {
            id: "test_atm".to_string(),
            name: "Test ATM".to_string(),
            address: "12 Soborna St.".to_string(),
            city: "Vinnytsia".to_string(),
            state: "Center".to_string(),
            postal_code: "21000".to_string(),
            coordinates: Coordinates::new(49.2331, 28.4682),
            networks,
            services: services.iter().map(|s| s.to_string()).collect(),
            hours: "24/7".to_string(),
            phone_number: None,
            available_cash: cash.map(|c| c.iter().map(|d| d.to_string()).collect()),
            distance: None,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_network_overlap() {
        let atm = create_test_atm(vec![Network::Visa, Network::Mastercard], &[], None);

        assert!(matches_networks(&atm, &[Network::Visa]));
        assert!(matches_networks(&atm, &[Network::Mastercard]));
    }

    #[test]
    fn test_network_no_overlap() {
        let atm = create_test_atm(vec![Network::Mastercard], &[], None);

        assert!(!matches_networks(&atm, &[Network::Visa]));
        assert!(!matches_networks(&atm, &[]));
    }

    #[test]
    fn test_services_empty_is_noop() {
        let atm = create_test_atm(vec![Network::Visa], &[], None);
        assert!(matches_services(&atm, &[]));
    }

    #[test]
    fn test_services_any_match() {
        let atm = create_test_atm(vec![Network::Visa], &["Cash Withdrawal", "Balance Inquiry"], None);

        assert!(matches_services(&atm, &strings(&["Cash Deposit", "Balance Inquiry"])));
        assert!(!matches_services(&atm, &strings(&["Cash Deposit"])));
    }

    #[test]
    fn test_services_are_case_sensitive() {
        let atm = create_test_atm(vec![Network::Visa], &["Cash Withdrawal"], None);
        assert!(!matches_services(&atm, &strings(&["cash withdrawal"])));
    }

    #[test]
    fn test_cash_filter() {
        let atm = create_test_atm(vec![Network::Visa], &[], Some(&["100 UAH", "500 UAH"]));

        assert!(matches_cash(&atm, &[]));
        assert!(matches_cash(&atm, &strings(&["50 UAH", "500 UAH"])));
        assert!(!matches_cash(&atm, &strings(&["200 UAH"])));
    }

    #[test]
    fn test_cash_filter_excludes_missing_data() {
        let atm = create_test_atm(vec![Network::Visa], &[], None);

        assert!(matches_cash(&atm, &[]));
        assert!(!matches_cash(&atm, &strings(&["100 UAH"])));
    }
}
