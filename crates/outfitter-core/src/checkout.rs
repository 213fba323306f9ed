//! Shared order fields composed from every guest in the cart.

use crate::config::Config;
use crate::roster::GuestRecord;
use crate::{Error, Result};

/// Values typed into the shipping step of checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub country_code: String,
    pub first_names: String,
    pub last_names: String,
    pub discount_code: String,
    pub address: String,
}

impl CheckoutForm {
    /// Compose the form for an order. Country and address come from the first guest.
    pub fn build(guests: &[GuestRecord], config: &Config) -> Result<Self> {
        let first = guests
            .first()
            .ok_or_else(|| Error::InvalidState("cannot check out an empty cart".to_string()))?;

        let country_code = config.country_code(&first.country).ok_or_else(|| {
            Error::InvalidConfig(format!("no country code for '{}'", first.country))
        })?;

        let (first_names, last_names) = combined_names(guests);

        Ok(Self {
            country_code: country_code.to_string(),
            first_names,
            last_names,
            discount_code: config.discount_code.clone(),
            address: first.address.clone(),
        })
    }
}

/// Combined first and last name fields for a group of guests.
///
/// John Smith + Mary Smith gives ("John and Mary", "Smith");
/// John Doe + Mary Smith gives ("John and Mary", "Doe and Smith").
pub fn combined_names(guests: &[GuestRecord]) -> (String, String) {
    let first_names: Vec<String> = guests.iter().map(|g| capitalize(g.first_name())).collect();

    let mut last_names: Vec<String> = Vec::new();
    for guest in guests {
        let last = capitalize(guest.last_name());
        if !last_names.contains(&last) {
            last_names.push(last);
        }
    }

    (join_names(&first_names), join_names(&last_names))
}

/// "A", "A and B", "A, B and C"
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// Upper-case the first character and lower-case the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Pull the code out of "Confirmation #ABC123"
pub fn parse_confirmation_code(text: &str) -> Option<String> {
    let code = text.split('#').nth(1)?.trim();
    (!code.is_empty()).then(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::GearSizes;

    fn guest(name: &str, country: &str, address: &str) -> GuestRecord {
        GuestRecord {
            index: 0,
            reservation: 1,
            name: name.to_string(),
            address: address.to_string(),
            country: country.to_string(),
            sex: "Men".to_string(),
            sizes: GearSizes::default(),
            notes: None,
            gear_ordered: None,
        }
    }

    fn config() -> Config {
        Config::from_json_str(
            r#"{
                "DISCOUNT_CODE": "TOUR10",
                "BILLING_ADDR": {
                    "FIRST_NAME": "Ops", "LAST_NAME": "Desk", "COMPANY": "Tours Inc",
                    "ADDRESS": "5 Office Park", "CITY": "Boulder", "STATE": "CO", "ZIP_CODE": "80301"
                },
                "PRODUCT_PAGES": {},
                "RES_PAGE": "https://res.example.com/booking/"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_single_guest_names_unchanged() {
        let (first, last) = combined_names(&[guest("John Smith", "USA", "")]);
        assert_eq!(first, "John");
        assert_eq!(last, "Smith");
    }

    #[test]
    fn test_shared_last_name_is_deduplicated() {
        let (first, last) = combined_names(&[
            guest("John Smith", "USA", ""),
            guest("Mary Smith", "USA", ""),
        ]);
        assert_eq!(first, "John and Mary");
        assert_eq!(last, "Smith");
    }

    #[test]
    fn test_different_last_names_are_joined() {
        let (first, last) = combined_names(&[
            guest("John Doe", "USA", ""),
            guest("Mary Smith", "USA", ""),
        ]);
        assert_eq!(first, "John and Mary");
        assert_eq!(last, "Doe and Smith");
    }

    #[test]
    fn test_three_guests_use_commas() {
        let (first, last) = combined_names(&[
            guest("john doe", "USA", ""),
            guest("MARY SMITH", "USA", ""),
            guest("Ann Doe", "USA", ""),
        ]);
        assert_eq!(first, "John, Mary and Ann");
        assert_eq!(last, "Doe and Smith");
    }

    #[test]
    fn test_form_uses_first_guest() {
        let form = CheckoutForm::build(
            &[
                guest("Luc Tremblay", " Canada ", "10 Rue Principale"),
                guest("Ana Tremblay", "USA", "elsewhere"),
            ],
            &config(),
        )
        .unwrap();

        assert_eq!(form.country_code, "CA");
        assert_eq!(form.address, "10 Rue Principale");
        assert_eq!(form.discount_code, "TOUR10");
        assert_eq!(form.first_names, "Luc and Ana");
        assert_eq!(form.last_names, "Tremblay");
    }

    #[test]
    fn test_form_rejects_empty_cart_and_unknown_country() {
        assert!(CheckoutForm::build(&[], &config()).is_err());

        let err = CheckoutForm::build(&[guest("A B", "Narnia", "")], &config()).unwrap_err();
        assert!(err.to_string().contains("Narnia"));
    }

    #[test]
    fn test_parse_confirmation_code() {
        assert_eq!(
            parse_confirmation_code("Confirmation # ABC123 "),
            Some("ABC123".to_string())
        );
        assert_eq!(
            parse_confirmation_code("Confirmation #XYZ"),
            Some("XYZ".to_string())
        );
        assert_eq!(parse_confirmation_code("Thank you"), None);
        assert_eq!(parse_confirmation_code("Confirmation #"), None);
    }
}
