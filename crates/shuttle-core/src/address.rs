//! Shipping addresses and client-side validation of address input.

use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// A saved shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    #[serde(flatten)]
    pub form: AddressForm,
    #[serde(default)]
    pub is_default: bool,
}

/// Address fields as entered by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressForm {
    pub recipient_name: String,
    pub phone_number: String,
    pub zipcode: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub order_memo: String,
}

impl AddressForm {
    /// Checks the required fields: zipcode, first address line, recipient,
    /// phone.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::MissingFields`] naming every blank required
    /// field, in form order.
    pub fn validate(&self) -> Result<(), AddressError> {
        let missing: Vec<&'static str> = [
            ("zipcode", &self.zipcode),
            ("address_line1", &self.address_line1),
            ("recipient_name", &self.recipient_name),
            ("phone_number", &self.phone_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AddressError::MissingFields(missing))
        }
    }
}

/// Picks the address checkout should start with: the default one, else the
/// first saved address.
#[must_use]
pub fn preferred_address(addresses: &[Address]) -> Option<&Address> {
    addresses
        .iter()
        .find(|a| a.is_default)
        .or_else(|| addresses.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddressForm {
        AddressForm {
            recipient_name: "홍길동".to_string(),
            phone_number: "01012345678".to_string(),
            zipcode: "28644".to_string(),
            address_line1: "충북 청주시 서원구 모충로 61".to_string(),
            address_line2: "302호".to_string(),
            order_memo: String::new(),
        }
    }

    #[test]
    fn complete_form_validates() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn line2_and_memo_are_optional() {
        let f = AddressForm {
            address_line2: String::new(),
            ..form()
        };
        assert!(f.validate().is_ok());
    }

    #[test]
    fn blank_required_fields_are_all_reported() {
        let f = AddressForm {
            zipcode: " ".to_string(),
            phone_number: String::new(),
            ..form()
        };
        assert_eq!(
            f.validate().unwrap_err(),
            AddressError::MissingFields(vec!["zipcode", "phone_number"])
        );
    }

    #[test]
    fn preferred_address_prefers_default() {
        let a = Address {
            id: "a1".to_string(),
            form: form(),
            is_default: false,
        };
        let b = Address {
            id: "a2".to_string(),
            form: form(),
            is_default: true,
        };
        let list = vec![a.clone(), b];
        assert_eq!(preferred_address(&list).unwrap().id, "a2");
        assert_eq!(preferred_address(&[a]).unwrap().id, "a1");
        assert!(preferred_address(&[]).is_none());
    }
}
