use std::collections::HashMap;

use models::house::HouseColumns;
use serde::{Deserialize, Serialize};

use super::errors::ListingError;

const TITLE_MAX: usize = 100;
const LOCATION_MAX: usize = 100;
const CONTACT_NAME_MAX: usize = 100;
const CONTACT_PHONE_MAX: usize = 20;

/// Text fields of the add/edit forms, as submitted.
pub const FORM_FIELDS: [&str; 6] = ["title", "description", "price", "location", "contact_name", "contact_phone"];

/// Raw listing form submission. Every field may be absent; `validate` decides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    /// Checkbox semantics: only the presence of the key matters.
    #[serde(default)]
    pub available: bool,
}

impl HouseInput {
    /// Build from decoded form text fields.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let get = |k: &str| fields.get(k).cloned();
        Self {
            title: get("title"),
            description: get("description"),
            price: get("price"),
            location: get("location"),
            contact_name: get("contact_name"),
            contact_phone: get("contact_phone"),
            available: fields.contains_key("available"),
        }
    }

    /// Check required fields and parse the price.
    pub fn validate(&self) -> Result<HouseColumns, ListingError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let price_raw = required("price", &self.price)?;
        let location = required("location", &self.location)?;

        let price: f64 = price_raw.trim().parse().map_err(|_| ListingError::InvalidField {
            field: "price",
            reason: format!("{price_raw:?} is not a number"),
        })?;
        if !price.is_finite() {
            return Err(ListingError::InvalidField { field: "price", reason: "must be finite".into() });
        }

        max_len("title", &title, TITLE_MAX)?;
        max_len("location", &location, LOCATION_MAX)?;
        let contact_name = optional(&self.contact_name);
        let contact_phone = optional(&self.contact_phone);
        if let Some(name) = &contact_name {
            max_len("contact_name", name, CONTACT_NAME_MAX)?;
        }
        if let Some(phone) = &contact_phone {
            max_len("contact_phone", phone, CONTACT_PHONE_MAX)?;
        }

        Ok(HouseColumns { title, description, price, location, contact_name, contact_phone })
    }
}

/// Blank means missing; a present value is kept exactly as submitted.
fn required(field: &'static str, value: &Option<String>) -> Result<String, ListingError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ListingError::MissingField(field)),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ListingError> {
    if value.chars().count() > max {
        return Err(ListingError::InvalidField { field, reason: format!("longer than {max} characters") });
    }
    Ok(())
}

/// A listing as shown to clients: the house row plus its gallery in upload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub image_file: Option<String>,
    pub additional_images: Vec<String>,
    pub available: bool,
}

impl HouseView {
    pub fn new(m: models::house::Model, additional_images: Vec<String>) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            price: m.price,
            location: m.location,
            contact_name: m.contact_name,
            contact_phone: m.contact_phone,
            image_file: m.image_file,
            additional_images,
            available: m.available,
        }
    }

    /// Current values keyed by form field name, for pre-filling the edit form.
    pub fn form_fields(&self) -> HashMap<String, String> {
        let mut fields = HashMap::new();
        fields.insert("title".to_string(), self.title.clone());
        fields.insert("description".to_string(), self.description.clone());
        fields.insert("price".to_string(), self.price.to_string());
        fields.insert("location".to_string(), self.location.clone());
        fields.insert("contact_name".to_string(), self.contact_name.clone().unwrap_or_default());
        fields.insert("contact_phone".to_string(), self.contact_phone.clone().unwrap_or_default());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> HouseInput {
        HouseInput {
            title: Some("Flat".into()),
            description: Some("nice".into()),
            price: Some("100000.0".into()),
            location: Some("Town".into()),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_listing_is_valid() {
        let cols = flat().validate().unwrap();
        assert_eq!(cols.title, "Flat");
        assert_eq!(cols.price, 100000.0);
        assert_eq!(cols.contact_name, None);
    }

    #[test]
    fn absent_or_blank_required_field_is_missing() {
        let input = HouseInput { location: None, ..flat() };
        assert!(matches!(input.validate(), Err(ListingError::MissingField("location"))));
        let input = HouseInput { title: Some("   ".into()), ..flat() };
        assert!(matches!(input.validate(), Err(ListingError::MissingField("title"))));
    }

    #[test]
    fn present_values_are_not_trimmed() {
        let input = HouseInput {
            title: Some("  Flat ".into()),
            price: Some(" 42 ".into()),
            contact_name: Some(" Bob".into()),
            contact_phone: Some("  ".into()),
            ..flat()
        };
        let cols = input.validate().unwrap();
        assert_eq!(cols.title, "  Flat ");
        assert_eq!(cols.price, 42.0);
        assert_eq!(cols.contact_name.as_deref(), Some(" Bob"));
        assert_eq!(cols.contact_phone, None);
    }

    #[test]
    fn price_must_be_a_finite_number() {
        let input = HouseInput { price: Some("cheap".into()), ..flat() };
        let err = input.validate().unwrap_err();
        assert_eq!(err.flash_code().as_deref(), Some("invalid_field:price"));
        let input = HouseInput { price: Some("inf".into()), ..flat() };
        assert!(matches!(input.validate(), Err(ListingError::InvalidField { field: "price", .. })));
    }

    #[test]
    fn over_long_phone_is_rejected() {
        let input = HouseInput { contact_phone: Some("1".repeat(21)), ..flat() };
        assert!(matches!(input.validate(), Err(ListingError::InvalidField { field: "contact_phone", .. })));
    }

    #[test]
    fn available_follows_key_presence() {
        let mut fields: HashMap<String, String> =
            [("title", "Flat"), ("price", "1")].into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        assert!(!HouseInput::from_fields(&fields).available);
        fields.insert("available".into(), String::new());
        assert!(HouseInput::from_fields(&fields).available);
    }
}
