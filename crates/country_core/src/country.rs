use serde::{Deserialize, Serialize};

/// One element of the countries payload.
///
/// Required fields must all be present for deserialization to succeed;
/// unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub currency: Currency,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Country {
    pub fn new(
        name: impl Into<String>,
        capital: impl Into<String>,
        region: impl Into<String>,
        currency: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            capital: capital.into(),
            region: region.into(),
            currency: Currency::named(currency),
            code: code.into(),
            flag: None,
            language: None,
        }
    }

    /// Row heading: `"{name}, {region}"`.
    pub fn title(&self) -> String {
        format!("{}, {}", self.name, self.region)
    }
}

impl Currency {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: None,
            symbol: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_gist_element() {
        let raw = r#"{
            "capital": "Kabul",
            "code": "AF",
            "currency": { "code": "AFN", "name": "Afghan afghani", "symbol": "؋" },
            "flag": "https://restcountries.eu/data/afg.svg",
            "language": { "code": "ps", "name": "Pashto" },
            "name": "Afghanistan",
            "region": "AS",
            "demonym": "Afghan"
        }"#;
        let country: Country = serde_json::from_str(raw).unwrap();
        assert_eq!(country.name, "Afghanistan");
        assert_eq!(country.currency.code.as_deref(), Some("AFN"));
        assert_eq!(country.language.unwrap().name, "Pashto");
        assert_eq!(country.flag.as_deref(), Some("https://restcountries.eu/data/afg.svg"));
    }

    #[test]
    fn missing_required_field_fails() {
        let raw = r#"{ "name": "x", "capital": "y", "currency": { "name": "z" }, "code": "q" }"#;
        let err = serde_json::from_str::<Country>(raw).unwrap_err();
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn currency_requires_name() {
        let raw = r#"{ "name": "x", "capital": "y", "region": "", "currency": {}, "code": "q" }"#;
        assert!(serde_json::from_str::<Country>(raw).is_err());
    }

    #[test]
    fn title_joins_name_and_region() {
        let country = Country::new("Chile", "Santiago", "SA", "Chilean peso", "CL");
        assert_eq!(country.title(), "Chile, SA");
    }
}
