//! Report form shaping
//!
//! Forms arrive as the raw string values of their inputs. Shaping checks
//! the required fields, coerces numbers, fills an empty date with today
//! and produces the typed insert record. A form that fails here never
//! reaches the store.

use crate::database::{
    NewAerialFlightReport, NewSolidApplicationReport, NewSprayReport, ReportKind,
};
use crate::error::FormError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw input values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    /// Trimmed value, `None` when absent or blank
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Check every required field is filled.
    pub fn validate(&self, specs: &[FieldSpec]) -> Result<(), FormError> {
        for spec in specs.iter().filter(|s| s.required) {
            if self.get(spec.name).is_none() {
                return Err(FormError::MissingField(spec.name));
            }
        }
        Ok(())
    }

    fn text(&self, name: &'static str) -> Result<String, FormError> {
        self.get(name)
            .map(str::to_string)
            .ok_or(FormError::MissingField(name))
    }

    fn optional_text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn number(&self, name: &'static str) -> Result<f64, FormError> {
        self.optional_number(name)?
            .ok_or(FormError::MissingField(name))
    }

    fn optional_number(&self, name: &'static str) -> Result<Option<f64>, FormError> {
        match self.get(name) {
            None => Ok(None),
            Some(raw) => parse_number(raw)
                .map(Some)
                .ok_or_else(|| FormError::InvalidNumber {
                    field: name,
                    value: raw.to_string(),
                }),
        }
    }

    fn date_or(&self, name: &'static str, today: NaiveDate) -> Result<NaiveDate, FormError> {
        match self.get(name) {
            None => Ok(today),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                FormError::InvalidDate {
                    field: name,
                    value: raw.to_string(),
                }
            }),
        }
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Accepts `.` or `,` as decimal separator; rejects NaN and infinities.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
}

/// Field description, also served to the frontend to build its inputs
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: true }
}

const fn optional(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: false }
}

/// Field descriptions for the form of `kind`
pub fn form_fields(kind: ReportKind) -> &'static [FieldSpec] {
    match kind {
        ReportKind::Spray => NewSprayReport::FIELDS,
        ReportKind::AerialFlight => NewAerialFlightReport::FIELDS,
        ReportKind::Solid => NewSolidApplicationReport::FIELDS,
    }
}

/// A typed record that can be shaped from submitted form fields
pub trait ReportForm: Sized {
    const FIELDS: &'static [FieldSpec];

    fn shape(fields: &FormFields, today: NaiveDate) -> Result<Self, FormError>;
}

impl ReportForm for NewSprayReport {
    const FIELDS: &'static [FieldSpec] = &[
        optional("flight_date", FieldKind::Date),
        required("crop", FieldKind::Text),
        required("product", FieldKind::Text),
        required("dose_per_hectare", FieldKind::Number),
        required("flight_height", FieldKind::Number),
        required("speed", FieldKind::Number),
        required("spray_volume", FieldKind::Number),
        required("area_hectares", FieldKind::Number),
        optional("temperature", FieldKind::Number),
        optional("humidity", FieldKind::Number),
        optional("wind_speed", FieldKind::Number),
        optional("notes", FieldKind::Text),
    ];

    fn shape(fields: &FormFields, today: NaiveDate) -> Result<Self, FormError> {
        fields.validate(Self::FIELDS)?;

        Ok(Self {
            flight_date: fields.date_or("flight_date", today)?,
            crop: fields.text("crop")?,
            product: fields.text("product")?,
            dose_per_hectare: fields.number("dose_per_hectare")?,
            flight_height: fields.number("flight_height")?,
            speed: fields.number("speed")?,
            spray_volume: fields.number("spray_volume")?,
            area_hectares: fields.number("area_hectares")?,
            temperature: fields.optional_number("temperature")?,
            humidity: fields.optional_number("humidity")?,
            wind_speed: fields.optional_number("wind_speed")?,
            notes: fields.optional_text("notes"),
        })
    }
}

impl ReportForm for NewAerialFlightReport {
    const FIELDS: &'static [FieldSpec] = &[
        optional("flight_date", FieldKind::Date),
        required("crop", FieldKind::Text),
        required("operation_type", FieldKind::Text),
        required("altitude", FieldKind::Number),
        required("speed", FieldKind::Number),
        required("flight_duration", FieldKind::Number),
        required("area_hectares", FieldKind::Number),
        optional("temperature", FieldKind::Number),
        optional("humidity", FieldKind::Number),
        optional("wind_speed", FieldKind::Number),
        optional("notes", FieldKind::Text),
    ];

    fn shape(fields: &FormFields, today: NaiveDate) -> Result<Self, FormError> {
        fields.validate(Self::FIELDS)?;

        Ok(Self {
            flight_date: fields.date_or("flight_date", today)?,
            crop: fields.text("crop")?,
            operation_type: fields.text("operation_type")?,
            altitude: fields.number("altitude")?,
            speed: fields.number("speed")?,
            flight_duration: fields.number("flight_duration")?,
            area_hectares: fields.number("area_hectares")?,
            temperature: fields.optional_number("temperature")?,
            humidity: fields.optional_number("humidity")?,
            wind_speed: fields.optional_number("wind_speed")?,
            notes: fields.optional_text("notes"),
        })
    }
}

impl ReportForm for NewSolidApplicationReport {
    const FIELDS: &'static [FieldSpec] = &[
        optional("application_date", FieldKind::Date),
        required("crop", FieldKind::Text),
        required("product", FieldKind::Text),
        required("quantity_kg", FieldKind::Number),
        required("dose_per_hectare", FieldKind::Number),
        required("application_height", FieldKind::Number),
        required("speed", FieldKind::Number),
        required("area_hectares", FieldKind::Number),
        optional("temperature", FieldKind::Number),
        optional("humidity", FieldKind::Number),
        optional("wind_speed", FieldKind::Number),
        optional("notes", FieldKind::Text),
    ];

    fn shape(fields: &FormFields, today: NaiveDate) -> Result<Self, FormError> {
        fields.validate(Self::FIELDS)?;

        Ok(Self {
            application_date: fields.date_or("application_date", today)?,
            crop: fields.text("crop")?,
            product: fields.text("product")?,
            quantity_kg: fields.number("quantity_kg")?,
            dose_per_hectare: fields.number("dose_per_hectare")?,
            application_height: fields.number("application_height")?,
            speed: fields.number("speed")?,
            area_hectares: fields.number("area_hectares")?,
            temperature: fields.optional_number("temperature")?,
            humidity: fields.optional_number("humidity")?,
            wind_speed: fields.optional_number("wind_speed")?,
            notes: fields.optional_text("notes"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
    }

    fn spray_fields() -> FormFields {
        FormFields::new()
            .with("crop", "Soja")
            .with("product", "Herbicida PRO")
            .with("dose_per_hectare", "2.5")
            .with("flight_height", "3")
            .with("speed", "5,0")
            .with("spray_volume", "12")
            .with("area_hectares", "150")
    }

    #[test]
    fn test_spray_form_shapes_and_fills_date() {
        let report = NewSprayReport::shape(&spray_fields(), today()).unwrap();

        assert_eq!(report.flight_date, today());
        assert_eq!(report.crop, "Soja");
        assert_eq!(report.speed, 5.0);
        assert_eq!(report.spray_volume, 12.0);
        assert_eq!(report.temperature, None);
        assert_eq!(report.notes, None);
    }

    #[test]
    fn test_explicit_date_is_kept() {
        let fields = spray_fields().with("flight_date", "2025-08-18");
        let report = NewSprayReport::shape(&fields, today()).unwrap();

        assert_eq!(report.flight_date, NaiveDate::from_ymd_opt(2025, 8, 18).unwrap());
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let fields = spray_fields().with("crop", "   ");

        assert_eq!(
            NewSprayReport::shape(&fields, today()),
            Err(FormError::MissingField("crop"))
        );
    }

    #[test]
    fn test_every_required_field_blocks_each_form() {
        let complete = [
            ("crop", "Soja"),
            ("product", "X"),
            ("operation_type", "Mapeamento"),
            ("dose_per_hectare", "1"),
            ("flight_height", "1"),
            ("speed", "1"),
            ("spray_volume", "1"),
            ("area_hectares", "1"),
            ("altitude", "1"),
            ("flight_duration", "1"),
            ("quantity_kg", "1"),
            ("application_height", "1"),
        ];

        fn check<F: ReportForm + std::fmt::Debug>(complete: &[(&str, &str)]) {
            for spec in F::FIELDS.iter().filter(|s| s.required) {
                let fields: FormFields = complete
                    .iter()
                    .filter(|(name, _)| *name != spec.name)
                    .map(|(n, v)| (n.to_string(), v.to_string()))
                    .collect();

                let result = F::shape(&fields, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
                assert_eq!(result.unwrap_err(), FormError::MissingField(spec.name));
            }
        }

        check::<NewSprayReport>(&complete);
        check::<NewAerialFlightReport>(&complete);
        check::<NewSolidApplicationReport>(&complete);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let fields = spray_fields().with("area_hectares", "cento e cinquenta");

        assert!(matches!(
            NewSprayReport::shape(&fields, today()),
            Err(FormError::InvalidNumber { field: "area_hectares", .. })
        ));
    }

    #[test]
    fn test_optional_weather_fields() {
        let fields = FormFields::new()
            .with("crop", "Milho")
            .with("operation_type", "Detecção de pragas")
            .with("altitude", "50")
            .with("speed", "8")
            .with("flight_duration", "25")
            .with("area_hectares", "80")
            .with("temperature", "27.5")
            .with("humidity", "")
            .with("notes", "  Setor B  ");

        let report = NewAerialFlightReport::shape(&fields, today()).unwrap();

        assert_eq!(report.temperature, Some(27.5));
        assert_eq!(report.humidity, None);
        assert_eq!(report.notes.as_deref(), Some("Setor B"));
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let fields = spray_fields().with("flight_date", "18/08/2025");

        assert!(matches!(
            NewSprayReport::shape(&fields, today()),
            Err(FormError::InvalidDate { field: "flight_date", .. })
        ));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number("2,5"), Some(2.5));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("abc"), None);
    }
}
