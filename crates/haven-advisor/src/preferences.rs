//! Structured preference objects and their schemas.
//!
//! Preference objects only ever arrive whole, from an accepted elicitation.
//! Omitted optional fields take their serde defaults; every object is
//! validated against its field constraints before any operation uses it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AdvisorError;

// =============================================================================
// Schema descriptors
// =============================================================================

/// Wire type of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    StringList,
}

/// One field of a preference schema.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub description: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "no_values")]
    pub allowed: &'static [&'static str],
}

fn no_values(values: &&'static [&'static str]) -> bool {
    values.is_empty()
}

impl FieldSpec {
    fn new(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: None,
            minimum: None,
            maximum: None,
            allowed: &[],
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    fn min(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    fn max(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = values;
        self
    }
}

/// Describes a preference object to the elicitation collaborator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl SchemaDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Field constraints beyond what the Rust types already enforce.
pub trait Validate {
    fn validate(&self) -> Result<(), AdvisorError>;
}

/// A preference object that can be elicited.
pub trait PreferenceSchema: Serialize + DeserializeOwned + Validate + Send + Sync {
    fn descriptor() -> SchemaDescriptor;

    /// Parse and validate elicited content.
    fn from_content(content: Value) -> Result<Self, AdvisorError> {
        let value: Self = serde_json::from_value(content).map_err(|e| {
            AdvisorError::InvalidPreferences(format!("{}: {}", Self::descriptor().name, e))
        })?;
        value.validate()?;
        Ok(value)
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), AdvisorError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AdvisorError::InvalidPreferences(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

// =============================================================================
// Housing search
// =============================================================================

/// Kind of senior housing to search for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingType {
    AssistedLiving,
    IndependentLiving,
    MemoryCare,
    SeniorApartments,
}

impl HousingType {
    pub const NAMES: &'static [&'static str] = &[
        "assisted_living",
        "independent_living",
        "memory_care",
        "senior_apartments",
    ];

    /// Phrase used in place-search queries.
    pub fn search_phrase(&self) -> &'static str {
        match self {
            HousingType::AssistedLiving => "assisted living",
            HousingType::IndependentLiving => "independent living",
            HousingType::MemoryCare => "memory care",
            HousingType::SeniorApartments => "senior apartments",
        }
    }
}

fn default_budget_min() -> u32 {
    500
}

fn default_budget_max() -> u32 {
    5000
}

fn default_housing_types() -> Vec<HousingType> {
    vec![HousingType::AssistedLiving, HousingType::IndependentLiving]
}

fn default_radius_miles() -> u32 {
    10
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HousingSearchPreferences {
    /// City and state, e.g. "Cleveland, OH".
    pub location: String,
    #[serde(default = "default_budget_min")]
    pub budget_min: u32,
    #[serde(default = "default_budget_max")]
    pub budget_max: u32,
    #[serde(default = "default_housing_types")]
    pub housing_type: Vec<HousingType>,
    #[serde(default = "default_radius_miles")]
    pub radius_miles: u32,
}

impl HousingSearchPreferences {
    /// Preferences for `location` with every other field at its default.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            budget_min: default_budget_min(),
            budget_max: default_budget_max(),
            housing_type: default_housing_types(),
            radius_miles: default_radius_miles(),
        }
    }
}

impl Validate for HousingSearchPreferences {
    fn validate(&self) -> Result<(), AdvisorError> {
        if self.location.trim().is_empty() {
            return Err(AdvisorError::InvalidPreferences(
                "location is required".to_string(),
            ));
        }
        if !(1..=50).contains(&self.radius_miles) {
            return Err(AdvisorError::InvalidPreferences(format!(
                "radius_miles must be between 1 and 50, got {}",
                self.radius_miles
            )));
        }
        Ok(())
    }
}

impl PreferenceSchema for HousingSearchPreferences {
    fn descriptor() -> SchemaDescriptor {
        SchemaDescriptor {
            name: "HousingSearchPreferences",
            description: "Preferences for searching senior housing",
            fields: vec![
                FieldSpec::new(
                    "location",
                    FieldKind::String,
                    "City and state (e.g., 'Cleveland, OH')",
                )
                .required(),
                FieldSpec::new("budget_min", FieldKind::Integer, "Minimum monthly budget")
                    .default_value(json!(default_budget_min()))
                    .min(0.0),
                FieldSpec::new("budget_max", FieldKind::Integer, "Maximum monthly budget")
                    .default_value(json!(default_budget_max()))
                    .min(0.0),
                FieldSpec::new("housing_type", FieldKind::StringList, "Types of housing")
                    .default_value(json!(["assisted_living", "independent_living"]))
                    .allowed(HousingType::NAMES),
                FieldSpec::new("radius_miles", FieldKind::Integer, "Search radius in miles")
                    .default_value(json!(default_radius_miles()))
                    .min(1.0)
                    .max(50.0),
            ],
        }
    }
}

// =============================================================================
// Accessibility
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityPreferences {
    pub wheelchair_accessible: bool,
    pub elevator_required: bool,
    pub ground_floor_preferred: bool,
    pub grab_bars_needed: bool,
    /// Walker, wheelchair, oxygen, and so on.
    pub medical_equipment: Vec<String>,
}

impl Validate for AccessibilityPreferences {
    fn validate(&self) -> Result<(), AdvisorError> {
        Ok(())
    }
}

impl PreferenceSchema for AccessibilityPreferences {
    fn descriptor() -> SchemaDescriptor {
        SchemaDescriptor {
            name: "AccessibilityPreferences",
            description: "Accessibility and health-related preferences",
            fields: vec![
                FieldSpec::new(
                    "wheelchair_accessible",
                    FieldKind::Boolean,
                    "Requires wheelchair accessibility",
                )
                .default_value(json!(false)),
                FieldSpec::new(
                    "elevator_required",
                    FieldKind::Boolean,
                    "Requires elevator access",
                )
                .default_value(json!(false)),
                FieldSpec::new(
                    "ground_floor_preferred",
                    FieldKind::Boolean,
                    "Prefers ground floor",
                )
                .default_value(json!(false)),
                FieldSpec::new(
                    "grab_bars_needed",
                    FieldKind::Boolean,
                    "Needs grab bars in bathroom",
                )
                .default_value(json!(false)),
                FieldSpec::new(
                    "medical_equipment",
                    FieldKind::StringList,
                    "Medical equipment needs (walker, wheelchair, oxygen, etc.)",
                )
                .default_value(json!([])),
            ],
        }
    }
}

// =============================================================================
// Budget
// =============================================================================

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysisPreferences {
    pub monthly_income: f64,
    #[serde(default)]
    pub current_expenses: f64,
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub healthcare_costs: f64,
    #[serde(default = "default_true")]
    pub include_utilities: bool,
    #[serde(default = "default_true")]
    pub include_meals: bool,
}

impl BudgetAnalysisPreferences {
    /// Preferences for `monthly_income` with every other field at its default.
    pub fn with_income(monthly_income: f64) -> Self {
        Self {
            monthly_income,
            current_expenses: 0.0,
            savings: 0.0,
            healthcare_costs: 0.0,
            include_utilities: true,
            include_meals: true,
        }
    }
}

impl Validate for BudgetAnalysisPreferences {
    fn validate(&self) -> Result<(), AdvisorError> {
        non_negative("monthly_income", self.monthly_income)?;
        non_negative("current_expenses", self.current_expenses)?;
        non_negative("savings", self.savings)?;
        non_negative("healthcare_costs", self.healthcare_costs)
    }
}

impl PreferenceSchema for BudgetAnalysisPreferences {
    fn descriptor() -> SchemaDescriptor {
        SchemaDescriptor {
            name: "BudgetAnalysisPreferences",
            description: "Preferences for budget planning",
            fields: vec![
                FieldSpec::new("monthly_income", FieldKind::Number, "Total monthly income")
                    .required()
                    .min(0.0),
                FieldSpec::new(
                    "current_expenses",
                    FieldKind::Number,
                    "Current monthly expenses",
                )
                .default_value(json!(0))
                .min(0.0),
                FieldSpec::new("savings", FieldKind::Number, "Available savings")
                    .default_value(json!(0))
                    .min(0.0),
                FieldSpec::new(
                    "healthcare_costs",
                    FieldKind::Number,
                    "Monthly healthcare costs",
                )
                .default_value(json!(0))
                .min(0.0),
                FieldSpec::new(
                    "include_utilities",
                    FieldKind::Boolean,
                    "Include utilities in budget",
                )
                .default_value(json!(true)),
                FieldSpec::new("include_meals", FieldKind::Boolean, "Include meals in budget")
                    .default_value(json!(true)),
            ],
        }
    }
}

// =============================================================================
// Location
// =============================================================================

/// How close family should be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyProximity {
    #[serde(rename = "same_city")]
    SameCity,
    #[serde(rename = "within_30min")]
    Within30Min,
    #[serde(rename = "within_1hour")]
    Within1Hour,
    #[default]
    #[serde(rename = "flexible")]
    Flexible,
}

impl FamilyProximity {
    pub const NAMES: &'static [&'static str] =
        &["same_city", "within_30min", "within_1hour", "flexible"];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationPreferences {
    pub proximity_to_family: FamilyProximity,
    pub near_hospital: bool,
    pub near_pharmacy: bool,
    pub near_shopping: bool,
    pub public_transport: bool,
}

impl Default for LocationPreferences {
    fn default() -> Self {
        Self {
            proximity_to_family: FamilyProximity::Flexible,
            near_hospital: false,
            near_pharmacy: true,
            near_shopping: false,
            public_transport: false,
        }
    }
}

impl Validate for LocationPreferences {
    fn validate(&self) -> Result<(), AdvisorError> {
        Ok(())
    }
}

impl PreferenceSchema for LocationPreferences {
    fn descriptor() -> SchemaDescriptor {
        SchemaDescriptor {
            name: "LocationPreferences",
            description: "Location and proximity preferences",
            fields: vec![
                FieldSpec::new(
                    "proximity_to_family",
                    FieldKind::String,
                    "Distance to family members",
                )
                .default_value(json!("flexible"))
                .allowed(FamilyProximity::NAMES),
                FieldSpec::new("near_hospital", FieldKind::Boolean, "Must be near hospital")
                    .default_value(json!(false)),
                FieldSpec::new("near_pharmacy", FieldKind::Boolean, "Must be near pharmacy")
                    .default_value(json!(true)),
                FieldSpec::new("near_shopping", FieldKind::Boolean, "Prefer near shopping")
                    .default_value(json!(false)),
                FieldSpec::new(
                    "public_transport",
                    FieldKind::Boolean,
                    "Needs public transportation access",
                )
                .default_value(json!(false)),
            ],
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
