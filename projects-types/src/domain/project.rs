//! Project domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money::Money;
use super::project_id::ProjectId;
use crate::error::DomainError;

/// Billing period a project's unit price applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimeUnit {
    Hour,
    Day,
    Week,
    Month,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [TimeUnit::Hour, TimeUnit::Day, TimeUnit::Week, TimeUnit::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hour => "Hour",
            TimeUnit::Day => "Day",
            TimeUnit::Week => "Week",
            TimeUnit::Month => "Month",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| DomainError::ConstraintViolation(TIME_UNIT_INVALID.into()))
    }
}

const NOT_INSTANTIATED: &str = "The Project is not instantiated";
const NAME_MISSING: &str = "The Project is invalid. The required attribute 'Name' is missing";
const UNIT_PRICE_INVALID: &str = "The Project is invalid. The 'Unit Price' must be in a valid Currency and must be greater than zero";
const TIME_UNIT_INVALID: &str =
    "The Project is invalid. The 'TimeUnit' must be any of [Hour, Day, Week, Month]";

/// A billable project.
///
/// `id` stays `None` until the repository persists the project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Store-assigned identifier (24 hex characters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "6530f1a2c3d4e5f601000000")]
    pub id: Option<ProjectId>,
    #[serde(default)]
    #[schema(example = "Website")]
    pub name: String,
    #[serde(default)]
    pub unit_price: Money,
    /// One of Hour, Day, Week, Month
    #[serde(default)]
    #[schema(example = "Hour")]
    pub time_unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates a new, not yet persisted project.
    pub fn new(name: impl Into<String>, unit_price: Money, time_unit: TimeUnit) -> Self {
        Self {
            id: None,
            name: name.into(),
            unit_price,
            time_unit: time_unit.to_string(),
            date_created: None,
            date_updated: None,
        }
    }

    /// Unwraps an optional project, failing the "instantiated" rule when absent.
    pub fn require(project: Option<Project>) -> Result<Project, DomainError> {
        project.ok_or_else(|| DomainError::ConstraintViolation(NOT_INSTANTIATED.into()))
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Parsed billing unit, if the stored string is one of the known units.
    pub fn billing_unit(&self) -> Option<TimeUnit> {
        self.time_unit.parse().ok()
    }

    /// Checks the project's invariants.
    ///
    /// The first failing rule determines the reported message, in the order:
    /// name, unit price, time unit.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ConstraintViolation(NAME_MISSING.into()));
        }
        let price = &self.unit_price;
        if price.is_zero() || price.is_negative() || price.currency().is_blank() {
            return Err(DomainError::ConstraintViolation(UNIT_PRICE_INVALID.into()));
        }
        self.time_unit.parse::<TimeUnit>()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn website() -> Project {
        Project::new("Website", Money::new(5000, "USD"), TimeUnit::Hour)
    }

    fn violation(project: &Project) -> String {
        match project.validate() {
            Err(DomainError::ConstraintViolation(msg)) => msg,
            other => panic!("expected constraint violation, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_project() {
        let project = website();
        assert!(project.validate().is_ok());
        assert!(project.is_new());
        assert_eq!(project.billing_unit(), Some(TimeUnit::Hour));
    }

    #[test]
    fn test_blank_name_fails() {
        let mut project = website();
        project.name = "   ".into();
        assert!(violation(&project).contains("'Name'"));
    }

    #[test]
    fn test_non_positive_price_fails() {
        for amount in [0, -1] {
            let mut project = website();
            project.unit_price = Money::new(amount, "USD");
            assert!(violation(&project).contains("'Unit Price'"));
        }
    }

    #[test]
    fn test_blank_currency_fails() {
        let mut project = website();
        project.unit_price = Money::new(100, " ");
        assert!(violation(&project).contains("'Unit Price'"));
    }

    #[test]
    fn test_unknown_time_unit_fails() {
        let mut project = website();
        project.time_unit = "Year".into();
        let msg = violation(&project);
        assert!(msg.contains("[Hour, Day, Week, Month]"));
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let project = Project {
            name: String::new(),
            unit_price: Money::new(0, ""),
            time_unit: "Year".into(),
            ..Default::default()
        };
        assert!(violation(&project).contains("'Name'"));

        let project = Project {
            name: "Website".into(),
            ..project
        };
        assert!(violation(&project).contains("'Unit Price'"));
    }

    #[test]
    fn test_require_missing_project() {
        let err = Project::require(None).unwrap_err();
        assert_eq!(err.to_string(), "The Project is not instantiated");
        assert!(Project::require(Some(website())).is_ok());
    }

    #[test]
    fn test_time_unit_parsing_is_exact() {
        assert_eq!("Week".parse::<TimeUnit>().unwrap(), TimeUnit::Week);
        assert!("week".parse::<TimeUnit>().is_err());
        assert!("Year".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(website()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Website",
                "unitPrice": {"amount": 5000, "currency": "USD"},
                "timeUnit": "Hour"
            })
        );

        let parsed: Project = serde_json::from_str(
            r#"{"id": "6530f1a2c3d4e5f601000000", "name": "Api", "unitPrice": {"amount": 1, "currency": "EUR"}, "timeUnit": "Day"}"#,
        )
        .unwrap();
        assert_eq!(parsed.id.unwrap().to_hex(), "6530f1a2c3d4e5f601000000");
        assert_eq!(parsed.billing_unit(), Some(TimeUnit::Day));
    }
}
