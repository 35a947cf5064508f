//! Typed filter conditions.

use chrono::{DateTime, NaiveDate, Utc};

use super::fields::{Field, FieldKind};
use crate::error::AppError;

/// A comparison operator accepted in `field[op]=value` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Operator {
    /// Maps a bracketed query-string token to an operator.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gt" => Some(Operator::Gt),
            "gte" => Some(Operator::Gte),
            "lt" => Some(Operator::Lt),
            "lte" => Some(Operator::Lte),
            "in" => Some(Operator::In),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }
}

/// A filter value parsed to the kind of the field it applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl FilterValue {
    /// Parses `raw` as a value of `field`'s kind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] when the text does not parse.
    pub fn parse(field: &Field, raw: &str) -> Result<Self, AppError> {
        let invalid = || {
            AppError::validation(format!(
                "Invalid value '{raw}' for field '{}'",
                field.name
            ))
        };
        let trimmed = raw.trim();

        match field.kind {
            FieldKind::Text | FieldKind::TextList => Ok(FilterValue::Text(raw.to_string())),
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(FilterValue::Integer)
                .map_err(|_| invalid()),
            FieldKind::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(FilterValue::Float)
                .ok_or_else(invalid),
            FieldKind::Boolean => match trimmed {
                "true" => Ok(FilterValue::Boolean(true)),
                "false" => Ok(FilterValue::Boolean(false)),
                _ => Err(invalid()),
            },
            FieldKind::Timestamp => parse_timestamp(trimmed)
                .map(FilterValue::Timestamp)
                .ok_or_else(invalid),
        }
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    One(FilterValue),
    Many(Vec<FilterValue>),
}

/// A single field-level condition. `In` always carries [`Operand::Many`],
/// every other operator carries [`Operand::One`].
#[derive(Debug, Clone)]
pub struct Condition {
    pub field: &'static Field,
    pub operator: Operator,
    pub operand: Operand,
}

impl Condition {
    /// Builds a condition from raw query-string text.
    ///
    /// `in` values are comma-separated; empty items are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ValidationFailed`] when the operator does not apply
    /// to the field's kind or a value does not parse.
    pub fn parse(field: &'static Field, operator: Operator, raw: &str) -> Result<Self, AppError> {
        if operator.is_range() && matches!(field.kind, FieldKind::Boolean | FieldKind::TextList) {
            return Err(AppError::validation(format!(
                "Operator '{}' is not supported on field '{}'",
                operator.token(),
                field.name
            )));
        }

        let operand = if operator == Operator::In {
            let values = raw
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| FilterValue::parse(field, item))
                .collect::<Result<Vec<_>, _>>()?;

            if values.is_empty() {
                return Err(AppError::validation(format!(
                    "Operator 'in' on field '{}' needs at least one value",
                    field.name
                )));
            }
            Operand::Many(values)
        } else {
            Operand::One(FilterValue::parse(field, raw)?)
        };

        Ok(Self {
            field,
            operator,
            operand,
        })
    }

    /// Exact-match condition, used for route-supplied base filters.
    pub fn equals(field: &'static Field, value: FilterValue) -> Self {
        Self {
            field,
            operator: Operator::Eq,
            operand: Operand::One(value),
        }
    }
}

/// Conjunction of conditions. Empty matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
