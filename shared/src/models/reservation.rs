//! Reservation Model

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::FieldErrors;
use crate::time;

/// Longest accepted customer name, in characters
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
pub const MIN_PARTY_SIZE: i32 = 1;
pub const MAX_PARTY_SIZE: i32 = 50;

/// Optional leading `+`, then 8 to 15 ASCII digits
pub const PHONE_REGEX: &str = r"^\+?[0-9]{8,15}$";

pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_REGEX).expect("phone pattern"));

/// Reservation status
///
/// Any status may be changed into any other; there is no transition table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Canceled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 4] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Seated,
        ReservationStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Seated => "seated",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ReservationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub party_size: i32,
    /// Local wall-clock time, no timezone
    #[serde(with = "crate::time::wall_clock")]
    pub reserved_at: NaiveDateTime,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Validated create/update payload
///
/// `status` is `None` when the submission left it out; create falls back to
/// [`ReservationStatus::Pending`], update keeps the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ReservationInput {
    #[validate(length(max = 100))]
    pub customer_name: String,
    #[validate(regex(path = *PHONE_PATTERN))]
    pub phone: String,
    #[validate(range(min = 1, max = 50))]
    pub party_size: i32,
    #[serde(with = "crate::time::wall_clock")]
    pub reserved_at: NaiveDateTime,
    pub status: Option<ReservationStatus>,
}

/// Raw submission as typed by the user
///
/// Kept as text so a rejected form can be rendered again exactly as entered.
/// Accepts both urlencoded forms and JSON (numbers are read as text).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationForm {
    #[serde(deserialize_with = "lenient_text")]
    pub customer_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub party_size: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reserved_at: String,
    #[serde(deserialize_with = "lenient_text")]
    pub status: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Scalar>::deserialize(d)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Float(n)) => n.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

fn label(field: &str) -> String {
    field.replace('_', " ")
}

fn required(field: &str) -> String {
    format!("The {} field is required.", label(field))
}

impl ReservationForm {
    /// Pre-fill the edit form from a stored reservation
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            customer_name: reservation.customer_name.clone(),
            phone: reservation.phone.clone(),
            party_size: reservation.party_size.to_string(),
            reserved_at: time::format_input(&reservation.reserved_at),
            status: reservation.status.as_str().to_string(),
        }
    }

    /// Blank create form
    pub fn blank() -> Self {
        Self {
            party_size: MIN_PARTY_SIZE.to_string(),
            status: ReservationStatus::Pending.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Validate the submission against the reservation rules.
    ///
    /// `now` is the current wall-clock time in `tz`; `reserved_at` must not be
    /// earlier. Every failing field gets exactly one message.
    pub fn validate(&self, now: NaiveDateTime, tz: Tz) -> Result<ReservationInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_name = self.customer_name.trim();
        if customer_name.is_empty() {
            errors.insert("customer_name".into(), required("customer_name"));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.insert("phone".into(), required("phone"));
        }

        let party_size = match self.party_size.trim() {
            "" => {
                errors.insert("party_size".into(), required("party_size"));
                None
            }
            // Out-of-range integers saturate so the range rule reports them
            raw => match raw.parse::<i64>() {
                Ok(n) => Some(n.clamp(i32::MIN.into(), i32::MAX.into()) as i32),
                Err(_) => {
                    errors.insert(
                        "party_size".into(),
                        "The party size field must be an integer.".into(),
                    );
                    None
                }
            },
        };

        let reserved_at = match self.reserved_at.trim() {
            "" => {
                errors.insert("reserved_at".into(), required("reserved_at"));
                None
            }
            raw => match time::parse_local_datetime(&time::from_input_datetime(raw), tz) {
                Some(at) if at < now => {
                    errors.insert(
                        "reserved_at".into(),
                        "The reserved at field must be a date after or equal to now.".into(),
                    );
                    None
                }
                Some(at) => Some(at),
                None => {
                    errors.insert(
                        "reserved_at".into(),
                        "The reserved at field must be a valid date.".into(),
                    );
                    None
                }
            },
        };

        let status = match self.status.trim() {
            "" => None,
            raw => match raw.parse::<ReservationStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.insert("status".into(), "The selected status is invalid.".into());
                    None
                }
            },
        };

        // Placeholders stand in for fields that already failed; their rule
        // errors are discarded below.
        let input = ReservationInput {
            customer_name: customer_name.to_string(),
            phone: phone.to_string(),
            party_size: party_size.unwrap_or(MIN_PARTY_SIZE),
            reserved_at: reserved_at.unwrap_or(now),
            status,
        };

        if let Err(rule_errors) = input.validate() {
            for (field, message) in describe(&input, &rule_errors) {
                errors.entry(field).or_insert(message);
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }
}

/// Turn `validator` rule failures into user-facing messages
fn describe(input: &ReservationInput, errors: &ValidationErrors) -> Vec<(String, String)> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, failures)| {
            let failure = failures.first()?;
            let name = label(&field);
            let message = match &*failure.code {
                "length" => format!(
                    "The {name} field must not be greater than {MAX_CUSTOMER_NAME_LEN} characters."
                ),
                "regex" => format!("The {name} field format is invalid."),
                "range" if input.party_size < MIN_PARTY_SIZE => {
                    format!("The {name} field must be at least {MIN_PARTY_SIZE}.")
                }
                "range" => format!("The {name} field must not be greater than {MAX_PARTY_SIZE}."),
                _ => format!("The {name} field is invalid."),
            };
            Some((field.to_string(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn valid_form() -> ReservationForm {
        ReservationForm {
            customer_name: "Nguyen Van A".into(),
            phone: "+84901234567".into(),
            party_size: "4".into(),
            reserved_at: "2025-06-01T19:30".into(),
            status: "confirmed".into(),
        }
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in ReservationStatus::ALL {
            assert_eq!(status.as_str().parse::<ReservationStatus>(), Ok(status));
        }
        assert_eq!(
            "done".parse::<ReservationStatus>(),
            Err(UnknownStatus("done".into()))
        );
        assert_eq!(ReservationStatus::default(), ReservationStatus::Pending);
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Canceled).unwrap(),
            "\"canceled\""
        );
    }

    #[test]
    fn phone_pattern() {
        assert!(PHONE_PATTERN.is_match("12345678"));
        assert!(PHONE_PATTERN.is_match("+123456789012345"));
        assert!(!PHONE_PATTERN.is_match("1234567"));
        assert!(!PHONE_PATTERN.is_match("1234567890123456"));
        assert!(!PHONE_PATTERN.is_match("++12345678"));
        assert!(!PHONE_PATTERN.is_match("0901 234 567"));
        // Non-ASCII decimal digits
        let arabic_indic = "٠١٢٣٤٥٦٧٨";
        let fullwidth = "０９０１２３４５６";
        assert!(!PHONE_PATTERN.is_match(arabic_indic));
        assert!(!PHONE_PATTERN.is_match(fullwidth));
        assert!(!PHONE_PATTERN.is_match(&format!("+{arabic_indic}")));

        let errors = ReservationForm {
            phone: format!("+{fullwidth}"),
            ..valid_form()
        }
        .validate(now(), chrono_tz::UTC)
        .unwrap_err();
        assert_eq!(errors["phone"], "The phone field format is invalid.");
    }

    #[test]
    fn valid_submission_passes() {
        let input = valid_form().validate(now(), chrono_tz::UTC).unwrap();
        assert_eq!(input.customer_name, "Nguyen Van A");
        assert_eq!(input.party_size, 4);
        assert_eq!(
            input.reserved_at,
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(19, 30, 0)
                .unwrap()
        );
        assert_eq!(input.status, Some(ReservationStatus::Confirmed));
    }

    #[test]
    fn inputs_are_trimmed_and_status_is_optional() {
        let form = ReservationForm {
            customer_name: "  Ana  ".into(),
            status: "".into(),
            ..valid_form()
        };
        let input = form.validate(now(), chrono_tz::UTC).unwrap();
        assert_eq!(input.customer_name, "Ana");
        assert_eq!(input.status, None);
    }

    #[test]
    fn reserved_at_equal_to_now_is_accepted() {
        let form = ReservationForm {
            reserved_at: "2025-06-01 12:00:00".into(),
            ..valid_form()
        };
        assert!(form.validate(now(), chrono_tz::UTC).is_ok());
    }

    #[test]
    fn empty_submission_reports_every_required_field() {
        let errors = ReservationForm::default()
            .validate(now(), chrono_tz::UTC)
            .unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["customer_name"], "The customer name field is required.");
        assert_eq!(errors["phone"], "The phone field is required.");
        assert_eq!(errors["party_size"], "The party size field is required.");
        assert_eq!(errors["reserved_at"], "The reserved at field is required.");
    }

    #[test]
    fn rule_violations_have_field_messages() {
        let form = ReservationForm {
            customer_name: "x".repeat(101),
            phone: "12-34".into(),
            party_size: "51".into(),
            reserved_at: "2025-06-01T11:59".into(),
            status: "archived".into(),
        };
        let errors = form.validate(now(), chrono_tz::UTC).unwrap_err();
        assert_eq!(
            errors["customer_name"],
            "The customer name field must not be greater than 100 characters."
        );
        assert_eq!(errors["phone"], "The phone field format is invalid.");
        assert_eq!(
            errors["party_size"],
            "The party size field must not be greater than 50."
        );
        assert_eq!(
            errors["reserved_at"],
            "The reserved at field must be a date after or equal to now."
        );
        assert_eq!(errors["status"], "The selected status is invalid.");
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let form = ReservationForm {
            customer_name: "Đ".repeat(100),
            ..valid_form()
        };
        assert!(form.validate(now(), chrono_tz::UTC).is_ok());
    }

    #[test]
    fn party_size_bounds_and_type() {
        let check = |raw: &str| {
            ReservationForm {
                party_size: raw.into(),
                ..valid_form()
            }
            .validate(now(), chrono_tz::UTC)
            .err()
            .and_then(|e| e.get("party_size").cloned())
        };
        assert_eq!(check("1"), None);
        assert_eq!(check("50"), None);
        assert_eq!(
            check("0").as_deref(),
            Some("The party size field must be at least 1.")
        );
        assert_eq!(
            check("four").as_deref(),
            Some("The party size field must be an integer.")
        );
        assert_eq!(
            check("2.5").as_deref(),
            Some("The party size field must be an integer.")
        );
        assert_eq!(
            check("99999999999").as_deref(),
            Some("The party size field must not be greater than 50.")
        );
        assert_eq!(
            check("-99999999999").as_deref(),
            Some("The party size field must be at least 1.")
        );
    }

    #[test]
    fn unparseable_reserved_at() {
        let form = ReservationForm {
            reserved_at: "next friday".into(),
            ..valid_form()
        };
        let errors = form.validate(now(), chrono_tz::UTC).unwrap_err();
        assert_eq!(
            errors["reserved_at"],
            "The reserved at field must be a valid date."
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn form_accepts_json_numbers() {
        let form: ReservationForm = serde_json::from_str(
            r#"{"customer_name":"Bo","phone":"12345678","party_size":3,
                "reserved_at":"2025-06-02 10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(form.party_size, "3");
        assert_eq!(form.status, "");
    }

    #[test]
    fn edit_form_is_prefilled_from_reservation() {
        let reservation = Reservation {
            id: 1,
            customer_name: "Bo".into(),
            phone: "12345678".into(),
            party_size: 2,
            reserved_at: NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(10, 15, 0)
                .unwrap(),
            status: ReservationStatus::Seated,
            created_at: 0,
            updated_at: 0,
        };
        let form = ReservationForm::from_reservation(&reservation);
        assert_eq!(form.reserved_at, "2025-06-02T10:15");
        assert_eq!(form.party_size, "2");
        assert_eq!(form.status, "seated");

        let blank = ReservationForm::blank();
        assert_eq!(blank.party_size, "1");
        assert_eq!(blank.status, "pending");
    }
}
