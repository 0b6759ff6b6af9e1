//! Reservation flow state machine
//!
//! Seven steps: name → email → phone → party size → date → time → special
//! requests, then the terminal step hands a complete [`NewReservation`]
//! back for persistence. Date validation is against a caller-supplied
//! "today" so the transition function stays pure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::models::{NewReservation, ReservationStatus};

use super::{FlowError, StepOutcome, special_requests_from};
use crate::utils::validation::{validate_email, validate_phone};

const FLOW: &str = "reservation";

/// Party size bounds, inclusive
const MIN_PARTY: i32 = 1;
const MAX_PARTY: i32 = 20;

/// Wire form of the accumulating record, echoed between turns as
/// `collected_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// One variant per step; fields are those collected so far.
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationFlowState {
    /// Step 0: waiting for the customer name
    CollectName,
    /// Step 1: waiting for a valid email
    CollectEmail { customer_name: String },
    /// Step 2: waiting for a valid phone number
    CollectPhone { customer_name: String, email: String },
    /// Step 3: waiting for a party size in [1, 20]
    CollectPartySize {
        customer_name: String,
        email: String,
        phone: String,
    },
    /// Step 4: waiting for a YYYY-MM-DD date, today or later
    CollectDate {
        customer_name: String,
        email: String,
        phone: String,
        party_size: i32,
    },
    /// Step 5: waiting for an HH:MM time
    CollectTime {
        customer_name: String,
        email: String,
        phone: String,
        party_size: i32,
        date: NaiveDate,
    },
    /// Step 6: waiting for special requests (terminal)
    CollectRequests {
        customer_name: String,
        email: String,
        phone: String,
        party_size: i32,
        date: NaiveDate,
        time: String,
    },
}

impl ReservationFlowState {
    pub fn step(&self) -> u8 {
        match self {
            ReservationFlowState::CollectName => 0,
            ReservationFlowState::CollectEmail { .. } => 1,
            ReservationFlowState::CollectPhone { .. } => 2,
            ReservationFlowState::CollectPartySize { .. } => 3,
            ReservationFlowState::CollectDate { .. } => 4,
            ReservationFlowState::CollectTime { .. } => 5,
            ReservationFlowState::CollectRequests { .. } => 6,
        }
    }

    /// Rebuild the state from a caller-echoed `(step, collected_data)`
    /// pair, verifying that every field the step depends on is present.
    pub fn resume(step: u8, draft: ReservationDraft) -> Result<Self, FlowError> {
        let missing = |field| FlowError::MissingField { flow: FLOW, field, step };

        let name = |d: &ReservationDraft| {
            d.customer_name.clone().ok_or_else(|| missing("customer_name"))
        };
        let email = |d: &ReservationDraft| d.email.clone().ok_or_else(|| missing("email"));
        let phone = |d: &ReservationDraft| d.phone.clone().ok_or_else(|| missing("phone"));
        let party = |d: &ReservationDraft| d.party_size.ok_or_else(|| missing("party_size"));
        let date = |d: &ReservationDraft| d.date.ok_or_else(|| missing("date"));

        match step {
            0 => Ok(ReservationFlowState::CollectName),
            1 => Ok(ReservationFlowState::CollectEmail {
                customer_name: name(&draft)?,
            }),
            2 => Ok(ReservationFlowState::CollectPhone {
                customer_name: name(&draft)?,
                email: email(&draft)?,
            }),
            3 => Ok(ReservationFlowState::CollectPartySize {
                customer_name: name(&draft)?,
                email: email(&draft)?,
                phone: phone(&draft)?,
            }),
            4 => Ok(ReservationFlowState::CollectDate {
                customer_name: name(&draft)?,
                email: email(&draft)?,
                phone: phone(&draft)?,
                party_size: party(&draft)?,
            }),
            5 => Ok(ReservationFlowState::CollectTime {
                customer_name: name(&draft)?,
                email: email(&draft)?,
                phone: phone(&draft)?,
                party_size: party(&draft)?,
                date: date(&draft)?,
            }),
            6 => Ok(ReservationFlowState::CollectRequests {
                customer_name: name(&draft)?,
                email: email(&draft)?,
                phone: phone(&draft)?,
                party_size: party(&draft)?,
                date: date(&draft)?,
                time: draft.time.ok_or_else(|| missing("time"))?,
            }),
            step => Err(FlowError::UnknownStep { flow: FLOW, step }),
        }
    }

    /// Wire form for the next `TurnResponse`.
    pub fn to_draft(&self) -> ReservationDraft {
        let mut draft = ReservationDraft::default();
        match self {
            ReservationFlowState::CollectName => {}
            ReservationFlowState::CollectEmail { customer_name } => {
                draft.customer_name = Some(customer_name.clone());
            }
            ReservationFlowState::CollectPhone { customer_name, email } => {
                draft.customer_name = Some(customer_name.clone());
                draft.email = Some(email.clone());
            }
            ReservationFlowState::CollectPartySize {
                customer_name,
                email,
                phone,
            } => {
                draft.customer_name = Some(customer_name.clone());
                draft.email = Some(email.clone());
                draft.phone = Some(phone.clone());
            }
            ReservationFlowState::CollectDate {
                customer_name,
                email,
                phone,
                party_size,
            } => {
                draft.customer_name = Some(customer_name.clone());
                draft.email = Some(email.clone());
                draft.phone = Some(phone.clone());
                draft.party_size = Some(*party_size);
            }
            ReservationFlowState::CollectTime {
                customer_name,
                email,
                phone,
                party_size,
                date,
            } => {
                draft.customer_name = Some(customer_name.clone());
                draft.email = Some(email.clone());
                draft.phone = Some(phone.clone());
                draft.party_size = Some(*party_size);
                draft.date = Some(*date);
            }
            ReservationFlowState::CollectRequests {
                customer_name,
                email,
                phone,
                party_size,
                date,
                time,
            } => {
                draft.customer_name = Some(customer_name.clone());
                draft.email = Some(email.clone());
                draft.phone = Some(phone.clone());
                draft.party_size = Some(*party_size);
                draft.date = Some(*date);
                draft.time = Some(time.clone());
            }
        }
        draft
    }
}

/// Feed one message into the flow. `today` anchors the past-date check.
///
/// Invalid input never errors: it replies with a re-prompt and returns the
/// unchanged state. The terminal step returns the complete reservation.
pub fn advance(
    state: ReservationFlowState,
    message: &str,
    today: NaiveDate,
) -> StepOutcome<ReservationFlowState, NewReservation> {
    match state {
        ReservationFlowState::CollectName => StepOutcome::Continue {
            reply: "What's your email address?".to_string(),
            state: ReservationFlowState::CollectEmail {
                customer_name: message.to_string(),
            },
        },

        ReservationFlowState::CollectEmail { customer_name } => {
            if !validate_email(message) {
                return StepOutcome::Continue {
                    reply: "That doesn't look like a valid email. Please try again.".to_string(),
                    state: ReservationFlowState::CollectEmail { customer_name },
                };
            }
            StepOutcome::Continue {
                reply: "What's your phone number?".to_string(),
                state: ReservationFlowState::CollectPhone {
                    customer_name,
                    email: message.to_string(),
                },
            }
        }

        ReservationFlowState::CollectPhone { customer_name, email } => {
            if !validate_phone(message) {
                return StepOutcome::Continue {
                    reply: "That doesn't look like a valid phone number. Please try again."
                        .to_string(),
                    state: ReservationFlowState::CollectPhone { customer_name, email },
                };
            }
            StepOutcome::Continue {
                reply: format!("How many people in your party? ({MIN_PARTY}-{MAX_PARTY})"),
                state: ReservationFlowState::CollectPartySize {
                    customer_name,
                    email,
                    phone: message.to_string(),
                },
            }
        }

        ReservationFlowState::CollectPartySize {
            customer_name,
            email,
            phone,
        } => match message.parse::<i32>() {
            Err(_) => StepOutcome::Continue {
                reply: "Please enter a valid number.".to_string(),
                state: ReservationFlowState::CollectPartySize {
                    customer_name,
                    email,
                    phone,
                },
            },
            Ok(n) if !(MIN_PARTY..=MAX_PARTY).contains(&n) => StepOutcome::Continue {
                reply: format!(
                    "Party size must be between {MIN_PARTY} and {MAX_PARTY}. Please try again."
                ),
                state: ReservationFlowState::CollectPartySize {
                    customer_name,
                    email,
                    phone,
                },
            },
            Ok(party_size) => StepOutcome::Continue {
                reply: "What date would you like? (YYYY-MM-DD)".to_string(),
                state: ReservationFlowState::CollectDate {
                    customer_name,
                    email,
                    phone,
                    party_size,
                },
            },
        },

        ReservationFlowState::CollectDate {
            customer_name,
            email,
            phone,
            party_size,
        } => match NaiveDate::parse_from_str(message, "%Y-%m-%d") {
            Err(_) => StepOutcome::Continue {
                reply: "Please enter a valid date (YYYY-MM-DD format).".to_string(),
                state: ReservationFlowState::CollectDate {
                    customer_name,
                    email,
                    phone,
                    party_size,
                },
            },
            Ok(date) if date < today => StepOutcome::Continue {
                reply: "The date must be in the future. Please try again.".to_string(),
                state: ReservationFlowState::CollectDate {
                    customer_name,
                    email,
                    phone,
                    party_size,
                },
            },
            Ok(date) => StepOutcome::Continue {
                reply: "What time would you like? (HH:MM, e.g., 19:30)".to_string(),
                state: ReservationFlowState::CollectTime {
                    customer_name,
                    email,
                    phone,
                    party_size,
                    date,
                },
            },
        },

        ReservationFlowState::CollectTime {
            customer_name,
            email,
            phone,
            party_size,
            date,
        } => match parse_time(message) {
            Err(reply) => StepOutcome::Continue {
                reply: reply.to_string(),
                state: ReservationFlowState::CollectTime {
                    customer_name,
                    email,
                    phone,
                    party_size,
                    date,
                },
            },
            Ok(()) => StepOutcome::Continue {
                reply: format!(
                    "Perfect! Let me confirm:\nName: {customer_name}\nParty size: {party_size}\n\
                     Date: {date}\nTime: {message}\nAny special requests? (or say 'no')"
                ),
                state: ReservationFlowState::CollectRequests {
                    customer_name,
                    email,
                    phone,
                    party_size,
                    date,
                    time: message.to_string(),
                },
            },
        },

        ReservationFlowState::CollectRequests {
            customer_name,
            email,
            phone,
            party_size,
            date,
            time,
        } => StepOutcome::Finalize(NewReservation {
            customer_name,
            email,
            phone,
            party_size,
            reservation_date: date,
            reservation_time: time,
            special_requests: special_requests_from(message),
            status: ReservationStatus::Confirmed,
        }),
    }
}

/// Validate an `HH:MM` answer. Exactly five ASCII chars with `:` at index
/// 2, hour 0-23, minute 0-59. Returns the re-prompt on failure.
fn parse_time(message: &str) -> Result<(), &'static str> {
    let bytes = message.as_bytes();
    if bytes.len() != 5 || !message.is_ascii() || bytes[2] != b':' {
        return Err("Please enter time in HH:MM format.");
    }
    match (message[..2].parse::<u32>(), message[3..].parse::<u32>()) {
        (Ok(hours), Ok(minutes)) => {
            if hours < 24 && minutes < 60 {
                Ok(())
            } else {
                Err("Please enter a valid time (00:00 - 23:59).")
            }
        }
        _ => Err("Please enter a valid time (HH:MM format)."),
    }
}

/// Confirmation text for a persisted reservation.
pub fn confirmation(reservation_id: i64, party_size: i32, date: NaiveDate, time: &str) -> String {
    format!(
        "✅ Reservation #{reservation_id} Confirmed!\nTable for {party_size} on {date} at {time}\n\
         Thank you!"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn at_party_size_step() -> ReservationFlowState {
        ReservationFlowState::CollectPartySize {
            customer_name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    fn at_time_step() -> ReservationFlowState {
        ReservationFlowState::CollectTime {
            customer_name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: "5551234567".to_string(),
            party_size: 4,
            date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        }
    }

    #[test]
    fn name_is_stored_verbatim_and_email_requested() {
        match advance(ReservationFlowState::CollectName, "Anna Ng", today()) {
            StepOutcome::Continue { reply, state } => {
                assert_eq!(reply, "What's your email address?");
                assert_eq!(state.step(), 1);
                assert_eq!(state.to_draft().customer_name.as_deref(), Some("Anna Ng"));
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn party_size_out_of_range_stays_at_step_3() {
        match advance(at_party_size_step(), "25", today()) {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("Party size must be between 1 and 20"));
                assert_eq!(state.step(), 3);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn party_size_must_be_an_integer() {
        match advance(at_party_size_step(), "four", today()) {
            StepOutcome::Continue { reply, state } => {
                assert_eq!(reply, "Please enter a valid number.");
                assert_eq!(state.step(), 3);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn past_date_is_rejected_today_is_accepted() {
        let state = ReservationFlowState::CollectDate {
            customer_name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: "5551234567".to_string(),
            party_size: 4,
        };
        match advance(state.clone(), "2026-08-06", today()) {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("must be in the future"));
                assert_eq!(state.step(), 4);
            }
            _ => panic!("expected Continue"),
        }
        match advance(state.clone(), "2026-8-20", today()) {
            StepOutcome::Continue { state, .. } => {
                // chrono accepts unpadded months like Python's strptime
                assert_eq!(state.step(), 5);
            }
            _ => panic!("expected Continue"),
        }
        match advance(state, "2026-08-07", today()) {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("What time"));
                assert_eq!(state.step(), 5);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn garbled_date_reprompts() {
        let state = ReservationFlowState::CollectDate {
            customer_name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: "5551234567".to_string(),
            party_size: 4,
        };
        match advance(state, "next friday", today()) {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("valid date"));
                assert_eq!(state.step(), 4);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn valid_time_advances_with_full_summary() {
        match advance(at_time_step(), "19:30", today()) {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("Name: Anna"));
                assert!(reply.contains("Party size: 4"));
                assert!(reply.contains("Date: 2026-08-20"));
                assert!(reply.contains("Time: 19:30"));
                assert_eq!(state.step(), 6);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn time_shape_and_range_errors_are_distinct() {
        match advance(at_time_step(), "7pm", today()) {
            StepOutcome::Continue { reply, .. } => {
                assert_eq!(reply, "Please enter time in HH:MM format.")
            }
            _ => panic!("expected Continue"),
        }
        match advance(at_time_step(), "25:00", today()) {
            StepOutcome::Continue { reply, .. } => {
                assert_eq!(reply, "Please enter a valid time (00:00 - 23:59).")
            }
            _ => panic!("expected Continue"),
        }
        match advance(at_time_step(), "ab:cd", today()) {
            StepOutcome::Continue { reply, .. } => {
                assert_eq!(reply, "Please enter a valid time (HH:MM format).")
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn terminal_step_builds_confirmed_reservation() {
        let state = ReservationFlowState::CollectRequests {
            customer_name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: "5551234567".to_string(),
            party_size: 4,
            date: NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
            time: "19:30".to_string(),
        };
        match advance(state, "none", today()) {
            StepOutcome::Finalize(r) => {
                assert_eq!(r.party_size, 4);
                assert_eq!(r.reservation_time, "19:30");
                assert_eq!(r.special_requests, "");
                assert_eq!(r.status, ReservationStatus::Confirmed);
            }
            _ => panic!("expected Finalize"),
        }
    }

    #[test]
    fn resume_requires_fields_collected_so_far() {
        assert_eq!(
            ReservationFlowState::resume(9, ReservationDraft::default()),
            Err(FlowError::UnknownStep { flow: "reservation", step: 9 })
        );
        assert_eq!(
            ReservationFlowState::resume(3, ReservationDraft {
                customer_name: Some("Anna".to_string()),
                email: Some("anna@example.com".to_string()),
                ..ReservationDraft::default()
            }),
            Err(FlowError::MissingField { flow: "reservation", field: "phone", step: 3 })
        );
    }

    #[test]
    fn resume_roundtrips_through_draft() {
        let state = at_time_step();
        let resumed = ReservationFlowState::resume(state.step(), state.to_draft()).unwrap();
        assert_eq!(resumed, state);
    }
}
