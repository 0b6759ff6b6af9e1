//! Order flow state machine
//!
//! Five steps: items → name → email → phone → special requests, then the
//! terminal step hands a complete [`NewOrder`] back for persistence.
//! Each state variant carries exactly the fields that are known to be
//! valid at that point, so a resumed turn cannot skip a collection step
//! without the compiler noticing.

use serde::{Deserialize, Serialize};

use shared::models::{NewOrder, OrderLineItem, OrderStatus};

use super::{FlowError, ItemExtractor, StepOutcome, special_requests_from};
use crate::money;
use crate::utils::validation::{validate_email, validate_phone};

const FLOW: &str = "order";

/// Wire form of the accumulating record, echoed between turns as
/// `collected_data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<OrderLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

/// One variant per step; fields are those collected so far.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFlowState {
    /// Step 0: waiting for a message that names menu items
    CollectItems,
    /// Step 1: items gathered, waiting for the customer name
    CollectName { items: Vec<OrderLineItem> },
    /// Step 2: waiting for a valid email
    CollectEmail {
        items: Vec<OrderLineItem>,
        customer_name: String,
    },
    /// Step 3: waiting for a valid phone number
    CollectPhone {
        items: Vec<OrderLineItem>,
        customer_name: String,
        customer_email: String,
    },
    /// Step 4: waiting for special requests (terminal)
    CollectRequests {
        items: Vec<OrderLineItem>,
        customer_name: String,
        customer_email: String,
        customer_phone: String,
    },
}

impl OrderFlowState {
    pub fn step(&self) -> u8 {
        match self {
            OrderFlowState::CollectItems => 0,
            OrderFlowState::CollectName { .. } => 1,
            OrderFlowState::CollectEmail { .. } => 2,
            OrderFlowState::CollectPhone { .. } => 3,
            OrderFlowState::CollectRequests { .. } => 4,
        }
    }

    /// Rebuild the state from a caller-echoed `(step, collected_data)`
    /// pair, verifying that every field the step depends on is present.
    pub fn resume(step: u8, draft: OrderDraft) -> Result<Self, FlowError> {
        let missing = |field| FlowError::MissingField { flow: FLOW, field, step };

        match step {
            0 => Ok(OrderFlowState::CollectItems),
            1 => Ok(OrderFlowState::CollectName {
                items: require_items(draft.items, step)?,
            }),
            2 => Ok(OrderFlowState::CollectEmail {
                items: require_items(draft.items, step)?,
                customer_name: draft.customer_name.ok_or_else(|| missing("customer_name"))?,
            }),
            3 => Ok(OrderFlowState::CollectPhone {
                items: require_items(draft.items, step)?,
                customer_name: draft.customer_name.ok_or_else(|| missing("customer_name"))?,
                customer_email: draft
                    .customer_email
                    .ok_or_else(|| missing("customer_email"))?,
            }),
            4 => Ok(OrderFlowState::CollectRequests {
                items: require_items(draft.items, step)?,
                customer_name: draft.customer_name.ok_or_else(|| missing("customer_name"))?,
                customer_email: draft
                    .customer_email
                    .ok_or_else(|| missing("customer_email"))?,
                customer_phone: draft
                    .customer_phone
                    .ok_or_else(|| missing("customer_phone"))?,
            }),
            step => Err(FlowError::UnknownStep { flow: FLOW, step }),
        }
    }

    /// Wire form for the next `TurnResponse`.
    pub fn to_draft(&self) -> OrderDraft {
        match self {
            OrderFlowState::CollectItems => OrderDraft::default(),
            OrderFlowState::CollectName { items } => OrderDraft {
                items: items.clone(),
                ..OrderDraft::default()
            },
            OrderFlowState::CollectEmail {
                items,
                customer_name,
            } => OrderDraft {
                items: items.clone(),
                customer_name: Some(customer_name.clone()),
                ..OrderDraft::default()
            },
            OrderFlowState::CollectPhone {
                items,
                customer_name,
                customer_email,
            } => OrderDraft {
                items: items.clone(),
                customer_name: Some(customer_name.clone()),
                customer_email: Some(customer_email.clone()),
                ..OrderDraft::default()
            },
            OrderFlowState::CollectRequests {
                items,
                customer_name,
                customer_email,
                customer_phone,
            } => OrderDraft {
                items: items.clone(),
                customer_name: Some(customer_name.clone()),
                customer_email: Some(customer_email.clone()),
                customer_phone: Some(customer_phone.clone()),
            },
        }
    }
}

fn require_items(items: Vec<OrderLineItem>, step: u8) -> Result<Vec<OrderLineItem>, FlowError> {
    if items.is_empty() {
        Err(FlowError::MissingField {
            flow: FLOW,
            field: "items",
            step,
        })
    } else {
        Ok(items)
    }
}

/// Feed one message into the flow.
///
/// Invalid input never errors: it replies with a re-prompt and returns the
/// unchanged state. The terminal step returns the complete order instead.
pub fn advance(
    state: OrderFlowState,
    message: &str,
    extractor: &ItemExtractor,
    session_id: &str,
) -> StepOutcome<OrderFlowState, NewOrder> {
    match state {
        OrderFlowState::CollectItems => {
            let items = extractor.extract(message);
            if items.is_empty() {
                return StepOutcome::Continue {
                    reply: "I didn't find any menu items in your message. Could you please \
                            specify which items you'd like to order?"
                        .to_string(),
                    state: OrderFlowState::CollectItems,
                };
            }
            let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            StepOutcome::Continue {
                reply: format!(
                    "Great! I found {} in your message. What's your name?",
                    names.join(", ")
                ),
                state: OrderFlowState::CollectName { items },
            }
        }

        // Names are free text; anything goes
        OrderFlowState::CollectName { items } => StepOutcome::Continue {
            reply: "Thanks! What's your email address?".to_string(),
            state: OrderFlowState::CollectEmail {
                items,
                customer_name: message.to_string(),
            },
        },

        OrderFlowState::CollectEmail {
            items,
            customer_name,
        } => {
            if !validate_email(message) {
                return StepOutcome::Continue {
                    reply: "That doesn't look like a valid email. Please try again.".to_string(),
                    state: OrderFlowState::CollectEmail {
                        items,
                        customer_name,
                    },
                };
            }
            StepOutcome::Continue {
                reply: "Great! What's your phone number?".to_string(),
                state: OrderFlowState::CollectPhone {
                    items,
                    customer_name,
                    customer_email: message.to_string(),
                },
            }
        }

        OrderFlowState::CollectPhone {
            items,
            customer_name,
            customer_email,
        } => {
            if !validate_phone(message) {
                return StepOutcome::Continue {
                    reply: "That doesn't look like a valid phone number. Please try again."
                        .to_string(),
                    state: OrderFlowState::CollectPhone {
                        items,
                        customer_name,
                        customer_email,
                    },
                };
            }
            let summary = items_summary(&items);
            let total = money::order_total(&items);
            StepOutcome::Continue {
                reply: format!(
                    "Perfect! Here's your order summary:\n{summary}\nTotal: {}\n\n\
                     Any special requests? (or just say 'no')",
                    money::format_usd(total)
                ),
                state: OrderFlowState::CollectRequests {
                    items,
                    customer_name,
                    customer_email,
                    customer_phone: message.to_string(),
                },
            }
        }

        OrderFlowState::CollectRequests {
            items,
            customer_name,
            customer_email,
            customer_phone,
        } => {
            let total_price = money::to_f64(money::order_total(&items));
            StepOutcome::Finalize(NewOrder {
                customer_name,
                customer_email: Some(customer_email),
                customer_phone: Some(customer_phone),
                items,
                special_requests: special_requests_from(message),
                total_price,
                status: OrderStatus::Confirmed,
                session_id: session_id.to_string(),
            })
        }
    }
}

/// `{qty}x {name}` per line item, comma separated
fn items_summary(items: &[OrderLineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Confirmation text for a persisted order.
pub fn confirmation(order_id: i64, total_price: f64) -> String {
    format!(
        "✅ Order #{order_id} Confirmed!\nTotal: ${total_price:.2}\nThank you for your order!"
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::restaurant::Restaurant;

    fn extractor() -> ItemExtractor {
        ItemExtractor::new(Arc::new(Restaurant::taste_haven().menu))
    }

    fn spring_rolls() -> Vec<OrderLineItem> {
        vec![OrderLineItem {
            id: "app_1".to_string(),
            name: "Spring Rolls".to_string(),
            price: 8.99,
            quantity: 1,
        }]
    }

    #[test]
    fn step0_extracts_items_and_asks_for_name() {
        let out = advance(
            OrderFlowState::CollectItems,
            "I want Spring Rolls",
            &extractor(),
            "s1",
        );
        match out {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("Spring Rolls"));
                assert!(reply.contains("What's your name?"));
                assert_eq!(state.step(), 1);
                assert_eq!(state.to_draft().items, spring_rolls());
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn step0_without_items_stays_put() {
        let out = advance(
            OrderFlowState::CollectItems,
            "I want to order something tasty",
            &extractor(),
            "s1",
        );
        match out {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("didn't find any menu items"));
                assert_eq!(state.step(), 0);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn step2_rejects_bad_email_without_advancing() {
        let state = OrderFlowState::CollectEmail {
            items: spring_rolls(),
            customer_name: "Anna".to_string(),
        };
        let out = advance(state, "not-an-email", &extractor(), "s1");
        match out {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("valid email"));
                assert_eq!(state.step(), 2);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn step3_builds_summary_with_two_decimal_total() {
        let mut items = spring_rolls();
        items.push(OrderLineItem {
            id: "bev_1".to_string(),
            name: "Soft Drinks".to_string(),
            price: 3.50,
            quantity: 2,
        });
        let state = OrderFlowState::CollectPhone {
            items,
            customer_name: "Anna".to_string(),
            customer_email: "anna@example.com".to_string(),
        };
        let out = advance(state, "(555) 123-4567", &extractor(), "s1");
        match out {
            StepOutcome::Continue { reply, state } => {
                assert!(reply.contains("1x Spring Rolls, 2x Soft Drinks"));
                assert!(reply.contains("Total: $15.99"));
                assert!(reply.contains("special requests"));
                assert_eq!(state.step(), 4);
            }
            _ => panic!("expected Continue"),
        }
    }

    #[test]
    fn terminal_step_with_skip_word_finalizes_empty_requests() {
        let state = OrderFlowState::CollectRequests {
            items: spring_rolls(),
            customer_name: "Anna".to_string(),
            customer_email: "anna@example.com".to_string(),
            customer_phone: "5551234567".to_string(),
        };
        match advance(state, "no", &extractor(), "s1") {
            StepOutcome::Finalize(order) => {
                assert_eq!(order.special_requests, "");
                assert_eq!(order.status, OrderStatus::Confirmed);
                assert_eq!(order.total_price, 8.99);
                assert_eq!(order.session_id, "s1");
            }
            _ => panic!("expected Finalize"),
        }
    }

    #[test]
    fn terminal_step_keeps_requests_verbatim() {
        let state = OrderFlowState::CollectRequests {
            items: spring_rolls(),
            customer_name: "Anna".to_string(),
            customer_email: "anna@example.com".to_string(),
            customer_phone: "5551234567".to_string(),
        };
        match advance(state, "extra chili sauce", &extractor(), "s1") {
            StepOutcome::Finalize(order) => {
                assert_eq!(order.special_requests, "extra chili sauce");
            }
            _ => panic!("expected Finalize"),
        }
    }

    #[test]
    fn resume_rejects_unknown_step_and_missing_fields() {
        assert_eq!(
            OrderFlowState::resume(7, OrderDraft::default()),
            Err(FlowError::UnknownStep { flow: "order", step: 7 })
        );
        assert_eq!(
            OrderFlowState::resume(1, OrderDraft::default()),
            Err(FlowError::MissingField { flow: "order", field: "items", step: 1 })
        );
        let draft = OrderDraft {
            items: spring_rolls(),
            ..OrderDraft::default()
        };
        assert_eq!(
            OrderFlowState::resume(2, draft),
            Err(FlowError::MissingField { flow: "order", field: "customer_name", step: 2 })
        );
    }

    #[test]
    fn resume_roundtrips_through_draft() {
        let state = OrderFlowState::CollectPhone {
            items: spring_rolls(),
            customer_name: "Anna".to_string(),
            customer_email: "anna@example.com".to_string(),
        };
        let resumed = OrderFlowState::resume(state.step(), state.to_draft()).unwrap();
        assert_eq!(resumed, state);
    }
}
