//! 多步意图收集状态机
//!
//! # 结构
//!
//! - [`intent`] - 关键词意图识别 (下单 / 订位 / 无)
//! - [`extract`] - 菜单条目抽取
//! - [`order`] - 下单流程状态机 (步骤 0-4)
//! - [`reservation`] - 订位流程状态机 (步骤 0-6)
//! - [`engine`] - 回合分发器 + 会话回退
//!
//! The engine owns no session state. Each turn is a pure function of
//! `(message, step, collected_data)` → `(reply, next step, collected_data)`
//! plus a persistence side effect on the terminal step; the caller echoes
//! the returned state on its next turn.

pub mod engine;
pub mod extract;
pub mod intent;
pub mod order;
pub mod reservation;

pub use engine::ChatEngine;
pub use extract::ItemExtractor;
pub use intent::{Intent, IntentDetector, KeywordMatcher};

use thiserror::Error;

/// Caller-supplied flow state that cannot be resumed.
///
/// Distinct from invalid *input*, which is answered with a re-prompt and
/// never treated as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("unknown step {step} for {flow} flow")]
    UnknownStep { flow: &'static str, step: u8 },

    #[error("collected_data is missing `{field}` required at step {step}")]
    MissingField { flow: &'static str, field: &'static str, step: u8 },
}

/// Result of feeding one message into a flow.
#[derive(Debug)]
pub enum StepOutcome<S, F> {
    /// Reply to the user and keep collecting. On invalid input `state` is
    /// the unchanged input state (same step, re-prompt).
    Continue { reply: String, state: S },
    /// All fields gathered: the complete record, ready to persist.
    Finalize(F),
}

/// Reserved answers that decline the special-requests question.
const SKIP_WORDS: [&str; 3] = ["no", "none", "skip"];

/// Map the special-requests answer to the stored value: reserved words
/// mean "none" (empty string), anything else is stored verbatim.
pub(crate) fn special_requests_from(message: &str) -> String {
    if SKIP_WORDS.contains(&message.to_lowercase().as_str()) {
        String::new()
    } else {
        message.to_string()
    }
}
