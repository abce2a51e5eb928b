//! Terminal output helpers
//!
//! Fancy `cliclack` output on a TTY, plain prefixed lines everywhere else
//! (pipes, CI, tests).

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, remark, step_error_detail, step_info, step_ok,
    step_ok_detail, step_warn_hint,
};
