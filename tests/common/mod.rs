#![allow(dead_code)]

use serde_json::Value;
use std::sync::Once;
use std::time::Instant;
use tracing::info;

pub mod cli;
pub mod fixtures;

use cli::Workspace;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        bench_compare::logging::init_test_logging();
    });
}

/// Logs the start of a test case and, on drop, how long it took.
pub struct CaseTimer {
    case: &'static str,
    started: Instant,
}

impl Drop for CaseTimer {
    fn drop(&mut self) {
        info!(case = self.case, elapsed = ?self.started.elapsed(), "case finished");
    }
}

pub fn test_log(case: &'static str) -> CaseTimer {
    init_test_logging();
    info!(case, "case started");
    CaseTimer {
        case,
        started: Instant::now(),
    }
}

/// A workspace holding `old.json` and `new.json`.
pub fn pair_workspace(old: &Value, new: &Value) -> Workspace {
    let workspace = Workspace::new();
    workspace.write_json("old.json", old);
    workspace.write_json("new.json", new);
    workspace
}
