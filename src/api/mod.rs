//! HTTP API module for the Timesheet Engine.
//!
//! This module exposes shift calculation, entry validation and weekly
//! summaries as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BreakRequest, ShiftRequest, SummaryGrouping, SummaryQuery, SummaryRequest, TimeInput,
    ValidateEntryRequest,
};
pub use response::{ApiError, ApiErrorResponse, ValidationResponse};
pub use state::AppState;
