//! Aid-planning domain models.
//!
//! Provides the data types for representing a reciprocal-labor planning
//! problem (households, help requests) and its solutions (plans of aid
//! assignments).
//!
//! # Domain Mappings
//!
//! | ayni-plan | Scheduling analogue |
//! |-----------|---------------------|
//! | Household | Resource (and customer) |
//! | Request | Task with a release/deadline window |
//! | AidAssignment | Assignment |
//! | Plan | Schedule |

mod household;
mod plan;
mod request;

pub use household::{CommunityId, Household, HouseholdId};
pub use plan::{AidAssignment, Plan};
pub use request::{Request, RequestId, TimeWindow, Urgency};
