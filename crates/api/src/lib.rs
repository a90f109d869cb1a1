// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod collaborators;
mod error;
mod memory;
mod request_response;
mod service;

#[cfg(test)]
mod tests;

pub use collaborators::{CollaboratorError, SprintStore, TeamDirectory};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use memory::{InMemorySprintStore, InMemoryTeamDirectory};
pub use request_response::{
    CapacitySummaryResponse, CreateSprintRequest, MemberCapacityInput, MemberCapacityRecord,
    MemberCapacityResponse, MemberProgressResponse, SprintCapacityResponse,
    SprintProgressResponse, SprintSubmission, SubmitResponse, TeamMemberRecord,
    ViolationResponse,
};
pub use service::{
    ApiResult, apply_event, load_team_roster, open_sprint, snapshot, sprint_progress,
    start_session, submit,
};
