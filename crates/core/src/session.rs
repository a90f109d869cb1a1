// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use spark_capacity_domain::{
    CapacitySummary, MemberCapacityRow, MemberId, SprintDetails, SprintDuration,
    SprintParameters, aggregate, sprint_duration,
};

/// Whether a session plans a new sprint or revises a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// A new sprint; submission creates it.
    Create,
    /// An existing sprint; submission upserts each member row.
    Edit {
        /// The stored sprint.
        sprint_id: i64,
    },
}

/// Where a planning session is in its lifecycle.
///
/// `Empty -> Populating -> Valid -> Submitted`. Any edit returns the session
/// to `Populating`. `Loading` is entered while a roster fetch is outstanding
/// and left by a bulk roster change or an abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing has been entered.
    Empty,
    /// A team roster fetch is outstanding.
    Loading,
    /// The plan is being edited.
    Populating,
    /// The plan passed validation and may be persisted.
    Valid,
    /// The plan has been persisted.
    Submitted,
}

impl SessionPhase {
    /// Returns the phase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Loading => "loading",
            Self::Populating => "populating",
            Self::Valid => "valid",
            Self::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sprint capacity plan being edited.
///
/// A session is never mutated in place by callers. Every change goes
/// through [`crate::apply`], which returns a new session and leaves the old
/// one untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningSession {
    mode: SessionMode,
    details: SprintDetails,
    parameters: SprintParameters,
    duration: SprintDuration,
    rows: Vec<MemberCapacityRow>,
    summary: Option<CapacitySummary>,
    phase: SessionPhase,
    phase_before_loading: Option<SessionPhase>,
    aggregate_passes: u64,
}

impl PlanningSession {
    /// Creates an empty session for a new sprint.
    ///
    /// # Arguments
    ///
    /// * `parameters` - Initial sprint parameters (dates may be absent)
    #[must_use]
    pub fn new(parameters: SprintParameters) -> Self {
        Self {
            mode: SessionMode::Create,
            details: SprintDetails::default(),
            parameters,
            duration: sprint_duration(&parameters),
            rows: Vec::new(),
            summary: None,
            phase: SessionPhase::Empty,
            phase_before_loading: None,
            aggregate_passes: 0,
        }
    }

    /// Creates a session for a new sprint with its details already entered.
    ///
    /// The session starts `Empty` only when `details` carries nothing.
    #[must_use]
    pub fn for_new_sprint(details: SprintDetails, parameters: SprintParameters) -> Self {
        let mut session: Self = Self::new(parameters);
        if details != SprintDetails::default() {
            session.phase = SessionPhase::Populating;
        }
        session.details = details;
        session
    }

    /// Opens a stored sprint for editing.
    ///
    /// Every stored row is recomputed against `parameters` and the summary is
    /// built once.
    ///
    /// # Arguments
    ///
    /// * `sprint_id` - The stored sprint
    /// * `details` - The stored sprint details
    /// * `parameters` - The stored sprint parameters
    /// * `rows` - The stored member capacity rows
    #[must_use]
    pub fn for_existing_sprint(
        sprint_id: i64,
        details: SprintDetails,
        parameters: SprintParameters,
        rows: Vec<MemberCapacityRow>,
    ) -> Self {
        let mut session: Self = Self::new(parameters);
        session.mode = SessionMode::Edit { sprint_id };
        session.details = details;
        session.rows = rows;
        session.phase = SessionPhase::Populating;
        session.recompute_all_rows();
        session.refresh_summary();
        session
    }

    /// Returns the session mode.
    #[must_use]
    pub const fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Returns the sprint details.
    #[must_use]
    pub const fn details(&self) -> &SprintDetails {
        &self.details
    }

    /// Returns the sprint parameters.
    #[must_use]
    pub const fn parameters(&self) -> &SprintParameters {
        &self.parameters
    }

    /// Returns the day counts for the current parameters.
    #[must_use]
    pub const fn duration(&self) -> SprintDuration {
        self.duration
    }

    /// Returns the roster.
    #[must_use]
    pub fn rows(&self) -> &[MemberCapacityRow] {
        &self.rows
    }

    /// Returns the current summary, `None` while the roster is empty.
    #[must_use]
    pub const fn summary(&self) -> Option<&CapacitySummary> {
        self.summary.as_ref()
    }

    /// Returns the lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Number of summary aggregations run over the life of the session.
    #[must_use]
    pub const fn aggregate_passes(&self) -> u64 {
        self.aggregate_passes
    }

    /// Whether a roster row already belongs to `member_id`.
    #[must_use]
    pub fn has_member(&self, member_id: MemberId) -> bool {
        self.rows.iter().any(|row| row.member_id == Some(member_id))
    }

    pub(crate) const fn details_mut(&mut self) -> &mut SprintDetails {
        &mut self.details
    }

    pub(crate) const fn rows_mut(&mut self) -> &mut Vec<MemberCapacityRow> {
        &mut self.rows
    }

    pub(crate) const fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }

    pub(crate) const fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub(crate) const fn begin_loading(&mut self) {
        self.phase_before_loading = Some(self.phase);
        self.phase = SessionPhase::Loading;
    }

    /// Records an edit made while a roster fetch is outstanding, so that
    /// leaving `Loading` lands in `Populating` instead of the earlier phase.
    pub(crate) const fn mark_edited_while_loading(&mut self) {
        self.phase_before_loading = Some(SessionPhase::Populating);
    }

    /// Leaves `Loading`, restoring the phase held before the fetch began.
    pub(crate) fn finish_loading(&mut self) {
        self.phase = self
            .phase_before_loading
            .take()
            .unwrap_or(SessionPhase::Empty);
    }

    /// Replaces the parameters and refreshes the cached day counts.
    pub(crate) fn set_parameters(&mut self, parameters: SprintParameters) {
        self.parameters = parameters;
        self.duration = sprint_duration(&parameters);
    }

    /// Recomputes one row against the current duration.
    pub(crate) fn recompute_row(&mut self, index: usize) {
        let working_days: u32 = self.duration.working_days;
        let default_daily_hours: f64 = self.parameters.default_daily_hours;
        if let Some(row) = self.rows.get_mut(index) {
            row.recompute(working_days, default_daily_hours);
        }
    }

    /// Recomputes every row without touching the summary.
    pub(crate) fn recompute_all_rows(&mut self) -> usize {
        let working_days: u32 = self.duration.working_days;
        let default_daily_hours: f64 = self.parameters.default_daily_hours;
        for row in &mut self.rows {
            row.recompute(working_days, default_daily_hours);
        }
        self.rows.len()
    }

    /// Rebuilds the summary from the rows' derived fields.
    pub(crate) fn refresh_summary(&mut self) {
        self.summary = aggregate(&self.rows);
        self.aggregate_passes += 1;
    }
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new(SprintParameters::default())
    }
}
