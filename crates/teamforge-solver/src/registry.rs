//! Post-formation team operations.

use tracing::info;

use teamforge_core::{Participant, ParticipantId, ParticipantUpdate, Result, Team, TeamForgeError};

use crate::constraint::ConstraintChecker;
use crate::formation::TeamFormationResult;

/// Where a late registrant would be placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Seat<'a> {
    /// A compliant team with an open seat that accepts the participant.
    Open(&'a Team),
    /// No team fits; a new overflow team with this id would be opened.
    NewOverflow(usize),
}

impl Seat<'_> {
    /// Id of the team the participant would join.
    pub fn team_id(&self) -> usize {
        match self {
            Seat::Open(team) => team.id(),
            Seat::NewOverflow(id) => *id,
        }
    }
}

/// Owns the teams of a finished run and applies edits to them.
///
/// Teams are emptied by withdrawals but never removed, so team ids stay
/// stable for the lifetime of the registry.
///
/// # Example
///
/// ```
/// use teamforge_core::{Participant, PersonalityType, RoleType};
/// use teamforge_solver::{TeamFormation, TeamRegistry};
///
/// let pool = vec![
///     Participant::new("1", "Ana", "ana@university.edu", "Chess", 5,
///         RoleType::Strategist, 95, PersonalityType::Leader),
///     Participant::new("2", "Bo", "bo@university.edu", "FIFA", 6,
///         RoleType::Attacker, 75, PersonalityType::Balanced),
/// ];
/// let result = TeamFormation::new(pool, 2).unwrap().with_seed(0).form();
/// let mut registry = TeamRegistry::new(result);
///
/// let bo = registry.withdraw(&"2".into()).unwrap();
/// assert_eq!(bo.name(), "Bo");
/// assert!(registry.team_of(&"2".into()).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    result: TeamFormationResult,
    next_team_id: usize,
}

impl TeamRegistry {
    pub fn new(result: TeamFormationResult) -> Self {
        let next_team_id = result.all_teams().map(Team::id).max().unwrap_or(0) + 1;
        Self {
            result,
            next_team_id,
        }
    }

    pub fn result(&self) -> &TeamFormationResult {
        &self.result
    }

    pub fn into_result(self) -> TeamFormationResult {
        self.result
    }

    /// The team holding `id`, if any.
    pub fn team_of(&self, id: &ParticipantId) -> Option<&Team> {
        self.result.all_teams().find(|team| team.contains(id))
    }

    /// The seat a late registrant would take. Nothing is modified.
    ///
    /// Picks the first compliant team with an open seat that accepts the
    /// participant under the hard constraints. Otherwise reports the id a
    /// new overflow team would receive.
    pub fn find_suitable_team(&self, participant: &Participant) -> Seat<'_> {
        match self.open_compliant(participant) {
            Some(index) => Seat::Open(&self.result.compliant_teams()[index]),
            None => Seat::NewOverflow(self.next_team_id),
        }
    }

    /// Places a late registrant and returns the id of the team it joined.
    ///
    /// The participant takes the seat [`find_suitable_team`] reports; a new
    /// overflow team is created only here.
    ///
    /// # Errors
    ///
    /// `DuplicateParticipant` if the id is already placed.
    ///
    /// [`find_suitable_team`]: Self::find_suitable_team
    pub fn register_late(&mut self, participant: Participant) -> Result<usize> {
        if self.team_of(participant.id()).is_some() {
            return Err(TeamForgeError::DuplicateParticipant(
                participant.id().to_string(),
            ));
        }

        let open = self.open_compliant(&participant);
        let team = match open {
            Some(index) => &mut self.result.compliant_mut()[index],
            None => {
                let overflow = self.result.overflow_mut();
                overflow.push(Team::new(self.next_team_id));
                self.next_team_id += 1;
                let last = overflow.len() - 1;
                &mut overflow[last]
            }
        };
        let id = participant.id().clone();
        team.add_member(participant);

        info!(
            event = "late_registration",
            participant = %id,
            team_id = team.id(),
            to_overflow = open.is_none(),
        );
        Ok(team.id())
    }

    /// Removes a participant from its team and returns it.
    ///
    /// # Errors
    ///
    /// `UnknownParticipant` if no team holds `id`.
    pub fn withdraw(&mut self, id: &ParticipantId) -> Result<Participant> {
        let removed = self
            .result
            .teams_mut()
            .find_map(|team| team.remove_member(id).map(|p| (team.id(), p)));

        match removed {
            Some((team_id, participant)) => {
                info!(event = "withdrawal", participant = %id, team_id = team_id);
                Ok(participant)
            }
            None => Err(TeamForgeError::UnknownParticipant(id.to_string())),
        }
    }

    /// Applies a validated update to the member with `id`.
    ///
    /// # Errors
    ///
    /// `UnknownParticipant` if no team holds `id`, or the validation error
    /// of the update. A rejected update changes nothing.
    pub fn update_participant(
        &mut self,
        id: &ParticipantId,
        update: ParticipantUpdate,
    ) -> Result<()> {
        let member = self
            .result
            .teams_mut()
            .find_map(|team| team.member_mut(id))
            .ok_or_else(|| TeamForgeError::UnknownParticipant(id.to_string()))?;
        update.apply(member)
    }

    fn open_compliant(&self, participant: &Participant) -> Option<usize> {
        let target = self.result.target_size().get();
        self.result.compliant_teams().iter().position(|team| {
            team.len() < target && !ConstraintChecker::would_violate(team.members(), participant)
        })
    }
}
