use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Activity, ActivityView};

/// Registry handle shared across request handlers.
///
/// Signup and unregister take the write guard for the whole
/// check-then-mutate sequence, so two requests racing on the same
/// activity cannot both pass the duplicate check.
pub type SharedRegistry = Arc<RwLock<Registry>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    #[error("Activity not found")]
    ActivityNotFound,
    #[error("Student is already signed up")]
    AlreadySignedUp,
    #[error("Student is not registered for this activity")]
    NotRegistered,
}

/// In-memory catalog of activities, keyed by display name.
///
/// The key set is fixed at startup; signup/unregister only touch the
/// participant lists. Nothing is persisted, a restart reseeds.
#[derive(Debug, Default)]
pub struct Registry {
    activities: BTreeMap<String, Activity>,
}

impl Registry {
    pub fn new(activities: BTreeMap<String, Activity>) -> Self {
        Self { activities }
    }

    /// The Mergington High School activity catalog.
    pub fn seeded() -> Self {
        let mut registry = Registry::default();
        registry.add(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        );
        registry.add(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        );
        registry.add(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        );
        registry.add(
            "Soccer Team",
            "Join the school soccer team and compete in local matches",
            "Tuesdays and Thursdays, 4:00 PM - 5:30 PM",
            22,
            &["liam@mergington.edu", "noah@mergington.edu"],
        );
        registry.add(
            "Basketball Team",
            "Practice and play basketball with the school team",
            "Wednesdays and Fridays, 3:30 PM - 5:00 PM",
            15,
            &["ava@mergington.edu", "mia@mergington.edu"],
        );
        registry.add(
            "Art Studio",
            "Express your creativity through painting, drawing, and sculpture",
            "Thursdays, 3:30 PM - 5:00 PM",
            15,
            &["amelia@mergington.edu", "harper@mergington.edu"],
        );
        registry.add(
            "Drama Club",
            "Act, direct, and produce plays and performances",
            "Mondays and Wednesdays, 4:00 PM - 5:30 PM",
            20,
            &["ella@mergington.edu", "scarlett@mergington.edu"],
        );
        registry.add(
            "Math Club",
            "Solve challenging problems and prepare for math competitions",
            "Tuesdays, 3:30 PM - 4:30 PM",
            10,
            &["james@mergington.edu", "benjamin@mergington.edu"],
        );
        registry.add(
            "Debate Team",
            "Develop public speaking and argumentation skills",
            "Fridays, 4:00 PM - 5:30 PM",
            12,
            &["charlotte@mergington.edu", "henry@mergington.edu"],
        );
        registry
    }

    pub fn shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    fn add(
        &mut self,
        name: &str,
        description: &str,
        schedule: &str,
        max_participants: u32,
        participants: &[&str],
    ) {
        self.activities.insert(
            name.to_string(),
            Activity {
                description: description.to_string(),
                schedule: schedule.to_string(),
                max_participants,
                participants: participants.iter().map(|p| p.to_string()).collect(),
            },
        );
    }

    /// Every activity in the registry, projected for the wire.
    pub fn list(&self) -> BTreeMap<String, ActivityView> {
        self.activities
            .iter()
            .map(|(name, activity)| (name.clone(), activity.view()))
            .collect()
    }

    /// Adds `email` to the activity's roster.
    ///
    /// Unknown activity wins over duplicate signup when both would apply.
    /// Capacity (`max_participants`) is display metadata and is NOT
    /// checked here; a roster may grow past it.
    pub fn sign_up(&mut self, activity_name: &str, email: &str) -> Result<String, SignupError> {
        let activity = self
            .activities
            .get_mut(activity_name)
            .ok_or(SignupError::ActivityNotFound)?;

        if activity.participants.iter().any(|p| p == email) {
            return Err(SignupError::AlreadySignedUp);
        }

        activity.participants.push(email.to_string());
        Ok(format!("Signed up {} for {}", email, activity_name))
    }

    /// Removes `email` from the activity's roster.
    ///
    /// A known activity without this participant is a bad request, not a
    /// 404; only the activity name itself can be "not found".
    pub fn unregister(&mut self, activity_name: &str, email: &str) -> Result<String, SignupError> {
        let activity = self
            .activities
            .get_mut(activity_name)
            .ok_or(SignupError::ActivityNotFound)?;

        let Some(pos) = activity.participants.iter().position(|p| p == email) else {
            return Err(SignupError::NotRegistered);
        };

        activity.participants.remove(pos);
        Ok(format!("Removed {} from {}", email, activity_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant_count(registry: &Registry, name: &str) -> usize {
        registry.list()[name].participants.len()
    }

    #[test]
    fn seeded_catalog_has_expected_activities() {
        let registry = Registry::seeded();
        let listing = registry.list();

        for name in ["Chess Club", "Programming Class", "Drama Club", "Art Studio"] {
            assert!(listing.contains_key(name), "missing {}", name);
        }

        let chess = &listing["Chess Club"];
        assert_eq!(chess.max_participants, 12);
        assert_eq!(chess.schedule, "Fridays, 3:30 PM - 5:00 PM");
        assert_eq!(
            chess.participants,
            vec!["michael@mergington.edu", "daniel@mergington.edu"]
        );
    }

    #[test]
    fn sign_up_appends_in_order() {
        let mut registry = Registry::seeded();
        let before = participant_count(&registry, "Chess Club");

        let message = registry.sign_up("Chess Club", "newuser@mergington.edu").unwrap();
        assert_eq!(message, "Signed up newuser@mergington.edu for Chess Club");
        assert_eq!(participant_count(&registry, "Chess Club"), before + 1);
        assert_eq!(
            registry.list()["Chess Club"].participants.last().unwrap(),
            "newuser@mergington.edu"
        );
    }

    #[test]
    fn duplicate_sign_up_is_rejected_once() {
        let mut registry = Registry::seeded();
        let before = participant_count(&registry, "Chess Club");

        assert!(registry.sign_up("Chess Club", "dup@mergington.edu").is_ok());
        assert_eq!(
            registry.sign_up("Chess Club", "dup@mergington.edu"),
            Err(SignupError::AlreadySignedUp)
        );
        // Rejected attempt must not have added a second entry.
        assert_eq!(participant_count(&registry, "Chess Club"), before + 1);
    }

    #[test]
    fn unregister_undoes_sign_up_exactly() {
        let mut registry = Registry::seeded();
        let before = registry.list()["Drama Club"].participants.clone();

        registry.sign_up("Drama Club", "temp@mergington.edu").unwrap();
        let message = registry.unregister("Drama Club", "temp@mergington.edu").unwrap();

        assert_eq!(message, "Removed temp@mergington.edu from Drama Club");
        assert_eq!(registry.list()["Drama Club"].participants, before);
    }

    #[test]
    fn unregister_without_sign_up_is_bad_request() {
        let mut registry = Registry::seeded();
        let before = participant_count(&registry, "Chess Club");

        assert_eq!(
            registry.unregister("Chess Club", "ghost@mergington.edu"),
            Err(SignupError::NotRegistered)
        );
        assert_eq!(participant_count(&registry, "Chess Club"), before);
    }

    #[test]
    fn unknown_activity_is_not_found_for_both_operations() {
        let mut registry = Registry::seeded();
        let before = registry.list();

        assert_eq!(
            registry.sign_up("Knitting Circle", "a@mergington.edu"),
            Err(SignupError::ActivityNotFound)
        );
        assert_eq!(
            registry.unregister("Knitting Circle", "a@mergington.edu"),
            Err(SignupError::ActivityNotFound)
        );

        let after = registry.list();
        assert_eq!(before.len(), after.len());
        for (name, view) in &before {
            assert_eq!(view.participants, after[name].participants);
        }
    }

    #[test]
    fn same_email_may_join_multiple_activities() {
        let mut registry = Registry::seeded();

        registry.sign_up("Chess Club", "busy@mergington.edu").unwrap();
        registry.sign_up("Math Club", "busy@mergington.edu").unwrap();

        assert!(registry.list()["Chess Club"]
            .participants
            .contains(&"busy@mergington.edu".to_string()));
        assert!(registry.list()["Math Club"]
            .participants
            .contains(&"busy@mergington.edu".to_string()));
    }

    #[test]
    fn sign_up_does_not_enforce_capacity() {
        let mut registry = Registry::seeded();
        let max = registry.list()["Math Club"].max_participants as usize;

        for i in 0..max + 3 {
            registry
                .sign_up("Math Club", &format!("student{}@mergington.edu", i))
                .unwrap();
        }

        assert!(participant_count(&registry, "Math Club") > max);
    }
}
