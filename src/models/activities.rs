use serde::Serialize;

/// An extracurricular offering as held in the registry.
///
/// `participants` keeps signup order so the roster renders in the order
/// students joined. Uniqueness within one activity is enforced by the
/// registry operations, not by the container.
#[derive(Debug, Clone)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

/// Wire projection of an [`Activity`] for the listing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityView {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn view(&self) -> ActivityView {
        ActivityView {
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            max_participants: self.max_participants,
            participants: self.participants.clone(),
        }
    }
}
