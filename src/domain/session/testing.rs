//! Fixtures shared by unit tests across layers.

use super::{QuestionnaireSession, SessionRecord};
use crate::domain::catalog::Catalog;
use crate::domain::questionnaire::Submission;

/// Walks a session through every block choosing option 0 each time.
pub(crate) fn completed_session(subject: &str, catalog: &Catalog) -> QuestionnaireSession {
    let mut session = QuestionnaireSession::start(subject, catalog).unwrap();
    while let Some(id) = session.current_id().cloned() {
        session
            .submit(catalog, &Submission::choose(id, 0))
            .unwrap();
    }
    session
}

/// A finalized record for `subject`.
pub(crate) fn finished_record(subject: &str) -> SessionRecord {
    let catalog = Catalog::builtin().unwrap();
    completed_session(subject, &catalog).finalize(&catalog).unwrap()
}
