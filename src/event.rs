use crate::classifier::Classification;
use crate::error::ClassifyError;
use crate::session::TurnId;

#[derive(Debug)]
pub enum AppEvent {
    ClassificationFinished {
        turn: TurnId,
        outcome: Result<Classification, ClassifyError>,
    },
}
