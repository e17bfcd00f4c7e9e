pub mod parser;

pub use parser::{Survey, SurveyError, parse_survey};
