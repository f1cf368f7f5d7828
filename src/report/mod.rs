pub mod generator;
pub mod mocks;
pub mod schema;
pub mod synthesizer;
pub mod types;


pub use generator::{ChatCompletionsGenerator, GeneratorError, MockGenerator, TextGenerator};
pub use schema::VehicleReport;
pub use synthesizer::ReportSynthesizer;
pub use types::{Report, ReportBody};
