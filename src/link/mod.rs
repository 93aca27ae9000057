mod error;
mod parser;
mod profile_file;

pub use error::LinkError;
pub use parser::{LinkPlan, ProfileSource};
pub use profile_file::{read_profile, ProfileDocument};
