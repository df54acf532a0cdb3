pub use crate::config::*;
use crate::Profile;

/// An incremental builder for preference profiles.
///
/// Valuation rows are added one agent at a time, which suits callers that
/// stream rows out of a spreadsheet or a network source. The first row fixes
/// the number of alternatives.
///
/// ```
/// pub use social_choice::builder::ProfileBuilder;
/// # use social_choice::VotingError;
///
/// let mut builder = ProfileBuilder::new();
/// builder.add_valuations(&[5.0, 2.0, 1.0])?;
/// builder.add_valuations(&[1.0, 5.0, 2.0])?;
///
/// let profile = builder.build()?;
/// assert_eq!(profile.num_agents(), 2);
///
/// # Ok::<(), VotingError>(())
/// ```
pub struct ProfileBuilder {
    rows: Vec<Vec<f64>>,
}

impl ProfileBuilder {
    pub fn new() -> ProfileBuilder {
        ProfileBuilder { rows: Vec::new() }
    }

    /// Adds the valuation row of the next agent.
    ///
    /// Rows must be non-empty and all of the same width.
    pub fn add_valuations(&mut self, row: &[f64]) -> Result<(), VotingError> {
        if row.is_empty() {
            return Err(VotingError::InvalidArgument(
                "a valuation row may not be empty".to_string(),
            ));
        }
        if let Some(first) = self.rows.first() {
            if row.len() != first.len() {
                return Err(VotingError::InvalidArgument(format!(
                    "row {} has {} cells, expected {}",
                    self.rows.len() + 1,
                    row.len(),
                    first.len()
                )));
            }
        }
        self.rows.push(row.to_vec());
        Ok(())
    }

    /// Derives the profile from the accumulated rows.
    pub fn build(self) -> Result<Profile, VotingError> {
        Profile::from_valuations(&self.rows)
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        ProfileBuilder::new()
    }
}
