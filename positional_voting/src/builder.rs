pub use crate::config::*;

/// A builder for assembling a room tally ballot by ballot.
///
/// ```
/// pub use positional_voting::builder::Builder;
/// # use positional_voting::VotingError;
///
/// let mut builder = Builder::new(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot(&["Bob".to_string(), "Anna".to_string()])?;
///
/// let rows = builder.tally()?;
/// assert_eq!(rows[0].option, "Bob");
///
/// # Ok::<(), VotingError>(())
/// ```
pub struct Builder {
    pub(crate) _options: Vec<String>,
    pub(crate) _weights: Vec<u64>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    /// Starts a tally over the given options with the default point scheme.
    pub fn new(options: &[String]) -> Result<Builder, VotingError> {
        Ok(Builder {
            _options: options.to_vec(),
            _weights: default_weights(options.len()),
            _ballots: Vec::new(),
        })
    }

    /// Replaces the point-weight scheme. The number of weights must match
    /// the number of options.
    pub fn weights(self, weights: &[u64]) -> Result<Builder, VotingError> {
        if weights.len() != self._options.len() {
            return Err(VotingError::MismatchedWeights {
                options: self._options.len(),
                weights: weights.len(),
            });
        }
        Ok(Builder {
            _options: self._options,
            _weights: weights.to_vec(),
            _ballots: self._ballots,
        })
    }

    /// Adds one voter's ranking, best choice first.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_ballot(&mut self, choices: &[String]) -> Result<(), VotingError> {
        self.add_ballot_grouped(choices, 1)
    }

    /// Adds a pre-grouped ranking carried by several identical ballots.
    pub fn add_ballot_grouped(&mut self, choices: &[String], count: u64) -> Result<(), VotingError> {
        self._ballots.push(Ballot {
            choices: choices.to_vec(),
            count,
        });
        Ok(())
    }

    /// Runs the tabulation over everything added so far.
    pub fn tally(&self) -> Result<Vec<ResultRow>, VotingError> {
        crate::tally_ballots(&self._options, &self._weights, &self._ballots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_custom_weights() {
        let mut builder = Builder::new(&["A".to_string(), "B".to_string()])
            .unwrap()
            .weights(&[10, 1])
            .unwrap();
        builder.add_ballot(&["A".to_string(), "B".to_string()]).unwrap();
        let rows = builder.tally().unwrap();
        assert_eq!(rows[0].points, 10);
        assert_eq!(rows[1].points, 1);
    }

    #[test]
    fn builder_rejects_a_short_scheme() {
        let res = Builder::new(&["A".to_string(), "B".to_string()])
            .unwrap()
            .weights(&[3]);
        assert!(res.is_err());
    }
}
