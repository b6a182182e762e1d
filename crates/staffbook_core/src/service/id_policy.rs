//! Employee id generation policy.
//!
//! Ids are a fixed prefix followed by a fixed number of uniformly random
//! decimal digits (`NV` + 8 digits by default). Candidates are redrawn while
//! they collide with an existing id, up to a bounded number of attempts.
//!
//! # Invariants
//! - `digits >= 1`, so every generated id is non-empty and random.
//! - `max_attempts >= 1`.

use crate::model::employee::EmployeeId;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_ID_PREFIX: &str = "NV";
pub const DEFAULT_ID_DIGITS: usize = 8;
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 1000;

/// Rejected `IdPolicy` configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicyError {
    ZeroDigits,
    ZeroAttempts,
}

impl Display for IdPolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDigits => write!(f, "id policy needs at least one random digit"),
            Self::ZeroAttempts => write!(f, "id policy needs at least one draw attempt"),
        }
    }
}

impl Error for IdPolicyError {}

/// Shape and retry budget of generated ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdPolicy {
    prefix: String,
    digits: usize,
    max_attempts: u32,
}

impl Default for IdPolicy {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ID_PREFIX.to_string(),
            digits: DEFAULT_ID_DIGITS,
            max_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }
}

impl IdPolicy {
    pub fn new(
        prefix: impl Into<String>,
        digits: usize,
        max_attempts: u32,
    ) -> Result<Self, IdPolicyError> {
        if digits == 0 {
            return Err(IdPolicyError::ZeroDigits);
        }
        if max_attempts == 0 {
            return Err(IdPolicyError::ZeroAttempts);
        }
        Ok(Self {
            prefix: prefix.into(),
            digits,
            max_attempts,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draws one candidate id without checking for collisions.
    pub fn draw<G: Rng>(&self, rng: &mut G) -> EmployeeId {
        let mut id = String::with_capacity(self.prefix.len() + self.digits);
        id.push_str(&self.prefix);
        for _ in 0..self.digits {
            id.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
        id
    }

    /// Draws candidates until one is not taken.
    ///
    /// Returns `None` once `max_attempts` candidates have all collided.
    pub fn generate<G, F>(&self, rng: &mut G, is_taken: F) -> Option<EmployeeId>
    where
        G: Rng,
        F: Fn(&str) -> bool,
    {
        (0..self.max_attempts)
            .map(|_| self.draw(rng))
            .find(|candidate| !is_taken(candidate.as_str()))
    }
}
