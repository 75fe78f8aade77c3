//! Trainer screen: hands a signed-in member a random workout plan

use std::sync::{Mutex, PoisonError};

use rand::Rng;

use crate::catalog::{TrainerPlan, TRAINER_PLANS};
use crate::error::{ClientResult, FittrackError};
use crate::store::SessionStore;

pub struct TrainerViewModel {
    session: SessionStore,
    current: Mutex<Option<&'static TrainerPlan>>,
}

impl TrainerViewModel {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            current: Mutex::new(None),
        }
    }

    /// Picks a plan at random and makes it the current one.
    ///
    /// # Errors
    ///
    /// [`FittrackError::LoginRequired`] when nobody is signed in. The
    /// current plan is left as it was.
    pub fn generate(&self) -> ClientResult<&'static TrainerPlan> {
        self.generate_with(&mut rand::rng())
    }

    /// [`TrainerViewModel::generate`] with a caller-supplied generator
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> ClientResult<&'static TrainerPlan> {
        if self.session.load()?.is_none() {
            return Err(FittrackError::LoginRequired(
                "Please log in to access workout plans.".to_string(),
            ));
        }

        let plan = &TRAINER_PLANS[rng.random_range(0..TRAINER_PLANS.len())];
        tracing::debug!("Generated trainer plan {} ({})", plan.id, plan.name);
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(plan);
        Ok(plan)
    }

    /// The last generated plan
    pub fn current(&self) -> Option<&'static TrainerPlan> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
