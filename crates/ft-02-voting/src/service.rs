//! Voting Service - Core business logic
//!
//! Orchestrates cast/retract against the vote store and the request
//! directory, then recomputes counts and membership from live rows.

use crate::domain::{VoteOutcome, VoteSummary, VoteType, Voters, VotingError, VotingResult};
use crate::ports::inbound::VotingApi;
use crate::ports::outbound::{RequestDirectory, VoteStore};
use async_trait::async_trait;
use shared_types::{authorize, Action, Principal, RequestId, UserId};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Voting configuration
#[derive(Clone, Debug)]
pub struct VotingConfig {
    /// Upper bound on any single store call
    pub store_timeout: Duration,
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(2),
        }
    }
}

/// Voting Service implementation
pub struct VotingService<S, D>
where
    S: VoteStore,
    D: RequestDirectory,
{
    config: VotingConfig,
    store: Arc<S>,
    directory: Arc<D>,
}

impl<S, D> VotingService<S, D>
where
    S: VoteStore,
    D: RequestDirectory,
{
    pub fn new(store: Arc<S>, directory: Arc<D>, config: VotingConfig) -> Self {
        Self {
            config,
            store,
            directory,
        }
    }

    pub fn config(&self) -> &VotingConfig {
        &self.config
    }

    /// Runs a store call under the configured deadline.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> VotingResult<T>
    where
        F: Future<Output = VotingResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result.map_err(|e| {
                if e.is_infrastructure() {
                    error!(operation, error = %e, "[ft-02] store call failed");
                }
                e
            }),
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "[ft-02] store call timed out"
                );
                Err(VotingError::Timeout { operation })
            }
        }
    }

    async fn ensure_request(&self, request_id: RequestId) -> VotingResult<()> {
        let exists = self
            .bounded("request lookup", self.directory.request_exists(request_id))
            .await?;
        if exists {
            Ok(())
        } else {
            Err(VotingError::RequestNotFound { request_id })
        }
    }

    /// Fresh counts plus the user's own vote types.
    async fn summary(&self, request_id: RequestId, user_id: UserId) -> VotingResult<VoteSummary> {
        let counts = self
            .bounded("vote count", self.store.get_counts(request_id))
            .await?;
        let membership = self
            .bounded(
                "vote membership",
                self.store.get_user_vote_types(request_id, user_id),
            )
            .await?;
        Ok(VoteSummary::new(counts, membership))
    }

    fn gate(actor: &Principal, action: Action) -> VotingResult<()> {
        authorize(actor, action).map_err(|denied| {
            warn!(user_id = actor.id, role = %actor.role, action = action.as_str(), "[ft-02] action denied");
            VotingError::from(denied)
        })
    }
}

#[async_trait]
impl<S, D> VotingApi for VotingService<S, D>
where
    S: VoteStore + 'static,
    D: RequestDirectory + 'static,
{
    async fn add_vote(
        &self,
        actor: &Principal,
        request_id: RequestId,
        vote_type: Option<&str>,
    ) -> VotingResult<VoteOutcome> {
        let vote_type = VoteType::parse(vote_type)?;
        Self::gate(actor, Action::Vote)?;
        self.ensure_request(request_id).await?;

        match self
            .bounded("vote create", self.store.create(request_id, actor.id, vote_type))
            .await
        {
            Ok(_) => {}
            Err(e @ VotingError::AlreadyVoted { .. }) => {
                warn!(request_id, user_id = actor.id, %vote_type, "[ft-02] duplicate vote rejected");
                return Err(e);
            }
            Err(e) => return Err(e),
        }

        // A delete that cascaded between the lookup and the insert would
        // leave this row orphaned; take it back out.
        let still_exists = self
            .bounded("request recheck", self.directory.request_exists(request_id))
            .await?;
        if !still_exists {
            self.bounded(
                "vote rollback",
                self.store.delete(request_id, actor.id, vote_type),
            )
            .await?;
            warn!(request_id, user_id = actor.id, %vote_type, "[ft-02] request deleted mid-vote, vote rolled back");
            return Err(VotingError::RequestNotFound { request_id });
        }
        info!(request_id, user_id = actor.id, %vote_type, "[ft-02] vote added");

        let summary = self.summary(request_id, actor.id).await?;
        Ok(VoteOutcome::added(summary))
    }

    async fn remove_vote(
        &self,
        actor: &Principal,
        request_id: RequestId,
        vote_type: Option<&str>,
    ) -> VotingResult<VoteOutcome> {
        let vote_type = VoteType::parse(vote_type)?;
        Self::gate(actor, Action::Vote)?;

        let existing = self
            .bounded(
                "vote lookup",
                self.store
                    .find_by_request_and_user(request_id, actor.id, vote_type),
            )
            .await?;
        if existing.is_none() {
            return Err(VotingError::VoteNotFound);
        }

        self.bounded(
            "vote delete",
            self.store.delete(request_id, actor.id, vote_type),
        )
        .await?;
        info!(request_id, user_id = actor.id, %vote_type, "[ft-02] vote removed");

        let summary = self.summary(request_id, actor.id).await?;
        Ok(VoteOutcome::removed(summary))
    }

    async fn get_votes(&self, actor: &Principal, request_id: RequestId) -> VotingResult<VoteSummary> {
        self.summary(request_id, actor.id).await
    }

    async fn get_voters(&self, actor: &Principal, request_id: RequestId) -> VotingResult<Voters> {
        Self::gate(actor, Action::ViewAnalytics)?;
        self.ensure_request(request_id).await?;

        let upvoters = self
            .bounded("upvoter export", self.store.get_upvoters(request_id))
            .await?;
        let likers = self
            .bounded("liker export", self.store.get_likers(request_id))
            .await?;
        Ok(Voters { upvoters, likers })
    }
}
