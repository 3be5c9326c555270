//! Request Lifecycle Service - Core business logic
//!
//! Owns submission, the admin-gated status machine and deletion with vote
//! cascade.

use crate::domain::{
    ActivityEntry, LifecycleError, LifecycleResult, NewRequest, Request, RequestFilter,
    RequestStatus,
};
use crate::ports::inbound::RequestLifecycleApi;
use crate::ports::outbound::{ActivityLog, RequestStore, VoteCascade};
use async_trait::async_trait;
use shared_types::{authorize, Action, Principal, RequestId, TimeSource};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Insert attempts before id allocation gives up.
const MAX_ID_ATTEMPTS: u32 = 8;

/// Conditional commit attempts before a transition gives up.
const MAX_COMMIT_ATTEMPTS: u32 = 8;

/// Lifecycle configuration
#[derive(Clone, Debug)]
pub struct LifecycleConfig {
    /// Upper bound on any single store call
    pub store_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(2),
        }
    }
}

/// Request Lifecycle Service implementation
pub struct RequestLifecycleService<S, L, C>
where
    S: RequestStore,
    L: ActivityLog,
    C: VoteCascade,
{
    config: LifecycleConfig,
    store: Arc<S>,
    log: Arc<L>,
    cascade: Arc<C>,
    clock: Arc<dyn TimeSource>,
}

impl<S, L, C> RequestLifecycleService<S, L, C>
where
    S: RequestStore,
    L: ActivityLog,
    C: VoteCascade,
{
    pub fn new(
        store: Arc<S>,
        log: Arc<L>,
        cascade: Arc<C>,
        clock: Arc<dyn TimeSource>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            config,
            store,
            log,
            cascade,
            clock,
        }
    }

    /// Runs a store call under the configured deadline.
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> LifecycleResult<T>
    where
        F: Future<Output = LifecycleResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(Err(e)) => {
                if e.is_infrastructure() {
                    error!(operation, error = %e, "[ft-01] store call failed");
                }
                Err(e)
            }
            Ok(ok) => ok,
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "[ft-01] store call timed out"
                );
                Err(LifecycleError::Timeout { operation })
            }
        }
    }

    fn gate(actor: &Principal, action: Action) -> LifecycleResult<()> {
        authorize(actor, action).map_err(|denied| {
            warn!(user_id = actor.id, role = %actor.role, action = action.as_str(), "[ft-01] action denied");
            LifecycleError::from(denied)
        })
    }

    async fn load(&self, request_id: RequestId) -> LifecycleResult<Request> {
        self.bounded("request lookup", self.store.get(request_id))
            .await
    }
}

#[async_trait]
impl<S, L, C> RequestLifecycleApi for RequestLifecycleService<S, L, C>
where
    S: RequestStore + 'static,
    L: ActivityLog + 'static,
    C: VoteCascade + 'static,
{
    async fn submit_request(
        &self,
        actor: &Principal,
        draft: NewRequest,
    ) -> LifecycleResult<Request> {
        draft.validate()?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = self.bounded("id allocation", self.store.next_id()).await?;
            let request = draft.clone().into_request(id, actor.id, self.clock.now());

            if self
                .bounded("request insert", self.store.insert(&request))
                .await?
            {
                info!(request_id = id, user_id = actor.id, "[ft-01] request submitted");
                return Ok(request);
            }
            debug!(request_id = id, attempt, "[ft-01] request id taken, retrying");
        }

        let err = LifecycleError::IdAllocation {
            attempts: MAX_ID_ATTEMPTS,
        };
        error!(error = %err, "[ft-01] request submission failed");
        Err(err)
    }

    async fn get_request(
        &self,
        _actor: &Principal,
        request_id: RequestId,
    ) -> LifecycleResult<Request> {
        self.load(request_id).await
    }

    async fn list_requests(
        &self,
        _actor: &Principal,
        filter: RequestFilter,
    ) -> LifecycleResult<Vec<Request>> {
        self.bounded("request list", self.store.list(filter)).await
    }

    async fn get_history(
        &self,
        _actor: &Principal,
        request_id: RequestId,
    ) -> LifecycleResult<Vec<ActivityEntry>> {
        self.load(request_id).await?;
        self.bounded("history read", self.log.history(request_id))
            .await
    }

    async fn change_status(
        &self,
        actor: &Principal,
        request_id: RequestId,
        status: Option<&str>,
    ) -> LifecycleResult<Request> {
        let target = RequestStatus::parse(status)?;
        Self::gate(actor, Action::ChangeStatus)?;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            // Reloading surfaces a concurrent delete as RequestNotFound.
            let current = self.load(request_id).await?;
            let entry = ActivityEntry::transition(
                request_id,
                actor.id,
                current.status,
                target,
                self.clock.now(),
            );
            let updated = Request {
                status: target,
                ..current.clone()
            };

            if self
                .bounded(
                    "status commit",
                    self.store.commit_transition(&current, &updated, &entry),
                )
                .await?
            {
                info!(
                    request_id,
                    actor_id = actor.id,
                    from = %current.status,
                    to = %target,
                    "[ft-01] status changed"
                );
                return Ok(updated);
            }
            debug!(request_id, attempt, "[ft-01] request changed before commit, retrying");
        }

        let err = LifecycleError::Contention {
            attempts: MAX_COMMIT_ATTEMPTS,
        };
        error!(request_id, error = %err, "[ft-01] status change failed");
        Err(err)
    }

    async fn delete_request(
        &self,
        actor: &Principal,
        request_id: RequestId,
    ) -> LifecycleResult<()> {
        Self::gate(actor, Action::DeleteRequest)?;
        self.load(request_id).await?;

        let removed_votes = self
            .bounded("vote cascade", self.cascade.delete_votes_for(request_id))
            .await?;
        let existed = self
            .bounded("request delete", self.store.delete(request_id))
            .await?;
        if !existed {
            return Err(LifecycleError::RequestNotFound { request_id });
        }
        // Votes cast between the first pass and the row delete.
        let stragglers = self
            .bounded("vote sweep", self.cascade.delete_votes_for(request_id))
            .await?;

        info!(
            request_id,
            actor_id = actor.id,
            removed_votes = removed_votes + stragglers,
            "[ft-01] request deleted"
        );
        Ok(())
    }
}
