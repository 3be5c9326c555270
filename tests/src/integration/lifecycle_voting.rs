//! # Lifecycle + Voting Flows
//!
//! Request Lifecycle (1) and Voting (2) wired by the runtime container,
//! driven through their inbound APIs.

#[cfg(test)]
mod tests {
    use crate::harness::{admin, draft, tracker, tracker_over, tracker_with_store, u1, u2};
    use ft_01_request_lifecycle::{
        ActivityLog, LifecycleError, RequestFilter, RequestLifecycleApi, RequestStatus,
    };
    use ft_02_voting::{VoteOutcome, VoteType, VotingApi, VotingError};
    use shared_types::{ErrorKind, TrackerError};

    // =========================================================================
    // VOTING
    // =========================================================================

    /// Two employees upvote; a repeat upvote conflicts and changes nothing.
    #[tokio::test]
    async fn test_upvote_scenario() {
        let t = tracker();
        let r1 = t.lifecycle.submit_request(&u1(), draft("R1")).await.unwrap();

        let first = t.voting.add_vote(&u1(), r1.id, Some("upvote")).await.unwrap();
        assert_eq!(first.message, VoteOutcome::ADDED);
        assert_eq!(first.summary.upvotes, 1);
        assert_eq!(first.summary.likes, 0);
        assert_eq!(first.summary.user_votes, vec![VoteType::Upvote]);

        let second = t.voting.add_vote(&u2(), r1.id, Some("upvote")).await.unwrap();
        assert_eq!(second.summary.upvotes, 2);

        let repeat = t
            .voting
            .add_vote(&u1(), r1.id, Some("upvote"))
            .await
            .unwrap_err();
        assert_eq!(TrackerError::from(repeat).kind(), ErrorKind::Conflict);

        let summary = t.voting.get_votes(&u1(), r1.id).await.unwrap();
        assert_eq!(summary.upvotes, 2);
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_counts() {
        let t = tracker();
        let r = t.lifecycle.submit_request(&u1(), draft("R")).await.unwrap();
        t.voting.add_vote(&u2(), r.id, Some("like")).await.unwrap();

        let before = t.voting.get_votes(&u1(), r.id).await.unwrap();
        t.voting.add_vote(&u1(), r.id, Some("like")).await.unwrap();
        let after = t.voting.remove_vote(&u1(), r.id, Some("like")).await.unwrap();

        assert_eq!(after.message, VoteOutcome::REMOVED);
        assert_eq!(after.summary.upvotes, before.upvotes);
        assert_eq!(after.summary.likes, before.likes);
        assert!(!after.summary.user_votes.contains(&VoteType::Like));
    }

    #[tokio::test]
    async fn test_vote_types_are_independent() {
        let t = tracker();
        let r = t.lifecycle.submit_request(&u1(), draft("R")).await.unwrap();

        t.voting.add_vote(&u1(), r.id, Some("upvote")).await.unwrap();
        let both = t.voting.add_vote(&u1(), r.id, Some("like")).await.unwrap();
        assert_eq!(
            both.summary.user_votes,
            vec![VoteType::Upvote, VoteType::Like]
        );

        let only_like = t
            .voting
            .remove_vote(&u1(), r.id, Some("upvote"))
            .await
            .unwrap();
        assert_eq!(only_like.summary.upvotes, 0);
        assert_eq!(only_like.summary.likes, 1);
        assert_eq!(only_like.summary.user_votes, vec![VoteType::Like]);
    }

    #[tokio::test]
    async fn test_vote_on_missing_request_is_not_found() {
        let t = tracker();
        assert!(matches!(
            t.voting.add_vote(&u1(), 404, Some("upvote")).await,
            Err(VotingError::RequestNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_voters_export_follows_cast_order() {
        let t = tracker();
        let r = t.lifecycle.submit_request(&u1(), draft("R")).await.unwrap();
        t.voting.add_vote(&u2(), r.id, Some("upvote")).await.unwrap();
        t.voting.add_vote(&u1(), r.id, Some("upvote")).await.unwrap();
        t.voting.add_vote(&u1(), r.id, Some("like")).await.unwrap();

        let voters = t.voting.get_voters(&admin(), r.id).await.unwrap();
        // Same clock tick for every vote; ties break on user id.
        assert_eq!(voters.upvoters, vec![1, 2]);
        assert_eq!(voters.likers, vec![1]);

        assert!(matches!(
            t.voting.get_voters(&u1(), r.id).await,
            Err(VotingError::Forbidden(_))
        ));
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Admin releases a backlog request; an employee cannot.
    #[tokio::test]
    async fn test_release_scenario() {
        let t = tracker();
        let r1 = t.lifecycle.submit_request(&u1(), draft("R1")).await.unwrap();
        t.lifecycle
            .change_status(&admin(), r1.id, Some("backlog"))
            .await
            .unwrap();
        let before = t.lifecycle.get_history(&u1(), r1.id).await.unwrap().len();

        let released = t
            .lifecycle
            .change_status(&admin(), r1.id, Some("released"))
            .await
            .unwrap();
        assert_eq!(released.status, RequestStatus::Released);

        let history = t.lifecycle.get_history(&u1(), r1.id).await.unwrap();
        assert_eq!(history.len(), before + 1);
        let last = history.last().unwrap();
        assert_eq!(last.previous_status, RequestStatus::Backlog);
        assert_eq!(last.new_status, RequestStatus::Released);
        assert_eq!(last.actor_id, admin().id);

        let r2 = t.lifecycle.submit_request(&u1(), draft("R2")).await.unwrap();
        t.lifecycle
            .change_status(&admin(), r2.id, Some("backlog"))
            .await
            .unwrap();
        assert!(matches!(
            t.lifecycle
                .change_status(&u1(), r2.id, Some("released"))
                .await,
            Err(LifecycleError::Forbidden(_))
        ));
        let unchanged = t.lifecycle.get_request(&u1(), r2.id).await.unwrap();
        assert_eq!(unchanged.status, RequestStatus::Backlog);
    }

    #[tokio::test]
    async fn test_admin_gate_precedes_existence() {
        let t = tracker();
        assert!(matches!(
            t.lifecycle.change_status(&u1(), 77, Some("backlog")).await,
            Err(LifecycleError::Forbidden(_))
        ));
        assert!(matches!(
            t.lifecycle.delete_request(&u1(), 77).await,
            Err(LifecycleError::Forbidden(_))
        ));
        assert!(matches!(
            t.lifecycle.change_status(&admin(), 77, Some("backlog")).await,
            Err(LifecycleError::RequestNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_cascades_votes() {
        let t = tracker();
        let r = t.lifecycle.submit_request(&u1(), draft("R")).await.unwrap();
        let keep = t.lifecycle.submit_request(&u1(), draft("Keep")).await.unwrap();
        t.voting.add_vote(&u1(), r.id, Some("upvote")).await.unwrap();
        t.voting.add_vote(&u2(), r.id, Some("like")).await.unwrap();
        t.voting.add_vote(&u2(), keep.id, Some("like")).await.unwrap();

        t.lifecycle.delete_request(&admin(), r.id).await.unwrap();

        // Deleted request: votes gone, a new vote is refused.
        let summary = t.voting.get_votes(&u1(), r.id).await.unwrap();
        assert_eq!((summary.upvotes, summary.likes), (0, 0));
        assert!(matches!(
            t.voting.add_vote(&u1(), r.id, Some("upvote")).await,
            Err(VotingError::RequestNotFound { .. })
        ));

        // Other requests untouched.
        assert_eq!(t.voting.get_votes(&u1(), keep.id).await.unwrap().likes, 1);

        let remaining = t
            .lifecycle
            .list_requests(&u1(), RequestFilter::default())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let t = tracker();
        let a = t.lifecycle.submit_request(&u1(), draft("A")).await.unwrap();
        t.lifecycle.submit_request(&u1(), draft("B")).await.unwrap();
        t.lifecycle
            .change_status(&admin(), a.id, Some("in_progress"))
            .await
            .unwrap();

        let in_progress = t
            .lifecycle
            .list_requests(&u2(), RequestFilter::with_status(RequestStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].id, a.id);

        let pending = t
            .lifecycle
            .list_requests(&u2(), RequestFilter::with_status(RequestStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
    }

    // =========================================================================
    // RESTART
    // =========================================================================

    /// The highest id is deleted before a restart; the next submission
    /// gets a fresh id with no inherited history or votes.
    #[tokio::test]
    async fn test_restart_after_deleting_highest_id_issues_fresh_id() {
        let (before, kv) = tracker_with_store();
        let kept = before.lifecycle.submit_request(&u1(), draft("Kept")).await.unwrap();
        let gone = before.lifecycle.submit_request(&u1(), draft("Gone")).await.unwrap();
        before
            .lifecycle
            .change_status(&admin(), gone.id, Some("released"))
            .await
            .unwrap();
        before.voting.add_vote(&u2(), gone.id, Some("upvote")).await.unwrap();
        before.lifecycle.delete_request(&admin(), gone.id).await.unwrap();
        drop(before);

        let after = tracker_over(kv);
        let fresh = after.lifecycle.submit_request(&u1(), draft("Fresh")).await.unwrap();
        assert!(fresh.id > gone.id);
        assert_ne!(fresh.id, kept.id);
        assert_eq!(fresh.status, RequestStatus::Pending);
        assert!(after
            .lifecycle
            .get_history(&u1(), fresh.id)
            .await
            .unwrap()
            .is_empty());
        let summary = after.voting.get_votes(&u1(), fresh.id).await.unwrap();
        assert_eq!((summary.upvotes, summary.likes), (0, 0));

        // The deleted request stays gone, its audit trail preserved.
        assert!(matches!(
            after.lifecycle.get_request(&u1(), gone.id).await,
            Err(LifecycleError::RequestNotFound { .. })
        ));
        assert_eq!(after.requests.history(gone.id).await.unwrap().len(), 1);
    }

    // =========================================================================
    // OUTAGES
    // =========================================================================

    #[tokio::test]
    async fn test_store_outage_is_infrastructure_for_both_subsystems() {
        let (t, kv) = tracker_with_store();
        let r = t.lifecycle.submit_request(&u1(), draft("R")).await.unwrap();
        kv.set_available(false);

        let vote_err = t
            .voting
            .add_vote(&u1(), r.id, Some("upvote"))
            .await
            .unwrap_err();
        assert_eq!(TrackerError::from(vote_err).kind(), ErrorKind::Infrastructure);

        let status_err = t
            .lifecycle
            .change_status(&admin(), r.id, Some("backlog"))
            .await
            .unwrap_err();
        assert_eq!(
            TrackerError::from(status_err).kind(),
            ErrorKind::Infrastructure
        );

        kv.set_available(true);
        let request = t.lifecycle.get_request(&u1(), r.id).await.unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
    }
}
