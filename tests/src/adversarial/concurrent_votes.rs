//! # Concurrent Vote Races
//!
//! Many tasks cast the same vote at once on a multi-threaded runtime. The
//! store's constrained insert must let exactly one through. Votes and
//! status changes racing a delete must not leave rows behind it.

#[cfg(test)]
mod tests {
    use crate::harness::{admin, draft, tracker, tracker_with_store, u1};
    use ft_01_request_lifecycle::{ActivityLog, RequestFilter, RequestLifecycleApi};
    use ft_02_voting::{VotingApi, VotingError};
    use shared_types::{ErrorKind, KeyValueStore, Principal, TrackerError};
    use std::collections::BTreeSet;
    use tokio::task::JoinSet;

    const RACERS: usize = 32;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_duplicate_votes_persist_once() {
        let t = tracker();
        let request = t.lifecycle.submit_request(&u1(), draft("Race")).await.unwrap();
        let id = request.id;

        let mut racers = JoinSet::new();
        for _ in 0..RACERS {
            let voting = t.voting.clone();
            racers.spawn(async move { voting.add_vote(&u1(), id, Some("upvote")).await });
        }

        let mut added = 0;
        let mut conflicts = 0;
        while let Some(joined) = racers.join_next().await {
            match joined.unwrap() {
                Ok(_) => added += 1,
                Err(e) => {
                    assert_eq!(TrackerError::from(e).kind(), ErrorKind::Conflict);
                    conflicts += 1;
                }
            }
        }

        assert_eq!(added, 1);
        assert_eq!(conflicts, RACERS - 1);
        let summary = t.voting.get_votes(&u1(), request.id).await.unwrap();
        assert_eq!(summary.upvotes, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_distinct_voters_all_count() {
        let t = tracker();
        let request = t.lifecycle.submit_request(&u1(), draft("Popular")).await.unwrap();
        let id = request.id;

        let mut racers = JoinSet::new();
        for user in 0..RACERS as u64 {
            let voting = t.voting.clone();
            racers.spawn(async move {
                let voter = Principal::employee(100 + user, format!("u{}@corp.example", user));
                voting.add_vote(&voter, id, Some("like")).await
            });
        }
        while let Some(joined) = racers.join_next().await {
            joined.unwrap().unwrap();
        }

        let summary = t.voting.get_votes(&u1(), request.id).await.unwrap();
        assert_eq!(summary.likes, RACERS as u64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_submissions_get_distinct_ids() {
        let t = tracker();

        let mut submitters = JoinSet::new();
        for n in 0..RACERS {
            let lifecycle = t.lifecycle.clone();
            submitters.spawn(async move {
                lifecycle
                    .submit_request(&u1(), draft(&format!("Idea {}", n)))
                    .await
            });
        }

        let mut ids = BTreeSet::new();
        while let Some(joined) = submitters.join_next().await {
            ids.insert(joined.unwrap().unwrap().id);
        }
        assert_eq!(ids.len(), RACERS);

        let listed = t
            .lifecycle
            .list_requests(&u1(), RequestFilter::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), RACERS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_votes_racing_delete_leave_no_orphans() {
        let (t, kv) = tracker_with_store();
        let request = t.lifecycle.submit_request(&u1(), draft("Doomed")).await.unwrap();
        let id = request.id;

        let mut voters = JoinSet::new();
        for user in 0..RACERS as u64 {
            let voting = t.voting.clone();
            voters.spawn(async move {
                let voter = Principal::employee(200 + user, format!("v{}@corp.example", user));
                voting.add_vote(&voter, id, Some("upvote")).await
            });
        }
        t.lifecycle.delete_request(&admin(), id).await.unwrap();

        while let Some(joined) = voters.join_next().await {
            match joined.unwrap() {
                Ok(_) | Err(VotingError::RequestNotFound { .. }) => {}
                Err(other) => panic!("unexpected vote failure: {:?}", other),
            }
        }

        let prefix = format!("vote/{:020}/", id);
        assert!(kv.prefix_scan(prefix.as_bytes()).unwrap().is_empty());
        let summary = t.voting.get_votes(&u1(), id).await.unwrap();
        assert_eq!((summary.upvotes, summary.likes), (0, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_transitions_log_an_unbroken_chain() {
        let t = tracker();
        let request = t.lifecycle.submit_request(&u1(), draft("Busy")).await.unwrap();
        let id = request.id;
        let targets = ["backlog", "in_progress", "released", "pending"];

        let mut admins = JoinSet::new();
        for n in 0..8 {
            let lifecycle = t.lifecycle.clone();
            let target = targets[n % targets.len()];
            admins.spawn(async move { lifecycle.change_status(&admin(), id, Some(target)).await });
        }
        while let Some(joined) = admins.join_next().await {
            joined.unwrap().unwrap();
        }

        let history = t.requests.history(id).await.unwrap();
        assert_eq!(history.len(), 8);
        for pair in history.windows(2) {
            assert_eq!(pair[1].previous_status, pair[0].new_status);
        }
        let current = t.lifecycle.get_request(&u1(), id).await.unwrap();
        assert_eq!(current.status, history[7].new_status);
    }
}
