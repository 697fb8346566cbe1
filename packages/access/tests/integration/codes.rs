use std::collections::HashSet;

use common::{AccessError, EventId, EventRole};

use crate::common::TestApp;

mod rotation {
    use super::*;

    #[tokio::test]
    async fn rotating_codes_invalidates_the_previous_pair() {
        let app = TestApp::spawn();
        let organizer_id = app.organizer("alice@x.com").await;
        let event = app.event(organizer_id, "Hack1").await;
        let id = event.id.to_string();

        let first = app
            .service
            .generate_codes(organizer_id, event.id)
            .await
            .unwrap();
        assert!(
            app.event_login(EventRole::Participant, &id, &first.participant_code)
                .await
                .is_ok()
        );

        let second = app
            .service
            .generate_codes(organizer_id, event.id)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(
            app.event_login(EventRole::Participant, &id, &first.participant_code)
                .await
                .unwrap_err(),
            AccessError::InvalidCode
        );
        assert_eq!(
            app.event_login(EventRole::Panelist, &id, &first.panelist_code)
                .await
                .unwrap_err(),
            AccessError::InvalidCode
        );
        assert!(
            app.event_login(EventRole::Participant, &id, &second.participant_code)
                .await
                .is_ok()
        );
        assert!(
            app.event_login(EventRole::Panelist, &id, &second.panelist_code)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn active_codes_reflect_the_latest_rotation() {
        let app = TestApp::spawn();
        let organizer_id = app.organizer("alice@x.com").await;
        let event = app.event(organizer_id, "Hack1").await;

        app.service
            .generate_codes(organizer_id, event.id)
            .await
            .unwrap();
        let latest = app
            .service
            .generate_codes(organizer_id, event.id)
            .await
            .unwrap();

        let active = app
            .service
            .active_codes(organizer_id, event.id)
            .await
            .unwrap();
        assert_eq!(active, latest);
    }

    #[tokio::test]
    async fn active_codes_before_any_rotation_are_not_found() {
        let app = TestApp::spawn();
        let organizer_id = app.organizer("alice@x.com").await;
        let event = app.event(organizer_id, "Hack1").await;

        let res = app.service.active_codes(organizer_id, event.id).await;

        assert!(matches!(res, Err(AccessError::NotFound(_))));
    }

    #[tokio::test]
    async fn codes_are_distinct_across_events() {
        let app = TestApp::spawn();
        let organizer_id = app.organizer("alice@x.com").await;

        let mut seen = HashSet::new();
        for n in 0..20 {
            let event = app.event(organizer_id, &format!("Hack{n}")).await;
            let codes = app
                .service
                .generate_codes(organizer_id, event.id)
                .await
                .unwrap();
            assert!(seen.insert(codes.panelist_code));
            assert!(seen.insert(codes.participant_code));
        }
    }
}

mod ownership {
    use super::*;

    #[tokio::test]
    async fn another_organizer_cannot_rotate_or_read_codes() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;
        let bob = app.organizer("bob@x.com").await;
        let event = app.event(alice, "Hack1").await;
        let codes = app.service.generate_codes(alice, event.id).await.unwrap();

        assert_eq!(
            app.service.generate_codes(bob, event.id).await.unwrap_err(),
            AccessError::Unauthorized
        );
        assert_eq!(
            app.service.active_codes(bob, event.id).await.unwrap_err(),
            AccessError::Unauthorized
        );

        // The refused rotation left alice's codes in place.
        let active = app.service.active_codes(alice, event.id).await.unwrap();
        assert_eq!(active, codes);
    }

    #[tokio::test]
    async fn rotating_codes_of_an_unknown_event_fails() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;

        let res = app.service.generate_codes(alice, EventId::new()).await;

        assert_eq!(res.unwrap_err(), AccessError::EventNotFound);
    }
}

mod concurrency {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_rotations_leave_one_consistent_pair() {
        let app = TestApp::spawn();
        let organizer_id = app.organizer("alice@x.com").await;
        let event_id = app.event(organizer_id, "Hack1").await.id;

        let rotations = (0..16).map(|_| {
            let service = app.service.clone();
            tokio::spawn(async move { service.generate_codes(organizer_id, event_id).await })
        });
        let issued: Vec<_> = futures::future::join_all(rotations)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .collect();

        let active = app
            .service
            .active_codes(organizer_id, event_id)
            .await
            .unwrap();
        // Whatever is active was issued together by a single rotation.
        assert!(issued.contains(&active));

        let id = event_id.to_string();
        let admitted = futures::future::join_all(issued.iter().map(|codes| {
            app.event_login(EventRole::Participant, &id, &codes.participant_code)
        }))
        .await
        .into_iter()
        .filter(Result::is_ok)
        .count();
        assert_eq!(admitted, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn readers_during_rotation_see_whole_pairs() {
        let app = TestApp::spawn();
        let organizer_id = app.organizer("alice@x.com").await;
        let event_id = app.event(organizer_id, "Hack1").await.id;
        let first = app
            .service
            .generate_codes(organizer_id, event_id)
            .await
            .unwrap();

        let writer = {
            let service = app.service.clone();
            tokio::spawn(async move {
                let mut issued = vec![first];
                for _ in 0..100 {
                    issued.push(service.generate_codes(organizer_id, event_id).await.unwrap());
                }
                issued
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let service = app.service.clone();
                tokio::spawn(async move {
                    let mut observed = Vec::new();
                    for _ in 0..100 {
                        observed.push(service.active_codes(organizer_id, event_id).await.unwrap());
                        tokio::task::yield_now().await;
                    }
                    observed
                })
            })
            .collect();

        let issued = writer.await.unwrap();
        for reader in readers {
            for pair in reader.await.unwrap() {
                assert!(issued.contains(&pair), "torn pair observed: {pair:?}");
            }
        }
    }
}
