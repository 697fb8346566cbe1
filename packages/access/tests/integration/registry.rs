use common::{AccessError, EventId, OrganizerId};

use crate::common::TestApp;

mod events {
    use super::*;

    #[tokio::test]
    async fn organizers_only_see_their_own_events() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;
        let bob = app.organizer("bob@x.com").await;
        let hack1 = app.event(alice, "Hack1").await;
        let hack2 = app.event(alice, "Hack2").await;
        let other = app.event(bob, "BobFest").await;

        let alices = app.service.list_events(alice).await.unwrap();
        let bobs = app.service.list_events(bob).await.unwrap();

        assert_eq!(alices, vec![hack1, hack2]);
        assert_eq!(bobs, vec![other]);
    }

    #[tokio::test]
    async fn a_new_event_starts_without_rounds() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;

        let event = app.event(alice, "  Hack1 ").await;

        assert_eq!(event.name, "Hack1");
        assert_eq!(event.organizer_id, alice);
        assert!(event.round_ids.is_empty());
        assert_eq!(app.service.get_event(event.id).await.unwrap(), event);
    }

    #[tokio::test]
    async fn unknown_organizer_cannot_create_or_list_events() {
        let app = TestApp::spawn();
        let ghost = OrganizerId::new();

        assert_eq!(
            app.service.create_event(ghost, "Hack1").await.unwrap_err(),
            AccessError::Unauthorized
        );
        assert_eq!(
            app.service.list_events(ghost).await.unwrap_err(),
            AccessError::Unauthorized
        );
    }

    #[tokio::test]
    async fn blank_event_name_is_refused() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;

        let res = app.service.create_event(alice, "   ").await;

        assert!(matches!(res, Err(AccessError::Validation(_))));
        assert!(app.service.list_events(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_event_lookup_fails() {
        let app = TestApp::spawn();

        let res = app.service.get_event(EventId::new()).await;

        assert_eq!(res.unwrap_err(), AccessError::EventNotFound);
    }
}

mod rounds {
    use super::*;

    #[tokio::test]
    async fn rounds_are_appended_in_order() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;
        let event = app.event(alice, "Hack1").await;

        let first = app.service.create_round(alice, event.id, "Ideation").await.unwrap();
        let second = app.service.create_round(alice, event.id, "Finals").await.unwrap();

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert_eq!(first.event_id, event.id);

        let rounds = app.service.list_rounds(event.id).await.unwrap();
        assert_eq!(rounds, vec![first.clone(), second.clone()]);
        let event = app.service.get_event(event.id).await.unwrap();
        assert_eq!(event.round_ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn round_for_an_unknown_event_is_not_found_and_creates_nothing() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;
        let missing = EventId::new();

        let res = app.service.create_round(alice, missing, "Round 1").await;

        assert!(matches!(res, Err(AccessError::NotFound(_))));
        assert_eq!(
            app.service.list_rounds(missing).await.unwrap_err(),
            AccessError::EventNotFound
        );
    }

    #[tokio::test]
    async fn only_the_owner_can_add_rounds() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;
        let bob = app.organizer("bob@x.com").await;
        let event = app.event(alice, "Hack1").await;

        let res = app.service.create_round(bob, event.id, "Sneaky").await;

        assert_eq!(res.unwrap_err(), AccessError::Unauthorized);
        assert!(app.service.list_rounds(event.id).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_rounds_get_distinct_positions() {
        let app = TestApp::spawn();
        let alice = app.organizer("alice@x.com").await;
        let event_id = app.event(alice, "Hack1").await.id;

        let creations = (0..20).map(|n| {
            let service = app.service.clone();
            tokio::spawn(async move {
                service
                    .create_round(alice, event_id, &format!("Round {n}"))
                    .await
            })
        });
        let mut positions: Vec<u32> = futures::future::join_all(creations)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap().position)
            .collect();
        positions.sort_unstable();

        assert_eq!(positions, (0..20).collect::<Vec<u32>>());
        let event = app.service.get_event(event_id).await.unwrap();
        assert_eq!(event.round_ids.len(), 20);
    }
}
