use access::seed::seed_organizer;
use access::config::SeedConfig;

use crate::common::TestApp;

fn seed(email: Option<&str>, password: Option<&str>) -> SeedConfig {
    SeedConfig {
        organizer_email: email.map(str::to_string),
        organizer_password: password.map(str::to_string),
    }
}

#[tokio::test]
async fn seeding_creates_a_usable_organizer() {
    let app = TestApp::spawn();
    let config = seed(Some("admin@x.com"), Some("seed-password"));

    let id = seed_organizer(&app.service, &config).await.unwrap();

    let descriptor = app
        .organizer_login("admin@x.com", "seed-password")
        .await
        .unwrap();
    assert_eq!(
        descriptor.subject,
        common::Subject::Organizer {
            organizer_id: id.unwrap()
        }
    );
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
    let app = TestApp::spawn();
    let config = seed(Some("admin@x.com"), Some("seed-password"));

    assert!(seed_organizer(&app.service, &config).await.unwrap().is_some());
    assert!(seed_organizer(&app.service, &config).await.unwrap().is_none());
    assert!(
        app.organizer_login("admin@x.com", "seed-password")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn incomplete_seed_config_is_skipped() {
    let app = TestApp::spawn();

    let none = seed_organizer(&app.service, &seed(None, None)).await.unwrap();
    let half = seed_organizer(&app.service, &seed(Some("admin@x.com"), None))
        .await
        .unwrap();

    assert!(none.is_none());
    assert!(half.is_none());
    assert!(app.organizer_login("admin@x.com", "seed-password").await.is_err());
}

#[tokio::test]
async fn seed_password_must_pass_validation() {
    let app = TestApp::spawn();

    let res = seed_organizer(&app.service, &seed(Some("admin@x.com"), Some("short"))).await;

    assert!(matches!(res, Err(common::AccessError::Validation(_))));
}
