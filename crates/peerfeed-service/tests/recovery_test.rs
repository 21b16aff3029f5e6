//! Recovery-key and activation flows.

mod helpers;

use helpers::TestApp;
use peerfeed_core::error::ErrorKind;
use peerfeed_database::repositories::UserRepository;

#[tokio::test]
async fn test_recovery_key_is_mailed_and_single_use() {
    let app = TestApp::new();
    app.create_verified_user("alice").await;

    let notice = app
        .service
        .generate_recovery_key("alice@example.com")
        .await
        .unwrap();
    assert_eq!(notice.message, "Recovery key has been sent to email address");

    let mail = app.mail.last_sent();
    assert_eq!(mail.subject, "Account Recovery [alice]");
    assert!(mail
        .text
        .starts_with("https://peerfeed.dev/auth/sign-in/account-recover?email=alice@example.com&recoveryKey="));
    let (_, key) = mail.text.split_once("recoveryKey=").unwrap();

    app.service
        .recover_account("alice@example.com", key, "newpassword99")
        .await
        .unwrap();

    // The credential changed and the key was consumed.
    app.service
        .validate_user("alice", "newpassword99")
        .await
        .unwrap();
    let err = app
        .service
        .recover_account("alice@example.com", key, "anotherpass")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidRecoveryKey));
}

#[tokio::test]
async fn test_recovery_key_for_unknown_email_fails() {
    let app = TestApp::new();

    let err = app
        .service
        .generate_recovery_key("ghost@example.com")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::AccountNotFound));
}

#[tokio::test]
async fn test_recover_account_rejects_wrong_key() {
    let app = TestApp::new();
    app.create_verified_user("alice").await;
    app.service
        .generate_recovery_key("alice@example.com")
        .await
        .unwrap();

    let err = app
        .service
        .recover_account("alice@example.com", "deadbeef", "newpassword99")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidRecoveryKey));
}

#[tokio::test]
async fn test_undelivered_recovery_key_still_works() {
    let app = TestApp::new();
    app.create_verified_user("alice").await;

    app.mail.set_failing(true);
    let err = app
        .service
        .generate_recovery_key("alice@example.com")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::MailDelivery));

    // The key is not rolled back on delivery failure.
    let key = app
        .repo
        .find_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap()
        .recovery_key
        .unwrap();
    app.service
        .recover_account("alice@example.com", &key, "newpassword99")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_disable_then_activate_roundtrip() {
    let app = TestApp::new();
    app.create_verified_user("alice").await;

    app.service.disable_account("alice").await.unwrap();
    let disabled = app
        .repo
        .find_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    let err = app.service.sign_in(disabled, false).await.unwrap_err();
    assert!(err.is(ErrorKind::Inactive));

    app.service
        .send_activation_mail("alice@example.com")
        .await
        .unwrap();
    let mail = app.mail.last_sent();
    assert_eq!(mail.subject, "RE-Enable Your Account [alice]");
    let token = app.token_from_last_mail();

    let notice = app.service.activate_account(&token).await.unwrap();
    assert_eq!(notice.message, "Account has been activated.");

    let restored = app
        .repo
        .find_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    app.service.sign_in(restored, false).await.unwrap();
}

#[tokio::test]
async fn test_activation_mail_rejected_for_active_account() {
    let app = TestApp::new();
    app.create_verified_user("alice").await;

    let err = app
        .service
        .send_activation_mail("alice@example.com")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[tokio::test]
async fn test_activation_token_expires_after_fifteen_minutes() {
    let app = TestApp::new();
    app.create_verified_user("alice").await;
    app.service.disable_account("alice").await.unwrap();
    app.service
        .send_activation_mail("alice@example.com")
        .await
        .unwrap();
    let token = app.token_from_last_mail();

    app.clock.advance_seconds(15 * 60);
    let err = app.service.activate_account(&token).await.unwrap_err();
    assert!(err.is(ErrorKind::TokenExpired));
}

#[tokio::test]
async fn test_activation_rejects_verification_token() {
    let app = TestApp::new();
    app.service
        .sign_up(TestApp::sign_up_request("alice"))
        .await
        .unwrap();
    let token = app.token_from_last_mail();

    let err = app.service.activate_account(&token).await.unwrap_err();
    assert!(err.is(ErrorKind::InvalidToken));
}
