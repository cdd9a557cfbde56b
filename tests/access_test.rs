//! Integration tests for token-scoped resource access.

mod helpers;

use http::StatusCode;

use deckhub_auth::policy::{Action, Decision};
use deckhub_auth::token::{AuthorizeError, RefreshError};
use deckhub_core::types::OrganizationId;
use deckhub_entity::organization::{NoMembership, OrganizationRoster};
use deckhub_entity::resource::{ResourceMeta, Visibility};
use deckhub_entity::token::Ability;
use deckhub_entity::user::UserRole;

#[tokio::test]
async fn test_private_deck_status_codes() {
    let app = helpers::TestApp::new();
    let owner = app.create_user("owner@example.com", UserRole::User).await;
    app.create_user("other@example.com", UserRole::User).await;
    let owner_tokens = app.login("owner@example.com").await;
    let other_tokens = app.login("other@example.com").await;

    let deck = ResourceMeta::deck(owner.id, Visibility::Private);
    let status = |bearer: Option<String>, resource: Option<ResourceMeta>| {
        let gate = app.gate.clone();
        async move {
            gate.check(
                bearer.as_deref(),
                Ability::AccessApi,
                resource.as_ref(),
                Action::Read,
                &NoMembership,
            )
            .await
            .expect("gate check")
            .status_code()
        }
    };

    assert_eq!(
        status(Some(owner_tokens.access_token.clone()), Some(deck.clone())).await,
        StatusCode::OK
    );
    assert_eq!(
        status(Some(other_tokens.access_token.clone()), Some(deck.clone())).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(status(None, Some(deck.clone())).await, StatusCode::UNAUTHORIZED);
    assert_eq!(status(Some(owner_tokens.access_token), None).await, StatusCode::NOT_FOUND);
    assert_eq!(status(None, None).await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_limited_deck_in_organization() {
    let app = helpers::TestApp::new();
    let owner = app.create_user("owner@example.com", UserRole::OrganizationOwner).await;
    let member = app.create_user("member@example.com", UserRole::User).await;
    app.create_user("outsider@example.com", UserRole::User).await;

    let org = OrganizationId::new();
    let mut roster = OrganizationRoster::new();
    roster.add_organization(org, owner.id);
    roster.add_member(org, member.id);

    let deck = ResourceMeta::deck(owner.id, Visibility::Limited).in_organization(org);
    let member_token = app.login("member@example.com").await.access_token;
    let outsider_token = app.login("outsider@example.com").await.access_token;

    let read = app
        .gate
        .check(
            Some(&member_token),
            Ability::AccessApi,
            Some(&deck),
            Action::Read,
            &roster,
        )
        .await
        .unwrap();
    assert_eq!(read, Decision::Allow);

    let write = app
        .gate
        .check(
            Some(&member_token),
            Ability::AccessApi,
            Some(&deck),
            Action::Write,
            &roster,
        )
        .await
        .unwrap();
    assert_eq!(write, Decision::Forbidden);

    let outsider = app
        .gate
        .check(
            Some(&outsider_token),
            Ability::AccessApi,
            Some(&deck),
            Action::Read,
            &roster,
        )
        .await
        .unwrap();
    assert_eq!(outsider, Decision::Forbidden);
    assert_eq!(outsider.message(), "Forbidden");
}

#[tokio::test]
async fn test_refresh_token_cannot_call_api_and_access_token_cannot_refresh() {
    let app = helpers::TestApp::new();
    let user = app.create_user("user@example.com", UserRole::User).await;
    let pair = app.login("user@example.com").await;

    assert!(matches!(
        app.tokens.authorize(&pair.refresh_token, Ability::AccessApi).await,
        Err(AuthorizeError::Forbidden)
    ));
    assert_eq!(
        app.tokens
            .authorize(&pair.refresh_token, Ability::IssueAccessToken)
            .await
            .unwrap(),
        user.id
    );
    assert!(matches!(
        app.tokens.refresh(&pair.access_token).await,
        Err(RefreshError::Invalid)
    ));
}

#[tokio::test]
async fn test_rotation_replay_is_detected() {
    let app = helpers::TestApp::new();
    app.create_user("user@example.com", UserRole::User).await;
    let first = app.login("user@example.com").await;

    let second = app.tokens.refresh(&first.refresh_token).await.unwrap();
    assert_eq!(second.refresh_expires_at, first.refresh_expires_at);
    assert!(matches!(
        app.tokens.refresh(&first.refresh_token).await,
        Err(RefreshError::Reused)
    ));

    let third = app.tokens.refresh(&second.refresh_token).await.unwrap();
    assert_ne!(third.refresh_token, second.refresh_token);
}

#[tokio::test]
async fn test_refresh_token_expires_after_ttl() {
    let app = helpers::TestApp::new();
    app.create_user("user@example.com", UserRole::User).await;
    let pair = app.login("user@example.com").await;

    app.clock.advance(app.config.auth.refresh_ttl());
    assert!(matches!(
        app.tokens.refresh(&pair.refresh_token).await,
        Err(RefreshError::Expired)
    ));
}

#[tokio::test]
async fn test_revoked_refresh_token_is_rejected() {
    let app = helpers::TestApp::new();
    app.create_user("user@example.com", UserRole::User).await;
    let pair = app.login("user@example.com").await;

    app.tokens.revoke(&pair.refresh_token).await.unwrap();
    app.tokens.revoke(&pair.refresh_token).await.unwrap();
    assert!(matches!(
        app.tokens.refresh(&pair.refresh_token).await,
        Err(RefreshError::Reused)
    ));
    assert_eq!(app.ledger.len(), 1);
}
