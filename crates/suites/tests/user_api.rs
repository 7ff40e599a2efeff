//! User-management API scenarios.
#![allow(missing_docs, clippy::unwrap_used, clippy::panic)]

use pretty_assertions::{assert_eq, assert_ne};
use restcheck_application::{
    ApplicationError, ApplicationResult, FixtureProvider, RandomUser, authenticated, test_data,
};
use restcheck_domain::{
    DomainError, condition, has_message, has_status_code, is_json,
    models::{FullUser, Info},
};
use restcheck_suites::Suite;

#[tokio::test]
async fn register_user_with_games() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let user = RandomUser::with_games().provide();

    let response = suite.users.register_user(&user).await?;
    let info: Info = response.field("info")?;

    assert_eq!(response.as_response().status_code(), 201);
    assert_eq!(info.message, "User created");
    response.should_all(&[&has_status_code(201), &has_message("User created")])?;
    Ok(())
}

#[tokio::test]
async fn register_user() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let user = RandomUser::new().provide();

    suite
        .users
        .register_user(&user)
        .await?
        .should(has_status_code(201))?
        .should(has_message("User created"))?;
    Ok(())
}

#[tokio::test]
async fn register_login_exists() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let user = RandomUser::new().provide();

    suite.users.register_user(&user).await?;
    suite
        .users
        .register_user(&user)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Login already exist"))?;
    Ok(())
}

#[tokio::test]
async fn register_without_password() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let user = FullUser {
        pass: None,
        ..RandomUser::new().provide()
    };

    suite
        .users
        .register_user(&user)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Missing login or password"))?;
    Ok(())
}

#[tokio::test]
async fn admin_auth() -> ApplicationResult<()> {
    let suite = Suite::start().await?;

    let token = suite
        .users
        .auth(&suite.admin())
        .await?
        .should(has_status_code(200))?
        .as_jwt()?;

    assert!(!token.is_empty());
    Ok(())
}

#[tokio::test]
async fn user_auth() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let user = RandomUser::new().provide();

    suite.users.register_user(&user).await?;
    let auth = authenticated(&suite.users, user.clone()).await?;

    assert_eq!(auth.user, user);
    assert!(!auth.token.is_empty());
    Ok(())
}

#[tokio::test]
async fn unregistered_user_cannot_auth() -> ApplicationResult<()> {
    let suite = Suite::start().await?;

    suite
        .users
        .auth(&RandomUser::new().provide())
        .await?
        .should(has_status_code(401))?;
    Ok(())
}

#[tokio::test]
async fn admin_user_info() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let admin = authenticated(&suite.users, suite.admin()).await?;

    let info: FullUser = suite
        .users
        .get_user_info(&admin.token)
        .await?
        .should(has_status_code(200))?
        .as_model()?;

    assert_eq!(info.login, suite.settings.admin.login);
    Ok(())
}

#[tokio::test]
async fn user_info_with_invalid_jwt() -> ApplicationResult<()> {
    let suite = Suite::start().await?;

    suite
        .users
        .get_user_info("abracadabra")
        .await?
        .should(has_status_code(401))?;
    Ok(())
}

#[tokio::test]
async fn user_info_without_jwt() -> ApplicationResult<()> {
    let suite = Suite::start().await?;

    suite
        .users
        .get_user_info_anonymous()
        .await?
        .should(has_status_code(401))?;
    Ok(())
}

#[tokio::test]
async fn change_user_password() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let mut user = RandomUser::new().provide();
    let old_pass = user.pass.clone();
    suite.users.register_user(&user).await?;
    let token = authenticated(&suite.users, user.clone()).await?.token;
    let new_pass = test_data::random_password();

    suite
        .users
        .update_user_pass(&new_pass, &token)
        .await?
        .should(has_status_code(200))?
        .should(has_message("User password successfully changed"))?;

    user.pass = Some(new_pass);
    let relogged = authenticated(&suite.users, user).await?;
    let updated: FullUser = suite
        .users
        .get_user_info(&relogged.token)
        .await?
        .as_model()?;

    assert_ne!(updated.pass, old_pass);
    Ok(())
}

#[tokio::test]
async fn admin_password_cannot_change() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let admin = authenticated(&suite.users, suite.admin()).await?;

    suite
        .users
        .update_user_pass("newUserPassword777", &admin.token)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Cant update base users"))?;
    Ok(())
}

#[tokio::test]
async fn delete_user() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let user = RandomUser::new().provide();
    suite.users.register_user(&user).await?;
    let auth = authenticated(&suite.users, user).await?;
    let before = suite.user_api().user_count();

    suite
        .users
        .delete_user(&auth.token)
        .await?
        .should(has_status_code(200))?
        .should(has_message("User successfully deleted"))?;

    assert_eq!(suite.user_api().user_count(), before - 1);
    suite
        .users
        .auth(&auth.user)
        .await?
        .should(has_status_code(401))?;
    Ok(())
}

#[tokio::test]
async fn admin_cannot_be_deleted() -> ApplicationResult<()> {
    let suite = Suite::start().await?;
    let admin = authenticated(&suite.users, suite.admin()).await?;

    suite
        .users
        .delete_user(&admin.token)
        .await?
        .should(has_status_code(400))?
        .should(has_message("Cant delete base users"))?;
    Ok(())
}

#[tokio::test]
async fn all_user_logins() -> ApplicationResult<()> {
    let suite = Suite::start().await?;

    let logins: Vec<String> = suite
        .users
        .get_all_users()
        .await?
        .should(has_status_code(200))?
        .should(is_json())?
        .as_list()?;

    assert!(logins.len() >= 3);
    assert!(logins.contains(&suite.settings.admin.login));
    Ok(())
}

#[tokio::test]
async fn failed_chain_names_condition_and_history() -> ApplicationResult<()> {
    let suite = Suite::start().await?;

    let error = suite
        .users
        .get_user_info_anonymous()
        .await?
        .should(has_status_code(401))?
        .should(has_message("x"))
        .unwrap_err();

    let ApplicationError::Domain(DomainError::Assertion(failure)) = &error else {
        panic!("expected an assertion failure, got {error}");
    };
    assert_eq!(failure.evaluated.len(), 2);
    assert_eq!(failure.first().unwrap().actual.as_deref(), Some("Unauthorized"));
    assert!(error.to_string().contains("info.message"));
    Ok(())
}

#[tokio::test]
async fn verified_chain_is_reported() -> ApplicationResult<()> {
    let dir = tempfile::tempdir().unwrap();
    let suite = Suite::start().await?.with_report_dir(dir.path());
    let user = RandomUser::new().provide();

    let verified = suite
        .users
        .register_user(&user)
        .await?
        .should(has_status_code(201))?
        .should(condition("answers quickly", |r| {
            r.duration().as_secs() < 5
        }))?;
    assert_eq!(verified.as_response().status_text(), "Created");

    let path = suite.reports.write(&verified.report("Register user")).await?;
    assert!(path.starts_with(dir.path()));
    assert!(path.ends_with("register-user.json"));

    let saved = suite.reports.read("Register user").await?;
    assert_eq!(saved.status, 201);
    assert_eq!(saved.total, 2);
    assert!(saved.all_passed());
    assert!((saved.pass_rate() - 100.0).abs() < f64::EPSILON);
    Ok(())
}
