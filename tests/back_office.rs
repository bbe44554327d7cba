use std::path::Path;

use chrono::{Duration, Utc};
use coffee_shop_api::{
    config::{AppConfig, StorageConfig},
    dto::{
        careers::{ApplicationRequest, JobRequest},
        reservations::{ReservationRequest, UpdateReservationStatusRequest},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{PartnershipContent, ReservationStatus, Role},
    routes::params::Pagination,
    services::{careers_service, partnership_service, reservation_service},
    state::AppState,
    storage::{LocalStore, Store},
};
use rust_decimal::Decimal;

async fn setup_state(dir: &Path) -> anyhow::Result<AppState> {
    let store = Store::Local(LocalStore::open(dir).await?);
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        storage: StorageConfig::Local {
            dir: dir.to_path_buf(),
        },
        jwt_secret: "test-secret".into(),
        token_ttl_hours: 1,
        super_admin_email: "boss@example.com".into(),
        loyalty_points_rate: Decimal::ONE,
    };
    Ok(AppState::new(store, config))
}

fn admin() -> AuthUser {
    AuthUser {
        user_id: "admin-1".into(),
        role: Role::Admin,
    }
}

fn customer() -> AuthUser {
    AuthUser {
        user_id: "cust-1".into(),
        role: Role::Customer,
    }
}

fn job(title: &str, is_active: Option<bool>) -> JobRequest {
    JobRequest {
        title: title.into(),
        location: "Downtown".into(),
        job_type: "Full-time".into(),
        salary: String::new(),
        description: String::new(),
        requirements: vec![],
        benefits: vec![],
        is_active,
    }
}

fn application(phone: &str, cv: Option<&str>) -> ApplicationRequest {
    ApplicationRequest {
        name: "Mai".into(),
        email: "mai@example.com".into(),
        phone: phone.into(),
        position: "Barista".into(),
        experience: "2 years".into(),
        note: String::new(),
        cv_file_name: cv.map(str::to_owned),
    }
}

fn reservation(party_size: u32) -> ReservationRequest {
    ReservationRequest {
        name: "Lan".into(),
        phone: "0900000000".into(),
        email: Some("  ".into()),
        note: Some("window seat".into()),
        party_size,
        table_id: "T4".into(),
        datetime: Utc::now() + Duration::days(1),
    }
}

#[tokio::test]
async fn only_active_jobs_are_public() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;

    careers_service::create_job(&state, &admin(), job("Barista", None)).await?;
    careers_service::create_job(&state, &admin(), job("Night baker", Some(false))).await?;
    assert!(matches!(
        careers_service::create_job(&state, &admin(), job("   ", None)).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        careers_service::create_job(&state, &customer(), job("Cashier", None)).await,
        Err(AppError::Forbidden)
    ));

    let open = careers_service::list_open_jobs(&state).await?;
    let titles: Vec<String> = open
        .data
        .map(|list| list.items.into_iter().map(|j| j.title).collect())
        .unwrap_or_default();
    assert_eq!(titles, vec!["Barista"]);

    let all = careers_service::list_all_jobs(&state, &admin()).await?;
    assert_eq!(all.data.map(|list| list.items.len()), Some(2));
    Ok(())
}

#[tokio::test]
async fn applications_require_contact_details() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;

    assert!(matches!(
        careers_service::submit_application(&state, application(" ", None)).await,
        Err(AppError::BadRequest(_))
    ));

    let submitted = careers_service::submit_application(&state, application("0912", Some("")))
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing application"))?;
    assert_eq!(submitted.cv_file_name, None);

    assert!(matches!(
        careers_service::list_applications(&state, &customer(), Pagination::default()).await,
        Err(AppError::Forbidden)
    ));
    let listed =
        careers_service::list_applications(&state, &admin(), Pagination::default()).await?;
    assert_eq!(listed.meta.and_then(|m| m.total), Some(1));
    Ok(())
}

#[tokio::test]
async fn reservations_start_pending_and_admins_confirm() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;

    assert!(matches!(
        reservation_service::create_reservation(&state, reservation(0)).await,
        Err(AppError::BadRequest(_))
    ));

    let created = reservation_service::create_reservation(&state, reservation(4))
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing reservation"))?;
    assert_eq!(created.status, ReservationStatus::Pending);
    assert_eq!(created.email, None);
    assert_eq!(created.note.as_deref(), Some("window seat"));

    assert!(matches!(
        reservation_service::update_reservation_status(
            &state,
            &customer(),
            &created.id,
            UpdateReservationStatusRequest {
                status: ReservationStatus::Confirmed,
            },
        )
        .await,
        Err(AppError::Forbidden)
    ));

    let confirmed = reservation_service::update_reservation_status(
        &state,
        &admin(),
        &created.id,
        UpdateReservationStatusRequest {
            status: ReservationStatus::Confirmed,
        },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("missing reservation"))?;
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    assert!(matches!(
        reservation_service::update_reservation_status(
            &state,
            &admin(),
            "missing",
            UpdateReservationStatusRequest {
                status: ReservationStatus::Cancelled,
            },
        )
        .await,
        Err(AppError::NotFound)
    ));
    Ok(())
}

#[tokio::test]
async fn partnership_copy_is_admin_edited() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(dir.path()).await?;

    let mut content = PartnershipContent::default();
    content.en.tags = vec![" franchise ".into(), "".into(), "b2b".into()];
    assert!(matches!(
        partnership_service::update_partnership(&state, &customer(), content.clone()).await,
        Err(AppError::Forbidden)
    ));

    partnership_service::update_partnership(&state, &admin(), content).await?;
    let stored = partnership_service::get_partnership(&state)
        .await?
        .data
        .ok_or_else(|| anyhow::anyhow!("missing content"))?;
    assert_eq!(stored.en.tags, vec!["franchise", "b2b"]);

    let mut broken = stored.clone();
    broken.vi.pillars.clear();
    assert!(matches!(
        partnership_service::update_partnership(&state, &admin(), broken).await,
        Err(AppError::BadRequest(_))
    ));
    Ok(())
}
