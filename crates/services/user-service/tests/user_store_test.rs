//! User service over a SeaORM mock connection.

use chrono::{DateTime, Utc};
use common::ErrorKind;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use user_service_lib::infra::Database;
use user_service_lib::repository::entities::user::Model;
use user_service_lib::{user_service, CreateUserDto, UpdateUserDto};

fn model(id: Uuid, first_name: &str) -> Model {
    let at: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    Model {
        id,
        first_name: first_name.to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn create_then_update_then_delete() {
    let id = Uuid::new_v4();
    let connection = MockDatabase::new(DatabaseBackend::Postgres)
        // insert ... returning
        .append_query_results([vec![model(id, "Grace")]])
        // find before update, then update ... returning
        .append_query_results([vec![model(id, "Grace")], vec![model(id, "Amazing")]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let service = user_service(&Database::from_connection(connection));

    let created = assert_ok!(
        service
            .create_user(CreateUserDto {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                email: "grace@example.com".to_string(),
            })
            .await
    );
    assert_eq!(created.id, id);

    let updated = assert_ok!(
        service
            .update_user(
                id,
                UpdateUserDto {
                    first_name: Some("Amazing".to_string()),
                    ..Default::default()
                },
            )
            .await
    );
    assert_eq!(updated.first_name, "Amazing");

    assert_ok!(service.delete_user(id).await);
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let connection = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<Model>::new()])
        .into_connection();
    let service = user_service(&Database::from_connection(connection));

    let err = assert_err!(service.get_user_by_id(Uuid::new_v4()).await);
    assert_eq!(err, ErrorKind::NotFound);
}

#[tokio::test]
async fn ping_uses_connection() {
    let connection = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let service = user_service(&Database::from_connection(connection));

    assert_ok!(service.ping().await);
}
