use crate::modules::accounts::core::user::Role;
use crate::modules::notifications::core::notification::{DEFAULT_PAGE_SIZE, NotificationType};
use crate::modules::payments::use_cases::complete_payment::command::CompletePayment;
use crate::modules::payments::use_cases::sweep_overdue::command::SweepOverdue;
use crate::modules::payments::use_cases::upload_batch::command::UploadBatch;
use crate::shared::infrastructure::database::database_tests::memory_pool;
use crate::shell::state::{AppState, Ports, Settings};
use crate::tests::fixtures::records::{batch_csv, date};
use crate::tests::fixtures::users::seeded_users;

async fn sqlite_state() -> AppState {
    let ports = Ports::sqlite(memory_pool().await);
    for user in seeded_users() {
        ports.users.upsert(user).await.unwrap();
    }
    AppState::new(
        ports,
        Settings {
            app_url: "http://localhost:3000".into(),
            cron_secret: None,
        },
    )
}

fn complete(record_id: &str, distributor_id: &str) -> CompletePayment {
    CompletePayment {
        record_id: record_id.into(),
        distributor_id: distributor_id.into(),
        distributor_name: None,
        distributor_email: None,
    }
}

#[tokio::test]
async fn runs_the_daily_cycle_against_sqlite() {
    let state = sqlite_state().await;
    let roster = state
        .users
        .list_by_role(Role::Distributor)
        .await
        .unwrap();
    let (first, second) = (roster[0].id.clone(), roster[1].id.clone());

    let summary = state
        .upload_handler
        .handle(UploadBatch {
            payment_date: date("2024-01-15"),
            csv_text: batch_csv(),
        })
        .await
        .unwrap();
    assert_eq!(summary.records_processed, 3);

    let first_records = state.payment_queries.assigned_to(&first).await.unwrap();
    let second_records = state.payment_queries.assigned_to(&second).await.unwrap();
    assert_eq!((first_records.len(), second_records.len()), (2, 1));

    let receipt = state
        .complete_handler
        .handle(complete(&second_records[0].record.id, &second))
        .await
        .unwrap();
    assert_eq!(receipt.admins_notified, 2);

    let report = state
        .sweep_handler
        .handle(SweepOverdue {
            today: date("2024-01-16"),
        })
        .await
        .unwrap();
    assert_eq!(report.total_incomplete_records, 2);
    assert_eq!(report.distributors_notified, 1);

    let inbox = state
        .notifications
        .list_for_user(&first, DEFAULT_PAGE_SIZE)
        .await
        .unwrap();
    let kinds: Vec<NotificationType> = inbox.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![NotificationType::TaskReminder, NotificationType::TaskAssignment]
    );

    let repeat = state
        .complete_handler
        .handle(complete(&second_records[0].record.id, &second))
        .await
        .unwrap();
    assert_eq!(repeat.admins_notified, 0);
    let summaries = state.payment_queries.record_summaries().await.unwrap();
    assert_eq!(summaries.iter().filter(|s| s.status.is_completed()).count(), 1);
}
