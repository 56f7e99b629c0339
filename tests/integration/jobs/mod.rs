//! Jobs domain integration tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use booking_auth::AuthenticatedUser;
use booking_jobs::repository::mock::{MockBookingRepository, RecordedCall};
use booking_jobs::repository::RepositoryError;
use booking_jobs::{Job, NotificationAudience, YesNo};
use serde_json::json;

use crate::common::{
    authed_request, body_text, parse_body, test_config, unauthed_request, TestApp, ADMIN_ROLE,
    SUPERADMIN_ROLE, TRANSLATOR_ROLE,
};

const CUSTOMER: (i64, &str) = (21, "4");
const TRANSLATOR: (i64, &str) = (34, TRANSLATOR_ROLE);
const ADMIN: (i64, &str) = (1, ADMIN_ROLE);
const SUPERADMIN: (i64, &str) = (2, SUPERADMIN_ROLE);

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_user_jobs_by_user_id() {
        let app = TestApp::new(
            MockBookingRepository::new()
                .respond_with("get_users_jobs", json!({"emergencyJobs": [], "normalJobs": [{"id": 5}]})),
        );

        let (status, body) = parse_body(
            app.send(authed_request(Method::GET, "/jobs?user_id=21", CUSTOMER, None))
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["normalJobs"][0]["id"], 5);
        assert_eq!(
            app.repo.recorded_calls(),
            vec![RecordedCall::GetUsersJobs { user_id: 21 }]
        );
    }

    #[tokio::test]
    async fn test_user_id_wins_over_admin_role() {
        let app = TestApp::new(MockBookingRepository::new());

        app.send(authed_request(Method::GET, "/jobs?user_id=8", ADMIN, None))
            .await;

        assert!(app.repo.calls_to("get_all").is_empty());
        assert_eq!(app.repo.calls_to("get_users_jobs").len(), 1);
    }

    #[tokio::test]
    async fn test_admin_and_superadmin_list_all() {
        for user in [ADMIN, SUPERADMIN] {
            let app = TestApp::new(
                MockBookingRepository::new().respond_with("get_all", json!({"data": [], "total": 0})),
            );

            let (status, body) =
                parse_body(app.send(authed_request(Method::GET, "/jobs", user, None)).await).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["total"], 0);
            assert_eq!(app.repo.calls_to("get_all").len(), 1);
        }
    }

    #[tokio::test]
    async fn test_customer_without_user_id_gets_null() {
        let app = TestApp::new(MockBookingRepository::new());

        let (status, body) =
            parse_body(app.send(authed_request(Method::GET, "/jobs", CUSTOMER, None)).await).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
        assert!(app.repo.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_history_forwards_filters() {
        let app = TestApp::new(MockBookingRepository::new());

        app.send(authed_request(
            Method::GET,
            "/jobs/history?user_id=34&page=3",
            TRANSLATOR,
            None,
        ))
        .await;

        match &app.repo.recorded_calls()[..] {
            [RecordedCall::GetUsersJobsHistory { user_id, filters }] => {
                assert_eq!(*user_id, 34);
                assert_eq!(filters["page"], "3");
                assert_eq!(filters["user_id"], "34");
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_create_then_fetch() {
        let mut stored = Job::new(100);
        stored.status = Some("pending".to_string());
        let app = TestApp::new(
            MockBookingRepository::new()
                .with_job(stored)
                .respond_with("store", json!({"status": "success", "id": 100})),
        );
        let payload = json!({
            "from_language_id": 2,
            "immediate": "no",
            "due_date": "2024-06-01",
            "duration": 60
        });

        let (status, created) = parse_body(
            app.send(authed_request(Method::POST, "/jobs", CUSTOMER, Some(payload.clone())))
                .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], 100);

        let (status, job) =
            parse_body(app.send(authed_request(Method::GET, "/jobs/100", CUSTOMER, None)).await)
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(job["status"], "pending");

        assert_eq!(
            app.repo.recorded_calls(),
            vec![
                RecordedCall::Store {
                    user: AuthenticatedUser::new(CUSTOMER.0, CUSTOMER.1),
                    data: payload.as_object().cloned().unwrap(),
                },
                RecordedCall::FindWithTranslator { id: 100 },
            ]
        );
    }

    #[tokio::test]
    async fn test_update_from_form_post_drops_form_fields() {
        let app = TestApp::new(MockBookingRepository::new());

        let request = Request::builder()
            .method(Method::PATCH)
            .uri("/jobs/55")
            .header(booking_auth::USER_ID_HEADER, "1")
            .header(booking_auth::USER_TYPE_HEADER, ADMIN_ROLE)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("_token=abc123&submit=Update&admin_comments=called+twice"))
            .unwrap();

        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        match &app.repo.recorded_calls()[..] {
            [RecordedCall::UpdateJob { id, data, .. }] => {
                assert_eq!(*id, 55);
                assert_eq!(data.len(), 1);
                assert_eq!(data["admin_comments"], "called twice");
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translator_flow() {
        let app = TestApp::new(MockBookingRepository::new());
        let user = AuthenticatedUser::new(TRANSLATOR.0, TRANSLATOR.1);

        for (uri, body) in [
            ("/jobs/accept", json!({"job_id": 9})),
            ("/jobs/accept-by-id", json!({"job_id": 9})),
            ("/jobs/end", json!({"job_id": 9, "user_id": 34})),
        ] {
            let response = app
                .send(authed_request(Method::POST, uri, TRANSLATOR, Some(body)))
                .await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }

        let data = json!({"job_id": 9}).as_object().cloned().unwrap();
        assert_eq!(
            app.repo.recorded_calls(),
            vec![
                RecordedCall::AcceptJob {
                    data,
                    user: user.clone(),
                },
                RecordedCall::AcceptJobWithId { job_id: 9, user },
                RecordedCall::EndJob {
                    data: json!({"job_id": 9, "user_id": 34})
                        .as_object()
                        .cloned()
                        .unwrap(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_cancel_no_show_and_reopen() {
        let app = TestApp::new(MockBookingRepository::new());

        for uri in ["/jobs/cancel", "/jobs/no-show", "/jobs/reopen"] {
            let (status, body) = parse_body(
                app.send(authed_request(Method::POST, uri, ADMIN, Some(json!({"jobid": 4}))))
                    .await,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "success");
        }

        let operations: Vec<_> = app
            .repo
            .recorded_calls()
            .iter()
            .map(|c| c.operation())
            .collect();
        assert_eq!(operations, vec!["cancel_job", "customer_not_call", "reopen"]);
    }

    #[tokio::test]
    async fn test_job_email_sender_comes_from_config() {
        let app = TestApp::new(MockBookingRepository::new());

        app.send(authed_request(
            Method::POST,
            "/jobs/email",
            ADMIN,
            Some(json!({"user_email_job_id": 12, "user_email": "client@example.com"})),
        ))
        .await;

        match &app.repo.recorded_calls()[..] {
            [RecordedCall::StoreJobEmail {
                admin_sender_email,
                data,
            }] => {
                assert_eq!(admin_sender_email, &test_config().admin_email);
                assert_eq!(data["user_email"], "client@example.com");
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_potential_jobs_for_translator() {
        let app = TestApp::new(
            MockBookingRepository::new().respond_with("get_potential_jobs", json!([{"id": 3}])),
        );

        let (status, body) = parse_body(
            app.send(authed_request(Method::GET, "/jobs/potential", TRANSLATOR, None))
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 3}]));
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let app = TestApp::new(MockBookingRepository::new());

        let (status, body) =
            parse_body(app.send(authed_request(Method::GET, "/jobs/9999", ADMIN, None)).await)
                .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}

mod distance_feed {
    use super::*;

    #[tokio::test]
    async fn test_full_feed_updates_distance_and_job() {
        let app = TestApp::new(MockBookingRepository::new().with_job(Job::new(7)));

        let response = app
            .send(authed_request(
                Method::POST,
                "/distance-feed",
                ADMIN,
                Some(json!({
                    "jobid": 7,
                    "distance": "14",
                    "time": "0:25",
                    "session_time": "1:10",
                    "flagged": "true",
                    "admincomment": "customer late",
                    "manually_handled": "true",
                    "by_admin": "false"
                })),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Record updated!");

        let distance = app.repo.distance(7).unwrap();
        assert_eq!(distance.distance, "14");
        assert_eq!(distance.time, "0:25");

        let job = app.repo.job(7).unwrap();
        assert_eq!(job.flagged.as_deref(), Some("yes"));
        assert_eq!(job.manually_handled.as_deref(), Some("yes"));
        assert_eq!(job.by_admin.as_deref(), Some("no"));
        assert_eq!(job.session_time.as_deref(), Some("1:10"));
    }

    #[tokio::test]
    async fn test_flag_without_comment_stays_unflagged() {
        let app = TestApp::new(MockBookingRepository::new());

        app.send(authed_request(
            Method::POST,
            "/distance-feed",
            ADMIN,
            Some(json!({"jobid": 7, "flagged": "true", "admincomment": ""})),
        ))
        .await;

        match &app.repo.recorded_calls()[..] {
            [RecordedCall::UpdateJobAdminFields { fields, .. }] => {
                assert_eq!(fields.flagged, YesNo::No);
                assert_eq!(fields.manually_handled, YesNo::No);
                assert_eq!(fields.by_admin, YesNo::No);
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_confirmation_when_nothing_written() {
        let app = TestApp::new(MockBookingRepository::new());

        let response = app
            .send(authed_request(
                Method::POST,
                "/distance-feed",
                ADMIN,
                Some(json!({"jobid": 7})),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Record updated!");
        assert!(app.repo.recorded_calls().is_empty());
    }
}

mod notifications {
    use super::*;

    fn failing_sms() -> MockBookingRepository {
        MockBookingRepository::new().with_job(Job::new(3)).fail_with(
            "send_sms_notification_to_translator",
            RepositoryError::Request("SMS gateway unreachable".to_string()),
        )
    }

    #[tokio::test]
    async fn test_push_resend_uses_wildcard_audience() {
        let app = TestApp::new(MockBookingRepository::new().with_job(Job::new(3)));

        let (status, body) = parse_body(
            app.send(authed_request(
                Method::POST,
                "/jobs/notify/push",
                ADMIN,
                Some(json!({"jobid": 3})),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": "Push sent"}));
        match app.repo.calls_to("send_notification_translator").as_slice() {
            [RecordedCall::SendNotificationTranslator { audience, .. }] => {
                assert_eq!(*audience, NotificationAudience::All)
            }
            other => panic!("unexpected calls {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sms_failure_default_is_bad_gateway() {
        let app = TestApp::new(failing_sms());

        let (status, body) = parse_body(
            app.send(authed_request(
                Method::POST,
                "/jobs/notify/sms",
                ADMIN,
                Some(json!({"jobid": 3})),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["error"], "SMS gateway unreachable");
    }

    #[tokio::test]
    async fn test_sms_failure_as_success_compat() {
        let mut config = test_config();
        config.sms_failure_as_success = true;
        let app = TestApp::with_config(failing_sms(), config);

        let (status, body) = parse_body(
            app.send(authed_request(
                Method::POST,
                "/jobs/notify/sms",
                ADMIN,
                Some(json!({"jobid": 3})),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": "SMS gateway unreachable"}));
    }

    #[tokio::test]
    async fn test_sms_lookup_failure_propagates() {
        let app = TestApp::new(MockBookingRepository::new());

        let response = app
            .send(authed_request(
                Method::POST,
                "/jobs/notify/sms",
                ADMIN,
                Some(json!({"jobid": 3})),
            ))
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(app
            .repo
            .calls_to("send_sms_notification_to_translator")
            .is_empty());
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = TestApp::new(MockBookingRepository::new());

        let (status, body) = parse_body(app.send(unauthed_request(Method::GET, "/jobs")).await).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_AUTHENTICATED_USER");
        assert!(app.repo.recorded_calls().is_empty());
    }

    #[tokio::test]
    async fn test_identity_from_request_extension() {
        let app = TestApp::new(MockBookingRepository::new());

        let mut request = unauthed_request(Method::GET, "/jobs/potential");
        request
            .extensions_mut()
            .insert(AuthenticatedUser::new(77, TRANSLATOR_ROLE));

        let response = app.send(request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            app.repo.recorded_calls(),
            vec![RecordedCall::GetPotentialJobs {
                user: AuthenticatedUser::new(77, TRANSLATOR_ROLE),
            }]
        );
    }

    #[tokio::test]
    async fn test_health_needs_no_identity() {
        let app = TestApp::new(MockBookingRepository::new());

        let response = app.send(unauthed_request(Method::GET, "/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }
}
