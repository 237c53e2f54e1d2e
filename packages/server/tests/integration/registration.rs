use serde_json::Value;

use crate::common::{TestApp, registration_form, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let app = TestApp::spawn().await;

        let res = app
            .post_multipart(
                routes::REGISTER,
                registration_form("Ada", Some(("transcript.pdf", vec![0u8; 500]))),
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Registration successful");

        let list = app.get(routes::REGISTRATIONS).await;
        assert_eq!(list.status, 200);
        let records = list.records();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record["firstName"], "Ada");
        assert_eq!(record["lastName"], "Tester");
        assert_eq!(record["email"], "tester@example.com");
        assert_eq!(record["contact"], "5550001234");
        assert_eq!(record["qualification"], "B.Sc. Testing");
        assert_eq!(record["gender"], "other");
        assert!(record["id"].as_i64().is_some());

        let file = record["file"].as_str().unwrap();
        assert!(file.ends_with("-transcript.pdf"), "unexpected ref: {file}");
        assert_eq!(record["fileSize"], "0.49 KB");
    }

    #[tokio::test]
    async fn create_without_file_leaves_reference_unset() {
        let app = TestApp::spawn().await;

        let record = app.register("NoFile", None).await;
        assert_eq!(record["file"], Value::Null);
        assert_eq!(record["fileSize"], Value::Null);
    }

    #[tokio::test]
    async fn missing_required_field_is_rejected() {
        let app = TestApp::spawn().await;

        let form = reqwest::multipart::Form::new()
            .text("firstName", "Ada")
            .text("lastName", "Tester")
            .text("contact", "5550001234")
            .text("qualification", "B.Sc.")
            .text("gender", "other");

        let res = app.post_multipart(routes::REGISTER, form).await;
        assert_eq!(res.status, 400);
        assert!(
            res.body["error"].as_str().unwrap().contains("email"),
            "error should name the missing field: {}",
            res.text
        );

        let list = app.get(routes::REGISTRATIONS).await;
        assert!(list.records().is_empty());
    }

    #[tokio::test]
    async fn unknown_gender_is_rejected() {
        let app = TestApp::spawn().await;

        let form = reqwest::multipart::Form::new()
            .text("firstName", "Ada")
            .text("lastName", "Tester")
            .text("email", "ada@example.com")
            .text("contact", "5550001234")
            .text("qualification", "B.Sc.")
            .text("gender", "martian");

        let res = app.post_multipart(routes::REGISTER, form).await;
        assert_eq!(res.status, 400);
        assert!(res.body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_and_contact_are_permitted() {
        let app = TestApp::spawn().await;

        app.register("First", None).await;
        app.register("Second", None).await;

        let list = app.get(routes::REGISTRATIONS).await;
        assert_eq!(list.records().len(), 2);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let app = TestApp::spawn().await;

        for name in ["One", "Two", "Three"] {
            app.register(name, None).await;
        }

        let names: Vec<String> = app
            .get(routes::REGISTRATIONS)
            .await
            .records()
            .iter()
            .map(|r| r["firstName"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["One", "Two", "Three"]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn update_replaces_fields_wholesale() {
        let app = TestApp::spawn().await;
        let record = app.register("Before", None).await;
        let id = record["id"].as_i64().unwrap() as i32;

        let res = app
            .put_multipart(&routes::registration(id), registration_form("After", None))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Registration updated successfully");

        let records = app.get(routes::REGISTRATIONS).await.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["firstName"], "After");
    }

    #[tokio::test]
    async fn update_without_file_preserves_previous_document() {
        let app = TestApp::spawn().await;
        let record = app
            .register("Keeper", Some(("original.txt", b"original".to_vec())))
            .await;
        let id = record["id"].as_i64().unwrap() as i32;
        let file_before = record["file"].as_str().unwrap().to_string();
        let size_before = record["fileSize"].as_str().unwrap().to_string();

        let res = app
            .put_multipart(&routes::registration(id), registration_form("Keeper", None))
            .await;
        assert_eq!(res.status, 200);

        let records = app.get(routes::REGISTRATIONS).await.records();
        assert_eq!(records[0]["file"], file_before.as_str());
        assert_eq!(records[0]["fileSize"], size_before.as_str());
    }

    #[tokio::test]
    async fn update_with_file_replaces_reference_and_keeps_old_file_on_disk() {
        let app = TestApp::spawn().await;
        let record = app
            .register("Swapper", Some(("old.txt", b"old".to_vec())))
            .await;
        let id = record["id"].as_i64().unwrap() as i32;
        let old_ref = record["file"].as_str().unwrap().to_string();

        let res = app
            .put_multipart(
                &routes::registration(id),
                registration_form("Swapper", Some(("new.txt", vec![0u8; 500]))),
            )
            .await;
        assert_eq!(res.status, 200);

        let records = app.get(routes::REGISTRATIONS).await.records();
        let new_ref = records[0]["file"].as_str().unwrap();
        assert!(new_ref.ends_with("-new.txt"));
        assert_ne!(new_ref, old_ref);
        assert_eq!(records[0]["fileSize"], "0.49 KB");

        // Replaced documents are not garbage-collected.
        let on_disk = app.stored_files();
        assert!(on_disk.contains(&old_ref), "old file should survive: {on_disk:?}");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put_multipart(&routes::registration(999), registration_form("Ghost", None))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Registration not found");
    }

    #[tokio::test]
    async fn update_with_missing_field_is_rejected() {
        let app = TestApp::spawn().await;
        let record = app.register("Partial", None).await;
        let id = record["id"].as_i64().unwrap() as i32;

        let form = reqwest::multipart::Form::new().text("firstName", "OnlyFirst");
        let res = app.put_multipart(&routes::registration(id), form).await;
        assert_eq!(res.status, 400);

        let records = app.get(routes::REGISTRATIONS).await.records();
        assert_eq!(records[0]["firstName"], "Partial");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_record_from_list() {
        let app = TestApp::spawn().await;
        let record = app.register("Doomed", None).await;
        let id = record["id"].as_i64().unwrap() as i32;

        let res = app.delete(&routes::registration(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Registration deleted successfully");

        let list = app.get(routes::REGISTRATIONS).await;
        assert!(list.records().is_empty());
    }

    #[tokio::test]
    async fn second_delete_of_same_id_is_not_found() {
        let app = TestApp::spawn().await;
        let record = app.register("Once", None).await;
        let id = record["id"].as_i64().unwrap() as i32;

        assert_eq!(app.delete(&routes::registration(id)).await.status, 200);

        let res = app.delete(&routes::registration(id)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Registration not found");
    }

    #[tokio::test]
    async fn delete_leaves_other_records_alone() {
        let app = TestApp::spawn().await;
        let keep = app.register("Keep", None).await;
        let doomed = app.register("Drop", None).await;

        let res = app
            .delete(&routes::registration(
                doomed["id"].as_i64().unwrap() as i32
            ))
            .await;
        assert_eq!(res.status, 200);

        let records = app.get(routes::REGISTRATIONS).await.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["id"], keep["id"]);
    }
}
