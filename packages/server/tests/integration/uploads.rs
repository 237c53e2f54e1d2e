use crate::common::{TestApp, routes};

#[tokio::test]
async fn stored_document_is_retrievable() {
    let app = TestApp::spawn().await;
    let record = app
        .register("Reader", Some(("notes.txt", b"hello uploads".to_vec())))
        .await;
    let file_ref = record["file"].as_str().unwrap();

    let res = app.get(&routes::upload(file_ref)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.text, "hello uploads");
}

#[tokio::test]
async fn content_type_is_guessed_from_the_reference() {
    let app = TestApp::spawn().await;
    let record = app
        .register("Typed", Some(("notes.txt", b"plain text".to_vec())))
        .await;
    let file_ref = record["file"].as_str().unwrap().to_string();

    let res = app
        .client
        .get(format!("http://{}{}", app.addr, routes::upload(&file_ref)))
        .send()
        .await
        .unwrap();
    let content_type = res
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
}

#[tokio::test]
async fn unknown_reference_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::upload("12345-missing.txt")).await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn traversal_reference_is_not_found() {
    let app = TestApp::spawn().await;

    // %2F decodes to a path separator inside the single segment.
    let res = app.get("/uploads/secret%2Fpasswd").await;
    assert_eq!(res.status, 404);
}
