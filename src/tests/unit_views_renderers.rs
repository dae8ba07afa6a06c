use crate::config::AdminMode;
use crate::features::views::WeekCard;
use crate::features::views::admin::{AdminBoard, AdminController, AdminWeekForm, render_admin_rows};
use crate::features::views::list::{
    LOAD_FAILURE_HTML, details_href, render_list_section, render_week_article, render_week_list,
};
use crate::features::views::source::{WeekSource, load_weeks};
use crate::features::views::views_router;
use crate::tests::{setup_test_state, state_with_repo, setup_test_repo, test_config};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

fn card(id: &str, title: &str) -> WeekCard {
    WeekCard {
        id: id.to_string(),
        title: title.to_string(),
        start_date: "2025-01-06".to_string(),
        description: format!("{} description", title),
        links: Vec::new(),
    }
}

fn weeks_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_week_card_accepts_both_field_styles() {
    let from_static: WeekCard = serde_json::from_str(
        r#"{"id":"week_1","title":"Intro","startDate":"2025-01-06","description":"d","links":["x"]}"#,
    )
    .unwrap();
    let from_api: WeekCard = serde_json::from_str(
        r#"{"week_id":"week_1","title":"Intro","start_date":"2025-01-06","description":"d","links":["x"],"created_at":"2025-01-01 00:00:00"}"#,
    )
    .unwrap();

    assert_eq!(from_static, from_api);
}

#[test]
fn test_admin_rows_escape_text() {
    let board = AdminBoard::new(vec![card("w\"1", "<Intro & Setup>")]);
    let html = render_admin_rows(&board);

    assert!(html.starts_with("<tr><td>&lt;Intro &amp; Setup&gt;</td>"));
    assert!(html.contains(r#"<button class="edit-btn" data-id="w&quot;1">Edit</button>"#));
    assert!(html.contains(r#"<button class="delete-btn" data-id="w&quot;1">Delete</button>"#));
    assert!(render_admin_rows(&AdminBoard::default()).is_empty());
}

#[test]
fn test_week_list_links_to_details() {
    let html = render_week_list(&[card("week_1", "Intro"), card("week_2", "HTML")]);

    assert_eq!(html.matches("<article>").count(), 2);
    assert!(html.contains("<h2>Intro</h2><p>Starts on: 2025-01-06</p>"));
    assert!(html.contains(r#"<a href="details.html?id=week_2">View Details &amp; Discussion</a>"#));
}

#[test]
fn test_details_link_encodes_id() {
    assert_eq!(details_href("week_1"), "details.html?id=week_1");
    assert_eq!(details_href("a&b#c"), "details.html?id=a%26b%23c");

    let html = render_week_article(&card("a&b#c", "Intro"));
    assert!(html.contains(r#"<a href="details.html?id=a%26b%23c">"#));
}

#[test]
fn test_list_section_degrades_on_load_failure() {
    let html = render_list_section(Err(anyhow::anyhow!("network down")));
    assert_eq!(html, LOAD_FAILURE_HTML);
}

#[test]
fn test_admin_form_into_card() {
    let form = AdminWeekForm {
        title: "  Intro ".to_string(),
        start_date: "2025-01-06".to_string(),
        description: " Kickoff ".to_string(),
        week_links: "https://a\n\n  https://b  \n".to_string(),
    };

    let week = form.into_card("week_1".to_string());
    assert_eq!(week.title, "Intro");
    assert_eq!(week.description, "Kickoff");
    assert_eq!(week.links, vec!["https://a", "https://b"]);
}

#[test]
fn test_admin_board_add_and_remove() {
    let mut board = AdminBoard::new(vec![card("a", "A")]);
    board.add(card("b", "B"));

    assert!(board.remove("a"));
    assert!(!board.remove("a"));
    assert_eq!(board.weeks, vec![card("b", "B")]);
}

#[tokio::test]
async fn test_load_weeks_from_static_file() {
    let file = weeks_file(
        r#"[{"id":"week_1","title":"Intro","startDate":"2025-01-06","description":"d","links":[]}]"#,
    );
    let weeks = load_weeks(
        &WeekSource::StaticFile(file.path().to_path_buf()),
        &reqwest::Client::new(),
    )
    .await
    .unwrap();

    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].id, "week_1");
}

#[tokio::test]
async fn test_load_weeks_failures() {
    let client = reqwest::Client::new();

    let missing = WeekSource::StaticFile("/definitely/not/here/weeks.json".into());
    assert!(load_weeks(&missing, &client).await.is_err());

    let malformed = weeks_file("{ not json");
    let source = WeekSource::StaticFile(malformed.path().to_path_buf());
    assert!(load_weeks(&source, &client).await.is_err());
}

#[test]
fn test_static_location_picks_source_kind() {
    assert_eq!(
        WeekSource::static_location("https://cdn.example.com/weeks.json"),
        WeekSource::StaticUrl("https://cdn.example.com/weeks.json".to_string())
    );
    assert_eq!(
        WeekSource::static_location("./static/weeks.json"),
        WeekSource::StaticFile("./static/weeks.json".into())
    );
}

// local mode: edits live only until the next load
#[tokio::test]
async fn test_local_admin_edits_are_not_persisted() {
    let file = weeks_file(
        r#"[{"id":"week_1","title":"Intro","startDate":"2025-01-06","description":"d"}]"#,
    );
    let admin = AdminController::new(
        AdminMode::Local,
        WeekSource::StaticFile(file.path().to_path_buf()),
        reqwest::Client::new(),
    );

    let html = admin.reload().await;
    assert_eq!(html.matches("<tr>").count(), 1);

    let html = admin
        .add_week(AdminWeekForm {
            title: "Extra".to_string(),
            ..AdminWeekForm::default()
        })
        .await;
    assert_eq!(html.matches("<tr>").count(), 2);
    let added = admin.board().await.weeks[1].clone();
    assert!(added.id.starts_with("week_"));

    let html = admin.delete_week("week_1").await;
    assert_eq!(html.matches("<tr>").count(), 1);
    assert!(html.contains("Extra"));

    let html = admin.reload().await;
    assert_eq!(html.matches("<tr>").count(), 1);
    assert!(html.contains("Intro"));
    assert!(!html.contains("Extra"));
}

#[tokio::test]
async fn test_admin_load_failure_leaves_table_empty() {
    let admin = AdminController::new(
        AdminMode::Local,
        WeekSource::StaticFile("/definitely/not/here/weeks.json".into()),
        reqwest::Client::new(),
    );

    assert!(admin.reload().await.is_empty());
    assert!(admin.board().await.weeks.is_empty());
}

#[tokio::test]
async fn test_list_page_route_renders_static_weeks() {
    let file = weeks_file(
        r#"[{"id":"week_9","title":"Finals","startDate":"2025-04-28","description":"Exam"}]"#,
    );
    let repo = setup_test_repo().await;
    let state = state_with_repo(
        Arc::new(repo),
        test_config(&file.path().to_string_lossy()),
    );
    let app = views_router().with_state(state);

    let response = app
        .oneshot(Request::builder().uri("/list").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<h2>Finals</h2>"));
    assert!(html.contains("details.html?id=week_9"));
}

#[tokio::test]
async fn test_admin_routes_use_form_fields() {
    let app = views_router().with_state(setup_test_state().await);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/weeks")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(
                    "title=Routing&start-date=2025-02-03&description=Paths&week-links=https%3A%2F%2Fa",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<td>Routing</td><td>Paths</td>"));
}
