mod support;

use std::net::SocketAddr;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::Value;
use tokio::net::TcpListener;

struct RunningApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<RunningApp> {
    let app = support::test_app(true).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app.router).await { eprintln!("server error: {}", e); }
    });

    Ok(RunningApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_register_login_create_view_logout() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    // register follows the redirect to the login form, which shows the flash once
    let res = http
        .post(format!("{}/register", app.base_url))
        .form(&[("username", "bob"), ("password", "pw123"), ("is_admin", "on")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.url().path().ends_with("/login"));
    let view: Value = res.json().await?;
    assert_eq!(view["flash"], "registered");

    let res = http
        .post(format!("{}/login", app.base_url))
        .form(&[("username", "bob"), ("password", "pw123")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listings: Value = res.json().await?;
    assert_eq!(listings, serde_json::json!([]));

    let form = Form::new()
        .text("title", "Flat")
        .text("description", "nice")
        .text("price", "100000.0")
        .text("location", "Town")
        .part("image_file", Part::bytes(b"png-bytes".to_vec()).file_name("photo.PNG"))
        .part("additional_images", Part::bytes(b"a".to_vec()).file_name("a.jpg"))
        .part("additional_images", Part::bytes(b"b".to_vec()).file_name("b.jpg"));
    let res = http.post(format!("{}/add", app.base_url)).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listings: Value = res.json().await?;
    assert_eq!(listings[0]["id"], 1);

    let house: Value = http.get(format!("{}/house/1", app.base_url)).send().await?.json().await?;
    assert_eq!(house["title"], "Flat");
    assert_eq!(house["image_file"], "photo.PNG");
    assert_eq!(house["additional_images"], serde_json::json!(["a.jpg", "b.jpg"]));

    let res = http.get(format!("{}/logout", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = http.get(format!("{}/add", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_wrong_password_shows_flash_and_no_session() -> anyhow::Result<()> {
    let app = start_server().await?;
    let http = client();

    http.post(format!("{}/register", app.base_url))
        .form(&[("username", "alice"), ("password", "correct")])
        .send()
        .await?;

    let res = http
        .post(format!("{}/login", app.base_url))
        .form(&[("username", "alice"), ("password", "wrong")])
        .send()
        .await?;
    assert!(res.url().path().ends_with("/login"));
    let view: Value = res.json().await?;
    assert_eq!(view["flash"], "invalid_credentials");

    let res = http.get(format!("{}/logout", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}
