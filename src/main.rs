#[macro_use]
extern crate rocket;

mod config;
mod dashboard;
mod feeds;
mod models;

use config::Settings;
use dashboard::load_dashboard;
use dotenvy::dotenv;
use models::DashboardView;
use reqwest::Client;
use rocket::fs::{FileServer, relative};
use rocket::serde::json::Json;
use rocket::{Build, Rocket, State};
use rocket_dyn_templates::Template;
use std::env;
use tracing::info;

#[get("/")]
async fn index(settings: &State<Settings>, client: &State<Client>) -> Template {
    let view = render_view(settings, client).await;
    Template::render("index", view)
}

#[get("/api/dashboard")]
async fn dashboard_json(
    settings: &State<Settings>,
    client: &State<Client>,
) -> Json<DashboardView> {
    Json(render_view(settings, client).await)
}

async fn render_view(settings: &Settings, client: &Client) -> DashboardView {
    load_dashboard(client, settings).await.into_view(settings)
}

fn build_rocket(settings: Settings, client: Client) -> Rocket<Build> {
    rocket::build()
        .manage(settings)
        .manage(client)
        .mount("/static", FileServer::from(relative!("static")))
        .mount("/", routes![index, dashboard_json])
        .attach(Template::fairing())
}

#[launch]
fn rocket() -> _ {
    dotenv().ok();
    init_tracing();
    let settings = Settings::from_env();
    info!("Serving dashboard against {}", settings.resolve_api_base());
    let client = Client::builder()
        .user_agent("PermitPulseDashboard/0.1")
        .build()
        .expect("failed to build reqwest client");

    build_rocket(settings, client)
}

fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::Status;
    use rocket::local::asynchronous::Client as LocalClient;
    use std::time::Duration;

    fn offline_settings() -> Settings {
        Settings {
            api_base_url: Some("http://127.0.0.1:9".into()),
            deploy_host: None,
            supabase_url: None,
            supabase_anon_key: None,
            request_timeout: Duration::from_millis(300),
        }
    }

    #[rocket::async_test]
    async fn page_renders_fallback_state_when_backend_is_down() {
        let rocket = build_rocket(offline_settings(), Client::new());
        let client = LocalClient::tracked(rocket).await.expect("valid rocket");
        let response = client.get("/").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().await.expect("body");
        assert!(body.contains("PermitPulse"));
        assert!(body.contains("Run autonomy cycle to populate metrics."));
        assert!(body.contains("Not Set"));
    }

    #[rocket::async_test]
    async fn json_api_mirrors_the_page_aggregates() {
        let rocket = build_rocket(offline_settings(), Client::new());
        let client = LocalClient::tracked(rocket).await.expect("valid rocket");
        let response = client.get("/api/dashboard").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let view: DashboardView = response.into_json().await.expect("view json");
        assert_eq!(view.active_city_count, 0);
        assert_eq!(view.stale_city_count, 3);
        assert_eq!(view.rollback_count, 0);
        assert!(!view.supabase_connected);
        assert!(view.metrics.is_empty());
    }
}
