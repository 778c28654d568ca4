//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use tracing::info;

use student_registry::Trace;
#[cfg(debug_assertions)]
use student_registry::doc::ApiDoc;
use student_registry::inbound::http::health::{HealthState, live, ready};
use student_registry::inbound::http::state::HttpState;
use student_registry::inbound::http::students;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    allow_any_origin: bool,
}

fn cors_headers(allow_any_origin: bool) -> DefaultHeaders {
    let headers = DefaultHeaders::new();
    if allow_any_origin {
        headers.add((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
    } else {
        headers
    }
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        allow_any_origin,
    } = deps;

    let api = web::scope("/api").configure(students::configure);

    let mut app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(students::json_config())
        .wrap(cors_headers(allow_any_origin))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Construct an Actix HTTP server over the supplied handler state.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        allow_any_origin,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            allow_any_origin,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "student registry listening");
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use mockable::DefaultClock;
    use rstest::rstest;
    use serde_json::{Value, json};
    use student_registry::domain::{StudentService, TRACE_ID_HEADER};
    use student_registry::outbound::memory::InMemoryStudentRepository;

    fn deps(allow_any_origin: bool) -> AppDependencies {
        let service = Arc::new(StudentService::new(
            Arc::new(InMemoryStudentRepository::new()),
            Arc::new(DefaultClock),
        ));
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::new(service.clone(), service)),
            allow_any_origin,
        }
    }

    #[rstest]
    #[case(true, Some("*"))]
    #[case(false, None)]
    #[actix_rt::test]
    async fn cors_header_follows_configuration(
        #[case] allow_any_origin: bool,
        #[case] expected: Option<&str>,
    ) {
        let app = test::init_service(build_app(deps(allow_any_origin))).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/students").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            expected
        );
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_rt::test]
    async fn malformed_json_is_reported_as_invalid_request() {
        let app = test::init_service(build_app(deps(true))).await;

        let req = test::TestRequest::post()
            .uri("/api/students")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], json!("invalid_request"));
        assert_eq!(body["details"]["code"], json!("malformed_body"));
    }
}
