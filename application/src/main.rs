use std::{future::IntoFuture as _, io, sync::OnceLock, time};

use application::{config, router, Args, Config, Service};
use axum::extract::MatchedPath;
use axum_client_ip::InsecureClientIp;
use futures::TryFutureExt as _;
#[cfg(feature = "postgres")]
use service::infra::{postgres, Postgres};
use service::infra::{Memory, Storage};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[cfg(feature = "postgres")]
postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        database,
        postgres,
        api,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let storage = open_storage(database.backend, postgres).await?;
    let service = Service::new(storage);

    let cors = CorsLayer::new()
        .allow_methods([
            http::Method::DELETE,
            http::Method::GET,
            http::Method::OPTIONS,
            http::Method::POST,
            http::Method::PUT,
        ])
        .allow_headers([http::header::CONTENT_TYPE])
        .expose_headers([http::header::LOCATION]);
    let cors = if server.cors.origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let mut origins = Vec::with_capacity(server.cors.origins.len());
        for origin in &server.cors.origins {
            origins.push(origin.parse::<http::header::HeaderValue>().map_err(
                |e| {
                    log::error!("`{origin}` is not correct CORS origin: {e}");
                },
            )?);
        }
        cors.allow_origin(AllowOrigin::list(origins))
    };

    let app = router(service, api).layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(|r: &http::Request<_>| {
                tracing::info_span!(
                    "HTTP request",
                    http.client_ip = InsecureClientIp::from(
                        r.headers(),
                        r.extensions()
                    )
                        .map(|ip| ip.0.to_string())
                        .ok(),
                    http.flavor = ?r.version(),
                    http.host = r.uri().host(),
                    http.method = r.method().as_str(),
                    http.route = r
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str),
                    http.scheme = r
                        .uri()
                        .scheme()
                        .map(http::uri::Scheme::as_str),
                    http.target = r
                        .uri()
                        .path_and_query()
                        .map(http::uri::PathAndQuery::as_str),
                    http.user_agent = r
                        .headers()
                        .get("User-Agent")
                        .and_then(|h| h.to_str().ok()),
                    http.status_code = tracing::field::Empty,
                )
            })
            .on_response(
                |r: &http::Response<_>,
                 dur: time::Duration,
                 span: &tracing::Span| {
                    span.record(
                        "http.status_code",
                        tracing::field::display(r.status().as_u16()),
                    );

                    if r.status().is_server_error()
                        || r.status().is_client_error()
                    {
                        tracing::error!(
                            duration = format!("{}ms", dur.as_millis()),
                        );
                    } else {
                        tracing::info!(
                            duration = format!("{}ms", dur.as_millis()),
                        );
                    }
                },
            ),
    );

    let listener = TcpListener::bind((server.host.clone(), server.port))
        .await
        .map_err(|e| {
            log::error!(
                "failed to listen on `{}:{}`: {e}",
                server.host,
                server.port,
            );
        })?;

    log::info!("listening on `{}:{}`", server.host, server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("failed to listen for shutdown signal: {e}");
            }
            log::info!("shutting down");
        })
        .into_future()
        .map_err(|e| log::error!("webserver failed: {e}"))
        .await
}

/// Opens the [`Storage`] of the configured [`config::Backend`].
#[cfg(feature = "postgres")]
async fn open_storage(
    backend: config::Backend,
    conf: config::Postgres,
) -> Result<Storage, ()> {
    match backend {
        config::Backend::Memory => {
            log::warn!("using in-memory storage, data is lost on shutdown");
            Ok(Memory::new().into())
        }
        config::Backend::Postgres => {
            let mut postgres =
                Postgres::new(&conf.into()).map_err(|e| {
                    log::error!("failed to initialize `Postgres` client: {e}");
                })?;

            let report = migrations::runner()
                .run_async(&mut postgres)
                .await
                .map_err(|e| {
                    log::error!("failed to run database migrations: {e}");
                })?;
            log::info!(
                "applied {} database migrations",
                report.applied_migrations().len(),
            );

            Ok(postgres.into())
        }
    }
}

/// Opens the [`Storage`] of the configured [`config::Backend`].
#[cfg(not(feature = "postgres"))]
#[expect(clippy::unused_async, reason = "uniform with `postgres` feature")]
async fn open_storage(
    backend: config::Backend,
    _: config::Postgres,
) -> Result<Storage, ()> {
    match backend {
        config::Backend::Memory => {
            log::warn!("using in-memory storage, data is lost on shutdown");
            Ok(Memory::new().into())
        }
        config::Backend::Postgres => {
            log::error!("built without `postgres` feature");
            Err(())
        }
    }
}
