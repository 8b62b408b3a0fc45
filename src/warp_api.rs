use crate::api_model::Action;
use crate::api_model::ActionQuery;
use crate::api_model::AddItem;
use crate::api_model::BodyFormat;
use crate::api_model::ErrorBody;
use crate::api_model::Payload;
use crate::api_model::UpdateItem;
use crate::command_line_interface::CliOptions;
use crate::database_init::Database;
use crate::error::Error;
use crate::error::Result;
use crate::warp_endpoints;
use bytes::Bytes;
use log::debug;
use log::error;
use log::info;
use serde::Serialize;
use warp::filters::BoxedFilter;
use warp::http::header::HeaderMap;
use warp::http::header::HeaderValue;
use warp::http::Method;
use warp::http::StatusCode;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

/// Start web framework with specified APIs.
pub async fn run_server(cli: CliOptions, db: Database) -> Result<()> {
    let package_name = env!("CARGO_PKG_NAME").to_uppercase();
    info!(
        "Starting {} HTTP server on {}:{}",
        package_name, cli.address, cli.port
    );
    let routes = routes(db, &cli)?;
    warp::serve(routes).run((cli.address, cli.port)).await;
    Ok(())
}

/// All endpoints of the server.
///
/// The dispatcher lives at `/` and is routed by the `a` query parameter:
/// every action has its own route accepting only its own method and payload.
/// Requests that no action route accepts get a JSON error explaining why.
pub fn routes(
    db: Database,
    cli: &CliOptions,
) -> Result<impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone> {
    let mut headers = HeaderMap::new();
    if let Some(origin) = &cli.cors_allow_origin {
        let value = HeaderValue::from_str(origin).map_err(|err| {
            Error::bad_request(format!("Invalid CORS origin {:?}, {}", origin, err))
        })?;
        headers.insert("Access-Control-Allow-Origin", value);
    }
    let headers = warp::reply::with::headers(headers);

    // Get version of cargo project.
    let version = warp::path("version")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            debug!("Returning API version...");
            let boxed: Box<dyn Reply> = Box::new(env!("CARGO_PKG_VERSION"));
            boxed
        });

    let with_db = warp::any().map(move || db.clone());

    // GET ?a=list[&offset=N][&count=N]
    // Return an array of items in storage order, empty array if there are none.
    let list = warp::path::end()
        .and(warp::get())
        .and(action(Action::List))
        .and(action_query())
        .and(with_db.clone())
        .map(|query: Result<ActionQuery>, db: Database| {
            respond(query.and_then(|query| warp_endpoints::list_items(&db, &query)))
        });

    // POST ?a=add
    // Input: `text`, as JSON or form fields.
    // Return the created item and the debug_info of the insert.
    let add = warp::path::end()
        .and(warp::post())
        .and(action(Action::Add))
        .and(payload::<AddItem>())
        .and(with_db.clone())
        .map(|body: Result<AddItem>, db: Database| {
            respond(body.and_then(|body| warp_endpoints::add_item(&db, body)))
        });

    // POST ?a=update
    // Input: `id`, `text`, `is_complete`, as JSON or form fields.
    // Return the item as saved and the debug_info of the update.
    let update = warp::path::end()
        .and(warp::post())
        .and(action(Action::Update))
        .and(payload::<UpdateItem>())
        .and(with_db)
        .map(|body: Result<UpdateItem>, db: Database| {
            respond(body.and_then(|body| warp_endpoints::update_item(&db, body)))
        });

    let unmatched = warp::path::end()
        .and(warp::method())
        .and(action_query())
        .map(|method: Method, query: Result<ActionQuery>| match query {
            Ok(query) => error_reply(warp_endpoints::unmatched_action(&method, &query)),
            Err(err) => error_reply(err),
        });

    let routes = version
        .or(list)
        .unify()
        .or(add)
        .unify()
        .or(update)
        .unify()
        .or(static_files(cli))
        .unify()
        .or(unmatched)
        .unify()
        .with(headers)
        .with(warp::log(env!("CARGO_PKG_NAME")));
    Ok(routes)
}

/// Parsed query string, an absent one counts as empty.
/// Like [`payload`], a parse failure is a value for the handler to answer.
fn action_query() -> impl Filter<Extract = (Result<ActionQuery>,), Error = std::convert::Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
        .map(|raw: String| ActionQuery::from_query_string(&raw))
}

/// Passes only requests whose `a` query parameter names `expected`.
fn action(expected: Action) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    action_query()
        .and_then(move |query: Result<ActionQuery>| async move {
            match query {
                Ok(query) if query.action() == Some(expected) => Ok(()),
                _ => Err(warp::reject::not_found()),
            }
        })
        .untuple_one()
}

/// Passes only requests without an `a` query parameter.
fn no_action() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    action_query()
        .and_then(|query: Result<ActionQuery>| async move {
            match query {
                Ok(query) if query.a.is_none() => Ok(()),
                _ => Err(warp::reject::not_found()),
            }
        })
        .untuple_one()
}

/// Decoded request body. Decoding failures are kept as a value
/// so that the handler can answer them instead of falling through to other routes.
fn payload<T>() -> impl Filter<Extract = (Result<T>,), Error = Rejection> + Clone
where
    T: Payload + Send + 'static,
{
    warp::header::optional::<String>("content-type")
        .and(warp::body::bytes())
        .map(|content_type: Option<String>, body: Bytes| {
            T::decode(BodyFormat::from_content_type(content_type.as_deref()), &body)
        })
}

/// Files of `--static-dir`, for requests that carry no action.
fn static_files(cli: &CliOptions) -> BoxedFilter<(Box<dyn Reply>,)> {
    match &cli.static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            no_action()
                .and(warp::fs::dir(dir.clone()))
                .map(|file| {
                    let boxed: Box<dyn Reply> = Box::new(file);
                    boxed
                })
                .boxed()
        }
        None => warp::any()
            .and_then(|| async { Err::<Box<dyn Reply>, Rejection>(warp::reject::not_found()) })
            .boxed(),
    }
}

fn respond<T: Serialize>(result: Result<T>) -> Box<dyn Reply> {
    match result {
        Ok(result) => Box::new(warp::reply::json(&result)),
        Err(err) => error_reply(err),
    }
}

fn error_reply(err: Error) -> Box<dyn Reply> {
    if err.code == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
    } else {
        debug!("Request rejected: {}", err);
    }
    let body = ErrorBody { error: err.msg };
    Box::new(warp::reply::with_status(warp::reply::json(&body), err.code))
}
